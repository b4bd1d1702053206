use crate::error::Error;
use url::Url;

/// Options for building URLs from a base URL and path segments.
///
/// The default preserves any existing query/fragment and does not
/// trim trailing empty path segments.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BuildUrlOptions {
    /// When true, clear any existing query string on the base URL.
    pub clear_query: bool,
    /// When true, clear any existing fragment (`#...`) on the base URL.
    pub clear_fragment: bool,
    /// When true, drop a trailing empty path segment before appending segments.
    pub pop_if_empty: bool,
}

impl BuildUrlOptions {
    /// Options used by the blocking transport when joining a descriptor path.
    pub const REQUEST: Self = Self {
        clear_query: true,
        clear_fragment: true,
        pop_if_empty: true,
    };
}

/// Appends a slash-separated descriptor path to `base_url`.
///
/// Empty segments are skipped, so `"v1//policy"` and `"v1/policy/"` both
/// resolve to `{base}/v1/policy`. An empty path returns the base URL
/// unchanged, query included.
pub(crate) fn build_url(base_url: &Url, path: &str, options: BuildUrlOptions) -> Result<Url, Error> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Ok(base_url.clone());
    }
    let mut url = base_url.clone();
    if options.clear_query {
        url.set_query(None);
    }
    if options.clear_fragment {
        url.set_fragment(None);
    }
    {
        let mut path_segments = url
            .path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?;
        if options.pop_if_empty {
            path_segments.pop_if_empty();
        }
        for segment in segments {
            path_segments.push(segment);
        }
    }
    Ok(url)
}
