use std::time::Duration;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
pub(crate) const DEFAULT_API_VERSION: &str = "v1";
pub(crate) const USER_AGENT: &str = concat!("k2hr3-rs/", env!("CARGO_PKG_VERSION"));
