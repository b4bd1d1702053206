use super::Transport;
use crate::api::{HttpMethod, RequestDescriptor, ResponseDescriptor};
use crate::build_url::{build_url, BuildUrlOptions};
use crate::client_defaults::DEFAULT_TIMEOUT;
use crate::error::Error;
use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::{Certificate, Method};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

pub struct HttpTransportBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    disable_redirect: bool,
    ca_certs: Vec<Certificate>,
}

impl HttpTransportBuilder {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            timeout: Some(DEFAULT_TIMEOUT),
            disable_redirect: false,
            ca_certs: Vec::new(),
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Removes the request timeout entirely.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn disable_redirect(mut self, disable: bool) -> Self {
        self.disable_redirect = disable;
        self
    }

    pub fn add_ca_cert_pem(mut self, ca_pem: &[u8]) -> Result<Self, Error> {
        self.ca_certs.push(Certificate::from_pem(ca_pem)?);
        Ok(self)
    }

    pub fn build(self) -> Result<HttpTransport, Error> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.disable_redirect {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }
        for cert in self.ca_certs {
            builder = builder.add_root_certificate(cert);
        }
        let http = builder.build()?;
        Ok(HttpTransport {
            base_url: self.base_url,
            http,
        })
    }
}

/// Blocking transport backed by `reqwest`.
///
/// Descriptor paths are appended to the base URL, the query document is
/// rendered with [`RequestDescriptor::query_pairs`] and the body is sent as
/// serialized JSON.
pub struct HttpTransport {
    base_url: Url,
    http: HttpClient,
}

impl HttpTransport {
    pub fn builder(base_url: impl AsRef<str>) -> Result<HttpTransportBuilder, Error> {
        HttpTransportBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn build_url(&self, path: &str) -> Result<Url, Error> {
        build_url(&self.base_url, path, BuildUrlOptions::REQUEST)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Delete => Method::DELETE,
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor, Error> {
        let url = self.build_url(&request.path)?;
        debug!("sending {} {}", request.method, url.path());
        let mut req = self.http.request(to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }
        if let Some(body) = request.body_json() {
            req = req.body(body);
        }
        let resp = req.send()?;

        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in resp.headers() {
            let Ok(value) = value.to_str() else {
                continue;
            };
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        let body = resp.text()?;
        debug!("received {} from {}", status, url);
        Ok(ResponseDescriptor {
            status,
            url,
            headers,
            body,
        })
    }
}
