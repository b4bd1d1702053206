mod http;

pub use http::{HttpTransport, HttpTransportBuilder};

use crate::api::{RequestDescriptor, ResponseDescriptor};
use crate::error::Error;

/// Sends a [`RequestDescriptor`] and reports the raw response.
///
/// Implementations own everything below the descriptor: joining the path
/// onto a base URL, TLS, timeouts and connection failures. A non-2xx status
/// is still a response, not an error.
pub trait Transport {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor, Error> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor, Error> {
        (**self).send(request)
    }
}
