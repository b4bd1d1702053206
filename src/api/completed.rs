use super::{RequestDescriptor, ResponseDescriptor};
use crate::error::Error;
use serde::de::DeserializeOwned;

/// A request that has been sent, together with what went out and what came back.
///
/// Typed accessors for each resource family are implemented on
/// `Completed<Token>`, `Completed<RoleTokenList>` and so on.
#[derive(Debug, Clone)]
pub struct Completed<R> {
    request: R,
    descriptor: RequestDescriptor,
    response: ResponseDescriptor,
}

impl<R> Completed<R> {
    pub(crate) fn new(request: R, descriptor: RequestDescriptor, response: ResponseDescriptor) -> Self {
        Self {
            request,
            descriptor,
            response,
        }
    }

    pub fn request(&self) -> &R {
        &self.request
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn response(&self) -> &ResponseDescriptor {
        &self.response
    }

    pub fn into_response(self) -> ResponseDescriptor {
        self.response
    }

    /// Parses the response body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        self.response.json()
    }
}
