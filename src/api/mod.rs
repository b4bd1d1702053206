mod completed;
mod context;
mod descriptor;
mod response;

pub use completed::Completed;
pub use context::{ApiContext, AuthToken};
pub use descriptor::{HttpMethod, RequestDescriptor, Route};
pub use response::ResponseDescriptor;

use crate::error::Error;
use crate::transport::Transport;
use log::debug;

/// A request value for one K2HR3 resource family.
///
/// Implementors only provide [`Resource::route`]; descriptor computation and
/// sending are shared. `route` is pure: it returns path, body and query
/// together and never stores derived state, so asking for different methods
/// in sequence cannot leak data from one into the other.
pub trait Resource: Clone {
    /// Short family name used in log lines.
    const KIND: &'static str;

    fn context(&self) -> &ApiContext;

    /// Route for `method`, or `None` when this request cannot be sent with it.
    fn route(&self, method: HttpMethod) -> Option<Route>;

    /// Full descriptor for `method`, or `None` when there is no route.
    fn descriptor(&self, method: HttpMethod) -> Option<RequestDescriptor> {
        let route = self.route(method)?;
        Some(RequestDescriptor {
            method,
            path: route.path,
            headers: self.context().headers().clone(),
            query: route.query,
            body: route.body,
        })
    }

    /// Methods this request has a route for.
    fn supported_methods(&self) -> Vec<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .filter(|m| self.route(*m).is_some())
            .collect()
    }

    /// Sends this request with `method` through `transport`.
    ///
    /// Returns `Ok(None)` when there is no route for `method`; transport
    /// errors are returned unchanged.
    fn send<T>(&self, transport: &T, method: HttpMethod) -> Result<Option<Completed<Self>>, Error>
    where
        T: Transport + ?Sized,
    {
        let Some(descriptor) = self.descriptor(method) else {
            debug!("{} has no route for {}", Self::KIND, method);
            return Ok(None);
        };
        let response = transport.send(&descriptor)?;
        Ok(Some(Completed::new(self.clone(), descriptor, response)))
    }
}
