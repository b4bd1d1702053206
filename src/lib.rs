#![forbid(unsafe_code)]

mod api;
mod build_url;
mod client_defaults;
mod error;
mod models;
mod policy;
mod resource;
mod role;
mod token;
mod transport;

pub use error::{ApiError, Error};

pub use api::{
    ApiContext, AuthToken, Completed, HttpMethod, RequestDescriptor, Resource, ResponseDescriptor,
    Route,
};

pub use models::{RoleHost, RoleTokenInfo, RoleTokenListResponse, TokenResponse};

pub use token::{
    exchange_openstack_token, obtain_openstack_token, PasswordCredentials, RoleToken,
    RoleTokenList, Token, TokenApi, TokenCall, SUBJECT_TOKEN_HEADER,
};

pub use policy::{Effect, Policy, PolicyApi, PolicyCall, PolicyDefinition};

pub use resource::{
    ContainerIdentity, DataType, ResourceApi, ResourceCall, ResourceDefinition, ResourceRequest,
};

pub use role::{Role, RoleApi, RoleCall};

pub use transport::{HttpTransport, HttpTransportBuilder, Transport};
