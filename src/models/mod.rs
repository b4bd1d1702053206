mod role;
mod token;

pub use role::{RoleHost, RoleTokenInfo, RoleTokenListResponse};
pub use token::TokenResponse;
