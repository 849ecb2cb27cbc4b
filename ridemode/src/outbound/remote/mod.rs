//! Remote account service adapters.

mod http_role_api;

pub use http_role_api::HttpRoleChangeApi;
