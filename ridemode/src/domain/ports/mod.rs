//! Domain ports for the reconciler's external collaborators.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_source;
mod role_change_api;
mod user_record_store;

#[cfg(test)]
pub use identity_source::MockIdentitySource;
pub use identity_source::{
    FixedIdentitySource, FixtureIdentitySource, IdentitySource, IdentitySourceError,
};
#[cfg(test)]
pub use role_change_api::MockRoleChangeApi;
pub use role_change_api::{FixtureRoleChangeApi, RoleChangeApi, RoleChangeApiError};
#[cfg(test)]
pub use user_record_store::MockUserRecordStore;
pub use user_record_store::{FixtureUserRecordStore, UserRecordStore, UserRecordStoreError};
