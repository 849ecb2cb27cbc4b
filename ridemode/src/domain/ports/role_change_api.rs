//! Port for the remote role-change endpoint.

use async_trait::async_trait;

use crate::domain::role::Role;
use crate::domain::subject::SubjectId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by role change adapters.
    pub enum RoleChangeApiError {
        /// The request never produced an HTTP response.
        Transport { message: String } =>
            "role change transport failed: {message}",
        /// The service answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "role change rejected with status {status}: {message}",
    }
}

/// Port for the authoritative account service.
///
/// A successful return means the remote record now carries `role`; the
/// reconciler only then rewrites the persisted and shared representations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleChangeApi: Send + Sync {
    /// Ask the remote service to set `subject`'s role to `role`.
    async fn change_role(
        &self,
        subject: &SubjectId,
        role: Role,
    ) -> Result<(), RoleChangeApiError>;
}

/// Fixture implementation that acknowledges every change without talking to
/// anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoleChangeApi;

#[async_trait]
impl RoleChangeApi for FixtureRoleChangeApi {
    async fn change_role(
        &self,
        _subject: &SubjectId,
        _role: Role,
    ) -> Result<(), RoleChangeApiError> {
        Ok(())
    }
}
