//! Port for the external identity fetch.
//!
//! The reconciler does not authenticate anyone; it asks this port who the
//! session belongs to and carries on without a subject when the answer is
//! empty.

use async_trait::async_trait;

use crate::domain::subject::SubjectId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity source adapters.
    pub enum IdentitySourceError {
        /// The identity backend could not be reached or gave no usable answer.
        Unavailable { message: String } =>
            "identity source unavailable: {message}",
    }
}

/// Port for resolving the session's subject.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Fetch the subject the session belongs to, if one is signed in.
    async fn fetch_identity(&self) -> Result<Option<SubjectId>, IdentitySourceError>;
}

/// Fixture implementation that reports no signed-in subject.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentitySource;

#[async_trait]
impl IdentitySource for FixtureIdentitySource {
    async fn fetch_identity(&self) -> Result<Option<SubjectId>, IdentitySourceError> {
        Ok(None)
    }
}

/// Identity source with a constant subject, for embedders that already
/// resolved the session identity elsewhere.
#[derive(Debug, Clone)]
pub struct FixedIdentitySource {
    subject: SubjectId,
}

impl FixedIdentitySource {
    /// Source that always reports `subject`.
    pub fn new(subject: SubjectId) -> Self {
        Self { subject }
    }
}

#[async_trait]
impl IdentitySource for FixedIdentitySource {
    async fn fetch_identity(&self) -> Result<Option<SubjectId>, IdentitySourceError> {
        Ok(Some(self.subject.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the bundled identity sources.

    use super::*;

    #[tokio::test]
    async fn fixture_source_reports_nobody() {
        let identity = FixtureIdentitySource
            .fetch_identity()
            .await
            .expect("fixture fetch succeeds");

        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn fixed_source_reports_its_subject() {
        let subject = SubjectId::new("42").expect("valid subject id");

        let identity = FixedIdentitySource::new(subject.clone())
            .fetch_identity()
            .await
            .expect("fixed fetch succeeds");

        assert_eq!(identity, Some(subject));
    }
}
