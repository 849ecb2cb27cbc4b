//! Port for the on-device persisted user record.
//!
//! The [`UserRecordStore`] trait is the contract for loading and saving the
//! single record kept under the fixed `userData` storage key. Adapters own
//! the storage engine and the document codec.

use async_trait::async_trait;

use crate::domain::user_record::UserRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user record store adapters.
    pub enum UserRecordStoreError {
        /// Underlying storage could not be read or written.
        Io { message: String } =>
            "user record store I/O failed: {message}",
        /// Stored bytes exist but do not decode into a user record.
        Decode { message: String } =>
            "stored user record could not be decoded: {message}",
        /// The record could not be encoded for storage.
        Encode { message: String } =>
            "user record could not be encoded: {message}",
    }
}

/// Port for the persisted user record.
///
/// The store holds at most one record. `load` returning `None` means
/// nothing has been persisted yet; callers must treat that as a fresh
/// device, not as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    /// Load the persisted record, if any.
    async fn load(&self) -> Result<Option<UserRecord>, UserRecordStoreError>;

    /// Replace the persisted record.
    async fn save(&self, record: &UserRecord) -> Result<(), UserRecordStoreError>;
}

/// Fixture implementation for tests that do not exercise persistence: the
/// store is always empty and discards saves.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRecordStore;

#[async_trait]
impl UserRecordStore for FixtureUserRecordStore {
    async fn load(&self) -> Result<Option<UserRecord>, UserRecordStoreError> {
        Ok(None)
    }

    async fn save(&self, _record: &UserRecord) -> Result<(), UserRecordStoreError> {
        Ok(())
    }
}
