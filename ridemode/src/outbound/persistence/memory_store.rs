//! In-memory user record store.
//!
//! Keeps the encoded JSON document in a cell, so the versioned codec is
//! exercised exactly as it is with durable storage. Intended for tests and
//! for embedders without a writable filesystem.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::UserRecord;
use crate::domain::ports::{UserRecordStore, UserRecordStoreError};

/// Store backed by an in-process cell holding the encoded document.
#[derive(Debug, Default)]
pub struct InMemoryUserRecordStore {
    contents: RwLock<Option<String>>,
}

impl InMemoryUserRecordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an encoded record document. Accepts both the
    /// current and the legacy document shape.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(raw.into())),
        }
    }

    /// The raw stored document, if any.
    pub fn raw_contents(&self) -> Option<String> {
        self.contents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl UserRecordStore for InMemoryUserRecordStore {
    async fn load(&self) -> Result<Option<UserRecord>, UserRecordStoreError> {
        match self.raw_contents() {
            None => Ok(None),
            Some(raw) => UserRecord::from_stored_json(&raw)
                .map(Some)
                .map_err(|error| UserRecordStoreError::decode(error.to_string())),
        }
    }

    async fn save(&self, record: &UserRecord) -> Result<(), UserRecordStoreError> {
        let raw = record
            .to_stored_json()
            .map_err(|error| UserRecordStoreError::encode(error.to_string()))?;
        *self
            .contents
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }
}
