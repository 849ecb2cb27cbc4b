//! File-backed user record store.
//!
//! Persists the record as one JSON document under the fixed `userData`
//! storage key, rendered as `userData.json` in a caller-supplied directory.
//! A missing file reads as an empty store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::UserRecord;
use crate::domain::ports::{UserRecordStore, UserRecordStoreError};

/// Storage key for the persisted user record.
pub const USER_DATA_KEY: &str = "userData";

/// Store that keeps the record in `<dir>/userData.json`.
#[derive(Debug, Clone)]
pub struct FileUserRecordStore {
    path: PathBuf,
}

impl FileUserRecordStore {
    /// Build a store rooted at `dir`. The directory must already exist.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{USER_DATA_KEY}.json")),
        }
    }

    /// The file the record is stored in.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserRecordStore for FileUserRecordStore {
    async fn load(&self) -> Result<Option<UserRecord>, UserRecordStoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(UserRecordStoreError::io(error.to_string())),
        };
        let record = UserRecord::from_stored_json(&raw)
            .map_err(|error| UserRecordStoreError::decode(error.to_string()))?;
        Ok(Some(record))
    }

    async fn save(&self, record: &UserRecord) -> Result<(), UserRecordStoreError> {
        let raw = record
            .to_stored_json()
            .map_err(|error| UserRecordStoreError::encode(error.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|error| UserRecordStoreError::io(error.to_string()))
    }
}
