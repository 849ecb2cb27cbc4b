//! Persisted user record schema and on-disk codec.
//!
//! The store writes a flat, versioned document (`schemaVersion` 1). Reads
//! also accept the nested legacy document earlier clients wrote under the
//! same storage key and migrate it to the current shape, folding every field
//! this crate does not interpret into the passthrough bag so a rewrite never
//! loses data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::role::Role;
use super::subject::SubjectId;

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Keys owned by the versioned document; stripped from the passthrough bag
/// during migration so re-encoding never emits duplicates.
const RESERVED_KEYS: [&str; 3] = ["schemaVersion", "id", "role"];

/// The persisted user record.
///
/// `id` and `role` are the interpreted fields; everything else the document
/// carried is preserved verbatim in `passthrough` and written back on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Identity of the account the record describes.
    pub id: SubjectId,
    /// The account's current role.
    pub role: Role,
    /// Uninterpreted fields, preserved across rewrites.
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

/// Decode failures for stored user record documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRecordDecodeError {
    /// Document is not valid JSON or misses required fields.
    #[error("stored user record is malformed: {message}")]
    Malformed { message: String },
    /// Document comes from a newer schema this build cannot read.
    #[error("stored user record uses unsupported schema version {version}")]
    UnsupportedVersion { version: u64 },
}

impl UserRecordDecodeError {
    fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionedRecord {
    schema_version: u32,
    #[serde(flatten)]
    record: UserRecord,
}

impl UserRecord {
    /// Build a record with an empty passthrough bag.
    pub fn new(id: SubjectId, role: Role) -> Self {
        Self {
            id,
            role,
            passthrough: Map::new(),
        }
    }

    /// Decode a stored document.
    ///
    /// Accepts the current versioned shape and the legacy nested shape
    /// (`data.data.{_id,userType}`); the latter is migrated on the fly, with
    /// unrecognized fields from every nesting level folded into
    /// [`UserRecord::passthrough`] (innermost keys win).
    ///
    /// # Errors
    ///
    /// Returns [`UserRecordDecodeError::Malformed`] for invalid JSON,
    /// missing required fields, or field values that fail validation, and
    /// [`UserRecordDecodeError::UnsupportedVersion`] for documents written
    /// by a newer schema.
    pub fn from_stored_json(raw: &str) -> Result<Self, UserRecordDecodeError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|error| UserRecordDecodeError::malformed(error.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(UserRecordDecodeError::malformed(
                "stored user record must be a JSON object",
            ));
        };
        if fields.contains_key("schemaVersion") {
            Self::from_versioned(fields)
        } else {
            Self::from_legacy(fields)
        }
    }

    /// Encode to the current versioned document.
    ///
    /// # Errors
    ///
    /// Returns the underlying serializer error when the passthrough bag
    /// cannot be rendered as JSON.
    pub fn to_stored_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&VersionedRecord {
            schema_version: SCHEMA_VERSION,
            record: self.clone(),
        })
    }

    fn from_versioned(fields: Map<String, Value>) -> Result<Self, UserRecordDecodeError> {
        let version = fields
            .get("schemaVersion")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                UserRecordDecodeError::malformed("schemaVersion must be a non-negative integer")
            })?;
        if version != u64::from(SCHEMA_VERSION) {
            return Err(UserRecordDecodeError::UnsupportedVersion { version });
        }
        let versioned: VersionedRecord = serde_json::from_value(Value::Object(fields))
            .map_err(|error| UserRecordDecodeError::malformed(error.to_string()))?;
        Ok(versioned.record)
    }

    fn from_legacy(mut fields: Map<String, Value>) -> Result<Self, UserRecordDecodeError> {
        let mut middle = take_envelope(&mut fields, "data")?;
        let mut inner = take_envelope(&mut middle, "data")?;

        let id = take_string(&mut inner, "_id")?;
        let id = SubjectId::new(id).map_err(|error| {
            UserRecordDecodeError::malformed(format!("legacy _id is invalid: {error}"))
        })?;
        let role = take_string(&mut inner, "userType")?;
        let role: Role = role
            .parse()
            .map_err(|error| UserRecordDecodeError::malformed(format!("{error}")))?;

        let mut passthrough = Map::new();
        for (key, value) in fields.into_iter().chain(middle).chain(inner) {
            passthrough.insert(key, value);
        }
        for key in RESERVED_KEYS {
            passthrough.remove(key);
        }

        Ok(Self {
            id,
            role,
            passthrough,
        })
    }
}

fn take_envelope(
    fields: &mut Map<String, Value>,
    key: &str,
) -> Result<Map<String, Value>, UserRecordDecodeError> {
    match fields.remove(key) {
        Some(Value::Object(object)) => Ok(object),
        Some(_) => Err(UserRecordDecodeError::malformed(format!(
            "legacy field {key} must be an object"
        ))),
        None => Err(UserRecordDecodeError::malformed(format!(
            "legacy document is missing the {key} envelope"
        ))),
    }
}

fn take_string(
    fields: &mut Map<String, Value>,
    key: &str,
) -> Result<String, UserRecordDecodeError> {
    match fields.remove(key) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(UserRecordDecodeError::malformed(format!(
            "legacy field {key} must be a string"
        ))),
        None => Err(UserRecordDecodeError::malformed(format!(
            "legacy document is missing {key}"
        ))),
    }
}
