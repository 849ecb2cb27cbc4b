//! Domain types, ports, and the reconciliation service.
//!
//! Purpose: define the strongly typed model of the rider/user toggle and the
//! service that keeps its five representations in step. Ports describe the
//! external collaborators (storage, remote service, identity fetch); the
//! concrete adapters live under `crate::outbound`.
//!
//! Public surface:
//! - `Role` — the domain value being toggled.
//! - `SubjectId` — validated identity of the record being acted on.
//! - `UserRecord` — persisted record schema with versioned codec.
//! - `SharedRoleContext` — session-scoped holder of the confirmed role.
//! - `ToggleSpring` — damped spring over the presentation drive value.
//! - `RoleToggleService` / `ToggleState` — the reconciler and its state.

pub mod animation;
pub mod ports;
pub mod role;
pub mod shared_context;
pub mod subject;
pub mod toggle_service;
pub mod user_record;

pub use self::animation::{DRIVE_OFF, DRIVE_ON, SpringConfig, ToggleSpring, drive_for};
pub use self::role::{Role, RoleParseError};
pub use self::shared_context::SharedRoleContext;
pub use self::subject::{SubjectId, SubjectIdValidationError};
pub use self::toggle_service::{RoleToggleService, ToggleState};
pub use self::user_record::{SCHEMA_VERSION, UserRecord, UserRecordDecodeError};
