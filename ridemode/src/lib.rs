//! Rider/user role reconciliation engine.
//!
//! Keeps one binary role attribute consistent across five representations:
//! the local toggle flag, the animated presentation value, the shared
//! session context, the persisted on-device record, and the authoritative
//! remote record. The local flip is optimistic: it is committed and visible
//! before any I/O starts, and a failed propagation is logged rather than
//! rolled back.

pub mod domain;
pub mod outbound;

pub use domain::{Role, RoleToggleService, SharedRoleContext, SubjectId, ToggleState};
