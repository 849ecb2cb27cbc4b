//! End-to-end reconciliation flow over the in-memory store.
//!
//! Wires the real service, codec, and store adapter together and walks the
//! full journey: a device holding a legacy rider document initializes,
//! toggles, and ends up with a confirmed, migrated user record.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ridemode::domain::ports::{FixedIdentitySource, RoleChangeApi, RoleChangeApiError, UserRecordStore};
use ridemode::domain::{Role, RoleToggleService, SharedRoleContext, SubjectId};
use ridemode::outbound::persistence::InMemoryUserRecordStore;

/// Acknowledges every change and records what was asked of it.
#[derive(Default)]
struct RecordingRoleApi {
    calls: Mutex<Vec<(SubjectId, Role)>>,
}

impl RecordingRoleApi {
    fn calls(&self) -> Vec<(SubjectId, Role)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RoleChangeApi for RecordingRoleApi {
    async fn change_role(
        &self,
        subject: &SubjectId,
        role: Role,
    ) -> Result<(), RoleChangeApiError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((subject.clone(), role));
        Ok(())
    }
}

#[tokio::test]
async fn a_legacy_rider_device_toggles_into_a_confirmed_user() {
    let subject = SubjectId::new("42").expect("valid subject id");
    let store = Arc::new(InMemoryUserRecordStore::with_contents(
        r#"{"data":{"data":{"_id":"42","userType":"rider","balance":7}}}"#,
    ));
    let api = Arc::new(RecordingRoleApi::default());
    let context = Arc::new(SharedRoleContext::new());
    let service = RoleToggleService::new(
        Arc::clone(&store),
        Arc::clone(&api),
        Arc::new(FixedIdentitySource::new(subject.clone())),
        Arc::clone(&context),
    );

    let state = service.initialize().await;
    assert!(!state.value, "a rider record initializes the toggle off");
    assert_eq!(state.subject_id, Some(subject.clone()));

    let flipped = service.toggle().await;
    assert!(flipped, "the flip is reported synchronously");

    assert_eq!(
        api.calls(),
        vec![(subject, Role::User)],
        "the remote sees the role the toggle moved into",
    );

    let record = store
        .load()
        .await
        .expect("load succeeds")
        .expect("record persisted");
    assert_eq!(record.role, Role::User);
    assert_eq!(record.id.as_str(), "42");
    assert_eq!(
        record.passthrough.get("balance"),
        Some(&serde_json::json!(7)),
        "uninterpreted fields survive the rewrite",
    );

    let raw = store.raw_contents().expect("contents present");
    assert!(
        raw.contains("\"schemaVersion\":1"),
        "the rewrite upgrades the document to the current schema: {raw}",
    );

    assert_eq!(context.role(), Some(Role::User));
}
