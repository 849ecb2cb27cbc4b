//! Role toggle reconciliation service.
//!
//! Orchestrates the five representations of the rider/user flag: the local
//! toggle state, the presentation spring, the shared session context, the
//! persisted record, and the remote account service. The local flip is
//! optimistic and committed before any I/O; a failed propagation is logged
//! and the flip stands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::animation::ToggleSpring;
use crate::domain::ports::{
    IdentitySource, RoleChangeApi, UserRecordStore, UserRecordStoreError,
};
use crate::domain::role::Role;
use crate::domain::shared_context::SharedRoleContext;
use crate::domain::subject::SubjectId;

/// Local toggle state: the optimistic flag and the subject it acts for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToggleState {
    /// `true` denotes role `user`, `false` denotes `rider`.
    pub value: bool,
    /// Subject a role change is issued for; absent until identity resolves.
    pub subject_id: Option<SubjectId>,
}

/// One outstanding propagation plus at most one queued follow-up. Later
/// flips overwrite the queued role, so a burst of taps collapses into the
/// final target.
#[derive(Debug, Default)]
struct PropagationQueue {
    busy: bool,
    pending: Option<Role>,
}

/// Reconciler for the rider/user role flag.
///
/// Construction wires the three ports and the shared context explicitly.
/// The service owns [`ToggleState`] and the spring, and is the only writer
/// of the context. The spring's target always equals `ToggleState::value`;
/// both are updated under the same lock before control returns.
pub struct RoleToggleService<S, A, I> {
    record_store: Arc<S>,
    role_api: Arc<A>,
    identity_source: Arc<I>,
    shared_context: Arc<SharedRoleContext>,
    state: Mutex<ToggleState>,
    spring: Mutex<ToggleSpring>,
    queue: Mutex<PropagationQueue>,
    ready: AtomicBool,
}

impl<S, A, I> RoleToggleService<S, A, I> {
    /// Wire a service from its collaborators. The state starts at the
    /// rider default until [`RoleToggleService::initialize`] runs.
    pub fn new(
        record_store: Arc<S>,
        role_api: Arc<A>,
        identity_source: Arc<I>,
        shared_context: Arc<SharedRoleContext>,
    ) -> Self {
        Self {
            record_store,
            role_api,
            identity_source,
            shared_context,
            state: Mutex::new(ToggleState::default()),
            spring: Mutex::new(ToggleSpring::new(false)),
            queue: Mutex::new(PropagationQueue::default()),
            ready: AtomicBool::new(false),
        }
    }

    /// Current toggle state.
    pub fn state(&self) -> ToggleState {
        lock(&self.state).clone()
    }

    /// Whether both initialization sources have resolved.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Current animation drive value.
    pub fn drive_value(&self) -> f64 {
        lock(&self.spring).value()
    }

    /// The state the spring is easing towards.
    pub fn animation_target(&self) -> bool {
        lock(&self.spring).target_on()
    }

    /// Advance the presentation spring; the renderer calls this once per
    /// frame and feeds the returned drive value to its transform.
    pub fn step_animation(&self, dt: Duration) -> f64 {
        lock(&self.spring).step(dt)
    }
}

impl<S, A, I> RoleToggleService<S, A, I>
where
    S: UserRecordStore,
    A: RoleChangeApi,
    I: IdentitySource,
{
    /// Resolve both startup sources and commit the initial state.
    ///
    /// The identity fetch and the storage load run concurrently and the
    /// state is committed only once both have resolved; a source that fails
    /// is logged and resolves as absent. A missing record leaves the
    /// constructor default (`value = false`); a present one retargets the
    /// spring so the thumb eases into place rather than jumping. Returns
    /// the committed state.
    pub async fn initialize(&self) -> ToggleState {
        let (identity, stored) = tokio::join!(
            self.identity_source.fetch_identity(),
            self.record_store.load(),
        );

        let subject_id = identity.unwrap_or_else(|error| {
            warn!(%error, "identity fetch failed; continuing without a subject id");
            None
        });
        let record = stored.unwrap_or_else(|error| {
            warn!(%error, "persisted user record could not be loaded; using defaults");
            None
        });

        let committed = {
            let mut state = lock(&self.state);
            state.subject_id = subject_id;
            if let Some(record) = record {
                state.value = record.role.as_flag();
                lock(&self.spring).set_target(state.value);
            }
            state.clone()
        };
        self.ready.store(true, Ordering::Release);
        committed
    }

    /// Flip the toggle optimistically and propagate the change.
    ///
    /// The flip and the spring retarget are committed before any I/O and
    /// stand whatever happens afterwards. Without a subject id the flip is
    /// local-only. With one, the new role goes to the remote service; a
    /// flip issued while another change is still in flight queues its role
    /// instead, later flips overwriting earlier queued ones. Returns the
    /// new local value.
    pub async fn toggle(&self) -> bool {
        let (new_value, target_role, subject_id) = {
            let mut state = lock(&self.state);
            state.value = !state.value;
            lock(&self.spring).set_target(state.value);
            (
                state.value,
                Role::from_flag(state.value),
                state.subject_id.clone(),
            )
        };

        let Some(subject_id) = subject_id else {
            debug!(role = %target_role, "no subject id; keeping the role change local");
            return new_value;
        };

        if self.enqueue_or_claim(target_role) {
            self.drain_propagations(&subject_id, target_role).await;
        }
        new_value
    }

    /// Returns `true` when the caller claimed the propagation loop; `false`
    /// when the role was queued behind an outstanding propagation.
    fn enqueue_or_claim(&self, role: Role) -> bool {
        let mut queue = lock(&self.queue);
        if queue.busy {
            queue.pending = Some(role);
            false
        } else {
            queue.busy = true;
            true
        }
    }

    async fn drain_propagations(&self, subject_id: &SubjectId, first: Role) {
        let mut next = first;
        loop {
            self.propagate(subject_id, next).await;
            let mut queue = lock(&self.queue);
            match queue.pending.take() {
                Some(role) => next = role,
                None => {
                    queue.busy = false;
                    break;
                }
            }
        }
    }

    /// Push one role change through the remote, persisted, and shared
    /// representations. Every failure is logged and swallowed; the
    /// optimistic local state is never reverted.
    async fn propagate(&self, subject_id: &SubjectId, role: Role) {
        if let Err(error) = self.role_api.change_role(subject_id, role).await {
            warn!(
                %error, subject = %subject_id, %role,
                "role change request failed; local state keeps the optimistic value"
            );
            return;
        }

        match self.rewrite_record(role).await {
            Ok(()) => self.shared_context.set_role(role),
            Err(error) => {
                warn!(
                    %error, %role,
                    "persisted record rewrite failed after a confirmed role change"
                );
            }
        }
    }

    /// Overwrite the stored record's role, preserving every other field. A
    /// device with nothing persisted yet has nothing to rewrite.
    async fn rewrite_record(&self, role: Role) -> Result<(), UserRecordStoreError> {
        match self.record_store.load().await? {
            Some(mut record) => {
                record.role = role;
                self.record_store.save(&record).await
            }
            None => {
                debug!(%role, "no persisted record to rewrite");
                Ok(())
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "toggle_service_tests.rs"]
mod toggle_service_tests;
