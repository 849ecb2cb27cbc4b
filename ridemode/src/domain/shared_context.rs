//! Session-scoped holder of the confirmed role.

use std::sync::{PoisonError, RwLock};

use super::role::Role;

/// Shared view of the most recently confirmed role.
///
/// Built by the embedder and handed to the reconciler (and any interested
/// readers) by `Arc`. Access rules: any component may read; only the
/// reconciler writes, and only once the remote service has acknowledged a
/// role change. The value therefore lags the optimistic toggle state while
/// a change is in flight, and stays behind it permanently if the change
/// fails. It lives for the whole session; a fresh session gets a fresh
/// context.
///
/// # Examples
///
/// ```
/// use ridemode::domain::{Role, SharedRoleContext};
///
/// let context = SharedRoleContext::new();
/// assert_eq!(context.role(), None);
/// context.set_role(Role::User);
/// assert_eq!(context.role(), Some(Role::User));
/// ```
#[derive(Debug, Default)]
pub struct SharedRoleContext {
    role: RwLock<Option<Role>>,
}

impl SharedRoleContext {
    /// Create an empty context; no role is confirmed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently confirmed role, `None` before the first
    /// confirmation.
    pub fn role(&self) -> Option<Role> {
        *self.role.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a confirmed role. Reserved to the reconciler.
    pub fn set_role(&self, role: Role) {
        *self.role.write().unwrap_or_else(PoisonError::into_inner) = Some(role);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for context reads and writes.

    use std::sync::Arc;

    use super::*;

    #[test]
    fn starts_without_a_confirmed_role() {
        assert_eq!(SharedRoleContext::new().role(), None);
    }

    #[test]
    fn later_confirmations_replace_earlier_ones() {
        let context = SharedRoleContext::new();

        context.set_role(Role::User);
        context.set_role(Role::Rider);

        assert_eq!(context.role(), Some(Role::Rider));
    }

    #[test]
    fn reads_observe_writes_across_clones_of_the_handle() {
        let context = Arc::new(SharedRoleContext::new());
        let reader = Arc::clone(&context);

        context.set_role(Role::User);

        assert_eq!(reader.role(), Some(Role::User));
    }
}
