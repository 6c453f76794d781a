//! Admin session holder.
//!
//! [`AdminContext`] is what consumers see: the current admin (if any) and a
//! setter. Until a surrounding [`AdminSessionProvider`] supplies real values,
//! the default context reports no admin and its setter does nothing.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use shopfront_core::AdminIdentity;

type Setter = Arc<dyn Fn(Option<AdminIdentity>) + Send + Sync>;

/// Consumer-facing admin session value.
#[derive(Clone)]
pub struct AdminContext {
    admin: Option<AdminIdentity>,
    set_admin: Setter,
}

impl AdminContext {
    /// Build a context from explicit values.
    pub fn new(
        admin: Option<AdminIdentity>,
        set_admin: impl Fn(Option<AdminIdentity>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            admin,
            set_admin: Arc::new(set_admin),
        }
    }

    /// The admin this context was created with.
    #[must_use]
    pub const fn admin(&self) -> Option<&AdminIdentity> {
        self.admin.as_ref()
    }

    /// Replace the admin through whatever setter this context carries.
    ///
    /// The context itself keeps its value; take a fresh context from the
    /// provider to observe the change.
    pub fn set_admin(&self, admin: Option<AdminIdentity>) {
        (self.set_admin)(admin);
    }
}

impl Default for AdminContext {
    fn default() -> Self {
        Self::new(None, |_| {})
    }
}

impl fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminContext")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

/// Owns the admin slot and hands out contexts wired to it.
#[derive(Debug, Clone, Default)]
pub struct AdminSessionProvider {
    slot: Arc<RwLock<Option<AdminIdentity>>>,
}

impl AdminSessionProvider {
    /// Create a provider with no admin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The admin currently in the slot.
    #[must_use]
    pub fn current(&self) -> Option<AdminIdentity> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A context holding the current admin whose setter writes to this slot.
    #[must_use]
    pub fn context(&self) -> AdminContext {
        let slot = Arc::clone(&self.slot);
        AdminContext::new(self.current(), move |admin| {
            tracing::debug!(admin = ?admin.as_ref().map(|a| &a.id), "Admin session updated");
            *slot.write().unwrap_or_else(PoisonError::into_inner) = admin;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_has_no_admin() {
        let ctx = AdminContext::default();
        assert!(ctx.admin().is_none());

        // Placeholder setter is a no-op
        ctx.set_admin(Some(AdminIdentity::new("root")));
        assert!(ctx.admin().is_none());
    }

    #[test]
    fn test_provider_setter_updates_slot() {
        let provider = AdminSessionProvider::new();
        let ctx = provider.context();
        assert!(ctx.admin().is_none());

        ctx.set_admin(Some(AdminIdentity::new("adam")));
        assert_eq!(provider.current(), Some(AdminIdentity::new("adam")));
        assert_eq!(
            provider.context().admin().map(|a| a.id.as_str()),
            Some("adam")
        );

        provider.context().set_admin(None);
        assert!(provider.current().is_none());
    }

    #[test]
    fn test_custom_setter() {
        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let ctx = AdminContext::new(Some(AdminIdentity::new("a")), move |admin| {
            sink.write()
                .unwrap_or_else(PoisonError::into_inner)
                .push(admin);
        });

        ctx.set_admin(None);
        assert_eq!(ctx.admin().map(|a| a.id.as_str()), Some("a"));
        assert_eq!(
            *seen.read().unwrap_or_else(PoisonError::into_inner),
            vec![None]
        );
    }
}
