//! # Observer
//!
//! A registered (handler, owner identity) pair.
//!
//! Observers compare by [`NotifyContext`] alone. The handler itself plays no role
//! in equality, so two owners may register identical closures for the same
//! notification and still be removed independently.

use crate::error::DispatchResult;
use crate::notification::Notification;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Handler invoked when a matching notification is broadcast
pub type NotifyMethod = Arc<dyn Fn(&Notification) -> DispatchResult<()> + Send + Sync>;

/// Opaque identity token for the owner of an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotifyContext(Uuid);

impl NotifyContext {
    /// Allocate a new, unique context
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotifyContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotifyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
pub struct Observer {
    notify: NotifyMethod,
    context: NotifyContext,
}

impl Observer {
    pub fn new(notify: NotifyMethod, context: NotifyContext) -> Self {
        Self { notify, context }
    }

    /// Build an observer from a plain closure
    pub fn from_fn<F>(context: NotifyContext, notify: F) -> Self
    where
        F: Fn(&Notification) -> DispatchResult<()> + Send + Sync + 'static,
    {
        Self::new(Arc::new(notify), context)
    }

    pub fn context(&self) -> NotifyContext {
        self.context
    }

    pub fn notify_observer(&self, notification: &Notification) -> DispatchResult<()> {
        (self.notify)(notification)
    }

    pub fn compare_notify_context(&self, context: &NotifyContext) -> bool {
        self.context == *context
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("notify", &"<NotifyMethod>")
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_notify_observer_invokes_handler() {
        let seen = Arc::new(AtomicU32::new(0));
        let counter = seen.clone();
        let observer = Observer::from_fn(NotifyContext::new(), move |note| {
            counter.fetch_add(*note.body_as::<u32>().unwrap(), Ordering::Relaxed);
            Ok(())
        });

        observer
            .notify_observer(&Notification::new("ObserverTestNote").with_body(10_u32))
            .unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_compare_notify_context_uses_identity() {
        let context = NotifyContext::new();
        let observer = Observer::from_fn(context, |_| Ok(()));

        assert!(observer.compare_notify_context(&context));
        assert!(!observer.compare_notify_context(&NotifyContext::new()));
    }
}
