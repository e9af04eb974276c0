//! # View
//!
//! Per-core observer registry routing named notifications to interested observers.
//!
//! ## Dispatch
//!
//! `notify_observers` copies the observer list for the notification name under a
//! read lock, releases the lock, and then invokes each observer in registration
//! order. Observers are therefore free to register or remove observers (for the
//! same name or any other) while a pass is in flight; such changes are visible
//! from the next pass on.
//!
//! The first observer to return an error aborts the pass and the error is returned
//! to the caller. Observers later in the snapshot are not invoked.
//!
//! ## Usage
//!
//! ```rust
//! use relay_core::{MultitonDirectory, Notification, NotifyContext, Observer};
//!
//! let directory = MultitonDirectory::new();
//! let view = directory.view("ViewDocKey");
//!
//! let context = NotifyContext::new();
//! view.register_observer("AppStarted", Observer::from_fn(context, |note| {
//!     println!("received {}", note.name());
//!     Ok(())
//! }));
//!
//! view.notify_observers(&Notification::new("AppStarted")).unwrap();
//! view.remove_observer("AppStarted", &context);
//! assert!(!view.has_observers("AppStarted"));
//! ```

use crate::config::DispatchSettings;
use crate::error::DispatchResult;
use crate::logging::log_registry_operation;
use crate::multiton::MultitonDirectory;
use crate::notification::Notification;
use crate::observer::{NotifyContext, Observer};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-core notification name to observer list registry
pub struct View {
    multiton_key: String,
    observer_map: RwLock<HashMap<String, Vec<Observer>>>,
    settings: DispatchSettings,
}

impl View {
    pub(crate) fn new(multiton_key: &str, settings: DispatchSettings) -> Self {
        Self {
            multiton_key: multiton_key.to_string(),
            observer_map: RwLock::new(HashMap::new()),
            settings,
        }
    }

    /// View for `key` in the process-wide directory
    pub fn get_instance(key: &str) -> Arc<View> {
        MultitonDirectory::global().view(key)
    }

    /// Unbind `key` from the process-wide directory
    pub fn remove_view(key: &str) {
        MultitonDirectory::global().remove_view(key);
    }

    pub fn multiton_key(&self) -> &str {
        &self.multiton_key
    }

    /// Append an observer to the list for `notification_name`
    pub fn register_observer(&self, notification_name: &str, observer: Observer) {
        let mut observer_map = self.observer_map.write();
        let observers = observer_map.entry(notification_name.to_string()).or_default();

        if self.settings.warn_on_duplicate_context
            && observers
                .iter()
                .any(|existing| existing.compare_notify_context(&observer.context()))
        {
            warn!(
                multiton_key = %self.multiton_key,
                notification = notification_name,
                context = %observer.context(),
                "Context already observes this notification, it will be notified more than once"
            );
        }

        observers.push(observer);
        log_registry_operation(
            "register_observer",
            &self.multiton_key,
            Some(notification_name),
            "registered",
        );
    }

    /// Remove the first observer for `notification_name` owned by `context`
    pub fn remove_observer(&self, notification_name: &str, context: &NotifyContext) {
        let mut observer_map = self.observer_map.write();
        let Some(observers) = observer_map.get_mut(notification_name) else {
            return;
        };

        if let Some(index) = observers
            .iter()
            .position(|observer| observer.compare_notify_context(context))
        {
            observers.remove(index);
            log_registry_operation(
                "remove_observer",
                &self.multiton_key,
                Some(notification_name),
                "removed",
            );
        }

        if observers.is_empty() {
            observer_map.remove(notification_name);
        }
    }

    /// Notify every observer registered for the notification's name
    pub fn notify_observers(&self, notification: &Notification) -> DispatchResult<()> {
        let snapshot = match self.observer_map.read().get(notification.name()) {
            Some(observers) => observers.clone(),
            None => return Ok(()),
        };

        debug!(
            multiton_key = %self.multiton_key,
            notification = notification.name(),
            observers = snapshot.len(),
            "Notifying observers"
        );

        for observer in &snapshot {
            observer.notify_observer(notification)?;
        }

        Ok(())
    }

    pub fn has_observers(&self, notification_name: &str) -> bool {
        self.observer_map.read().contains_key(notification_name)
    }

    pub fn observer_count(&self, notification_name: &str) -> usize {
        self.observer_map
            .read()
            .get(notification_name)
            .map_or(0, Vec::len)
    }

    pub fn notification_names(&self) -> Vec<String> {
        self.observer_map.read().keys().cloned().collect()
    }

    pub fn stats(&self) -> ViewStats {
        let observer_map = self.observer_map.read();
        ViewStats {
            multiton_key: self.multiton_key.clone(),
            notification_names: observer_map.len(),
            total_observers: observer_map.values().map(Vec::len).sum(),
        }
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("multiton_key", &self.multiton_key)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Statistics about a view's observer map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStats {
    pub multiton_key: String,
    pub notification_names: usize,
    pub total_observers: usize,
}
