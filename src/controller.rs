//! # Controller
//!
//! Per-core command registry mapping notification names to command factories.
//!
//! ## Forwarding
//!
//! The first registration for a name installs a single forwarding observer into
//! the [`View`] of the same core. That observer carries the controller's own
//! [`NotifyContext`], so [`Controller::remove_command`] takes out exactly that
//! observer and leaves any other observer of the same name in place. Registering
//! again for a name that is already mapped only replaces the factory.
//!
//! The forwarding observer holds a `Weak` reference back to the controller, so a
//! view never keeps a removed controller alive. Dropping a controller removes its
//! forwarding observers from the view.
//!
//! ## Usage
//!
//! ```rust
//! use relay_core::{simple_command, MultitonDirectory, Notification};
//!
//! let directory = MultitonDirectory::new();
//! let controller = directory.controller("ControllerDocKey");
//!
//! controller.register_command("Startup", simple_command(|note| {
//!     println!("starting with {}", note.name());
//!     Ok(())
//! }));
//! assert!(controller.has_command("Startup"));
//!
//! directory
//!     .view("ControllerDocKey")
//!     .notify_observers(&Notification::new("Startup"))
//!     .unwrap();
//! ```

use crate::command::{factory_of, Command, CommandFactory};
use crate::error::DispatchResult;
use crate::multiton::MultitonDirectory;
use crate::notification::Notification;
use crate::observer::{NotifyContext, Observer};
use crate::view::View;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Per-core notification name to command factory registry
pub struct Controller {
    multiton_key: String,
    view: Arc<View>,
    context: NotifyContext,
    command_map: RwLock<HashMap<String, CommandFactory>>,
    weak_self: Weak<Controller>,
}

impl Controller {
    pub(crate) fn new(multiton_key: &str, view: Arc<View>) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            multiton_key: multiton_key.to_string(),
            view,
            context: NotifyContext::new(),
            command_map: RwLock::new(HashMap::new()),
            weak_self: weak_self.clone(),
        })
    }

    /// Controller for `key` in the process-wide directory
    pub fn get_instance(key: &str) -> Arc<Controller> {
        MultitonDirectory::global().controller(key)
    }

    /// Unbind `key` from the process-wide directory
    pub fn remove_controller(key: &str) {
        MultitonDirectory::global().remove_controller(key);
    }

    pub fn multiton_key(&self) -> &str {
        &self.multiton_key
    }

    /// The view this controller forwards through
    pub fn view(&self) -> &Arc<View> {
        &self.view
    }

    /// Identity used by this controller's forwarding observers
    pub fn notify_context(&self) -> NotifyContext {
        self.context
    }

    /// Map `notification_name` to `factory`, wiring up dispatch on first registration
    pub fn register_command(&self, notification_name: &str, factory: CommandFactory) {
        let previous = self
            .command_map
            .write()
            .insert(notification_name.to_string(), factory);

        if previous.is_none() {
            self.view
                .register_observer(notification_name, self.forwarding_observer());
        }

        debug!(
            multiton_key = %self.multiton_key,
            notification = notification_name,
            replaced = previous.is_some(),
            "Registered command"
        );
    }

    /// Map `notification_name` to a `Default` command type
    pub fn register_command_type<C>(&self, notification_name: &str)
    where
        C: Command + Default + 'static,
    {
        self.register_command(notification_name, factory_of::<C>());
    }

    /// Execute a fresh command for the notification, if one is registered
    pub fn execute_command(&self, notification: &Notification) -> DispatchResult<()> {
        let Some(factory) = self.command_map.read().get(notification.name()).cloned() else {
            return Ok(());
        };

        debug!(
            multiton_key = %self.multiton_key,
            notification = notification.name(),
            "Executing command"
        );

        factory().execute(notification)
    }

    /// Remove the mapping and this controller's forwarding observer
    pub fn remove_command(&self, notification_name: &str) {
        if self.command_map.write().remove(notification_name).is_some() {
            self.view.remove_observer(notification_name, &self.context);
            debug!(
                multiton_key = %self.multiton_key,
                notification = notification_name,
                "Removed command"
            );
        }
    }

    pub fn has_command(&self, notification_name: &str) -> bool {
        self.command_map.read().contains_key(notification_name)
    }

    pub fn command_names(&self) -> Vec<String> {
        self.command_map.read().keys().cloned().collect()
    }

    fn forwarding_observer(&self) -> Observer {
        let controller = self.weak_self.clone();
        Observer::from_fn(self.context, move |notification| match controller.upgrade() {
            Some(controller) => controller.execute_command(notification),
            None => Ok(()),
        })
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        for notification_name in self.command_map.get_mut().keys() {
            self.view.remove_observer(notification_name, &self.context);
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("multiton_key", &self.multiton_key)
            .field("context", &self.context)
            .field("commands", &self.command_names())
            .finish()
    }
}
