//! # Multiton Directory
//!
//! Keyed store of per-core [`View`] and [`Controller`] instances.
//!
//! Views and controllers live in separate maps sharing the same key space. Each is
//! created on first access and kept until explicitly removed; removing one kind
//! leaves the other bound. [`MultitonDirectory::remove_core`] drops both.
//!
//! A controller binds to the view of the same key at creation time and keeps that
//! view for its whole life, even if the view is later removed from the directory.
//!
//! ## Process-wide directory
//!
//! [`MultitonDirectory::global`] lazily builds one directory for the process from
//! [`ConfigManager::load`], falling back to defaults when configuration fails to
//! load. `View::get_instance` and `Controller::get_instance` forward to it. Code
//! that wants isolation (tests, embedded hosts) builds its own directory instead.

use crate::config::{ConfigManager, DispatchConfig, DispatchSettings};
use crate::controller::Controller;
use crate::view::View;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

static GLOBAL_DIRECTORY: OnceLock<MultitonDirectory> = OnceLock::new();

pub struct MultitonDirectory {
    views: DashMap<String, Arc<View>>,
    controllers: DashMap<String, Arc<Controller>>,
    settings: DispatchSettings,
}

impl MultitonDirectory {
    pub fn new() -> Self {
        Self::with_config(&DispatchConfig::default())
    }

    pub fn with_config(config: &DispatchConfig) -> Self {
        Self {
            views: DashMap::new(),
            controllers: DashMap::new(),
            settings: config.dispatch.clone(),
        }
    }

    /// Get or initialize the process-wide directory
    pub fn global() -> &'static MultitonDirectory {
        GLOBAL_DIRECTORY.get_or_init(|| match ConfigManager::load() {
            Ok(manager) => MultitonDirectory::with_config(manager.config()),
            Err(e) => {
                warn!("Configuration loading failed, using defaults: {e}");
                MultitonDirectory::new()
            }
        })
    }

    /// View bound to `key`, created on first access
    pub fn view(&self, key: &str) -> Arc<View> {
        self.views
            .entry(key.to_string())
            .or_insert_with(|| {
                info!(multiton_key = key, "Creating view");
                Arc::new(View::new(key, self.settings.clone()))
            })
            .clone()
    }

    /// Controller bound to `key`, created on first access
    pub fn controller(&self, key: &str) -> Arc<Controller> {
        if let Some(controller) = self.controllers.get(key) {
            return controller.clone();
        }

        // Resolve the view before taking the controller shard lock
        let view = self.view(key);
        self.controllers
            .entry(key.to_string())
            .or_insert_with(|| {
                info!(multiton_key = key, "Creating controller");
                Controller::new(key, view)
            })
            .clone()
    }

    pub fn has_view(&self, key: &str) -> bool {
        self.views.contains_key(key)
    }

    pub fn has_controller(&self, key: &str) -> bool {
        self.controllers.contains_key(key)
    }

    /// Unbind the view for `key`; no-op when unbound
    pub fn remove_view(&self, key: &str) {
        if self.views.remove(key).is_some() {
            info!(multiton_key = key, "Removed view");
        }
    }

    /// Unbind the controller for `key`; no-op when unbound
    pub fn remove_controller(&self, key: &str) {
        if self.controllers.remove(key).is_some() {
            info!(multiton_key = key, "Removed controller");
        }
    }

    /// Unbind both registries for `key`
    pub fn remove_core(&self, key: &str) {
        self.remove_controller(key);
        self.remove_view(key);
    }

    /// Keys with at least one bound registry, sorted
    pub fn core_keys(&self) -> Vec<String> {
        let keys: BTreeSet<String> = self
            .views
            .iter()
            .map(|entry| entry.key().clone())
            .chain(self.controllers.iter().map(|entry| entry.key().clone()))
            .collect();
        keys.into_iter().collect()
    }
}

impl Default for MultitonDirectory {
    fn default() -> Self {
        Self::new()
    }
}
