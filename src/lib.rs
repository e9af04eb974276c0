#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Relay Core
//!
//! Multicore notification dispatch and command execution.
//!
//! ## Overview
//!
//! Relay Core decouples producers of application events from the logic reacting to
//! them. Each *core* is an isolated partition identified by an opaque string key;
//! several cores coexist in one process and never exchange notifications.
//!
//! ## Architecture
//!
//! ```text
//! MultitonDirectory
//! ├── View        (notification name -> observers, per core)
//! └── Controller  (notification name -> command factory, per core)
//!        └── forwarding observer registered in the View of the same core
//! ```
//!
//! A notification sent through a core's [`View`] reaches every observer registered
//! for its name, in registration order. A [`Controller`] registers one forwarding
//! observer per mapped name, and each forwarded notification builds and executes a
//! fresh [`Command`].
//!
//! ## Module Organization
//!
//! - [`notification`] - The broadcast event value
//! - [`observer`] - Handler and owner identity pairs
//! - [`view`] - Per-core observer registry
//! - [`controller`] - Per-core command registry
//! - [`command`] - Command trait, simple and macro commands
//! - [`multiton`] - Keyed directory of per-core registries
//! - [`config`] - Layered configuration
//! - [`error`] - Dispatch errors
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use relay_core::{Command, DispatchResult, MultitonDirectory, Notification};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[derive(Default)]
//! struct CountCommand;
//!
//! impl Command for CountCommand {
//!     fn execute(self: Box<Self>, notification: &Notification) -> DispatchResult<()> {
//!         if let Some(counter) = notification.body_as::<AtomicU32>() {
//!             counter.fetch_add(1, Ordering::Relaxed);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let directory = MultitonDirectory::new();
//! directory
//!     .controller("QuickStartKey")
//!     .register_command_type::<CountCommand>("Count");
//!
//! let note = Notification::new("Count").with_body(AtomicU32::new(0));
//! directory.view("QuickStartKey").notify_observers(&note).unwrap();
//! assert_eq!(note.body_as::<AtomicU32>().unwrap().load(Ordering::Relaxed), 1);
//!
//! directory.remove_core("QuickStartKey");
//! ```

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod multiton;
pub mod notification;
pub mod observer;
pub mod view;

pub use command::{factory_of, simple_command, Command, CommandFactory, MacroCommand, SimpleCommand};
pub use config::{ConfigManager, ConfigurationError, DispatchConfig, DispatchSettings, LoggingConfig};
pub use controller::Controller;
pub use error::{DispatchError, DispatchResult};
pub use multiton::MultitonDirectory;
pub use notification::{Body, Notification};
pub use observer::{NotifyContext, NotifyMethod, Observer};
pub use view::{View, ViewStats};
