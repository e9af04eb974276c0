//! # Commands
//!
//! Stateless-per-invocation units of work bound to notification names.
//!
//! A [`Controller`](crate::controller::Controller) never stores command instances,
//! only a [`CommandFactory`] per notification name. Each matching notification
//! builds a fresh instance and consumes it through [`Command::execute`], so any
//! state accumulated across notifications has to live outside the command, usually
//! in the notification body.

use crate::error::DispatchResult;
use crate::notification::Notification;
use std::sync::Arc;
use tracing::debug;

/// A unit of work executed once against the notification that triggered it
pub trait Command: Send {
    fn execute(self: Box<Self>, notification: &Notification) -> DispatchResult<()>;
}

/// Zero-argument constructor for a command
pub type CommandFactory = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// Factory for any `Default` command type
pub fn factory_of<C>() -> CommandFactory
where
    C: Command + Default + 'static,
{
    Arc::new(|| Box::new(C::default()) as Box<dyn Command>)
}

/// Command backed by a closure
pub struct SimpleCommand<F>
where
    F: FnOnce(&Notification) -> DispatchResult<()> + Send,
{
    body: F,
}

impl<F> SimpleCommand<F>
where
    F: FnOnce(&Notification) -> DispatchResult<()> + Send,
{
    pub fn new(body: F) -> Self {
        Self { body }
    }
}

impl<F> Command for SimpleCommand<F>
where
    F: FnOnce(&Notification) -> DispatchResult<()> + Send,
{
    fn execute(self: Box<Self>, notification: &Notification) -> DispatchResult<()> {
        (self.body)(notification)
    }
}

/// Factory producing a [`SimpleCommand`] around a shared closure
pub fn simple_command<F>(body: F) -> CommandFactory
where
    F: Fn(&Notification) -> DispatchResult<()> + Send + Sync + 'static,
{
    let body = Arc::new(body);
    Arc::new(move || {
        let body = body.clone();
        Box::new(SimpleCommand::new(move |note: &Notification| body(note))) as Box<dyn Command>
    })
}

/// Command that runs an ordered list of sub-commands
///
/// Every sub-command is freshly built from its factory and executed with the same
/// notification. The first failing sub-command stops the sequence.
#[derive(Default)]
pub struct MacroCommand {
    sub_commands: Vec<CommandFactory>,
}

impl MacroCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sub_command(mut self, factory: CommandFactory) -> Self {
        self.sub_commands.push(factory);
        self
    }

    pub fn len(&self) -> usize {
        self.sub_commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_commands.is_empty()
    }
}

impl Command for MacroCommand {
    fn execute(self: Box<Self>, notification: &Notification) -> DispatchResult<()> {
        debug!(
            notification = notification.name(),
            sub_commands = self.sub_commands.len(),
            "Executing macro command"
        );

        for factory in self.sub_commands {
            factory().execute(notification)?;
        }
        Ok(())
    }
}
