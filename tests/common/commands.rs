//! Shared value objects and commands for integration tests.

use parking_lot::Mutex;
use relay_core::{Command, DispatchError, DispatchResult, Notification};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Value object carried as a notification body
#[derive(Debug, Default)]
pub struct ControllerTestVo {
    pub input: i64,
    pub result: i64,
}

impl ControllerTestVo {
    pub fn new(input: i64) -> Mutex<Self> {
        Mutex::new(Self { input, result: 0 })
    }
}

fn vo_of(notification: &Notification) -> DispatchResult<&Mutex<ControllerTestVo>> {
    notification
        .body_as::<Mutex<ControllerTestVo>>()
        .ok_or_else(|| DispatchError::command_failed(notification.name(), "missing ControllerTestVo body"))
}

/// Sets `result = input * 2`
#[derive(Default)]
pub struct ControllerTestCommand;

impl Command for ControllerTestCommand {
    fn execute(self: Box<Self>, notification: &Notification) -> DispatchResult<()> {
        let mut vo = vo_of(notification)?.lock();
        vo.result = 2 * vo.input;
        Ok(())
    }
}

/// Accumulates `result += input * 2`
#[derive(Default)]
pub struct ControllerTestCommand2;

impl Command for ControllerTestCommand2 {
    fn execute(self: Box<Self>, notification: &Notification) -> DispatchResult<()> {
        let mut vo = vo_of(notification)?.lock();
        vo.result += 2 * vo.input;
        Ok(())
    }
}

static INSTANCES_CREATED: AtomicUsize = AtomicUsize::new(0);

/// Records how many instances have executed and which instance ran
pub struct InstanceTrackingCommand {
    instance: usize,
    executed: bool,
}

impl Default for InstanceTrackingCommand {
    fn default() -> Self {
        Self {
            instance: INSTANCES_CREATED.fetch_add(1, Ordering::SeqCst),
            executed: false,
        }
    }
}

impl Command for InstanceTrackingCommand {
    fn execute(mut self: Box<Self>, notification: &Notification) -> DispatchResult<()> {
        assert!(!self.executed, "command instance executed twice");
        self.executed = true;
        if let Some(seen) = notification.body_as::<Mutex<Vec<usize>>>() {
            seen.lock().push(self.instance);
        }
        Ok(())
    }
}
