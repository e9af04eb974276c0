//! Multiton Directory Tests
//!
//! Per-core identity, isolation, and teardown.

mod common;

use common::{ControllerTestCommand2, ControllerTestVo};
use parking_lot::Mutex;
use proptest::prelude::*;
use relay_core::{
    simple_command, DispatchConfig, MultitonDirectory, Notification, NotifyContext, Observer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn get_instance_is_idempotent_until_removed() {
    let directory = MultitonDirectory::new();

    let view = directory.view("MultitonTestKey1");
    let controller = directory.controller("MultitonTestKey1");
    assert!(Arc::ptr_eq(&view, &directory.view("MultitonTestKey1")));
    assert!(Arc::ptr_eq(&controller, &directory.controller("MultitonTestKey1")));

    directory.remove_core("MultitonTestKey1");

    assert!(!Arc::ptr_eq(&view, &directory.view("MultitonTestKey1")));
    assert!(!Arc::ptr_eq(&controller, &directory.controller("MultitonTestKey1")));
}

#[test]
fn removed_core_comes_back_empty() {
    let directory = MultitonDirectory::new();
    let controller = directory.controller("MultitonTestKey2");
    controller.register_command_type::<ControllerTestCommand2>("Populated");
    directory
        .view("MultitonTestKey2")
        .register_observer("Other", Observer::from_fn(NotifyContext::new(), |_| Ok(())));

    directory.remove_core("MultitonTestKey2");

    let controller = directory.controller("MultitonTestKey2");
    let view = directory.view("MultitonTestKey2");
    assert!(controller.command_names().is_empty());
    assert!(view.notification_names().is_empty());
    assert_eq!(view.stats().total_observers, 0);
}

#[test]
fn recreated_controller_leaves_no_stale_forwarding() {
    let directory = MultitonDirectory::new();
    let view = directory.view("MultitonTestKey6");

    directory
        .controller("MultitonTestKey6")
        .register_command_type::<ControllerTestCommand2>("Recycled");
    directory.remove_controller("MultitonTestKey6");
    assert!(!view.has_observers("Recycled"));

    let controller = directory.controller("MultitonTestKey6");
    controller.register_command_type::<ControllerTestCommand2>("Recycled");
    assert_eq!(view.observer_count("Recycled"), 1);

    controller.remove_command("Recycled");
    assert!(!controller.has_command("Recycled"));
    assert!(!view.has_observers("Recycled"));
    assert_eq!(view.observer_count("Recycled"), 0);
}

#[test]
fn commands_do_not_cross_cores() {
    let directory = MultitonDirectory::new();
    directory
        .controller("MultitonTestKey3")
        .register_command_type::<ControllerTestCommand2>("Isolated");

    let note = Notification::new("Isolated").with_body(ControllerTestVo::new(12));
    directory.view("MultitonTestKey4").notify_observers(&note).unwrap();
    assert_eq!(note.body_as::<Mutex<ControllerTestVo>>().unwrap().lock().result, 0);

    directory.view("MultitonTestKey3").notify_observers(&note).unwrap();
    assert_eq!(note.body_as::<Mutex<ControllerTestVo>>().unwrap().lock().result, 24);
}

#[test]
fn directory_built_from_config() {
    let mut config = DispatchConfig::default();
    config.dispatch.warn_on_duplicate_context = false;
    let directory = MultitonDirectory::with_config(&config);

    let context = NotifyContext::new();
    let view = directory.view("MultitonTestKey5");
    view.register_observer("Quiet", Observer::from_fn(context, |_| Ok(())));
    view.register_observer("Quiet", Observer::from_fn(context, |_| Ok(())));
    assert_eq!(view.observer_count("Quiet"), 2);
}

proptest! {
    #[test]
    fn registration_in_one_core_never_fires_in_another(
        k1 in "[a-z]{1,8}",
        k2 in "[a-z]{1,8}",
    ) {
        prop_assume!(k1 != k2);
        let directory = MultitonDirectory::new();
        let executions = Arc::new(AtomicUsize::new(0));
        let counter = executions.clone();
        directory.controller(&k1).register_command(
            "PropNote",
            simple_command(move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }),
        );

        directory.view(&k2).notify_observers(&Notification::new("PropNote")).unwrap();
        prop_assert_eq!(executions.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn toggled_registration_executes_once_per_notification(
        toggles in 0usize..6,
        notifications in 1usize..10,
    ) {
        let directory = MultitonDirectory::new();
        let controller = directory.controller("MultitonPropKey");
        let executions = Arc::new(AtomicUsize::new(0));
        let counter = executions.clone();
        let factory = simple_command(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(())
        });

        for _ in 0..toggles {
            controller.register_command("Toggled", factory.clone());
            controller.remove_command("Toggled");
        }
        controller.register_command("Toggled", factory.clone());
        controller.register_command("Toggled", factory);

        let view = directory.view("MultitonPropKey");
        prop_assert_eq!(view.observer_count("Toggled"), 1);
        for _ in 0..notifications {
            view.notify_observers(&Notification::new("Toggled")).unwrap();
        }
        prop_assert_eq!(executions.load(Ordering::Relaxed), notifications);
    }
}
