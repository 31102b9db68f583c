//! Command chain dispatch semantics.

use cadena::testing::{CountingCallback, FailingCallback, OrderRecordingCallback};
use cadena::{Attributes, ChainError, Command, CommandChain, Priority, callback_fn};
use serde_json::json;
use std::sync::{Arc, Mutex};

mod common;
use common::attrs;

#[test]
fn callbacks_run_in_ascending_priority_order() {
    let chain = CommandChain::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    chain
        .add_callback_with(
            "before.render",
            "five",
            OrderRecordingCallback::new("five", order.clone()),
            Attributes::new(),
            Priority(5),
        )
        .unwrap();
    chain
        .add_callback_with(
            "before.render",
            "one",
            OrderRecordingCallback::new("one", order.clone()),
            Attributes::new(),
            Priority(1),
        )
        .unwrap();
    chain
        .add_callback_with(
            "before.render",
            "three",
            OrderRecordingCallback::new("three", order.clone()),
            Attributes::new(),
            Priority(3),
        )
        .unwrap();

    let mut command = Command::new("before.render");
    chain.invoke_callbacks(&mut command).unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["one", "three", "five"]);
}

#[test]
fn equal_priorities_keep_registration_order() {
    let chain = CommandChain::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for label in ["first", "second", "third"] {
        chain
            .add_callback_with(
                "before.render",
                label,
                OrderRecordingCallback::new(label, order.clone()),
                Attributes::new(),
                Priority::NORMAL,
            )
            .unwrap();
    }

    let mut command = Command::new("before.render");
    chain.invoke_callbacks(&mut command).unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn break_condition_halts_dispatch_and_is_returned() {
    let chain = CommandChain::new();
    let breaker = CountingCallback::breaking(json!("denied"));
    let bystander = CountingCallback::new();
    let bystander_calls = bystander.counter();

    chain
        .add_callback_with(
            "before.save",
            "breaker",
            breaker,
            Attributes::new(),
            Priority::HIGH,
        )
        .unwrap();
    chain
        .add_callback_with(
            "before.save",
            "bystander",
            bystander,
            Attributes::new(),
            Priority::LOW,
        )
        .unwrap();

    let mut command = Command::new("before.save");
    let condition = chain.invoke_callbacks(&mut command).unwrap();

    assert_eq!(condition, Some(json!("denied")));
    assert_eq!(
        bystander_calls.load(std::sync::atomic::Ordering::SeqCst),
        0,
        "callbacks after the break must not run"
    );
}

#[test]
fn break_condition_does_not_leak_across_invocations() {
    let chain = CommandChain::new();
    chain
        .add_callback(
            "test.first",
            "breaker",
            callback_fn(|_, context| {
                context.break_with("stop");
                Ok(())
            }),
        )
        .unwrap();

    let seen_stale_break = Arc::new(Mutex::new(None));
    let probe = seen_stale_break.clone();
    chain
        .add_callback(
            "test.second",
            "probe",
            callback_fn(move |_, context| {
                *probe.lock().unwrap() = Some(context.break_condition().is_some());
                Ok(())
            }),
        )
        .unwrap();

    let mut first = Command::new("test.first");
    assert_eq!(chain.invoke_callbacks(&mut first).unwrap(), Some(json!("stop")));

    let mut second = Command::new("test.second");
    assert_eq!(chain.invoke_callbacks(&mut second).unwrap(), None);
    assert_eq!(
        *seen_stale_break.lock().unwrap(),
        Some(false),
        "a new invocation must start with a clean break condition"
    );
}

#[test]
fn attribute_mutations_are_visible_to_later_callbacks() {
    let chain = CommandChain::new();
    chain
        .add_callback_with(
            "before.save",
            "writer",
            callback_fn(|command, _| {
                command.attributes_mut().set("touched", true);
                Ok(())
            }),
            Attributes::new(),
            Priority::HIGH,
        )
        .unwrap();

    let observed = Arc::new(Mutex::new(None));
    let reader = observed.clone();
    chain
        .add_callback_with(
            "before.save",
            "reader",
            callback_fn(move |command, _| {
                *reader.lock().unwrap() = command.attributes().get("touched").cloned();
                Ok(())
            }),
            Attributes::new(),
            Priority::LOW,
        )
        .unwrap();

    let mut command = Command::new("before.save");
    chain.invoke_callbacks(&mut command).unwrap();

    assert_eq!(*observed.lock().unwrap(), Some(json!(true)));
    assert_eq!(command.attributes().get("touched"), Some(&json!(true)));
}

#[test]
fn dispatch_without_callbacks_returns_none() {
    let chain = CommandChain::new();
    let mut command = Command::new("before.nothing");
    assert_eq!(chain.invoke_callbacks(&mut command).unwrap(), None);
}

#[test]
fn callback_errors_abort_the_dispatch() {
    let chain = CommandChain::new();
    let bystander = CountingCallback::new();
    let bystander_calls = bystander.counter();

    chain
        .add_callback_with(
            "before.save",
            "boom",
            FailingCallback { message: "db gone" },
            Attributes::new(),
            Priority::HIGH,
        )
        .unwrap();
    chain
        .add_callback_with(
            "before.save",
            "bystander",
            bystander,
            Attributes::new(),
            Priority::LOW,
        )
        .unwrap();

    let mut command = Command::new("before.save");
    let err = chain.invoke_callbacks(&mut command).unwrap_err();

    match err {
        ChainError::Callback { id, command, .. } => {
            assert_eq!(id, "boom");
            assert_eq!(command, "before.save");
        }
        other => panic!("expected callback error, got {other}"),
    }
    assert_eq!(bystander_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn disabled_chain_short_circuits() {
    let chain = CommandChain::new();
    let callback = CountingCallback::new();
    let calls = callback.counter();
    chain
        .add_callback("before.save", "counter", callback)
        .unwrap();

    chain.disable();
    assert!(!chain.is_enabled());
    let mut command = Command::new("before.save");
    assert_eq!(chain.invoke_callbacks(&mut command).unwrap(), None);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);

    chain.enable();
    chain.invoke_callbacks(&mut command).unwrap();
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn params_fill_in_missing_attributes_only() {
    let chain = CommandChain::new();
    let observed = Arc::new(Mutex::new(Attributes::new()));
    let probe = observed.clone();

    chain
        .add_callback_with(
            "before.list",
            "paginator",
            callback_fn(move |command, _| {
                *probe.lock().unwrap() = command.attributes().clone();
                Ok(())
            }),
            attrs([("limit", json!(10)), ("mode", json!("strict"))]),
            Priority::NORMAL,
        )
        .unwrap();

    let (command, _) = chain
        .invoke("before.list", attrs([("limit", json!(99))]), None)
        .unwrap();

    let seen = observed.lock().unwrap();
    assert_eq!(seen.get("limit"), Some(&json!(99)), "caller value wins");
    assert_eq!(seen.get("mode"), Some(&json!("strict")), "param fills gap");
    assert_eq!(command.attributes().get("mode"), Some(&json!("strict")));
}
