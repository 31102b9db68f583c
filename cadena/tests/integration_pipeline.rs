//! End-to-end pipeline: command chain → bridge → broker → subscriber.

use cadena::testing::ProbeSubscriber;
use cadena::{
    Attributes, Command, CommandChain, Event, EventBridge, EventBroker, EventPublisher,
    EventSubscriber, Identifier, Priority, callback_fn, listener_fn,
};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::attrs;

const SPECIFIC: &str = "onBeforeBlogArticleContentItemSave";
const GENERIC: &str = "onBeforeContentItemSave";

#[test]
fn a_command_flows_through_callbacks_events_and_subscribers() {
    let broker = Arc::new(EventBroker::new());

    // A subscriber interested in both derived event names.
    let mut subscriber = ProbeSubscriber::new([SPECIFIC, GENERIC]);
    subscriber
        .subscribe(broker.as_ref(), Priority::NORMAL)
        .unwrap();

    // A listener that enriches the event before write-back.
    broker
        .add_listener(
            SPECIFIC,
            listener_fn(|event: &mut Event| {
                event.attributes_mut().set("notified", true);
                Ok(())
            }),
            Priority::HIGH,
        )
        .unwrap();

    let chain = CommandChain::new();
    chain
        .add_callback(
            "before.item.save",
            "validate",
            callback_fn(|command, _| {
                command.attributes_mut().set("validated", true);
                Ok(())
            }),
        )
        .unwrap();
    chain
        .add_callback_with(
            "before.item.save",
            "events",
            EventBridge::new(broker.clone()),
            Attributes::new(),
            EventBridge::DEFAULT_PRIORITY,
        )
        .unwrap();

    let subject = Identifier::new("blog", "article").with_path(["content"]);
    let (command, condition) = chain
        .invoke(
            "before.item.save",
            attrs([("title", json!("draft"))]),
            Some(subject),
        )
        .unwrap();

    assert_eq!(condition, None);
    assert_eq!(subscriber.hits(), [SPECIFIC, GENERIC]);

    // The validation callback ran before the bridge, so its mark reached
    // the listeners; the listener's mark came back into the command.
    assert_eq!(command.attributes().get("validated"), Some(&json!(true)));
    assert_eq!(command.attributes().get("notified"), Some(&json!(true)));
    assert_eq!(command.attributes().get("title"), Some(&json!("draft")));
}

#[test]
fn a_break_before_the_bridge_suppresses_all_events() {
    let broker = Arc::new(EventBroker::new());
    let mut subscriber = ProbeSubscriber::new([SPECIFIC, GENERIC]);
    subscriber
        .subscribe(broker.as_ref(), Priority::NORMAL)
        .unwrap();

    let chain = CommandChain::new();
    chain
        .add_callback_with(
            "before.item.save",
            "gatekeeper",
            callback_fn(|_, context| {
                context.break_with("not authorized");
                Ok(())
            }),
            Attributes::new(),
            Priority::HIGHEST,
        )
        .unwrap();
    chain
        .add_callback_with(
            "before.item.save",
            "events",
            EventBridge::new(broker.clone()),
            Attributes::new(),
            EventBridge::DEFAULT_PRIORITY,
        )
        .unwrap();

    let subject = Identifier::new("blog", "article").with_path(["content"]);
    let mut command = Command::new("before.item.save").with_subject(subject);
    let condition = chain.invoke_callbacks(&mut command).unwrap();

    assert_eq!(condition, Some(json!("not authorized")));
    assert!(subscriber.hits().is_empty(), "the bridge must not have run");
}
