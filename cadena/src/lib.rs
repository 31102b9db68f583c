//! # cadena - Command Chain and Event Publishing
//!
//! `cadena` dispatches named commands through a priority-ordered chain of
//! callbacks and republishes them as events to priority-ordered listeners.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cadena::{
//!     Attributes, CommandChain, EventBridge, EventBroker, EventPublisher,
//!     Priority, callback_fn, listener_fn,
//! };
//! use std::sync::Arc;
//!
//! let broker = Arc::new(EventBroker::new());
//! broker.add_listener(
//!     "onBeforeItemSave",
//!     listener_fn(|event| {
//!         event.attributes_mut().set("checked", true);
//!         Ok(())
//!     }),
//!     Priority::NORMAL,
//! )?;
//!
//! let chain = CommandChain::new();
//! chain.add_callback("before.item.save", "validate", callback_fn(|command, context| {
//!     if command.attributes().get("title").is_none() {
//!         context.break_with("missing title");
//!     }
//!     Ok(())
//! }))?;
//! chain.add_callback_with(
//!     "before.item.save",
//!     "events",
//!     EventBridge::new(broker.clone()),
//!     Attributes::new(),
//!     EventBridge::DEFAULT_PRIORITY,
//! )?;
//!
//! let (command, break_condition) = chain.invoke("before.item.save", Attributes::new(), None)?;
//! ```

#![warn(missing_docs)]

pub use cadena_core::{
    // Data carriers
    Attributes,
    // Errors
    AttributeError,
    BoxError,
    CadenaError,
    // Chain
    ChainContext,
    ChainError,
    Command,
    CommandCallback,
    Event,
    // Publishing
    EventListener,
    EventPublisher,
    EventSubscriber,
    FnCallback,
    FnListener,
    Identifier,
    ListenerToken,
    Priority,
    PublishError,
    PublisherHandle,
    Subscriptions,
    callback_fn,
    listener_fn,
};

pub use cadena_std::{
    CallbackRef, CommandChain, DispatchMode, EventBridge, EventBridgeBuilder, EventBroker,
};

/// Test doubles re-exported for downstream test suites.
pub use cadena_std::testing;
