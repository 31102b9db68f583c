//! # cadena-core
//!
//! Core types and traits for the Cadena command/event dispatch pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! extensions that don't need the full `cadena-std` implementation.
//!
//! # Pipeline Architecture
//!
//! Cadena models a lifecycle dispatch pipeline in four stages, each with a
//! distinct responsibility:
//!
//! ## Stage 1: Command ([`Command`])
//!
//! A named unit of work with a subject and an ordered attribute bag. The
//! caller builds a command (e.g. `before.item.save`) and hands it to the
//! chain; the attribute bag is the mutable state everything downstream
//! shares.
//!
//! ## Stage 2: Chain ([`CommandCallback`])
//!
//! The chain invokes every callback registered for the command's name in
//! ascending [`Priority`] order. Each callback may mutate the command or
//! set a break condition on the per-invocation [`ChainContext`]; the first
//! break condition halts the run and is returned to the caller.
//!
//! ## Stage 3: Publisher ([`EventPublisher`])
//!
//! A publish/subscribe backbone. Listeners register per event name with a
//! priority; publishing delivers the [`Event`] in order until a listener
//! stops propagation.
//!
//! ## Stage 4: Subscriber ([`EventSubscriber`])
//!
//! A capability object that declares its own listener set and registers it
//! against a publisher, tracking its subscription per
//! [`PublisherHandle`] so subscribing twice is a no-op and unsubscribing
//! removes exactly what it added.
//!
//! The bridge between stages 2 and 3 — translating a command into specific
//! and generic event names — lives in `cadena-std`.
//!
//! # Error Types
//!
//! - [`CadenaError`] - Top-level error type
//! - [`ChainError`] - Command registration/dispatch errors
//! - [`PublishError`] - Listener registration/publish errors
//! - [`AttributeError`] - Typed attribute access errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod attributes;
mod callback;
mod command;
mod context;
mod error;
mod event;
mod identifier;
mod listener;
mod priority;
mod publisher;
mod subscriber;

// Re-exports
pub use attributes::Attributes;
pub use callback::{CommandCallback, FnCallback, callback_fn};
pub use command::Command;
pub use context::ChainContext;
pub use error::{AttributeError, BoxError, CadenaError, ChainError, PublishError};
pub use event::Event;
pub use identifier::Identifier;
pub use listener::{EventListener, FnListener, listener_fn};
pub use priority::Priority;
pub use publisher::{EventPublisher, ListenerToken, PublisherHandle};
pub use subscriber::{EventSubscriber, Subscriptions};
