//! # cadena-std
//!
//! Standard implementations for the Cadena command/event dispatch pipeline.
//!
//! This crate provides:
//! - **Command dispatch**: [`CommandChain`]
//! - **Event publishing**: [`EventBroker`]
//! - **Command → event translation**: [`EventBridge`]
//! - **Casing helpers**: [`inflector`]
//! - **Test doubles**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use cadena_core;

// Modules
pub mod bridge;
pub mod broker;
pub mod chain;
pub mod inflector;
pub mod testing;

pub use bridge::{DispatchMode, EventBridge, EventBridgeBuilder};
pub use broker::EventBroker;
pub use chain::{CallbackRef, CommandChain};
