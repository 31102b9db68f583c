//! Error types for Cadena.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`CadenaError`] - Top-level error type for all Cadena operations
//! - [`ChainError`] - Errors from command callback registration and dispatch
//! - [`PublishError`] - Errors from listener registration and event publishing
//! - [`AttributeError`] - Errors from typed attribute access
//!
//! Registration-time errors (`InvalidArgument`) are returned immediately to
//! the caller. Dispatch-time errors raised by callbacks or listeners are not
//! swallowed: they abort the remainder of the dispatch and surface to the
//! original caller of `invoke_callbacks` / `publish_event`.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Cadena operations.
#[derive(Error, Debug)]
pub enum CadenaError {
    /// An error occurred in the command chain.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// An error occurred while publishing an event.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// An error occurred during typed attribute access.
    #[error("attribute error: {0}")]
    Attribute(#[from] AttributeError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised by the command chain.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A registration received input it cannot act on, e.g. an empty
    /// command name or callback id, or a bridge built without a publisher.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A callback failed while a command was being dispatched. The
    /// remaining callbacks for that invocation are skipped.
    #[error("callback '{id}' failed for command '{command}'")]
    Callback {
        /// Id the failing callback was registered under.
        id: String,
        /// Name of the command being dispatched.
        command: String,
        /// The underlying error.
        #[source]
        source: BoxError,
    },
}

/// Errors raised by an event publisher.
#[derive(Error, Debug)]
pub enum PublishError {
    /// A registration received input it cannot act on, e.g. an empty
    /// event name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A listener failed while an event was being published. The remaining
    /// listeners for that publish call are skipped.
    #[error("listener failed for event '{event}'")]
    Listener {
        /// Name of the event being published.
        event: String,
        /// The underlying error.
        #[source]
        source: BoxError,
    },
}

/// Errors raised when reading an attribute as a concrete type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The attribute is not present in the bag.
    #[error("attribute '{key}' is missing")]
    Missing {
        /// The requested key.
        key: String,
    },

    /// The attribute exists but does not deserialize into the requested
    /// type.
    #[error("attribute '{key}' has an unexpected type (expected {expected})")]
    UnexpectedType {
        /// The requested key.
        key: String,
        /// Name of the type the caller asked for.
        expected: &'static str,
    },
}

// Convenience conversions
impl From<BoxError> for CadenaError {
    fn from(err: BoxError) -> Self {
        CadenaError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = ChainError::InvalidArgument("callback id must not be empty".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: callback id must not be empty"
        );
    }

    #[test]
    fn display_callback_failure() {
        let err = ChainError::Callback {
            id: "validator".into(),
            command: "before.save".into(),
            source: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "callback 'validator' failed for command 'before.save'"
        );
    }

    #[test]
    fn display_listener_failure() {
        let err = PublishError::Listener {
            event: "onBeforeSave".into(),
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "listener failed for event 'onBeforeSave'");
    }

    #[test]
    fn display_attribute_errors() {
        let missing = AttributeError::Missing { key: "limit".into() };
        assert_eq!(missing.to_string(), "attribute 'limit' is missing");

        let unexpected = AttributeError::UnexpectedType {
            key: "limit".into(),
            expected: "u32",
        };
        assert_eq!(
            unexpected.to_string(),
            "attribute 'limit' has an unexpected type (expected u32)"
        );
    }

    #[test]
    fn wraps_into_top_level() {
        let err: CadenaError = ChainError::InvalidArgument("x".into()).into();
        assert!(matches!(err, CadenaError::Chain(_)));
    }
}
