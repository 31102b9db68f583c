//! Per-invocation dispatch context.

use serde_json::Value;

/// State scoped to a single `invoke_callbacks` run.
///
/// The chain creates a fresh context for every invocation and threads it
/// through the callbacks, so break-condition state cannot leak from one
/// dispatch into the next — two sequential invocations on the same chain
/// always start from a clean context, and two concurrent invocations never
/// observe each other.
///
/// A callback signals a break by setting a condition; the chain checks the
/// context after each callback and halts the run as soon as a condition is
/// present, returning it to the caller.
#[derive(Debug, Default)]
pub struct ChainContext {
    break_condition: Option<Value>,
}

impl ChainContext {
    /// Create a context with no break condition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the break condition.
    pub fn set_break_condition(&mut self, condition: Option<Value>) {
        self.break_condition = condition;
    }

    /// Set the break condition from any value convertible to a JSON value.
    pub fn break_with(&mut self, condition: impl Into<Value>) {
        self.break_condition = Some(condition.into());
    }

    /// The current break condition, if any.
    pub fn break_condition(&self) -> Option<&Value> {
        self.break_condition.as_ref()
    }

    /// Consume the context, yielding the break condition.
    pub fn into_break_condition(self) -> Option<Value> {
        self.break_condition
    }
}
