//! Dispatch priority.

use serde::{Deserialize, Serialize};

/// Dispatch priority for callbacks and listeners.
///
/// Lower values dispatch earlier: `Priority::HIGHEST` runs before
/// `Priority::LOWEST`. Registrations with equal priority keep their
/// registration order (stable ties).
///
/// The named constants span the conventional range 1 (highest) to
/// 5 (lowest); any `i32` is accepted for finer-grained ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i32);

impl Priority {
    /// Dispatched before every other named priority.
    pub const HIGHEST: Priority = Priority(1);
    /// Dispatched early.
    pub const HIGH: Priority = Priority(2);
    /// The default priority.
    pub const NORMAL: Priority = Priority(3);
    /// Dispatched late.
    pub const LOW: Priority = Priority(4);
    /// Dispatched after every other named priority.
    pub const LOWEST: Priority = Priority(5);
}

impl Default for Priority {
    fn default() -> Self {
        Priority::NORMAL
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
