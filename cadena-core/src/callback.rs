//! Command callbacks: the unit of work a chain dispatches.

use crate::{command::Command, context::ChainContext, error::BoxError};
use std::sync::Arc;

/// A handler invoked by the command chain.
///
/// Callbacks receive the command mutably — attribute changes they make are
/// visible to every callback that runs after them in the same invocation —
/// together with the per-invocation [`ChainContext`]. Setting a break
/// condition on the context halts the chain; the condition becomes the
/// return value of `invoke_callbacks`.
///
/// Errors are not swallowed: a callback returning `Err` aborts the
/// remainder of the dispatch and surfaces to the chain's caller.
pub trait CommandCallback: Send + Sync {
    /// Handle the command.
    fn execute(&self, command: &mut Command, context: &mut ChainContext) -> Result<(), BoxError>;
}

// Allow shared callbacks to be registered under several command names.
impl<T: CommandCallback + ?Sized> CommandCallback for Arc<T> {
    fn execute(&self, command: &mut Command, context: &mut ChainContext) -> Result<(), BoxError> {
        (**self).execute(command, context)
    }
}

impl<T: CommandCallback + ?Sized> CommandCallback for Box<T> {
    fn execute(&self, command: &mut Command, context: &mut ChainContext) -> Result<(), BoxError> {
        (**self).execute(command, context)
    }
}

/// A [`CommandCallback`] backed by a plain function or closure.
///
/// Built with [`callback_fn`].
pub struct FnCallback<F> {
    f: F,
}

impl<F> CommandCallback for FnCallback<F>
where
    F: Fn(&mut Command, &mut ChainContext) -> Result<(), BoxError> + Send + Sync,
{
    fn execute(&self, command: &mut Command, context: &mut ChainContext) -> Result<(), BoxError> {
        (self.f)(command, context)
    }
}

/// Wrap a function or closure as a [`CommandCallback`].
///
/// ```rust,ignore
/// chain.add_callback("before.save", "audit", callback_fn(|command, _context| {
///     println!("saving {}", command.name());
///     Ok(())
/// }))?;
/// ```
pub fn callback_fn<F>(f: F) -> FnCallback<F>
where
    F: Fn(&mut Command, &mut ChainContext) -> Result<(), BoxError> + Send + Sync,
{
    FnCallback { f }
}
