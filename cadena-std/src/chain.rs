//! The command chain: ordered callback dispatch with break conditions.

use cadena_core::{
    Attributes, ChainContext, ChainError, Command, CommandCallback, Identifier, Priority,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

#[derive(Clone)]
struct CallbackEntry {
    id: String,
    priority: Priority,
    params: Attributes,
    callback: Arc<dyn CommandCallback>,
}

/// Describes one registered callback: its id, priority and parameters.
///
/// Returned by [`CommandChain::callbacks`] for introspection; the callback
/// itself is not exposed.
#[derive(Debug, Clone)]
pub struct CallbackRef {
    id: String,
    priority: Priority,
    params: Attributes,
}

impl CallbackRef {
    /// The id the callback was registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The dispatch priority, fixed at first registration.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The accumulated parameters.
    pub fn params(&self) -> &Attributes {
        &self.params
    }
}

/// Invokes the callbacks registered for a command, in priority order.
///
/// Callbacks are registered under the exact command name plus a caller
/// chosen id; the `(command, id)` pair is the registration identity.
/// Re-adding an existing pair does not register a second callback — the
/// new parameters are merged into the stored ones (new keys override) and
/// the original priority and handler are kept.
///
/// Dispatch creates a fresh [`ChainContext`] per invocation, so a break
/// condition set during one run can never leak into the next, and a chain
/// shared behind [`Arc`] can serve concurrent invocations. Callbacks run
/// against a snapshot of the registry, so they are free to register or
/// remove callbacks mid-dispatch.
pub struct CommandChain {
    enabled: AtomicBool,
    callbacks: RwLock<HashMap<String, Vec<CallbackEntry>>>,
}

impl CommandChain {
    /// Create an enabled chain with no callbacks.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Allow dispatch through this chain.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Short-circuit dispatch: while disabled, `invoke_callbacks` returns
    /// `None` without running anything.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Whether the chain currently dispatches.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Register a callback with no parameters at [`Priority::NORMAL`].
    pub fn add_callback(
        &self,
        command: &str,
        id: &str,
        callback: impl CommandCallback + 'static,
    ) -> Result<(), ChainError> {
        self.add_callback_with(command, id, callback, Attributes::new(), Priority::NORMAL)
    }

    /// Register a callback with parameters and a priority.
    ///
    /// When a callback with the same `(command, id)` identity already
    /// exists, its parameters are merged (new keys override) and its
    /// priority and handler stay untouched.
    ///
    /// Fails with [`ChainError::InvalidArgument`] when `command` or `id`
    /// is empty.
    pub fn add_callback_with(
        &self,
        command: &str,
        id: &str,
        callback: impl CommandCallback + 'static,
        params: Attributes,
        priority: Priority,
    ) -> Result<(), ChainError> {
        if command.is_empty() {
            return Err(ChainError::InvalidArgument(
                "command name must not be empty".into(),
            ));
        }
        if id.is_empty() {
            return Err(ChainError::InvalidArgument(
                "callback id must not be empty".into(),
            ));
        }

        let mut callbacks = self.callbacks.write().expect("callback registry poisoned");
        let entries = callbacks.entry(command.to_string()).or_default();

        if let Some(existing) = entries.iter_mut().find(|e| e.id == id) {
            existing.params.merge(&params);
            return Ok(());
        }

        // Insert in priority order, FIFO among equal priorities.
        let pos = entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(entries.len());
        entries.insert(
            pos,
            CallbackEntry {
                id: id.to_string(),
                priority,
                params,
                callback: Arc::new(callback),
            },
        );
        Ok(())
    }

    /// Remove the callback registered under `(command, id)`.
    ///
    /// Returns `false` (a no-op, not an error) when no such registration
    /// exists.
    pub fn remove_callback(&self, command: &str, id: &str) -> bool {
        let mut callbacks = self.callbacks.write().expect("callback registry poisoned");
        let Some(entries) = callbacks.get_mut(command) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() < before;
        if entries.is_empty() {
            callbacks.remove(command);
        }
        removed
    }

    /// The callbacks registered for a command name, in dispatch order.
    pub fn callbacks(&self, command: &str) -> Vec<CallbackRef> {
        let callbacks = self.callbacks.read().expect("callback registry poisoned");
        callbacks.get(command).map_or_else(Vec::new, |entries| {
            entries
                .iter()
                .map(|e| CallbackRef {
                    id: e.id.clone(),
                    priority: e.priority,
                    params: e.params.clone(),
                })
                .collect()
        })
    }

    /// Every registration, grouped by command name, each group in dispatch
    /// order.
    pub fn all_callbacks(&self) -> HashMap<String, Vec<CallbackRef>> {
        let callbacks = self.callbacks.read().expect("callback registry poisoned");
        callbacks
            .iter()
            .map(|(command, entries)| {
                let refs = entries
                    .iter()
                    .map(|e| CallbackRef {
                        id: e.id.clone(),
                        priority: e.priority,
                        params: e.params.clone(),
                    })
                    .collect();
                (command.clone(), refs)
            })
            .collect()
    }

    /// Invoke every callback registered for the command's name.
    ///
    /// Before each callback runs, its stored parameters are appended into
    /// the command's attribute bag (missing keys only). Dispatch halts as
    /// soon as a callback sets a break condition on the [`ChainContext`];
    /// that condition is returned. With no callbacks registered, or none
    /// breaking, the result is `Ok(None)`.
    ///
    /// A callback error aborts the run and is returned as
    /// [`ChainError::Callback`].
    pub fn invoke_callbacks(&self, command: &mut Command) -> Result<Option<Value>, ChainError> {
        if !self.is_enabled() {
            return Ok(None);
        }
        if command.name().is_empty() {
            return Err(ChainError::InvalidArgument(
                "command name must not be empty".into(),
            ));
        }

        let snapshot: Vec<CallbackEntry> = {
            let callbacks = self.callbacks.read().expect("callback registry poisoned");
            callbacks.get(command.name()).cloned().unwrap_or_default()
        };

        tracing::debug!(
            command = command.name(),
            callbacks = snapshot.len(),
            "invoking command callbacks"
        );

        let mut context = ChainContext::new();
        for entry in snapshot {
            command.attributes_mut().append(&entry.params);

            if let Err(source) = entry.callback.execute(command, &mut context) {
                return Err(ChainError::Callback {
                    id: entry.id,
                    command: command.name().to_string(),
                    source,
                });
            }

            if context.break_condition().is_some() {
                tracing::debug!(
                    command = command.name(),
                    callback = entry.id.as_str(),
                    "break condition set, halting dispatch"
                );
                break;
            }
        }

        Ok(context.into_break_condition())
    }

    /// Build a command from its parts and invoke its callbacks.
    ///
    /// Returns the dispatched command (with whatever mutations callbacks
    /// made) alongside the break condition.
    pub fn invoke(
        &self,
        name: &str,
        attributes: Attributes,
        subject: Option<Identifier>,
    ) -> Result<(Command, Option<Value>), ChainError> {
        let mut command = Command::new(name).with_attributes(attributes);
        if let Some(subject) = subject {
            command = command.with_subject(subject);
        }
        let condition = self.invoke_callbacks(&mut command)?;
        Ok((command, condition))
    }
}

impl Default for CommandChain {
    fn default() -> Self {
        Self::new()
    }
}
