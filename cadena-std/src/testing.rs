//! Testing utilities for Cadena.
//!
//! Reusable doubles for exercising chains, publishers and subscribers:
//!
//! - [`RecordingListener`]: records every event it receives
//! - [`StopListener`]: stops propagation on every event
//! - [`FailingListener`] / [`FailingCallback`]: always error
//! - [`CountingCallback`]: counts invocations, optionally breaking the chain
//! - [`OrderRecordingCallback`]: appends a label to a shared order log
//! - [`ProbeSubscriber`]: a subscriber declaring listeners for a fixed set
//!   of event names, recording which of them fire

use cadena_core::{
    Attributes, BoxError, ChainContext, Command, CommandCallback, Event, EventListener,
    EventSubscriber, Subscriptions, listener_fn,
};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// A listener that records the name and attributes of every event it sees.
///
/// Clones share the same record, so a test can keep one half and register
/// the other.
#[derive(Default)]
pub struct RecordingListener {
    records: Arc<Mutex<Vec<(String, Attributes)>>>,
}

impl RecordingListener {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `(event name, attributes)` pairs recorded so far.
    pub fn records(&self) -> Vec<(String, Attributes)> {
        self.records.lock().expect("record log poisoned").clone()
    }

    /// Number of events recorded.
    pub fn count(&self) -> usize {
        self.records.lock().expect("record log poisoned").len()
    }
}

impl Clone for RecordingListener {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &mut Event) -> Result<(), BoxError> {
        self.records
            .lock()
            .expect("record log poisoned")
            .push((event.name().to_string(), event.attributes().clone()));
        Ok(())
    }
}

/// A listener that stops propagation on every event it receives.
pub struct StopListener;

impl EventListener for StopListener {
    fn on_event(&self, event: &mut Event) -> Result<(), BoxError> {
        event.stop_propagation();
        Ok(())
    }
}

/// A listener that always fails with the given message.
pub struct FailingListener {
    /// The error message to fail with.
    pub message: &'static str,
}

impl EventListener for FailingListener {
    fn on_event(&self, _event: &mut Event) -> Result<(), BoxError> {
        Err(self.message.into())
    }
}

/// A callback that counts its invocations and can break the chain.
pub struct CountingCallback {
    calls: Arc<AtomicUsize>,
    break_condition: Option<Value>,
}

impl CountingCallback {
    /// Create a callback that never breaks.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            break_condition: None,
        }
    }

    /// Create a callback that sets the given break condition on every call.
    pub fn breaking(condition: impl Into<Value>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            break_condition: Some(condition.into()),
        }
    }

    /// Number of times the callback ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A handle to the shared call counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Default for CountingCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCallback for CountingCallback {
    fn execute(&self, _command: &mut Command, context: &mut ChainContext) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(condition) = &self.break_condition {
            context.set_break_condition(Some(condition.clone()));
        }
        Ok(())
    }
}

/// A callback that appends its label to a shared order log.
pub struct OrderRecordingCallback {
    label: &'static str,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderRecordingCallback {
    /// Create a callback writing `label` into `order` on every call.
    pub fn new(label: &'static str, order: Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self { label, order }
    }
}

impl CommandCallback for OrderRecordingCallback {
    fn execute(&self, _command: &mut Command, _context: &mut ChainContext) -> Result<(), BoxError> {
        self.order.lock().expect("order log poisoned").push(self.label);
        Ok(())
    }
}

/// A callback that always fails with the given message.
pub struct FailingCallback {
    /// The error message to fail with.
    pub message: &'static str,
}

impl CommandCallback for FailingCallback {
    fn execute(&self, _command: &mut Command, _context: &mut ChainContext) -> Result<(), BoxError> {
        Err(self.message.into())
    }
}

/// A subscriber that declares listeners for a fixed set of event names.
///
/// Every delivered event pushes its name onto a shared hit log, so tests
/// can assert exactly which declared events fired and in what order.
pub struct ProbeSubscriber {
    events: Vec<String>,
    hits: Arc<Mutex<Vec<String>>>,
    subscriptions: Subscriptions,
}

impl ProbeSubscriber {
    /// Create a subscriber declaring a listener per event name.
    pub fn new<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: events.into_iter().map(Into::into).collect(),
            hits: Arc::new(Mutex::new(Vec::new())),
            subscriptions: Subscriptions::new(),
        }
    }

    /// The names of the events delivered so far, in delivery order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("hit log poisoned").clone()
    }
}

impl EventSubscriber for ProbeSubscriber {
    fn listeners(&self) -> Vec<(String, Arc<dyn EventListener>)> {
        self.events
            .iter()
            .map(|event| {
                let hits = Arc::clone(&self.hits);
                let listener = listener_fn(move |event: &mut Event| {
                    hits.lock()
                        .expect("hit log poisoned")
                        .push(event.name().to_string());
                    Ok(())
                });
                (event.clone(), listener)
            })
            .collect()
    }

    fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    fn subscriptions_mut(&mut self) -> &mut Subscriptions {
        &mut self.subscriptions
    }
}
