//! Injected sink for data-quality events.
//!
//! The volume models and the concentration calculator observe imperfect
//! lab data (solvents weighed in grams, no liquid phase at all). Those
//! observations must reach a reviewer but must never fail the pipeline,
//! so they are recorded through an injected sink rather than a global
//! logger. Tests inject [`MemorySink`] and assert on what fired.

use std::sync::Mutex;

/// Severity of one data-quality event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected degradation (e.g., a documented fallback was taken).
    Info,
    /// Unusual data worth a human look.
    Warning,
}

/// One recorded observation about the input data.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQualityEvent {
    pub severity: Severity,
    pub message: String,
}

/// Receiver for data-quality events.
///
/// `Sync` so one sink can be shared across many concurrent ingredient
/// constructions.
pub trait EventSink: Sync {
    fn record(&self, severity: Severity, message: &str);
}

/// Default sink: forwards events to `tracing` at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "rf_reagents", "{message}"),
            Severity::Warning => tracing::warn!(target: "rf_reagents", "{message}"),
        }
    }
}

/// Buffering sink: keeps every event for later inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DataQualityEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in arrival order.
    pub fn events(&self) -> Vec<DataQualityEvent> {
        self.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages_with(Severity::Warning)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages_with(Severity::Info)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DataQualityEvent>> {
        // A panic while holding the lock cannot corrupt a Vec of owned
        // events, so recover instead of poisoning the whole sink.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventSink for MemorySink {
    fn record(&self, severity: Severity, message: &str) {
        self.lock().push(DataQualityEvent {
            severity,
            message: message.to_string(),
        });
    }
}
