//! crates/logging/src/thread_local.rs
//! Thread-local buffer of events recorded by [`crate::CaptureLayer`].

use super::levels::DebugFlag;
use std::cell::RefCell;

thread_local! {
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<DiagnosticEvent>> = RefCell::new(Vec::new());
}

/// Diagnostic event collected on the emitting thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Category the event's target maps to.
    pub flag: DebugFlag,
    /// Verbosity level of the event (1 info and above, 2 debug, 3 trace).
    pub level: u8,
    /// The event message.
    pub message: String,
    /// Remaining fields as `name=value` pairs, in recording order.
    pub fields: Vec<(String, String)>,
}

impl DiagnosticEvent {
    /// Value of a recorded field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Record an event for the current thread.
pub fn emit(event: DiagnosticEvent) {
    EVENTS.with(|e| e.borrow_mut().push(event));
}

/// Drain all collected events, clearing the internal buffer.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}
