//! Diagnostic events and sinks
//!
//! Modules report noteworthy events to a [`DiagnosticSink`] they are given at
//! construction. [`TracingSink`] forwards events to `tracing`;
//! [`RecordingSink`] keeps them in memory so tests can assert on them.

use hotcool_core::ConfigurationCommand;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Event reported by a capability module
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// An angle field could not be parsed and the target fell back to a default
    TargetFallback {
        field: &'static str,
        value: Option<String>,
        fallback: i32,
    },
    /// The device reported an oscillation mode token with no known meaning
    UnknownModeToken { token: String },
    /// A configuration command was handed to the device client
    CommandSent { command: ConfigurationCommand },
}

/// Receiver for diagnostic events
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// Sink that logs every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::TargetFallback {
                field,
                value,
                fallback,
            } => {
                warn!(
                    "Cannot parse oscillation angle field '{}' ({:?}), using target {}",
                    field, value, fallback
                );
            }
            DiagnosticEvent::UnknownModeToken { token } => {
                warn!("Unknown oscillation mode token: {}", token);
            }
            DiagnosticEvent::CommandSent { command } => {
                debug!("Sent configuration command: {:?}", command);
            }
        }
    }
}

/// Sink that stores events in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<DiagnosticEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(DiagnosticEvent::UnknownModeToken {
            token: "0270".to_string(),
        });
        sink.record(DiagnosticEvent::CommandSent {
            command: ConfigurationCommand::new().oscillation(false),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], DiagnosticEvent::UnknownModeToken { .. }));

        assert_eq!(sink.take().len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_all_events() {
        let sink = TracingSink;
        sink.record(DiagnosticEvent::TargetFallback {
            field: "osal",
            value: None,
            fallback: 180,
        });
        sink.record(DiagnosticEvent::UnknownModeToken {
            token: "XXXX".to_string(),
        });
        sink.record(DiagnosticEvent::CommandSent {
            command: ConfigurationCommand::new(),
        });
    }
}
