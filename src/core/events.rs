//! Structured run events.
//!
//! The orchestrator reports progress through an [`EventSink`]. Two sinks
//! ship with the crate: [`JsonSink`] writes one JSON object per line, and
//! [`TracingSink`] forwards events to the `tracing` subscriber.

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use crate::core::constants;

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Error => "error",
        }
    }
}

/// Receiver of structured run events.
pub trait EventSink {
    /// Record one event. Must not fail the run.
    fn record(&self, level: Level, message: &str, data: Option<Value>);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn record(&self, level: Level, message: &str, data: Option<Value>) {
        (**self).record(level, message, data)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn record(&self, level: Level, message: &str, data: Option<Value>) {
        (**self).record(level, message, data)
    }
}

/// One line of [`JsonSink`] output.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    timestamp: String,
    level: Level,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// Writes events as JSON lines.
pub struct JsonSink<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl JsonSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> EventSink for JsonSink<W> {
    fn record(&self, level: Level, message: &str, data: Option<Value>) {
        let entry = Entry {
            timestamp: chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
            level,
            message,
            data,
        };

        let line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize event");
                return;
            }
        };

        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}

/// Forwards events to the active `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, level: Level, message: &str, data: Option<Value>) {
        let data = data.map(|d| d.to_string()).unwrap_or_default();
        match level {
            Level::Info => {
                tracing::info!(target: constants::EVENTS_TARGET, data = %data, "{}", message)
            }
            Level::Error => {
                tracing::error!(target: constants::EVENTS_TARGET, data = %data, "{}", message)
            }
        }
    }
}
