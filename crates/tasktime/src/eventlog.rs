//! Leveled log events forwarded from the UI to a sink.
//!
//! [`EventLog`] is handed to whatever needs to report something; it stamps
//! each message with the time and level, flattens key/value pairs into a
//! string map, and passes the result to an [`EventSink`]. Debug events are
//! dropped unless debug output has been switched on.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub values: BTreeMap<String, String>,
}

/// Destination for log events.
pub trait EventSink {
    fn emit(&self, event: &LogEvent);
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: &LogEvent) {
        (**self).emit(event)
    }
}

/// Forwards events to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &LogEvent) {
        let values = &event.values;
        match event.level {
            Level::Debug => tracing::debug!(target: "tasktime::ui", ?values, "{}", event.message),
            Level::Info => tracing::info!(target: "tasktime::ui", ?values, "{}", event.message),
            Level::Warn => tracing::warn!(target: "tasktime::ui", ?values, "{}", event.message),
            Level::Error => tracing::error!(target: "tasktime::ui", ?values, "{}", event.message),
        }
    }
}

/// Keeps every event in memory, oldest first.
#[derive(Debug, Default)]
pub struct BufferSink {
    events: Mutex<Vec<LogEvent>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn drain(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl EventSink for BufferSink {
    fn emit(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[derive(Debug, Default)]
pub struct EventLog<S> {
    sink: S,
    debug_enabled: bool,
}

impl<S: EventSink> EventLog<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            debug_enabled: false,
        }
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn info(&self, message: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Info, message, args)
    }

    pub fn warn(&self, message: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Warn, message, args)
    }

    pub fn error(&self, message: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Error, message, args)
    }

    pub fn debug(&self, message: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Debug, message, args)
    }

    /// Emit `message` at `level` with `args` read as alternating keys and
    /// values. A trailing key without a value is dropped.
    pub fn log(&self, level: Level, message: &str, args: &[&dyn fmt::Display]) {
        if level == Level::Debug && !self.debug_enabled {
            return;
        }
        let event = LogEvent {
            time: Utc::now(),
            level,
            message: message.to_string(),
            values: assemble_values(args),
        };
        self.sink.emit(&event);
    }
}

fn assemble_values(args: &[&dyn fmt::Display]) -> BTreeMap<String, String> {
    args.chunks_exact(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect()
}
