//! # tasktime
//!
//! Presentation-side time computation for a desktop time tracker.
//!
//! Backend records carry timestamps as typed instants, RFC 3339 strings, or
//! millisecond epoch strings. This crate normalizes all of them, measures how
//! long an entry ran, and renders the results the way the tracker's views
//! show them. None of the date or duration functions fail: unreadable input
//! is treated as the Unix epoch.
//!
//! ## Modules
//!
//! - [`datetime`]: Coercion to an instant, weekday and "Yesterday/Today/Tomorrow" labels, time of day
//! - [`duration`]: Elapsed hours/minutes/seconds, clock (`01:01:59`) and human (`1h1m59s`) notation
//! - [`model`]: Task, time entry, note, and summary records as the backend sends them
//! - [`summary`]: Per-task totals for a set of entries
//! - [`eventlog`]: Leveled log events forwarded to a sink
//! - [`dialog`]: Confirmation and progress prompts over a publish/subscribe bus
//! - [`loading`]: Outstanding-load counter for the spinner
//! - [`error`]: Error types

pub mod datetime;
pub mod dialog;
pub mod duration;
pub mod error;
pub mod eventlog;
pub mod loading;
pub mod model;
pub mod summary;

pub use datetime::{
    coerce, format_clock_time, format_clock_time_in, parse_timezone, weekday, weekday_in,
    weekday_name, weekday_semantic, weekday_semantic_at, RelativeDay, TimeValue,
};
pub use dialog::{ConfirmRequest, DialogBus, DialogEvent};
pub use duration::{duration, duration_clock, duration_human, Elapsed};
pub use error::TasktimeError;
pub use eventlog::{BufferSink, EventLog, EventSink, Level, LogEvent, TracingSink};
pub use loading::LoadState;
pub use model::{
    ExportModel, Note, Task, TaskSummary, TimeEntry, TimeEntrySummary, TrackedTaskDetails,
};
pub use summary::summarize;
