//! Data-transfer records exchanged with the tracking backend.
//!
//! Field names follow the backend's JSON (`taskID`, `timeEntries`); timestamps
//! are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{duration, Elapsed};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub done: bool,
    pub priority: i64,
    pub favorite: bool,
    /// Soft-deleted tasks stay around so historic entries keep their names.
    pub inactivated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "taskID")]
    pub task_id: u64,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub synced: bool,
}

impl TimeEntry {
    /// A running entry has been started but not stopped.
    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Tracked time so far; zero while the entry is still running.
    pub fn elapsed(&self) -> Elapsed {
        duration(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "taskID", default)]
    pub task_id: Option<u64>,
    pub text: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// One line of a [`TimeEntrySummary`]: a task and its total tracked time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub name: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntrySummary {
    pub lines: Vec<TaskSummary>,
    pub total: String,
}

/// The task currently being tracked along with its open entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTaskDetails {
    pub task: Task,
    pub entry: TimeEntry,
}

/// Export bundle of tasks and their time entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportModel {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(rename = "timeEntries", default, skip_serializing_if = "Vec::is_empty")]
    pub time_entries: Vec<TimeEntry>,
}
