//! Per-task totals over a set of time entries.

use std::collections::HashMap;

use crate::duration::Elapsed;
use crate::error::{Result, TasktimeError};
use crate::model::{Task, TaskSummary, TimeEntry, TimeEntrySummary};

struct Line<'a> {
    name: &'a str,
    seconds: u64,
}

/// Summarize finished entries by task.
///
/// Running entries are skipped. Each entry is rounded to the nearest second
/// (half up) before it is added to its task's total. Lines come back with the
/// largest total first; ties are ordered by task name. An empty entry list
/// yields an empty summary.
///
/// # Errors
///
/// Returns [`TasktimeError::UnknownTask`] if a finished entry refers to a task
/// that is not in `tasks`.
pub fn summarize(entries: &[TimeEntry], tasks: &[Task]) -> Result<TimeEntrySummary> {
    if entries.is_empty() {
        return Ok(TimeEntrySummary::default());
    }

    let by_id: HashMap<u64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
    let mut totals: HashMap<u64, Line<'_>> = HashMap::new();
    let mut total = 0u64;

    for entry in entries {
        let Some(end) = entry.end else {
            tracing::debug!(entry_id = entry.id, "skipping running entry");
            continue;
        };
        let task = by_id.get(&entry.task_id).copied().ok_or(TasktimeError::UnknownTask {
            task_id: entry.task_id,
            entry_id: entry.id,
        })?;

        let seconds = rounded_seconds((end - entry.start).num_milliseconds());
        total += seconds;
        totals
            .entry(entry.task_id)
            .or_insert(Line {
                name: &task.name,
                seconds: 0,
            })
            .seconds += seconds;
    }

    let mut lines: Vec<Line<'_>> = totals.into_values().collect();
    lines.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.name.cmp(b.name)));

    Ok(TimeEntrySummary {
        lines: lines
            .into_iter()
            .map(|line| TaskSummary {
                name: line.name.to_string(),
                duration: Elapsed::from_seconds(line.seconds).human(),
            })
            .collect(),
        total: Elapsed::from_seconds(total).human(),
    })
}

fn rounded_seconds(millis: i64) -> u64 {
    u64::try_from((millis + 500).div_euclid(1000)).unwrap_or(0)
}
