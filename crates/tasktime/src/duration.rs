//! Elapsed time between two instants and its two display notations.
//!
//! - Clock notation: `HH:MM:SS`, zero-padded, hours unbounded (`100:00:00`)
//! - Human notation: `1h1m59s`, zero components omitted, `0s` when empty

use std::fmt;

use serde::Serialize;

use crate::datetime::{coerce_millis, TimeValue};

/// A non-negative span decomposed into hours, minutes, and seconds.
///
/// `minutes` and `seconds` stay within `0..60`; hours are never folded into days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn from_seconds(total: u64) -> Self {
        Elapsed {
            hours: total / 3600,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    /// Whole seconds in a millisecond span, floored. Negative spans are zero.
    pub fn from_millis(delta: i64) -> Self {
        Self::from_seconds(u64::try_from(delta.div_euclid(1000)).unwrap_or(0))
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        *self == Elapsed::ZERO
    }

    /// `HH:MM:SS`, each field padded to at least two digits.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    /// Compact notation like `1h1m59s`; zero-valued units are left out.
    pub fn human(&self) -> String {
        let mut out = String::new();
        if self.hours > 0 {
            out.push_str(&format!("{}h", self.hours));
        }
        if self.minutes > 0 {
            out.push_str(&format!("{}m", self.minutes));
        }
        if self.seconds > 0 {
            out.push_str(&format!("{}s", self.seconds));
        }
        if out.is_empty() {
            out.push_str("0s");
        }
        out
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clock())
    }
}

/// Elapsed time from `start` to `end`.
///
/// An absent `end` (no value, empty string, or zero timestamp) means the
/// span has not finished and yields zero. Both endpoints are coerced with
/// [`coerce`](crate::datetime::coerce) and the millisecond difference is
/// floored to whole seconds. An `end` before `start` also yields zero.
///
/// # Examples
///
/// ```
/// use tasktime::duration::duration;
/// use tasktime::datetime::TimeValue;
///
/// let elapsed = duration("2026-03-16T09:00:00Z", "2026-03-16T10:01:59.900Z");
/// assert_eq!(elapsed.clock(), "01:01:59");
/// assert_eq!(elapsed.human(), "1h1m59s");
///
/// assert_eq!(duration("2026-03-16T09:00:00Z", TimeValue::Absent).human(), "0s");
/// ```
pub fn duration<'a, 'b>(
    start: impl Into<TimeValue<'a>>,
    end: impl Into<TimeValue<'b>>,
) -> Elapsed {
    let end = end.into();
    if end.is_absent() {
        return Elapsed::ZERO;
    }
    Elapsed::from_millis(coerce_millis(end) - coerce_millis(start))
}

/// [`duration`] rendered in clock notation.
pub fn duration_clock<'a, 'b>(
    start: impl Into<TimeValue<'a>>,
    end: impl Into<TimeValue<'b>>,
) -> String {
    duration(start, end).clock()
}

/// [`duration`] rendered in human notation.
pub fn duration_human<'a, 'b>(
    start: impl Into<TimeValue<'a>>,
    end: impl Into<TimeValue<'b>>,
) -> String {
    duration(start, end).human()
}
