//! Date coercion and calendar classification.
//!
//! Every timestamp the UI shows passes through [`coerce`] first. Records
//! coming from the backend carry their times in whatever shape the transport
//! left them in (a typed instant, an RFC 3339 string, or a millisecond epoch
//! string), so coercion accepts all of them and never fails: input that is
//! neither a calendar string nor an integer degrades to the Unix epoch.
//!
//! # Functions
//!
//! - [`coerce`]: Normalize any [`TimeValue`] to a UTC instant
//! - [`weekday`] / [`weekday_in`]: Day of the week in a local calendar
//! - [`weekday_semantic`] / [`weekday_semantic_at`]: "Yesterday", "Today",
//!   "Tomorrow", or the weekday name
//! - [`format_clock_time`] / [`format_clock_time_in`]: `HH:MM:SS` time of day
//!
//! The `_in` / `_at` forms take the time zone (and "now" anchor) explicitly;
//! the short forms use the system local zone and the live clock.

use std::fmt;
use std::time::SystemTime;

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::TasktimeError;

// ── TimeValue ───────────────────────────────────────────────────────────────

/// A time in any of the representations the backend records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeValue<'a> {
    /// An already-typed instant, passed through unchanged.
    Instant(DateTime<Utc>),
    /// A calendar string or a millisecond epoch string.
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// No value at all (a running entry's missing end, for instance).
    Absent,
}

impl TimeValue<'_> {
    /// Whether this value marks a missing endpoint: no value, an empty
    /// string, or a zero timestamp. Whitespace-only text is present and
    /// coerces to the epoch.
    pub fn is_absent(&self) -> bool {
        match self {
            TimeValue::Absent => true,
            TimeValue::Text(s) => s.is_empty(),
            TimeValue::Millis(ms) => *ms == 0,
            TimeValue::Instant(_) => false,
        }
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for TimeValue<'_> {
    fn from(dt: DateTime<Z>) -> Self {
        TimeValue::Instant(dt.with_timezone(&Utc))
    }
}

impl<'a, Z: TimeZone> From<&'a DateTime<Z>> for TimeValue<'a> {
    fn from(dt: &'a DateTime<Z>) -> Self {
        TimeValue::Instant(dt.with_timezone(&Utc))
    }
}

impl From<SystemTime> for TimeValue<'_> {
    fn from(t: SystemTime) -> Self {
        TimeValue::Instant(DateTime::<Utc>::from(t))
    }
}

impl<'a> From<&'a str> for TimeValue<'a> {
    fn from(s: &'a str) -> Self {
        TimeValue::Text(s)
    }
}

impl<'a> From<&'a String> for TimeValue<'a> {
    fn from(s: &'a String) -> Self {
        TimeValue::Text(s.as_str())
    }
}

impl From<i64> for TimeValue<'_> {
    fn from(ms: i64) -> Self {
        TimeValue::Millis(ms)
    }
}

impl<'a, T: Into<TimeValue<'a>>> From<Option<T>> for TimeValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(TimeValue::Absent, Into::into)
    }
}

// ── coerce ──────────────────────────────────────────────────────────────────

/// Date-time layouts without an offset, read in the system local zone.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalize a time value to a UTC instant.
///
/// Text is first tried as a calendar string (RFC 3339, RFC 2822, an ISO
/// date-time without offset read as local time, or a bare `YYYY-MM-DD` read
/// as UTC midnight), then as a millisecond epoch read from the leading
/// integer of the text (`"1.5"` is 1 ms, `"12abc"` is 12 ms). Anything else,
/// including timestamps outside the representable range, becomes the Unix
/// epoch.
///
/// # Examples
///
/// ```
/// use tasktime::datetime::coerce;
///
/// let a = coerce("2023-01-03T12:00:00Z");
/// let b = coerce("1672747200000");
/// assert_eq!(a, b);
/// assert_eq!(coerce("not a date").timestamp_millis(), 0);
/// ```
pub fn coerce<'a>(input: impl Into<TimeValue<'a>>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(coerce_millis(input)).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Normalize a time value to milliseconds since the Unix epoch.
///
/// Same rules as [`coerce`]; the result is always a representable instant.
pub(crate) fn coerce_millis<'a>(input: impl Into<TimeValue<'a>>) -> i64 {
    match input.into() {
        TimeValue::Instant(dt) => dt.timestamp_millis(),
        TimeValue::Millis(ms) => checked_millis(ms),
        TimeValue::Text(text) => parse_calendar(text)
            .map(|dt| dt.timestamp_millis())
            .or_else(|| leading_integer(text).map(checked_millis))
            .unwrap_or_else(|| {
                tracing::debug!(input = text, "unrecognized time value, using epoch");
                0
            }),
        TimeValue::Absent => 0,
    }
}

/// Optional sign followed by the leading run of ASCII digits, after leading
/// whitespace. Trailing text is ignored.
fn leading_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = s.len() - unsigned.len() + digits;
    s[..end].parse().ok()
}

fn checked_millis(ms: i64) -> i64 {
    match DateTime::from_timestamp_millis(ms) {
        Some(_) => ms,
        None => {
            tracing::debug!(millis = ms, "timestamp out of range, using epoch");
            0
        }
    }
}

fn parse_calendar(text: &str) -> Option<DateTime<Utc>> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, TasktimeError> {
    s.parse::<Tz>()
        .map_err(|_| TasktimeError::InvalidTimezone(format!("'{}'", s)))
}

// ── weekday ─────────────────────────────────────────────────────────────────

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// English name of a weekday ("Sunday", "Monday", ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Day of the week the coerced instant falls on in `tz`.
pub fn weekday_in<'a, Z: TimeZone>(date: impl Into<TimeValue<'a>>, tz: &Z) -> Weekday {
    coerce(date).with_timezone(tz).weekday()
}

/// Day of the week the coerced instant falls on in the system local zone.
pub fn weekday<'a>(date: impl Into<TimeValue<'a>>) -> Weekday {
    weekday_in(date, &Local)
}

// ── weekday_semantic ────────────────────────────────────────────────────────

/// A date described relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Yesterday,
    Today,
    Tomorrow,
    /// More than a calendar day away; shown by weekday name.
    Weekday(Weekday),
}

impl RelativeDay {
    pub fn label(&self) -> &'static str {
        match self {
            RelativeDay::Yesterday => "Yesterday",
            RelativeDay::Today => "Today",
            RelativeDay::Tomorrow => "Tomorrow",
            RelativeDay::Weekday(day) => weekday_name(*day),
        }
    }
}

impl fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RelativeDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Classify `date` against the calendar days around `anchor` in `tz`.
///
/// "Yesterday" and "tomorrow" are the local calendar dates of `anchor` minus
/// and plus exactly 24 hours. A date matches when its local year, month, and
/// day are equal, so two instants a few hours apart may land on different
/// labels. The first match in the order yesterday, today, tomorrow wins;
/// otherwise the weekday is returned.
pub fn weekday_semantic_at<'a, Z: TimeZone>(
    date: impl Into<TimeValue<'a>>,
    anchor: DateTime<Utc>,
    tz: &Z,
) -> RelativeDay {
    let date = coerce(date).with_timezone(tz).date_naive();
    let day = chrono::Duration::hours(24);

    let yesterday = (anchor - day).with_timezone(tz).date_naive();
    let today = anchor.with_timezone(tz).date_naive();
    let tomorrow = (anchor + day).with_timezone(tz).date_naive();

    if date == yesterday {
        RelativeDay::Yesterday
    } else if date == today {
        RelativeDay::Today
    } else if date == tomorrow {
        RelativeDay::Tomorrow
    } else {
        RelativeDay::Weekday(date.weekday())
    }
}

/// [`weekday_semantic_at`] anchored at the live clock in the system local zone.
pub fn weekday_semantic<'a>(date: impl Into<TimeValue<'a>>) -> RelativeDay {
    weekday_semantic_at(date, Utc::now(), &Local)
}

// ── format_clock_time ───────────────────────────────────────────────────────

/// Time of day of the coerced instant in `tz`, as `HH:MM:SS`.
///
/// Sub-second precision is truncated.
pub fn format_clock_time_in<'a, Z: TimeZone>(date: impl Into<TimeValue<'a>>, tz: &Z) -> String {
    let local = coerce(date).with_timezone(tz);
    format!(
        "{:02}:{:02}:{:02}",
        local.hour(),
        local.minute(),
        local.second()
    )
}

/// Time of day of the coerced instant in the system local zone.
pub fn format_clock_time<'a>(date: impl Into<TimeValue<'a>>) -> String {
    format_clock_time_in(date, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Tokyo;
    use proptest::prelude::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    // ── coerce tests ────────────────────────────────────────────────────

    #[test]
    fn test_coerce_instant_passthrough() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 16, 9, 30, 0).unwrap();
        assert_eq!(coerce(dt), dt);
        assert_eq!(coerce(&dt), dt);
    }

    #[test]
    fn test_coerce_instant_in_other_zone() {
        let local = New_York.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        assert_eq!(
            coerce(local),
            Utc.with_ymd_and_hms(2026, 1, 15, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_coerce_rfc3339_text() {
        let result = coerce("2022-12-24T19:49:16.4883081Z");
        assert_eq!(result.timestamp(), 1671911356);
        assert_eq!(result.timestamp_subsec_millis(), 488);
    }

    #[test]
    fn test_coerce_rfc3339_with_offset() {
        assert_eq!(
            coerce("2026-03-15T10:00:00-04:00"),
            Utc.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_coerce_rfc2822_text() {
        assert_eq!(
            coerce("Tue, 3 Jan 2023 12:00:00 +0000"),
            Utc.with_ymd_and_hms(2023, 1, 3, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_coerce_date_only_is_utc_midnight() {
        assert_eq!(
            coerce("2023-01-03"),
            Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_coerce_naive_datetime_is_local() {
        let expected = Local
            .with_ymd_and_hms(2023, 1, 3, 1, 2, 3)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(coerce("2023-01-03T01:02:03"), expected);
        assert_eq!(coerce("2023-01-03 01:02:03"), expected);
    }

    #[test]
    fn test_coerce_millis_text() {
        assert_eq!(coerce("1672747200000").timestamp_millis(), 1672747200000);
        assert_eq!(coerce(" 1672747200000 ").timestamp_millis(), 1672747200000);
        assert_eq!(coerce("-1000").timestamp_millis(), -1000);
    }

    #[test]
    fn test_coerce_leading_integer_ignores_trailing_text() {
        assert_eq!(coerce("1672747200000.5").timestamp_millis(), 1672747200000);
        assert_eq!(coerce("12abc").timestamp_millis(), 12);
        assert_eq!(coerce("1.5").timestamp_millis(), 1);
        assert_eq!(coerce("  -250ms").timestamp_millis(), -250);
        assert_eq!(coerce("+42 ").timestamp_millis(), 42);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("007x"), Some(7));
        assert_eq!(leading_integer("-0"), Some(0));
        assert_eq!(leading_integer("+-1"), None);
        assert_eq!(leading_integer("x1"), None);
        assert_eq!(leading_integer(""), None);
        assert_eq!(leading_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_coerce_millis_number() {
        assert_eq!(coerce(1672747200123_i64).timestamp_millis(), 1672747200123);
    }

    #[test]
    fn test_coerce_owned_string() {
        let s = String::from("1672747200000");
        assert_eq!(coerce(&s).timestamp_millis(), 1672747200000);
    }

    #[test]
    fn test_coerce_system_time() {
        let t = SystemTime::UNIX_EPOCH + std::time::Duration::from_millis(1500);
        assert_eq!(coerce(t).timestamp_millis(), 1500);
    }

    #[test]
    fn test_coerce_garbage_is_epoch() {
        assert_eq!(coerce("not-a-datetime"), DateTime::UNIX_EPOCH);
        assert_eq!(coerce("abc12"), DateTime::UNIX_EPOCH);
        assert_eq!(coerce("-"), DateTime::UNIX_EPOCH);
        assert_eq!(coerce(""), DateTime::UNIX_EPOCH);
        assert_eq!(coerce("   "), DateTime::UNIX_EPOCH);
        assert_eq!(coerce(TimeValue::Absent), DateTime::UNIX_EPOCH);
        assert_eq!(coerce(None::<&str>), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_coerce_out_of_range_is_epoch() {
        assert_eq!(coerce(i64::MAX), DateTime::UNIX_EPOCH);
        assert_eq!(coerce(i64::MIN.to_string().as_str()), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_is_absent() {
        assert!(TimeValue::Absent.is_absent());
        assert!(TimeValue::from(0_i64).is_absent());
        assert!(TimeValue::from("").is_absent());
        assert!(!TimeValue::from("  ").is_absent());
        assert!(TimeValue::from(None::<DateTime<Utc>>).is_absent());
        assert!(!TimeValue::from("0").is_absent());
        assert!(!TimeValue::from(1_i64).is_absent());
        assert!(!TimeValue::from(DateTime::UNIX_EPOCH).is_absent());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Tokyo").unwrap(), Tokyo);
        let err = parse_timezone("Invalid/Zone").unwrap_err().to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    proptest! {
        #[test]
        fn coerce_never_panics(s in "\\PC*") {
            let _ = coerce(s.as_str());
        }

        #[test]
        fn coerce_millis_text_matches_number(ms in -8_000_000_000_000_000i64..8_000_000_000_000_000i64) {
            prop_assert_eq!(coerce(ms.to_string().as_str()), coerce(ms));
            prop_assert_eq!(coerce(ms).timestamp_millis(), ms);
        }
    }

    // ── weekday tests ───────────────────────────────────────────────────

    fn reference() -> DateTime<Tz> {
        // Tuesday
        New_York.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_weekday_across_week() {
        let expected = [
            (-48, Weekday::Sun),
            (-24, Weekday::Mon),
            (0, Weekday::Tue),
            (24, Weekday::Wed),
            (48, Weekday::Thu),
            (72, Weekday::Fri),
            (96, Weekday::Sat),
        ];
        for (offset, day) in expected {
            let date = reference() + Duration::hours(offset);
            assert_eq!(weekday_in(date, &New_York), day, "offset {offset}h");
        }
    }

    #[test]
    fn test_weekday_from_millis() {
        let base = reference().timestamp_millis();
        assert_eq!(weekday_in(base - 48 * HOUR_MS, &New_York), Weekday::Sun);
        assert_eq!(weekday_in(base + 96 * HOUR_MS, &New_York), Weekday::Sat);
    }

    #[test]
    fn test_weekday_depends_on_zone() {
        // 2023-01-03 03:00 UTC is still Monday evening in New York
        let date = "2023-01-03T03:00:00Z";
        assert_eq!(weekday_in(date, &Utc), Weekday::Tue);
        assert_eq!(weekday_in(date, &New_York), Weekday::Mon);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
        assert_eq!(weekday_name(Weekday::Sat), "Saturday");
    }

    #[test]
    fn test_weekday_of_garbage_is_epoch_day() {
        // 1970-01-01 was a Thursday
        assert_eq!(weekday_in("garbage", &Utc), Weekday::Thu);
    }

    // ── weekday_semantic tests ──────────────────────────────────────────

    fn anchor() -> DateTime<Utc> {
        // Monday
        Utc.with_ymd_and_hms(2026, 3, 16, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_semantic_yesterday_today_tomorrow() {
        let now = anchor();
        let day = Duration::hours(24);
        assert_eq!(weekday_semantic_at(now - day, now, &Utc), RelativeDay::Yesterday);
        assert_eq!(weekday_semantic_at(now, now, &Utc), RelativeDay::Today);
        assert_eq!(weekday_semantic_at(now + day, now, &Utc), RelativeDay::Tomorrow);
    }

    #[test]
    fn test_semantic_falls_back_to_weekday() {
        let now = anchor();
        assert_eq!(
            weekday_semantic_at(now + Duration::hours(48), now, &Utc),
            RelativeDay::Weekday(Weekday::Wed)
        );
        assert_eq!(
            weekday_semantic_at(now - Duration::hours(48), now, &Utc),
            RelativeDay::Weekday(Weekday::Sat)
        );
        assert_eq!(
            weekday_semantic_at(now + Duration::days(7), now, &Utc),
            RelativeDay::Weekday(Weekday::Mon)
        );
    }

    #[test]
    fn test_semantic_uses_calendar_date_not_window() {
        let late = Utc.with_ymd_and_hms(2026, 3, 16, 23, 0, 0).unwrap();
        // Two hours later is already tomorrow's date
        assert_eq!(
            weekday_semantic_at(late + Duration::hours(2), late, &Utc),
            RelativeDay::Tomorrow
        );
        // Start of the same day is still today
        assert_eq!(
            weekday_semantic_at("2026-03-16T00:00:00Z", late, &Utc),
            RelativeDay::Today
        );
        // 47 hours ahead lands on the day after tomorrow
        assert_eq!(
            weekday_semantic_at(late + Duration::hours(47), late, &Utc),
            RelativeDay::Weekday(Weekday::Wed)
        );
    }

    #[test]
    fn test_semantic_in_zone() {
        // 02:00 UTC on the 17th is still the 16th in New York
        let now = anchor();
        assert_eq!(
            weekday_semantic_at("2026-03-17T02:00:00Z", now, &New_York),
            RelativeDay::Today
        );
        assert_eq!(
            weekday_semantic_at("2026-03-17T02:00:00Z", now, &Utc),
            RelativeDay::Tomorrow
        );
    }

    #[test]
    fn test_semantic_accepts_text_and_millis() {
        let now = anchor();
        let yesterday = (now - Duration::hours(24)).timestamp_millis();
        assert_eq!(
            weekday_semantic_at(yesterday.to_string().as_str(), now, &Utc),
            RelativeDay::Yesterday
        );
        assert_eq!(
            weekday_semantic_at(yesterday, now, &Utc),
            RelativeDay::Yesterday
        );
    }

    #[test]
    fn test_semantic_live_clock() {
        let now = Utc::now().timestamp_millis();
        assert_eq!(weekday_semantic(now - 24 * HOUR_MS), RelativeDay::Yesterday);
        assert_eq!(weekday_semantic(now), RelativeDay::Today);
        assert_eq!(weekday_semantic(now + 24 * HOUR_MS), RelativeDay::Tomorrow);
    }

    #[test]
    fn test_relative_day_labels() {
        assert_eq!(RelativeDay::Yesterday.to_string(), "Yesterday");
        assert_eq!(RelativeDay::Today.to_string(), "Today");
        assert_eq!(RelativeDay::Tomorrow.to_string(), "Tomorrow");
        assert_eq!(RelativeDay::Weekday(Weekday::Fri).to_string(), "Friday");
        assert_eq!(
            serde_json::to_string(&RelativeDay::Weekday(Weekday::Sun)).unwrap(),
            "\"Sunday\""
        );
    }

    // ── format_clock_time tests ─────────────────────────────────────────

    #[test]
    fn test_clock_time_truncates_subseconds() {
        let date = New_York.with_ymd_and_hms(2023, 1, 3, 1, 2, 3).unwrap()
            + Duration::milliseconds(100);
        assert_eq!(format_clock_time_in(date, &New_York), "01:02:03");

        let date = Utc.with_ymd_and_hms(2023, 1, 3, 1, 2, 3).unwrap()
            + Duration::milliseconds(999);
        assert_eq!(format_clock_time_in(date, &Utc), "01:02:03");
    }

    #[test]
    fn test_clock_time_converts_zone() {
        assert_eq!(
            format_clock_time_in("2023-01-03T06:02:03Z", &New_York),
            "01:02:03"
        );
        assert_eq!(
            format_clock_time_in("2023-01-03T06:02:03Z", &Tokyo),
            "15:02:03"
        );
    }

    #[test]
    fn test_clock_time_local_naive_text() {
        assert_eq!(format_clock_time("2023-01-03T01:02:03.100"), "01:02:03");
    }

    #[test]
    fn test_clock_time_of_garbage_is_epoch() {
        assert_eq!(format_clock_time_in("nope", &Utc), "00:00:00");
    }
}
