//! Dashboard statistics aggregation.
//!
//! # Responsibility
//! - Derive counts, completion rate and trend labels from one task snapshot.
//! - Count tasks added since the start of the current week.
//!
//! # Invariants
//! - `active + completed == total` for every snapshot.
//! - `completion_rate` is within `0..=100` and is `0` for an empty snapshot.
//! - A missing or malformed `created_at` only affects `this_week_added`.

use crate::model::task::Task;
use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use serde::Serialize;

const ZERO_TREND: &str = "0%";

/// Naive timestamp layouts accepted for `created_at`, read in the evaluation timezone.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Statistics shown on the dashboard overview cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub completion_rate: u8,
    pub this_week_added: usize,
    pub active_trend: String,
    pub completed_trend: String,
}

impl DashboardStats {
    fn empty() -> Self {
        Self {
            total: 0,
            completed: 0,
            active: 0,
            completion_rate: 0,
            this_week_added: 0,
            active_trend: ZERO_TREND.to_string(),
            completed_trend: ZERO_TREND.to_string(),
        }
    }
}

/// Computes stats against the local wall clock.
pub fn compute_stats_now(tasks: &[Task]) -> DashboardStats {
    compute_stats(tasks, &Local::now())
}

/// Computes stats for `tasks` as observed at `now`.
///
/// The week boundary and naive timestamps are interpreted in `now`'s timezone.
pub fn compute_stats<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> DashboardStats {
    let total = tasks.len();
    if total == 0 {
        return DashboardStats::empty();
    }

    let completed = tasks.iter().filter(|task| task.completed).count();
    let active = total - completed;
    let completion_rate = percent_rounded(completed, total);

    let week_start = week_start(now).with_timezone(&Utc);
    let tz = now.timezone();
    let this_week_added = tasks
        .iter()
        .filter_map(|task| task.created_at.as_deref())
        .filter_map(|raw| parse_timestamp(raw, &tz))
        .filter(|created| *created >= week_start)
        .count();

    let active_trend = if active > 0 {
        format!("{} active", one_decimal_percent(active, total))
    } else {
        ZERO_TREND.to_string()
    };
    let completed_trend = if completion_rate > 0 {
        format!("{completion_rate}% completed")
    } else {
        ZERO_TREND.to_string()
    };

    DashboardStats {
        total,
        completed,
        active,
        completion_rate,
        this_week_added,
        active_trend,
        completed_trend,
    }
}

/// Returns the most recent Sunday at midnight in `now`'s timezone.
///
/// When midnight does not exist locally (DST gap) the first valid instant
/// after it is used.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();
    let days_back = i64::from(today.weekday().num_days_from_sunday());
    let sunday = today - Duration::days(days_back);
    let midnight = sunday.and_time(chrono::NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Parses a task timestamp.
///
/// Accepts RFC 3339, naive date-times (read in `tz`) and bare dates (read as
/// UTC midnight). Returns `None` for anything else.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}

fn percent_rounded(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = part as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

fn one_decimal_percent(part: usize, total: usize) -> String {
    format!("{}%", one_decimal(part as f64 / total as f64 * 100.0))
}

// Rounds the exact binary value, so 0.15 (stored just below) gives "0.1".
// Exact ties (x.25, x.75) round up, not to even.
fn one_decimal(value: f64) -> String {
    let exact_tie = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if exact_tie {
        format!("{:.1}", value + 0.025)
    } else {
        format!("{value:.1}")
    }
}
