use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use taskboard_core::{compute_stats, filter_tasks, week_start, Task, TaskFilter};

// Wednesday 2026-10-21 12:00 UTC; the week starts Sunday 2026-10-18.
fn wednesday_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0).unwrap()
}

fn task(title: &str, completed: bool, created_at: Option<&str>) -> Task {
    let mut task = Task::new("u1", title);
    task.completed = completed;
    task.created_at = created_at.map(str::to_string);
    task
}

fn mixed_collection(size: usize) -> Vec<Task> {
    (0..size)
        .map(|i| task(&format!("task {i}"), i % 3 == 0, Some("2026-10-19T09:00:00Z")))
        .collect()
}

#[test]
fn empty_collection_is_all_zero() {
    let stats = compute_stats(&[], &wednesday_noon());

    assert_eq!(stats.total, 0);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.this_week_added, 0);
    assert_eq!(stats.active_trend, "0%");
    assert_eq!(stats.completed_trend, "0%");
}

#[test]
fn four_old_tasks_one_completed() {
    let tasks = vec![
        task("a", true, Some("2026-10-01T10:00:00Z")),
        task("b", false, Some("2026-10-02T10:00:00Z")),
        task("c", false, Some("2026-10-17T23:59:59Z")),
        task("d", false, Some("2026-09-30")),
    ];

    let stats = compute_stats(&tasks, &wednesday_noon());

    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.completion_rate, 25);
    assert_eq!(stats.this_week_added, 0);
    assert_eq!(stats.active_trend, "75.0% active");
    assert_eq!(stats.completed_trend, "25% completed");
}

#[test]
fn tasks_created_this_week_are_counted() {
    let tasks = vec![
        task("a", false, Some("2026-10-18T00:00:00Z")),
        task("b", false, Some("2026-10-20T08:30:00+00:00")),
    ];

    let stats = compute_stats(&tasks, &wednesday_noon());

    assert_eq!(stats.this_week_added, 2);
    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.completed_trend, "0%");
    assert_eq!(stats.active_trend, "100.0% active");
}

#[test]
fn missing_or_malformed_created_at_only_skips_weekly_count() {
    let tasks = vec![
        task("a", true, None),
        task("b", false, Some("not a date")),
        task("c", false, Some("2026-10-19T10:00:00Z")),
    ];

    let stats = compute_stats(&tasks, &wednesday_noon());

    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.this_week_added, 1);
}

#[test]
fn all_completed_reports_zero_active_trend() {
    let tasks = vec![task("a", true, None), task("b", true, None)];

    let stats = compute_stats(&tasks, &wednesday_noon());

    assert_eq!(stats.active, 0);
    assert_eq!(stats.active_trend, "0%");
    assert_eq!(stats.completion_rate, 100);
    assert_eq!(stats.completed_trend, "100% completed");
}

#[test]
fn naive_timestamps_use_the_evaluation_timezone() {
    // UTC+9: local week starts 2026-10-18 00:00 (+09:00) = 2026-10-17 15:00 UTC.
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2026, 10, 21, 12, 0, 0).unwrap();
    let tasks = vec![
        task("local after start", false, Some("2026-10-18T00:30:00")),
        task("utc before start", false, Some("2026-10-17T14:00:00Z")),
        task("utc after start", false, Some("2026-10-17T16:00:00Z")),
    ];

    assert_eq!(
        week_start(&now).with_timezone(&Utc),
        Utc.with_ymd_and_hms(2026, 10, 17, 15, 0, 0).unwrap()
    );
    assert_eq!(compute_stats(&tasks, &now).this_week_added, 2);
}

#[test]
fn counts_and_rate_hold_for_every_size() {
    for size in 0..40 {
        let tasks = mixed_collection(size);
        let stats = compute_stats(&tasks, &wednesday_noon());

        assert_eq!(stats.active + stats.completed, stats.total);
        assert!(stats.completion_rate <= 100);
        if stats.total == 0 {
            assert_eq!(stats.completion_rate, 0);
        }
        assert_eq!(
            stats.active,
            filter_tasks(&tasks, TaskFilter::Active).len()
        );
    }
}
