// ABOUTME: Daily scheduler — sleeps until the configured local wall-clock time, then
// ABOUTME: runs the report cycle. Firings are serialized by the loop itself.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveTime};

use crate::tracker::Tracker;

/// The next local instant at or after `now` matching the `at` wall-clock time.
///
/// If today's occurrence has already passed (or is exactly now), the result is
/// tomorrow's. Around DST gaps where the wall-clock time does not exist, the
/// earliest valid interpretation after the gap is used.
pub fn next_due(now: DateTime<Local>, at: NaiveTime) -> DateTime<Local> {
    let mut candidate = now.date_naive().and_time(at);
    if candidate <= now.naive_local() {
        candidate = candidate + Duration::days(1);
    }
    candidate
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| now + Duration::days(1))
}

/// Recurring driver for the daily report cycle.
pub struct DailyScheduler {
    tracker: Arc<Tracker>,
    fire_at: NaiveTime,
}

impl DailyScheduler {
    pub fn new(tracker: Arc<Tracker>, fire_at: NaiveTime) -> Self {
        Self { tracker, fire_at }
    }

    /// Run forever: sleep until the next due time, run one cycle, repeat.
    ///
    /// The cycle is awaited before the next due time is computed, so a run can
    /// never overlap the previous one.
    pub async fn run(self) {
        loop {
            let now = Local::now();
            let due = next_due(now, self.fire_at);
            let wait = (due - now).to_std().unwrap_or_default();
            log::info!("next daily report at {}", due.format("%Y-%m-%d %H:%M"));
            tokio::time::sleep(wait).await;

            self.tracker.run_daily_cycle().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn ten_pm() -> NaiveTime {
        NaiveTime::from_hms_opt(22, 0, 0).unwrap()
    }

    #[test]
    fn due_later_today_when_fire_time_is_ahead() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let due = next_due(now, ten_pm());
        assert_eq!(due.date_naive(), now.date_naive());
        assert_eq!(due.hour(), 22);
        assert_eq!(due.minute(), 0);
    }

    #[test]
    fn due_tomorrow_when_fire_time_has_passed() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 22, 30, 0).unwrap();
        let due = next_due(now, ten_pm());
        assert_eq!(due.date_naive(), now.date_naive() + Duration::days(1));
        assert_eq!(due.hour(), 22);
    }

    #[test]
    fn due_tomorrow_when_now_is_exactly_fire_time() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 22, 0, 0).unwrap();
        let due = next_due(now, ten_pm());
        assert_eq!(due.date_naive(), now.date_naive() + Duration::days(1));
    }

    #[test]
    fn due_is_always_in_the_future() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap();
        let early = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        let due = next_due(now, early);
        assert!(due > now);
    }
}
