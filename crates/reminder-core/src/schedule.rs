//! Schedule Math
//!
//! Pure functions over a medication's configured times and a local
//! wall-clock instant.

use chrono::{Duration, NaiveDateTime};

use crate::time_of_day::TimeOfDay;

/// A slot stays due for this many minutes after its configured time
pub const DUE_TOLERANCE_MINUTES: i64 = 2;

/// Earliest configured time strictly after `now`.
///
/// Today's remaining times win; otherwise tomorrow's earliest time.
pub fn next_reminder(times: &[TimeOfDay], now: NaiveDateTime) -> Option<NaiveDateTime> {
    let today = now.date();
    let later_today = times.iter().map(|t| t.on(today)).filter(|at| *at > now).min();

    later_today.or_else(|| {
        let tomorrow = today.succ_opt()?;
        times.iter().min().map(|t| t.on(tomorrow))
    })
}

/// The slot whose tolerance window (`slot <= now < slot + tolerance`)
/// contains `now`, if any. Yesterday's slots are considered so a reminder
/// at 23:59 is still due just after midnight.
pub fn due_slot(times: &[TimeOfDay], now: NaiveDateTime, tolerance: Duration) -> Option<NaiveDateTime> {
    let today = now.date();
    let yesterday = today.pred_opt();

    times
        .iter()
        .flat_map(|t| [Some(t.on(today)), yesterday.map(|d| t.on(d))])
        .flatten()
        .filter(|slot| *slot <= now && now < *slot + tolerance)
        .max()
}

/// The slot closest to `now` within `window` on either side
pub fn nearest_slot_within(times: &[TimeOfDay], now: NaiveDateTime, window: Duration) -> Option<NaiveDateTime> {
    let today = now.date();
    let dates = [today.pred_opt(), Some(today), today.succ_opt()];

    times
        .iter()
        .flat_map(|t| dates.iter().flatten().map(move |d| t.on(*d)))
        .filter(|slot| (*slot - now).abs() <= window)
        .min_by_key(|slot| (*slot - now).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn times(raw: &[&str]) -> Vec<TimeOfDay> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_next_reminder_prefers_remaining_time_today() {
        let schedule = times(&["20:00", "08:00", "13:00"]);
        assert_eq!(next_reminder(&schedule, at(9, 0)), Some(at(13, 0)));
    }

    #[test]
    fn test_next_reminder_wraps_to_tomorrows_earliest() {
        let schedule = times(&["20:00", "08:00"]);
        let next = next_reminder(&schedule, at(21, 0)).unwrap();
        assert_eq!(next, at(8, 0) + Duration::days(1));
    }

    #[test]
    fn test_next_reminder_is_strictly_future() {
        let schedule = times(&["09:00"]);
        for now in [at(9, 0), at(9, 0) + Duration::seconds(30), at(8, 59)] {
            let next = next_reminder(&schedule, now).unwrap();
            assert!(next > now, "{next} should be after {now}");
        }
        assert_eq!(next_reminder(&schedule, at(9, 0)), Some(at(9, 0) + Duration::days(1)));
    }

    #[test]
    fn test_next_reminder_empty_schedule() {
        assert_eq!(next_reminder(&[], at(9, 0)), None);
    }

    #[test]
    fn test_due_slot_tolerance_window() {
        let schedule = times(&["09:00"]);
        let tolerance = Duration::minutes(DUE_TOLERANCE_MINUTES);
        assert_eq!(due_slot(&schedule, at(8, 59), tolerance), None);
        assert_eq!(due_slot(&schedule, at(9, 0), tolerance), Some(at(9, 0)));
        assert_eq!(due_slot(&schedule, at(9, 1), tolerance), Some(at(9, 0)));
        assert_eq!(due_slot(&schedule, at(9, 2), tolerance), None);
    }

    #[test]
    fn test_due_slot_crosses_midnight() {
        let schedule = times(&["23:59"]);
        let just_after_midnight = at(0, 0) + Duration::days(1);
        let slot = due_slot(&schedule, just_after_midnight, Duration::minutes(2));
        assert_eq!(slot, Some(at(23, 59)));
    }

    #[test]
    fn test_nearest_slot_within_window() {
        let schedule = times(&["08:00", "12:00"]);
        let window = Duration::minutes(30);
        assert_eq!(nearest_slot_within(&schedule, at(8, 20), window), Some(at(8, 0)));
        assert_eq!(nearest_slot_within(&schedule, at(11, 45), window), Some(at(12, 0)));
        assert_eq!(nearest_slot_within(&schedule, at(10, 0), window), None);
    }
}
