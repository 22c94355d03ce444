//! Derived habit statistics.
//!
//! Streaks and completion rates are recomputed from the full completion
//! history on every read; nothing here is cached or stored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::period::PeriodKey;
use crate::domain::types::Frequency;

/// Statistics reported for a single habit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub current_streak: u32,
    pub total_completions: usize,
    pub completion_rate: f64,
    pub expected_completions: i64,
}

/// Length of the unbroken run of periods ending at or adjacent to `today`.
///
/// `periods` must be deduplicated and sorted strictly descending. The walk
/// stops at the first broken link and never looks past it. A daily streak
/// survives a gap of at most one day from `today` (today not yet completed is
/// tolerated); a weekly streak survives up to seven days. Between adjacent
/// entries a daily streak requires exactly one day, while a weekly streak
/// accepts a 6 to 8 day gap.
pub fn current_streak(periods: &[PeriodKey], frequency: Frequency, today: NaiveDate) -> u32 {
    let Some(&latest) = periods.first() else {
        return 0;
    };

    let entry_gap = (today - latest.date()).num_days();
    let (max_entry_gap, link) = match frequency {
        Frequency::Daily => (1, 1..=1),
        Frequency::Weekly => (7, 6..=8),
    };
    if entry_gap > max_entry_gap {
        return 0;
    }

    let mut streak = 1;
    for pair in periods.windows(2) {
        let diff = pair[0].days_since(pair[1]);
        if link.contains(&diff) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Number of periods a habit has existed for, inclusive of its creation day.
///
/// The age is the whole number of days between the creation instant and the
/// midnight starting `today`, floored, plus one.
pub fn expected_completions(
    created_at: NaiveDateTime,
    frequency: Frequency,
    today: NaiveDate,
) -> i64 {
    // Floored division: a habit created mid-day and queried the same
    // calendar day has a negative sub-day duration and an age of zero.
    // `num_days` would truncate that toward zero instead.
    let midnight = today.and_time(NaiveTime::MIN);
    let age_days = (midnight - created_at).num_seconds().div_euclid(86_400) + 1;
    match frequency {
        Frequency::Daily => age_days,
        Frequency::Weekly => age_days.div_euclid(7) + i64::from(age_days.rem_euclid(7) > 0),
    }
}

/// Actual completions as a percentage of expected ones, rounded to one
/// decimal, half away from zero. No upper clamp: backdated or excess
/// completions can report a rate above 100.
pub fn completion_rate(expected: i64, actual: usize) -> f64 {
    if expected <= 0 {
        return 0.0;
    }
    let rate = actual as f64 / expected as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keys(dates: &[(i32, u32, u32)]) -> Vec<PeriodKey> {
        dates.iter().map(|&(y, m, d)| date(y, m, d).into()).collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(
            current_streak(&[], Frequency::Daily, date(2024, 1, 3)),
            0
        );
    }

    #[test]
    fn consecutive_daily_periods_count_up() {
        let periods = keys(&[(2024, 1, 3), (2024, 1, 2), (2024, 1, 1)]);
        assert_eq!(
            current_streak(&periods, Frequency::Daily, date(2024, 1, 3)),
            3
        );
    }

    #[test]
    fn yesterday_still_keeps_the_streak_alive() {
        let periods = keys(&[(2024, 1, 2), (2024, 1, 1)]);
        assert_eq!(
            current_streak(&periods, Frequency::Daily, date(2024, 1, 3)),
            2
        );
    }

    #[test]
    fn two_day_entry_gap_resets_daily_streak() {
        let periods = keys(&[(2024, 1, 3), (2024, 1, 2), (2024, 1, 1)]);
        assert_eq!(
            current_streak(&periods, Frequency::Daily, date(2024, 1, 5)),
            0
        );
    }

    #[test]
    fn streak_stops_at_first_broken_link() {
        // Gap between 01-05 and 01-03 breaks the chain; older history is ignored.
        let periods = keys(&[(2024, 1, 6), (2024, 1, 5), (2024, 1, 3), (2024, 1, 2)]);
        assert_eq!(
            current_streak(&periods, Frequency::Daily, date(2024, 1, 6)),
            2
        );
    }

    #[test]
    fn weekly_streak_accepts_the_tolerance_band() {
        let periods = keys(&[(2024, 3, 18), (2024, 3, 11), (2024, 3, 4)]);
        assert_eq!(
            current_streak(&periods, Frequency::Weekly, date(2024, 3, 20)),
            3
        );
    }

    #[test]
    fn weekly_streak_breaks_outside_the_band() {
        // Nine days between the two most recent keys.
        let periods = keys(&[(2024, 3, 18), (2024, 3, 9)]);
        assert_eq!(
            current_streak(&periods, Frequency::Weekly, date(2024, 3, 20)),
            1
        );
    }

    #[test]
    fn weekly_entry_gap_over_seven_days_resets() {
        let periods = keys(&[(2024, 3, 4)]);
        assert_eq!(
            current_streak(&periods, Frequency::Weekly, date(2024, 3, 12)),
            0
        );
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_time(NaiveTime::MIN)
    }

    #[test]
    fn expected_daily_counts_every_day_inclusive() {
        assert_eq!(
            expected_completions(midnight(2024, 1, 1), Frequency::Daily, date(2024, 1, 3)),
            3
        );
    }

    #[test]
    fn creation_time_of_day_floors_the_age() {
        let created = date(2024, 1, 1).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            expected_completions(created, Frequency::Daily, date(2024, 1, 3)),
            2
        );
    }

    #[test]
    fn same_day_creation_expects_nothing_yet() {
        // Created 10:30, queried the same calendar day: age floors to 0.
        let created = date(2024, 1, 3).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            expected_completions(created, Frequency::Daily, date(2024, 1, 3)),
            0
        );
        assert_eq!(
            expected_completions(created, Frequency::Weekly, date(2024, 1, 3)),
            0
        );
        assert_eq!(completion_rate(0, 1), 0.0);
    }

    #[test]
    fn expected_weekly_rounds_partial_weeks_up() {
        assert_eq!(
            expected_completions(midnight(2024, 1, 1), Frequency::Weekly, date(2024, 1, 3)),
            1
        );
        assert_eq!(
            expected_completions(midnight(2024, 1, 1), Frequency::Weekly, date(2024, 1, 8)),
            2
        );
        assert_eq!(
            expected_completions(midnight(2024, 1, 1), Frequency::Weekly, date(2024, 1, 14)),
            2
        );
    }

    #[test]
    fn perfect_daily_habit_rates_one_hundred() {
        assert_eq!(completion_rate(3, 3), 100.0);
    }

    #[test]
    fn rate_rounds_half_away_from_zero() {
        // 1/3 = 33.33..%, 2/3 = 66.66..%
        assert_eq!(completion_rate(3, 1), 33.3);
        assert_eq!(completion_rate(3, 2), 66.7);
        // 1/8 = 12.5% stays exact.
        assert_eq!(completion_rate(8, 1), 12.5);
    }

    #[test]
    fn excess_completions_may_exceed_one_hundred() {
        assert_eq!(completion_rate(2, 3), 150.0);
    }

    #[test]
    fn zero_expected_rates_zero() {
        assert_eq!(completion_rate(0, 5), 0.0);
    }
}
