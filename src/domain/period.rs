//! Canonical completion periods.
//!
//! A period key is the calendar date identifying one occurrence opportunity
//! of a habit. Daily habits bucket by the date itself; weekly habits bucket
//! by the Monday that starts the week. The computation is not timezone-aware:
//! callers are expected to pass a date already expressed in the relevant
//! local calendar.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::Frequency;

/// The canonical calendar bucket for one occurrence of a habit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PeriodKey(NaiveDate);

impl PeriodKey {
    /// Resolve the period containing `date` for the given frequency.
    ///
    /// Total function: every date maps to exactly one period. For weekly
    /// habits the weekday is numbered Sunday = 0 through Saturday = 6 and the
    /// date is shifted back to the Monday of its week; a Sunday therefore
    /// belongs to the week that started six days earlier. Calendar arithmetic
    /// handles month and year rollover.
    pub fn resolve(frequency: Frequency, date: NaiveDate) -> Self {
        match frequency {
            Frequency::Daily => Self(date),
            Frequency::Weekly => {
                let weekday = date.weekday().num_days_from_sunday() as i64;
                let shift = if weekday == 0 { -6 } else { 1 - weekday };
                Self(date + Duration::days(shift))
            }
        }
    }

    /// The underlying calendar date.
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Signed number of calendar days from `other` to `self`.
    pub fn days_since(self, other: PeriodKey) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl From<NaiveDate> for PeriodKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<PeriodKey> for NaiveDate {
    fn from(key: PeriodKey) -> Self {
        key.0
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_period_is_the_date_itself() {
        let key = PeriodKey::resolve(Frequency::Daily, date(2024, 3, 15));
        assert_eq!(key.date(), date(2024, 3, 15));
    }

    #[test]
    fn weekly_period_maps_every_weekday_to_monday() {
        // 2024-03-11 is a Monday.
        let monday = date(2024, 3, 11);
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            let key = PeriodKey::resolve(Frequency::Weekly, day);
            assert_eq!(key.date(), monday, "day {day} should map to {monday}");
        }
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        // 2024-03-17 is a Sunday; its week started on 03-11.
        let key = PeriodKey::resolve(Frequency::Weekly, date(2024, 3, 17));
        assert_eq!(key.date(), date(2024, 3, 11));
    }

    #[test]
    fn weekly_period_rolls_over_month_boundaries() {
        // 2024-05-01 is a Wednesday; its Monday is 2024-04-29.
        let key = PeriodKey::resolve(Frequency::Weekly, date(2024, 5, 1));
        assert_eq!(key.date(), date(2024, 4, 29));
    }

    #[test]
    fn weekly_period_rolls_over_year_boundaries() {
        // 2025-01-01 is a Wednesday; its Monday is 2024-12-30.
        let key = PeriodKey::resolve(Frequency::Weekly, date(2025, 1, 1));
        assert_eq!(key.date(), date(2024, 12, 30));
    }

    #[test]
    fn consecutive_weeks_resolve_to_distinct_keys() {
        let a = PeriodKey::resolve(Frequency::Weekly, date(2024, 3, 17)); // Sunday
        let b = PeriodKey::resolve(Frequency::Weekly, date(2024, 3, 18)); // Monday
        assert_eq!(b.days_since(a), 7);
    }
}
