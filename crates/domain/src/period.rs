use std::cmp::Reverse;

use chrono::{Days, Months, NaiveDate};
use strum::{AsRefStr, Display, EnumString};

use crate::Workout;

/// Time window of a report.
#[derive(AsRefStr, Display, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum TimePeriod {
    Week,
    Month,
    #[default]
    All,
}

impl TimePeriod {
    /// First day inside the window ending at `today`, or `None` if the window is unbounded.
    #[must_use]
    pub fn first_day(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimePeriod::Week => today.checked_sub_days(Days::new(7))?.succ_opt(),
            TimePeriod::Month => today.checked_sub_months(Months::new(1))?.succ_opt(),
            TimePeriod::All => None,
        }
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            TimePeriod::All => true,
            TimePeriod::Week | TimePeriod::Month => self
                .first_day(today)
                .is_some_and(|first_day| first_day <= date && date <= today),
        }
    }
}

/// Selects the workouts of a period.
///
/// Bounded windows are ordered from the oldest to the most recent workout, `All` is ordered from
/// the most recent to the oldest workout. Workouts of the same date keep their relative order.
#[must_use]
pub fn filter_by_period(workouts: &[Workout], period: TimePeriod, today: NaiveDate) -> Vec<Workout> {
    let mut result = workouts
        .iter()
        .filter(|w| period.contains(w.date, today))
        .cloned()
        .collect::<Vec<_>>();
    match period {
        TimePeriod::Week | TimePeriod::Month => result.sort_by_key(|w| w.date),
        TimePeriod::All => result.sort_by_key(|w| Reverse(w.date)),
    }
    result
}
