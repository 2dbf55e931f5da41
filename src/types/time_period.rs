//! Look-back windows, in days, offered by the dashboard's time-period control.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Day counts offered as time-period choices, in display order.
pub const TIME_PERIOD_VALUES: [u32; 5] = [1, 3, 7, 14, 30];

/// Period preselected in the time-period control.
pub const TIME_PERIOD_INITIAL_VALUE: u32 = 14;

/// Period used by chart and map while no time period is chosen.
pub const TIME_PERIOD_FALLBACK: u32 = 7;

/// A look-back window of whole days ending at the dashboard's reference time.
///
/// # Examples
///
/// ```
/// use meteoshrooms::TimePeriod;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let week = TimePeriod::new(7);
/// assert_eq!(week.start(now), now - chrono::Duration::days(7));
/// assert_eq!(TimePeriod::value_period().days(), 1);
/// assert_eq!(TimePeriod::delta_period().days(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimePeriod(u32);

impl TimePeriod {
    pub fn new(days: u32) -> Self {
        Self(days)
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.0))
    }

    /// The first instant inside the window ending at `reference_time`.
    pub fn start(&self, reference_time: NaiveDateTime) -> NaiveDateTime {
        reference_time - self.duration()
    }

    /// All selectable periods.
    pub fn choices() -> Vec<TimePeriod> {
        TIME_PERIOD_VALUES.into_iter().map(TimePeriod).collect()
    }

    /// Period over which metric-card values are read.
    pub fn value_period() -> TimePeriod {
        TimePeriod(TIME_PERIOD_VALUES[0])
    }

    /// Period the metric-card value is compared against for its delta.
    pub fn delta_period() -> TimePeriod {
        TimePeriod(TIME_PERIOD_VALUES[1])
    }

    /// Resolves an optional control value, falling back to [`TIME_PERIOD_FALLBACK`].
    pub fn or_fallback(selected: Option<u32>) -> TimePeriod {
        TimePeriod(selected.filter(|d| *d > 0).unwrap_or(TIME_PERIOD_FALLBACK))
    }
}

impl Default for TimePeriod {
    fn default() -> Self {
        TimePeriod(TIME_PERIOD_INITIAL_VALUE)
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "1 day"),
            n => write!(f, "{} days", n),
        }
    }
}
