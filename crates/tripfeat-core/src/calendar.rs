//! Calendar bucketing rules for trip timestamps.
//!
//! Both classifiers are pure total functions over a bounded domain (hour of
//! day, or month/day of any year) so they can be unit tested without a table.

use serde::{Deserialize, Serialize};

/// Time-of-day bucket for an hour 0-23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Map an hour of day to its bucket, half-open boundaries:
    /// [5,12) Morning, [12,18) Afternoon, [18,22) Evening, else Night.
    pub fn classify(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Season bucket for a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Classify a (month, day) pair against fixed boundaries applied within
    /// the date's own year: [Mar 21, Jun 21) Spring, [Jun 21, Sep 23) Summer,
    /// [Sep 23, Dec 21) Autumn, else Winter. The boundaries are nominal
    /// equinox/solstice dates, not the astronomically exact ones, so the rule
    /// is deterministic per (month, day) across multi-year datasets.
    pub fn classify(month: u32, day: u32) -> Self {
        let date = (month, day);
        if date >= (3, 21) && date < (6, 21) {
            Season::Spring
        } else if date >= (6, 21) && date < (9, 23) {
            Season::Summer
        } else if date >= (9, 23) && date < (12, 21) {
            Season::Autumn
        } else {
            Season::Winter
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_is_total_over_all_hours() {
        for hour in 0..24 {
            let expected = match hour {
                5..=11 => TimeOfDay::Morning,
                12..=17 => TimeOfDay::Afternoon,
                18..=21 => TimeOfDay::Evening,
                _ => TimeOfDay::Night,
            };
            assert_eq!(TimeOfDay::classify(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::classify(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::classify(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::classify(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::classify(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::classify(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::classify(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::classify(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::classify(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::classify(0), TimeOfDay::Night);
    }

    #[test]
    fn test_season_boundaries() {
        assert_eq!(Season::classify(3, 20), Season::Winter);
        assert_eq!(Season::classify(3, 21), Season::Spring);
        assert_eq!(Season::classify(6, 20), Season::Spring);
        assert_eq!(Season::classify(6, 21), Season::Summer);
        assert_eq!(Season::classify(9, 22), Season::Summer);
        assert_eq!(Season::classify(9, 23), Season::Autumn);
        assert_eq!(Season::classify(12, 20), Season::Autumn);
        // Autumn's upper bound is exclusive at Dec 21.
        assert_eq!(Season::classify(12, 21), Season::Winter);
        assert_eq!(Season::classify(1, 15), Season::Winter);
    }

    #[test]
    fn test_season_is_total_over_all_366_dates() {
        let days_in_month = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        let mut count = 0;
        for (month_idx, days) in days_in_month.iter().enumerate() {
            let month = month_idx as u32 + 1;
            for day in 1..=*days {
                // Totality: classify never panics and always yields a bucket.
                let _ = Season::classify(month, day);
                count += 1;
            }
        }
        assert_eq!(count, 366);
    }

    #[test]
    fn test_leap_day_is_winter() {
        assert_eq!(Season::classify(2, 29), Season::Winter);
    }
}
