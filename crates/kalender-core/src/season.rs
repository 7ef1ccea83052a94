//! Seasonal markers shown above the year view.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::easter::easter_sunday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonIcon {
    Sun,
    Snowflake,
    Leaf,
}

/// Either a concrete date or a week number of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SeasonDate {
    Date(NaiveDate),
    Week(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonalEvent {
    pub name: &'static str,
    pub when: SeasonDate,
    pub icon: SeasonIcon,
}

/// Last Sunday of `month` in `year`.
///
/// # Panics
///
/// Panics if `month` is not in 1..=12.
pub fn last_sunday(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("month must be in 1..=12");

    let last = first_of_next - TimeDelta::days(1);
    let back = last.weekday().num_days_from_sunday();
    last - TimeDelta::days(i64::from(back))
}

/// Winter break is week 8 in even years and week 9 in odd years.
pub fn winter_break_week(year: i32) -> u32 {
    if year % 2 == 0 {
        8
    } else {
        9
    }
}

pub const AUTUMN_BREAK_WEEK: u32 = 40;

/// Easter, school breaks and the daylight saving switches of `year`.
pub fn seasonal_events(year: i32) -> Vec<SeasonalEvent> {
    vec![
        SeasonalEvent {
            name: "Påske",
            when: SeasonDate::Date(easter_sunday(year)),
            icon: SeasonIcon::Sun,
        },
        SeasonalEvent {
            name: "Vinterferie",
            when: SeasonDate::Week(winter_break_week(year)),
            icon: SeasonIcon::Snowflake,
        },
        SeasonalEvent {
            name: "Sommertid",
            when: SeasonDate::Date(last_sunday(year, 3)),
            icon: SeasonIcon::Sun,
        },
        SeasonalEvent {
            name: "Høstferie",
            when: SeasonDate::Week(AUTUMN_BREAK_WEEK),
            icon: SeasonIcon::Leaf,
        },
        SeasonalEvent {
            name: "Vintertid",
            when: SeasonDate::Date(last_sunday(year, 10)),
            icon: SeasonIcon::Snowflake,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_sunday() {
        assert_eq!(last_sunday(2024, 3), date(2024, 3, 31));
        assert_eq!(last_sunday(2024, 10), date(2024, 10, 27));
        assert_eq!(last_sunday(2025, 3), date(2025, 3, 30));
        assert_eq!(last_sunday(2024, 12), date(2024, 12, 29));
        assert_eq!(last_sunday(2024, 3).weekday(), Weekday::Sun);
    }

    #[test]
    fn test_seasonal_events_2024() {
        let events = seasonal_events(2024);
        let names: Vec<&str> = events.iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["Påske", "Vinterferie", "Sommertid", "Høstferie", "Vintertid"]
        );
        assert_eq!(events[0].when, SeasonDate::Date(date(2024, 4, 21)));
        assert_eq!(events[1].when, SeasonDate::Week(8));
        assert_eq!(events[3].when, SeasonDate::Week(40));
    }

    #[test]
    fn test_winter_break_alternates() {
        assert_eq!(winter_break_week(2024), 8);
        assert_eq!(winter_break_week(2025), 9);
    }
}
