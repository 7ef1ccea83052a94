//! ISO 8601 week numbering, anchored on Thursdays.

use chrono::{Datelike, NaiveDate, TimeDelta};

/// Monday=0 .. Sunday=6.
fn weekday_index(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_monday())
}

/// The Thursday of the Monday-first week containing `date`.
fn thursday_of_week(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(weekday_index(date)) + TimeDelta::days(3)
}

/// The year a date's week is numbered in.
///
/// Late December days can belong to the next year's week 1 and early January
/// days to the previous year's last week.
pub fn numbering_year(date: NaiveDate) -> i32 {
    thursday_of_week(date).year()
}

/// ISO week number of `date`, in `1..=53`.
pub fn week_number(date: NaiveDate) -> u32 {
    let target = thursday_of_week(date);

    let jan_first = target
        .with_ordinal(1)
        .expect("every year has a first day");
    let shift = (3 - weekday_index(jan_first)).rem_euclid(7);
    let first_thursday = jan_first + TimeDelta::days(shift);

    // Both dates are Thursdays, so the distance is a whole number of weeks
    let days = (target - first_thursday).num_days();
    (1 + (days + 6).div_euclid(7)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_number_vectors() {
        assert_eq!(week_number(date(2024, 1, 1)), 1);
        assert_eq!(week_number(date(2024, 12, 31)), 1);
        assert_eq!(week_number(date(2021, 1, 1)), 53);
        assert_eq!(week_number(date(2020, 12, 31)), 53);
        assert_eq!(week_number(date(2023, 1, 1)), 52);
        assert_eq!(week_number(date(2024, 5, 17)), 20);
    }

    #[test]
    fn test_numbering_year_at_boundaries() {
        assert_eq!(numbering_year(date(2024, 12, 31)), 2025);
        assert_eq!(numbering_year(date(2021, 1, 3)), 2020);
        assert_eq!(numbering_year(date(2021, 1, 4)), 2021);
    }

    #[test]
    fn test_week_number_matches_iso_week() {
        let mut day = date(1995, 1, 1);
        let end = date(2035, 12, 31);
        while day <= end {
            let iso = day.iso_week();
            assert_eq!(week_number(day), iso.week(), "date {}", day);
            assert_eq!(numbering_year(day), iso.year(), "date {}", day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_week_number_range() {
        let mut day = date(2000, 1, 1);
        while day.year() < 2030 {
            let week = week_number(day);
            assert!((1..=53).contains(&week));
            day = day.succ_opt().unwrap();
        }
    }
}
