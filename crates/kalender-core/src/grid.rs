//! Month grids for the year view.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::format::month_name;
use crate::holiday::{Holiday, HolidayCalendar};
use crate::week::week_number;

/// One day inside a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub holidays: Vec<Holiday>,
    pub sunday: bool,
}

impl DayCell {
    pub fn is_red_day(&self) -> bool {
        self.sunday || !self.holidays.is_empty()
    }
}

/// A Monday-first row. Cells outside the month are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub week_number: u32,
    pub days: [Option<DayCell>; 7],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
    pub weeks: Vec<WeekRow>,
}

/// Lay out one month of `calendar`'s year.
///
/// # Panics
///
/// Panics if `month` is not in 1..=12.
pub fn month_grid(calendar: &HolidayCalendar, month: u32) -> MonthGrid {
    let year = calendar.year();
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month must be in 1..=12");
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut row: [Option<DayCell>; 7] = Default::default();
    let mut column = lead;
    let mut day = first;

    while day.month() == month {
        let class = calendar.classify(day);
        row[column] = Some(DayCell {
            date: day,
            day: day.day(),
            holidays: class.holidays,
            sunday: class.sunday,
        });
        column += 1;

        let next = day + TimeDelta::days(1);
        if column == 7 || next.month() != month {
            // Any day of the row shares its week; the row's own days decide
            weeks.push(WeekRow {
                week_number: week_number(day),
                days: std::mem::take(&mut row),
            });
            column = 0;
        }
        day = next;
    }

    MonthGrid {
        year,
        month,
        name: month_name(month),
        weeks,
    }
}

/// All twelve months of `year`.
pub fn year_grid(year: i32) -> Vec<MonthGrid> {
    let calendar = HolidayCalendar::for_year(year);
    (1..=12).map(|month| month_grid(&calendar, month)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_january_2024_layout() {
        // 2024-01-01 is a Monday
        let calendar = HolidayCalendar::for_year(2024);
        let grid = month_grid(&calendar, 1);

        assert_eq!(grid.name, "Januar");
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0].week_number, 1);
        assert_eq!(grid.weeks[4].week_number, 5);

        let first = grid.weeks[0].days[0].as_ref().unwrap();
        assert_eq!(first.day, 1);
        assert_eq!(first.holidays[0].name, "Nyttårsdag");

        let last_row = &grid.weeks[4];
        assert_eq!(last_row.days[2].as_ref().unwrap().day, 31);
        assert!(last_row.days[3].is_none());
    }

    #[test]
    fn test_leading_blanks_and_sundays() {
        // 2024-09-01 is a Sunday
        let calendar = HolidayCalendar::for_year(2024);
        let grid = month_grid(&calendar, 9);
        let first_row = &grid.weeks[0];

        assert!(first_row.days[..6].iter().all(|d| d.is_none()));
        let sunday = first_row.days[6].as_ref().unwrap();
        assert!(sunday.sunday);
        assert!(sunday.is_red_day());
        assert_eq!(first_row.week_number, 35);
        assert_eq!(grid.weeks.len(), 6);
    }

    #[test]
    fn test_december_rolls_into_next_week_year() {
        let calendar = HolidayCalendar::for_year(2024);
        let grid = month_grid(&calendar, 12);
        let last = grid.weeks.last().unwrap();
        assert_eq!(last.week_number, 1);
    }

    #[test]
    fn test_year_grid_covers_every_day() {
        let grid = year_grid(2024);
        assert_eq!(grid.len(), 12);

        let days: usize = grid
            .iter()
            .flat_map(|m| m.weeks.iter())
            .map(|w| w.days.iter().filter(|d| d.is_some()).count())
            .sum();
        assert_eq!(days, 366);

        let red_holidays: usize = grid
            .iter()
            .flat_map(|m| m.weeks.iter())
            .flat_map(|w| w.days.iter().flatten())
            .map(|d| d.holidays.len())
            .sum();
        assert_eq!(red_holidays, 13);
    }
}
