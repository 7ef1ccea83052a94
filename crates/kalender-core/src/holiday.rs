//! Norwegian public holidays.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::Serialize;

use crate::easter::easter_sunday;

/// How a holiday's date is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    /// Same month and day every year.
    Fixed,
    /// Offset from Easter Sunday.
    Variable,
}

/// A named public holiday resolved to a concrete date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Holiday {
    pub name: &'static str,
    pub date: NaiveDate,
    pub kind: HolidayKind,
}

impl Holiday {
    fn fixed(name: &'static str, year: i32, month: u32, day: u32) -> Self {
        Self {
            name,
            date: NaiveDate::from_ymd_opt(year, month, day)
                .expect("fixed holidays are valid calendar dates"),
            kind: HolidayKind::Fixed,
        }
    }

    fn after_easter(name: &'static str, easter: NaiveDate, days: i64) -> Self {
        Self {
            name,
            date: easter + TimeDelta::days(days),
            kind: HolidayKind::Variable,
        }
    }
}

/// The 13 Norwegian public holidays of `year`, always in the same order.
pub fn holidays_for_year(year: i32) -> Vec<Holiday> {
    let easter = easter_sunday(year);

    vec![
        Holiday::fixed("Nyttårsdag", year, 1, 1),
        Holiday::after_easter("Palmesøndag", easter, -7),
        Holiday::after_easter("Skjærtorsdag", easter, -3),
        Holiday::after_easter("Langfredag", easter, -2),
        Holiday::after_easter("1. påskedag", easter, 0),
        Holiday::after_easter("2. påskedag", easter, 1),
        Holiday::fixed("Arbeidernes dag", year, 5, 1),
        Holiday::fixed("Grunnlovsdagen", year, 5, 17),
        Holiday::after_easter("Kristi himmelfartsdag", easter, 39),
        Holiday::after_easter("1. pinsedag", easter, 49),
        Holiday::after_easter("2. pinsedag", easter, 50),
        Holiday::fixed("1. juledag", year, 12, 25),
        Holiday::fixed("2. juledag", year, 12, 26),
    ]
}

/// The holiday set of a single year.
///
/// Build it once per rendered year and query it per day. Lookups compare the
/// whole date, year included, so a date from another year never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    year: i32,
    holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            holidays: holidays_for_year(year),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// The first holiday falling on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<Holiday> {
        self.holidays.iter().find(|h| h.date == date).copied()
    }

    /// Classify `date` against this year's holidays.
    pub fn classify(&self, date: NaiveDate) -> DayClass {
        DayClass {
            holidays: self
                .holidays
                .iter()
                .filter(|h| h.date == date)
                .copied()
                .collect(),
            sunday: date.weekday() == Weekday::Sun,
        }
    }
}

/// How a date should be marked in the calendar.
///
/// A date can be both a holiday and a Sunday. Easter-relative holidays can
/// land on a fixed one (Ascension Day fell on May 1 in 2008), so every
/// matching holiday is kept, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayClass {
    pub holidays: Vec<Holiday>,
    pub sunday: bool,
}

impl DayClass {
    /// The first matching holiday.
    pub fn holiday(&self) -> Option<Holiday> {
        self.holidays.first().copied()
    }

    pub fn is_holiday(&self) -> bool {
        !self.holidays.is_empty()
    }

    /// Neither a holiday nor a Sunday.
    pub fn is_ordinary(&self) -> bool {
        !self.is_holiday() && !self.sunday
    }

    /// Rendered in red: a holiday, a Sunday, or both.
    pub fn is_red_day(&self) -> bool {
        !self.is_ordinary()
    }

    /// Holiday names joined for display. Takes priority over Sunday styling.
    pub fn label(&self) -> Option<String> {
        if self.holidays.is_empty() {
            return None;
        }
        Some(
            self.holidays
                .iter()
                .map(|h| h.name)
                .collect::<Vec<_>>()
                .join(" / "),
        )
    }

    /// Whether a holiday with this exact name falls on the date.
    pub fn has_holiday(&self, name: &str) -> bool {
        self.holidays.iter().any(|h| h.name == name)
    }
}

/// Classify `date` against the holidays of that date's own year.
pub fn classify(date: NaiveDate) -> DayClass {
    HolidayCalendar::for_year(date.year()).classify(date)
}
