//! Norwegian (nb-NO) date formatting.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

/// Month names as used in headings.
pub const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "Mars",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Column headings for a Monday-first week.
pub const WEEKDAY_SHORT: [&str; 7] = ["Man", "Tir", "Ons", "Tor", "Fre", "Lør", "Søn"];

const WEEKDAY_NAMES: [&str; 7] = [
    "mandag", "tirsdag", "onsdag", "torsdag", "fredag", "lørdag", "søndag",
];

/// Capitalized month name for `month` in 1..=12.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize).saturating_sub(1) % 12]
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// "21. april"
pub fn day_month(date: NaiveDate) -> String {
    format!(
        "{}. {}",
        date.day(),
        month_name(date.month()).to_lowercase()
    )
}

/// "21. april 2024"
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {}", day_month(date), date.year())
}

/// "søndag 21. april 2024"
pub fn full_date(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), long_date(date))
}

/// "21.4.2024"
pub fn short_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

/// "14:05:09"
pub fn clock_time(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}
