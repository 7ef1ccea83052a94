//! Easter Sunday by the anonymous Gregorian computus.

use chrono::NaiveDate;

/// Compute the month (1-12) and day of Easter Sunday for `year`.
///
/// Integer arithmetic only, floor division throughout. Valid for the
/// proleptic Gregorian calendar from 1583 onward.
pub fn compute_easter(year: i32) -> (u32, u32) {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let n = h + l - 7 * m + 114;

    let month = n.div_euclid(31);
    let day = n.rem_euclid(31) + 1;

    // n is always in 114..=145, so month is 3 or 4 and day is 1..=31
    (month as u32, day as u32)
}

/// Easter Sunday of `year` as a calendar date.
///
/// # Panics
///
/// Panics if `year` lies outside the range chrono can represent.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let (month, day) = compute_easter(year);
    NaiveDate::from_ymd_opt(year, month, day).expect("computus yields a March or April date")
}
