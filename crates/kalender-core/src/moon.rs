//! Approximate moon phases from the mean synodic month.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Known new moon, 2000-01-06 18:14, used as the cycle origin.
fn reference_new_moon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 6)
        .and_then(|d| d.and_hms_opt(18, 14, 0))
        .expect("reference new moon is a valid timestamp")
}

/// Age of the moon in days since the last new moon, in `[0, SYNODIC_MONTH)`.
pub fn moon_age(at: NaiveDateTime) -> f64 {
    let elapsed = (at - reference_new_moon()).num_milliseconds() as f64 / MS_PER_DAY;
    elapsed.rem_euclid(SYNODIC_MONTH)
}

/// Fraction of the current cycle, in `[0, 1)`.
fn cycle_fraction(at: NaiveDateTime) -> f64 {
    moon_age(at) / SYNODIC_MONTH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Phase for a fraction of the cycle, each phase centered on its eighth.
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction.rem_euclid(1.0) {
            f if !(0.0625..0.9375).contains(&f) => MoonPhase::NewMoon,
            f if f < 0.1875 => MoonPhase::WaxingCrescent,
            f if f < 0.3125 => MoonPhase::FirstQuarter,
            f if f < 0.4375 => MoonPhase::WaxingGibbous,
            f if f < 0.5625 => MoonPhase::FullMoon,
            f if f < 0.6875 => MoonPhase::WaningGibbous,
            f if f < 0.8125 => MoonPhase::LastQuarter,
            _ => MoonPhase::WaningCrescent,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "Nymåne",
            MoonPhase::WaxingCrescent => "Voksende månesigd",
            MoonPhase::FirstQuarter => "Første kvarter",
            MoonPhase::WaxingGibbous => "Voksende måne",
            MoonPhase::FullMoon => "Fullmåne",
            MoonPhase::WaningGibbous => "Avtagende måne",
            MoonPhase::LastQuarter => "Siste kvarter",
            MoonPhase::WaningCrescent => "Avtagende månesigd",
        }
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Moon phase at local midnight of `date`.
pub fn moon_phase(date: NaiveDate) -> MoonPhase {
    MoonPhase::from_fraction(cycle_fraction(midnight(date)))
}

/// Illuminated fraction of the disc at local midnight, 0 at new moon and 1
/// at full moon.
pub fn illumination(date: NaiveDate) -> f64 {
    let fraction = cycle_fraction(midnight(date));
    (1.0 - (fraction * std::f64::consts::TAU).cos()) / 2.0
}

/// Phase details for one day of a month view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonDay {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub name: &'static str,
    pub illumination: f64,
}

/// One entry per day of `month` in `year`.
pub fn month_phases(year: i32, month: u32) -> Vec<MoonDay> {
    days_of_month(year, month)
        .map(|date| {
            let phase = moon_phase(date);
            MoonDay {
                date,
                phase,
                name: phase.name(),
                illumination: illumination(date),
            }
        })
        .collect()
}

/// A day on which one of the four principal phases occurs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrincipalPhase {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub name: &'static str,
}

/// Days of the month whose midnight moon age lies within a day of a new
/// moon, first quarter, full moon or last quarter.
pub fn principal_phases(year: i32, month: u32) -> Vec<PrincipalPhase> {
    days_of_month(year, month)
        .filter_map(|date| {
            let age = moon_age(midnight(date));
            let phase = if age < 1.0 {
                MoonPhase::NewMoon
            } else if (age - 7.4).abs() < 1.0 {
                MoonPhase::FirstQuarter
            } else if (age - 14.8).abs() < 1.0 {
                MoonPhase::FullMoon
            } else if (age - 22.1).abs() < 1.0 {
                MoonPhase::LastQuarter
            } else {
                return None;
            };
            Some(PrincipalPhase {
                date,
                phase,
                name: phase.name(),
            })
        })
        .collect()
}

fn days_of_month(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .into_iter()
        .flat_map(|first| first.iter_days())
        .take_while(move |d| d.month() == month && d.year() == year)
}
