use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Glasses of water per day.
pub const DAILY_GOAL: u32 = 8;

/// Today's water intake. A stored count from another day counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterIntake {
    pub count: u32,
    pub date: NaiveDate,
}

impl WaterIntake {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            count: 0,
            date: today,
        }
    }

    /// Resolve a stored value against today's date.
    pub fn for_today(stored: Option<WaterIntake>, today: NaiveDate) -> Self {
        match stored {
            Some(intake) if intake.date == today => Self {
                count: intake.count.min(DAILY_GOAL),
                date: today,
            },
            _ => Self::empty(today),
        }
    }

    /// Add one glass, stopping at the daily goal.
    pub fn add_glass(&mut self) {
        if self.count < DAILY_GOAL {
            self.count += 1;
        }
    }

    /// Remove one glass, stopping at zero.
    pub fn remove_glass(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn set(&mut self, count: u32) {
        self.count = count.min(DAILY_GOAL);
    }

    pub fn goal_reached(&self) -> bool {
        self.count >= DAILY_GOAL
    }

    pub fn progress_percent(&self) -> f64 {
        f64::from(self.count) / f64::from(DAILY_GOAL) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resets_on_new_day() {
        let yesterday = WaterIntake {
            count: 5,
            date: date(2024, 6, 1),
        };
        let today = WaterIntake::for_today(Some(yesterday), date(2024, 6, 2));
        assert_eq!(today.count, 0);
        assert_eq!(today.date, date(2024, 6, 2));

        let same_day = WaterIntake::for_today(Some(yesterday), date(2024, 6, 1));
        assert_eq!(same_day.count, 5);

        assert_eq!(WaterIntake::for_today(None, date(2024, 6, 2)).count, 0);
    }

    #[test]
    fn test_add_and_remove_saturate() {
        let mut intake = WaterIntake::empty(date(2024, 6, 1));
        intake.remove_glass();
        assert_eq!(intake.count, 0);

        for _ in 0..10 {
            intake.add_glass();
        }
        assert_eq!(intake.count, DAILY_GOAL);
        assert!(intake.goal_reached());
        assert_eq!(intake.progress_percent(), 100.0);

        intake.remove_glass();
        assert_eq!(intake.count, 7);
    }

    #[test]
    fn test_set_clamps() {
        let mut intake = WaterIntake::empty(date(2024, 6, 1));
        intake.set(4);
        assert_eq!(intake.progress_percent(), 50.0);
        intake.set(99);
        assert_eq!(intake.count, DAILY_GOAL);
    }
}
