//! Kalender Core - Norwegian holiday engine and calendar domain models.
//!
//! The date engine (`easter`, `holiday`, `week`) is a set of pure functions
//! over years and dates. The remaining modules hold the plain value types the
//! calendar service persists and renders. This crate has no dependencies on
//! other Kalender crates and performs no I/O of its own.

pub mod clock;
pub mod easter;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod holiday;
pub mod moon;
pub mod note;
pub mod season;
pub mod storage;
pub mod theme;
pub mod todo;
pub mod validation;
pub mod water;
pub mod week;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use easter::{compute_easter, easter_sunday};
pub use error::{StorageError, ValidationError};
pub use event::{CustomEvent, EventBook, NewEvent};
pub use grid::{month_grid, year_grid, DayCell, MonthGrid, WeekRow};
pub use holiday::{classify, holidays_for_year, DayClass, Holiday, HolidayCalendar, HolidayKind};
pub use moon::{MoonDay, MoonPhase, PrincipalPhase};
pub use note::{NoteBoard, Position, PostIt};
pub use season::{SeasonDate, SeasonIcon, SeasonalEvent};
pub use storage::KeyValueStore;
pub use theme::{ColorScheme, Theme};
pub use todo::{Todo, TodoList};
pub use validation::{Validator, MAX_YEAR, MIN_YEAR};
pub use water::{WaterIntake, DAILY_GOAL};
pub use week::{numbering_year, week_number};

#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryStore;
