use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid year {0}: must be between 1583 and 9999")]
    InvalidYear(i32),

    #[error("Invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Title is required")]
    EmptyTitle,

    #[error("Title too long: {0} characters (max 200)")]
    TitleTooLong(usize),

    #[error("Description too long: {0} characters (max 2000)")]
    DescriptionTooLong(usize),

    #[error("Invalid color {0}: expected #rrggbb")]
    InvalidColor(String),

    #[error("Text is required")]
    EmptyText,

    #[error("Invalid latitude {0}: must be between -90 and 90")]
    InvalidLatitude(f64),

    #[error("Invalid longitude {0}: must be between -180 and 180")]
    InvalidLongitude(f64),

    #[error("Note position out of range")]
    InvalidPosition,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Corrupt value under key {key}: {message}")]
    Corrupt { key: String, message: String },

    #[error("Database error: {0}")]
    Database(String),
}
