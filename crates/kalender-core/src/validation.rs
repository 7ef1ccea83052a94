use crate::error::ValidationError;

/// First year the Gregorian computus is defined for.
pub const MIN_YEAR: i32 = 1583;
pub const MAX_YEAR: i32 = 9999;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Validator for values arriving from the outside.
pub struct Validator;

impl Validator {
    /// Validate a calendar year.
    pub fn validate_year(year: i32) -> Result<(), ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidYear(year));
        }
        Ok(())
    }

    /// Validate a month number (1-12).
    pub fn validate_month(month: u32) -> Result<(), ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        Ok(())
    }

    /// Validate an event title.
    /// Must be non-blank and max 200 chars.
    pub fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let len = title.chars().count();
        if len > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong(len));
        }
        Ok(())
    }

    /// Validate optional description.
    pub fn validate_description(description: &Option<String>) -> Result<(), ValidationError> {
        if let Some(d) = description {
            let len = d.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(ValidationError::DescriptionTooLong(len));
            }
        }
        Ok(())
    }

    /// Validate a `#rrggbb` color.
    pub fn validate_color(color: &str) -> Result<(), ValidationError> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValidationError::InvalidColor(color.to_string()));
        }
        Ok(())
    }

    /// Validate free text of to-dos and notes.
    pub fn validate_text(text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(())
    }

    /// Validate latitude value.
    pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
        if lat.is_nan() || !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::InvalidLatitude(lat));
        }
        Ok(())
    }

    /// Validate longitude value.
    pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
        if lon.is_nan() || !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::InvalidLongitude(lon));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range() {
        assert!(Validator::validate_year(1583).is_ok());
        assert!(Validator::validate_year(2024).is_ok());
        assert!(Validator::validate_year(9999).is_ok());
        assert_eq!(
            Validator::validate_year(1582),
            Err(ValidationError::InvalidYear(1582))
        );
        assert!(Validator::validate_year(10000).is_err());
    }

    #[test]
    fn test_month_range() {
        assert!(Validator::validate_month(1).is_ok());
        assert!(Validator::validate_month(12).is_ok());
        assert!(Validator::validate_month(0).is_err());
        assert!(Validator::validate_month(13).is_err());
    }

    #[test]
    fn test_title() {
        assert!(Validator::validate_title("Bursdag").is_ok());
        assert_eq!(
            Validator::validate_title("   "),
            Err(ValidationError::EmptyTitle)
        );
        assert!(Validator::validate_title(&"å".repeat(200)).is_ok());
        assert!(Validator::validate_title(&"å".repeat(201)).is_err());
    }

    #[test]
    fn test_description() {
        assert!(Validator::validate_description(&None).is_ok());
        assert!(Validator::validate_description(&Some("Kake".to_string())).is_ok());
        assert!(Validator::validate_description(&Some("a".repeat(2001))).is_err());
    }

    #[test]
    fn test_color() {
        assert!(Validator::validate_color("#ff0000").is_ok());
        assert!(Validator::validate_color("#FFEB3B").is_ok());
        assert!(Validator::validate_color("ff0000").is_err());
        assert!(Validator::validate_color("#ff00").is_err());
        assert!(Validator::validate_color("#gg0000").is_err());
        assert!(Validator::validate_color("#ææ00").is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(Validator::validate_latitude(59.91).is_ok());
        assert!(Validator::validate_latitude(90.1).is_err());
        assert!(Validator::validate_latitude(f64::NAN).is_err());
        assert!(Validator::validate_longitude(10.75).is_ok());
        assert!(Validator::validate_longitude(-180.1).is_err());
        assert!(Validator::validate_longitude(f64::NAN).is_err());
    }
}
