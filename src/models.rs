use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kalender_core::format::long_date;
use kalender_core::{
    ColorScheme, CustomEvent, DayClass, Holiday, HolidayKind, StorageError, Theme, ValidationError,
};

use crate::weather::WeatherError;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Export error: {0}")]
    Export(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Weather(_) | ApiError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Parse a `YYYY-MM-DD` path segment.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// A holiday as listed in the holiday overview.
#[derive(Debug, Serialize)]
pub struct HolidayResponse {
    pub name: &'static str,
    pub date: NaiveDate,
    pub kind: HolidayKind,
    /// "21. april 2024"
    pub formatted: String,
}

impl From<Holiday> for HolidayResponse {
    fn from(h: Holiday) -> Self {
        Self {
            name: h.name,
            date: h.date,
            kind: h.kind,
            formatted: long_date(h.date),
        }
    }
}

/// Response for the holidays endpoint.
#[derive(Debug, Serialize)]
pub struct GetHolidaysResponse {
    pub year: i32,
    pub holidays: Vec<HolidayResponse>,
}

/// Response for a single day.
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    /// "søndag 21. april 2024"
    pub formatted: String,
    pub week_number: u32,
    pub holidays: Vec<&'static str>,
    pub sunday: bool,
    pub label: Option<String>,
    pub events: Vec<CustomEvent>,
}

impl DayResponse {
    pub fn new(date: NaiveDate, class: DayClass, week_number: u32, events: Vec<CustomEvent>) -> Self {
        Self {
            date,
            formatted: kalender_core::format::full_date(date),
            week_number,
            label: class.label(),
            holidays: class.holidays.iter().map(|h| h.name).collect(),
            sunday: class.sunday,
            events,
        }
    }
}

/// Response for the week endpoint.
#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub date: NaiveDate,
    pub week_number: u32,
    pub numbering_year: i32,
}

/// Response for the current date and time.
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub formatted_date: String,
    pub time: String,
    pub daytime: bool,
    pub week_number: u32,
    pub holidays: Vec<&'static str>,
    pub sunday: bool,
    pub years: Vec<i32>,
}

/// Query parameters for the events listing.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub date: Option<String>,
    pub year: Option<i32>,
}

/// Request to add a to-do.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub text: String,
    #[serde(default)]
    pub is_post_it: bool,
    pub color: Option<String>,
}

/// Default color of post-it to-dos.
pub const DEFAULT_POST_IT_COLOR: &str = "#ffeb3b";

/// Request to move one to-do onto another's position.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTodoRequest {
    pub active_id: String,
    pub over_id: String,
}

/// Request to add a note.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub text: String,
}

/// Drag delta of a note.
#[derive(Debug, Deserialize)]
pub struct MoveNoteRequest {
    pub dx: f64,
    pub dy: f64,
}

/// Request to set today's glass count.
#[derive(Debug, Deserialize)]
pub struct SetWaterRequest {
    pub count: u32,
}

/// Response for the water tracker.
#[derive(Debug, Serialize)]
pub struct WaterResponse {
    pub count: u32,
    pub goal: u32,
    pub date: NaiveDate,
    pub progress: f64,
}

/// Request to change the theme.
#[derive(Debug, Deserialize)]
pub struct SetThemeRequest {
    pub theme: Theme,
}

/// Response for the theme endpoint.
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub effective: ColorScheme,
}

/// Query parameters for the weather endpoints.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Query parameters for the index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub year: Option<i32>,
}

/// Dot color of events saved without one.
pub const DEFAULT_EVENT_COLOR: &str = "#ff0000";
