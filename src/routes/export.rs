use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use kalender_core::storage::{keys, load};
use kalender_core::{CustomEvent, EventBook, HolidayCalendar, Theme, Validator};

use crate::export::{to_csv, to_ics, to_json, ExportFormat};
use crate::models::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/export/{year}/{format}", get(export_year))
}

/// GET /api/export/{year}/{json|csv|ics} - Download the year as a file.
async fn export_year(
    State(state): State<AppState>,
    Path((year, format)): Path<(i32, String)>,
) -> Result<Response, ApiError> {
    Validator::validate_year(year)?;
    let format = ExportFormat::parse(&format).ok_or(ApiError::NotFound("Export format"))?;

    let book: EventBook = load(state.store.as_ref(), keys::CUSTOM_EVENTS).await?;

    let body = match format {
        ExportFormat::Json => {
            let theme: Theme = load(state.store.as_ref(), keys::THEME).await?;
            to_json(book.all(), theme).map_err(|e| ApiError::Export(e.to_string()))?
        }
        ExportFormat::Csv => to_csv(&year_events(&book, year)),
        ExportFormat::Ics => {
            let calendar = HolidayCalendar::for_year(year);
            to_ics(year, calendar.holidays(), &year_events(&book, year))
        }
    };

    tracing::info!("Exported {} as {}", year, format.extension());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename(year)),
            ),
        ],
        body,
    )
        .into_response())
}

fn year_events(book: &EventBook, year: i32) -> Vec<CustomEvent> {
    book.in_year(year).into_iter().cloned().collect()
}
