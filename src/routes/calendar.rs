use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;

use kalender_core::format::{clock_time, full_date};
use kalender_core::moon::{month_phases, principal_phases};
use kalender_core::season::seasonal_events;
use kalender_core::storage::{keys, load};
use kalender_core::{
    numbering_year, week_number, year_grid, EventBook, HolidayCalendar, MonthGrid, MoonDay,
    PrincipalPhase, SeasonalEvent, Validator,
};

use crate::models::{
    parse_date, ApiError, DayResponse, GetHolidaysResponse, TodayResponse, WeekResponse,
    DEFAULT_EVENT_COLOR,
};
use crate::state::AppState;

/// Years offered by the year selector on either side of the current one.
pub const YEAR_SPAN: i32 = 5;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/holidays/{year}", get(get_holidays))
        .route("/api/days/{date}", get(get_day))
        .route("/api/weeks/{date}", get(get_week))
        .route("/api/calendar/{year}", get(get_calendar))
        .route("/api/seasons/{year}", get(get_seasons))
        .route("/api/moon/{year}/{month}", get(get_moon))
        .route("/api/today", get(get_today))
}

/// Parse and range-check a date path segment.
fn checked_date(raw: &str) -> Result<NaiveDate, ApiError> {
    let date = parse_date(raw)?;
    Validator::validate_year(date.year())?;
    Ok(date)
}

/// Years selectable around `year`.
pub fn year_range(year: i32) -> Vec<i32> {
    (year - YEAR_SPAN..=year + YEAR_SPAN).collect()
}

async fn get_holidays(Path(year): Path<i32>) -> Result<Json<GetHolidaysResponse>, ApiError> {
    Validator::validate_year(year)?;
    let calendar = HolidayCalendar::for_year(year);
    Ok(Json(GetHolidaysResponse {
        year,
        holidays: calendar.holidays().iter().copied().map(Into::into).collect(),
    }))
}

async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, ApiError> {
    let date = checked_date(&date)?;
    let book: EventBook = load(state.store.as_ref(), keys::CUSTOM_EVENTS).await?;
    let events = book.on_date(date).into_iter().cloned().collect();
    let class = HolidayCalendar::for_year(date.year()).classify(date);

    Ok(Json(DayResponse::new(
        date,
        class,
        week_number(date),
        events,
    )))
}

async fn get_week(Path(date): Path<String>) -> Result<Json<WeekResponse>, ApiError> {
    let date = checked_date(&date)?;
    Ok(Json(WeekResponse {
        date,
        week_number: week_number(date),
        numbering_year: numbering_year(date),
    }))
}

#[derive(Serialize)]
struct CalendarResponse {
    year: i32,
    months: Vec<MonthGrid>,
    /// Dot colors of the events on each day that has any.
    event_colors: BTreeMap<NaiveDate, Vec<String>>,
}

async fn get_calendar(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<CalendarResponse>, ApiError> {
    Validator::validate_year(year)?;
    let book: EventBook = load(state.store.as_ref(), keys::CUSTOM_EVENTS).await?;

    Ok(Json(CalendarResponse {
        year,
        months: year_grid(year),
        event_colors: event_colors(&book, year),
    }))
}

/// Group the colors of `year`'s events by date.
pub fn event_colors(book: &EventBook, year: i32) -> BTreeMap<NaiveDate, Vec<String>> {
    let mut colors: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for event in book.in_year(year) {
        colors.entry(event.date).or_default().push(
            event
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
        );
    }
    colors
}

#[derive(Serialize)]
struct SeasonsResponse {
    year: i32,
    events: Vec<SeasonalEvent>,
}

async fn get_seasons(Path(year): Path<i32>) -> Result<Json<SeasonsResponse>, ApiError> {
    Validator::validate_year(year)?;
    Ok(Json(SeasonsResponse {
        year,
        events: seasonal_events(year),
    }))
}

#[derive(Serialize)]
struct MoonResponse {
    year: i32,
    month: u32,
    days: Vec<MoonDay>,
    principal: Vec<PrincipalPhase>,
}

async fn get_moon(Path((year, month)): Path<(i32, u32)>) -> Result<Json<MoonResponse>, ApiError> {
    Validator::validate_year(year)?;
    Validator::validate_month(month)?;
    Ok(Json(MoonResponse {
        year,
        month,
        days: month_phases(year, month),
        principal: principal_phases(year, month),
    }))
}

async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let now = state.clock.now();
    let today = now.date();
    let class = HolidayCalendar::for_year(today.year()).classify(today);

    Json(TodayResponse {
        date: today,
        formatted_date: full_date(today),
        time: clock_time(now.time()),
        daytime: (6..18).contains(&now.hour()),
        week_number: week_number(today),
        holidays: class.holidays.iter().map(|h| h.name).collect(),
        sunday: class.sunday,
        years: year_range(today.year()),
    })
}
