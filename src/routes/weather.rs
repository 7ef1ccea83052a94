use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use kalender_core::Validator;

use crate::models::{ApiError, WeatherQuery};
use crate::state::AppState;
use crate::weather::{summarize, WeatherError};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/weather", get(proxy_weather))
        .route("/api/weather/forecast", get(get_forecast))
        .layer(CorsLayer::new().allow_origin(Any))
}

/// Requested coordinates, falling back to the configured position.
fn coordinates(state: &AppState, query: &WeatherQuery) -> Result<(f64, f64), ApiError> {
    let config = state.weather.config();
    let lat = query.lat.unwrap_or(config.default_lat);
    let lon = query.lon.unwrap_or(config.default_lon);
    Validator::validate_latitude(lat)?;
    Validator::validate_longitude(lon)?;
    Ok((lat, lon))
}

fn weather_failure(e: WeatherError) -> Response {
    tracing::error!("Weather API error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed fetching weather data" })),
    )
        .into_response()
}

/// GET /api/weather?lat=..&lon=.. - Upstream forecast JSON, unmodified.
async fn proxy_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ApiError> {
    let (lat, lon) = coordinates(&state, &query)?;
    Ok(match state.weather.fetch(lat, lon).await {
        Ok(forecast) => Json(forecast).into_response(),
        Err(e) => weather_failure(e),
    })
}

/// GET /api/weather/forecast - The next hours condensed.
async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ApiError> {
    let (lat, lon) = coordinates(&state, &query)?;
    let hours = state
        .weather
        .fetch(lat, lon)
        .await
        .and_then(|forecast| summarize(&forecast));

    Ok(match hours {
        Ok(hours) => Json(hours).into_response(),
        Err(e) => weather_failure(e),
    })
}
