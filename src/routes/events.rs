use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use kalender_core::storage::{keys, load};
use kalender_core::{CustomEvent, EventBook, NewEvent, Validator};

use crate::models::{parse_date, ApiError, EventsQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", put(update_event).delete(delete_event))
}

async fn load_book(state: &AppState) -> Result<EventBook, ApiError> {
    Ok(load(state.store.as_ref(), keys::CUSTOM_EVENTS).await?)
}

/// GET /api/events - All events, or those of one date or year.
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<CustomEvent>>, ApiError> {
    let book = load_book(&state).await?;

    let events = match (query.date, query.year) {
        (Some(date), _) => {
            let date = parse_date(&date)?;
            book.on_date(date).into_iter().cloned().collect()
        }
        (None, Some(year)) => {
            Validator::validate_year(year)?;
            book.in_year(year).into_iter().cloned().collect()
        }
        (None, None) => book.all().to_vec(),
    };
    Ok(Json(events))
}

async fn create_event(
    State(state): State<AppState>,
    Json(new): Json<NewEvent>,
) -> Result<(StatusCode, Json<CustomEvent>), ApiError> {
    let event = state
        .store
        .update(keys::CUSTOM_EVENTS, |book: &mut EventBook| {
            book.add(new).map_err(ApiError::from)
        })
        .await?;

    tracing::info!("Created event {} on {}", event.id, event.date);
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<NewEvent>,
) -> Result<Json<CustomEvent>, ApiError> {
    let event = state
        .store
        .update(keys::CUSTOM_EVENTS, |book: &mut EventBook| {
            book.update(&id, changes)?.ok_or(ApiError::NotFound("Event"))
        })
        .await?;
    Ok(Json(event))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update(keys::CUSTOM_EVENTS, |book: &mut EventBook| {
            if book.remove(&id) {
                Ok(())
            } else {
                Err(ApiError::NotFound("Event"))
            }
        })
        .await?;

    tracing::info!("Deleted event {}", id);
    Ok(StatusCode::NO_CONTENT)
}
