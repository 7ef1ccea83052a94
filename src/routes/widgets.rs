//! Side widgets: to-do list, post-it board, water tracker and theme.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

use kalender_core::storage::{keys, load, load_opt, save};
use kalender_core::{
    ColorScheme, NoteBoard, PostIt, Theme, Todo, TodoList, WaterIntake, DAILY_GOAL,
};

use crate::models::{
    ApiError, CreateNoteRequest, CreateTodoRequest, MoveNoteRequest, ReorderTodoRequest,
    SetThemeRequest, SetWaterRequest, ThemeResponse, WaterResponse, DEFAULT_POST_IT_COLOR,
};
use crate::state::AppState;

/// Client hint carrying the browser's preferred color scheme.
pub const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/reorder", post(reorder_todos))
        .route("/api/todos/{id}/toggle", post(toggle_todo))
        .route("/api/todos/{id}", delete(delete_todo))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}/move", post(move_note))
        .route("/api/notes/{id}", delete(delete_note))
        .route("/api/water", get(get_water).put(set_water))
        .route("/api/water/add", post(add_water))
        .route("/api/water/remove", post(remove_water))
        .route("/api/theme", get(get_theme).put(set_theme))
}

// To-dos

async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, ApiError> {
    Ok(Json(load(state.store.as_ref(), keys::TODOS).await?))
}

async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let color = req
        .is_post_it
        .then(|| req.color.unwrap_or_else(|| DEFAULT_POST_IT_COLOR.to_string()));
    let created_at = state.clock.epoch_ms();

    let todo = state
        .store
        .update(keys::TODOS, |list: &mut TodoList| {
            list.add(&req.text, color, created_at).map_err(ApiError::from)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state
        .store
        .update(keys::TODOS, |list: &mut TodoList| {
            list.toggle(&id).cloned().ok_or(ApiError::NotFound("Todo"))
        })
        .await?;
    Ok(Json(todo))
}

/// Unknown ids leave the order untouched.
async fn reorder_todos(
    State(state): State<AppState>,
    Json(req): Json<ReorderTodoRequest>,
) -> Result<Json<TodoList>, ApiError> {
    let list = state
        .store
        .update(keys::TODOS, |list: &mut TodoList| {
            list.move_item(&req.active_id, &req.over_id);
            Ok::<_, ApiError>(list.clone())
        })
        .await?;
    Ok(Json(list))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update(keys::TODOS, |list: &mut TodoList| {
            if list.remove(&id) {
                Ok(())
            } else {
                Err(ApiError::NotFound("Todo"))
            }
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Post-it notes

async fn list_notes(State(state): State<AppState>) -> Result<Json<NoteBoard>, ApiError> {
    Ok(Json(load(state.store.as_ref(), keys::POST_IT_NOTES).await?))
}

async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<PostIt>), ApiError> {
    let note = state
        .store
        .update(keys::POST_IT_NOTES, |board: &mut NoteBoard| {
            board.add(&req.text).map_err(ApiError::from)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn move_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveNoteRequest>,
) -> Result<Json<PostIt>, ApiError> {
    let note = state
        .store
        .update(keys::POST_IT_NOTES, |board: &mut NoteBoard| {
            board
                .move_by(&id, req.dx, req.dy)?
                .cloned()
                .ok_or(ApiError::NotFound("Note"))
        })
        .await?;
    Ok(Json(note))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update(keys::POST_IT_NOTES, |board: &mut NoteBoard| {
            if board.remove(&id) {
                Ok(())
            } else {
                Err(ApiError::NotFound("Note"))
            }
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Water tracker

impl From<WaterIntake> for WaterResponse {
    fn from(intake: WaterIntake) -> Self {
        Self {
            count: intake.count,
            goal: DAILY_GOAL,
            date: intake.date,
            progress: intake.progress_percent(),
        }
    }
}

/// Apply `change` to today's intake and persist it.
async fn update_water(
    state: &AppState,
    change: impl FnOnce(&mut WaterIntake) + Send,
) -> Result<Json<WaterResponse>, ApiError> {
    let today = state.clock.today();
    let intake = state
        .store
        .update(keys::WATER_TRACKER, |stored: &mut Option<WaterIntake>| {
            let mut intake = WaterIntake::for_today(*stored, today);
            change(&mut intake);
            *stored = Some(intake);
            Ok::<_, ApiError>(intake)
        })
        .await?;
    Ok(Json(intake.into()))
}

async fn get_water(State(state): State<AppState>) -> Result<Json<WaterResponse>, ApiError> {
    let stored = load_opt(state.store.as_ref(), keys::WATER_TRACKER).await?;
    Ok(Json(WaterIntake::for_today(stored, state.clock.today()).into()))
}

async fn add_water(State(state): State<AppState>) -> Result<Json<WaterResponse>, ApiError> {
    update_water(&state, WaterIntake::add_glass).await
}

async fn remove_water(State(state): State<AppState>) -> Result<Json<WaterResponse>, ApiError> {
    update_water(&state, WaterIntake::remove_glass).await
}

async fn set_water(
    State(state): State<AppState>,
    Json(req): Json<SetWaterRequest>,
) -> Result<Json<WaterResponse>, ApiError> {
    update_water(&state, |intake| intake.set(req.count)).await
}

// Theme

/// The browser's color scheme from the client hint, light when absent.
pub fn system_scheme(headers: &HeaderMap) -> ColorScheme {
    headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(ColorScheme::from_preference)
        .unwrap_or_default()
}

fn theme_response(theme: Theme, headers: &HeaderMap) -> Response {
    (
        [("Accept-CH", "Sec-CH-Prefers-Color-Scheme")],
        Json(ThemeResponse {
            theme,
            effective: theme.effective(system_scheme(headers)),
        }),
    )
        .into_response()
}

async fn get_theme(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let theme: Theme = load(state.store.as_ref(), keys::THEME).await?;
    Ok(theme_response(theme, &headers))
}

async fn set_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetThemeRequest>,
) -> Result<Response, ApiError> {
    save(state.store.as_ref(), keys::THEME, &req.theme).await?;
    tracing::info!("Theme set to {:?}", req.theme);
    Ok(theme_response(req.theme, &headers))
}
