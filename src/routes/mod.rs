pub mod calendar;
pub mod events;
pub mod export;
pub mod health;
pub mod pages;
pub mod weather;
pub mod widgets;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::routes())
        .merge(calendar::routes())
        .merge(events::routes())
        .merge(widgets::routes())
        .merge(weather::routes())
        .merge(export::routes())
        .merge(health::routes())
        .with_state(state)
}
