use std::sync::Arc;

use kalender_core::Clock;

use crate::db::SqliteStore;
use crate::weather::WeatherClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub clock: Arc<dyn Clock>,
    pub weather: Arc<WeatherClient>,
}

impl AppState {
    pub fn new(store: SqliteStore, clock: Arc<dyn Clock>, weather: WeatherClient) -> Self {
        Self {
            store: Arc::new(store),
            clock,
            weather: Arc::new(weather),
        }
    }
}
