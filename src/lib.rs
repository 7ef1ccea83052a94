pub mod config;
pub mod db;
pub mod export;
pub mod models;
pub mod routes;
pub mod state;
pub mod weather;

pub use config::{Config, WeatherConfig};
pub use db::{current_epoch_ms, init_pool, run_migrations, SqliteStore};
pub use models::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use weather::WeatherClient;
