use std::net::SocketAddr;

use thiserror::Error;

use kalender_core::Validator;

pub const DEFAULT_WEATHER_API_URL: &str =
    "https://api.met.no/weatherapi/locationforecast/2.0/compact";
pub const DEFAULT_USER_AGENT: &str = "NorwegianCalendar/1.0";

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub weather: WeatherConfig,
}

/// Upstream forecast service settings.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_url: String,
    pub user_agent: String,
    /// Coordinates used when a forecast request names none (Oslo).
    pub default_lat: f64,
    pub default_lon: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_WEATHER_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_lat: 59.91,
            default_lon: 10.75,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// DATABASE_URL defaults to "sqlite://kalender.db"
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://kalender.db".to_string());

        let listen_addr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("LISTEN_ADDR", "must be a valid socket address"))?;

        let defaults = WeatherConfig::default();

        let api_url =
            std::env::var("WEATHER_API_URL").unwrap_or_else(|_| defaults.api_url.clone());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "WEATHER_API_URL",
                "must be an http(s) URL",
            ));
        }

        let user_agent =
            std::env::var("WEATHER_USER_AGENT").unwrap_or_else(|_| defaults.user_agent.clone());

        let default_lat = match std::env::var("WEATHER_LAT") {
            Ok(s) => s
                .parse::<f64>()
                .ok()
                .filter(|lat| Validator::validate_latitude(*lat).is_ok())
                .ok_or(ConfigError::Invalid(
                    "WEATHER_LAT",
                    "must be a latitude between -90 and 90",
                ))?,
            Err(_) => defaults.default_lat,
        };

        let default_lon = match std::env::var("WEATHER_LON") {
            Ok(s) => s
                .parse::<f64>()
                .ok()
                .filter(|lon| Validator::validate_longitude(*lon).is_ok())
                .ok_or(ConfigError::Invalid(
                    "WEATHER_LON",
                    "must be a longitude between -180 and 180",
                ))?,
            Err(_) => defaults.default_lon,
        };

        Ok(Config {
            listen_addr,
            database_url,
            weather: WeatherConfig {
                api_url,
                user_agent,
                default_lat,
                default_lon,
            },
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
