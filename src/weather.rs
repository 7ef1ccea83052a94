//! Client for the upstream locationforecast service.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::WeatherConfig;

/// Number of hourly entries in a forecast summary.
pub const FORECAST_HOURS: usize = 24;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather API error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Unexpected forecast format: {0}")]
    Format(&'static str),
}

/// Forwards coordinates to the forecast API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Fetch the forecast for a position and return the JSON untouched.
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<Value, WeatherError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[("lat", lat), ("lon", lon)])
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// One hour of a forecast summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherHour {
    pub time: String,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation: f64,
    pub symbol_code: String,
}

/// Condense the first hours of a locationforecast document.
pub fn summarize(forecast: &Value) -> Result<Vec<WeatherHour>, WeatherError> {
    let series = forecast
        .pointer("/properties/timeseries")
        .and_then(Value::as_array)
        .ok_or(WeatherError::Format("missing properties.timeseries"))?;

    series
        .iter()
        .take(FORECAST_HOURS)
        .map(|item| {
            let details = item
                .pointer("/data/instant/details")
                .ok_or(WeatherError::Format("missing instant details"))?;
            let number = |field: &str| details.get(field).and_then(Value::as_f64);
            let next_hour = item.pointer("/data/next_1_hours");

            Ok(WeatherHour {
                time: item
                    .get("time")
                    .and_then(Value::as_str)
                    .ok_or(WeatherError::Format("missing time"))?
                    .to_string(),
                temperature: number("air_temperature")
                    .ok_or(WeatherError::Format("missing air_temperature"))?,
                wind_speed: number("wind_speed").unwrap_or(0.0),
                wind_direction: number("wind_direction").unwrap_or(0.0),
                precipitation: next_hour
                    .and_then(|n| n.pointer("/details/precipitation_amount"))
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
                symbol_code: next_hour
                    .and_then(|n| n.pointer("/summary/symbol_code"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
            })
        })
        .collect()
}
