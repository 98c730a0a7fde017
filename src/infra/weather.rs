//! OpenWeatherMap client.
//!
//! Fetches current conditions and normalizes the provider payload into a
//! [`WeatherReport`]. Callers decide what to do on failure; the weather
//! service falls back to the deterministic mock.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::weather::{icon_for, ms_to_kmh, title_case};
use crate::domain::WeatherReport;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed weather payload: {0}")]
    Malformed(String),
}

/// Source of live weather readings.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
    wind: ProviderWind,
    #[serde(default)]
    rain: Option<ProviderRain>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ProviderWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderRain {
    #[serde(rename = "1h", default)]
    last_hour: Option<f64>,
}

/// Parse a current-conditions payload for `location`.
pub fn normalize(location: &str, body: &str) -> Result<WeatherReport, WeatherError> {
    let response: ProviderResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;

    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Malformed("empty weather list".to_string()))?;

    Ok(WeatherReport {
        location: location.to_string(),
        temperature: response.main.temp.round() as i32,
        condition: condition.main,
        humidity: response.main.humidity.round() as i32,
        wind_speed: ms_to_kmh(response.wind.speed),
        rainfall: response.rain.and_then(|r| r.last_hour).unwrap_or(0.0),
        icon: icon_for(&condition.icon).to_string(),
        description: title_case(&condition.description),
        is_mock: false,
    })
}

/// HTTP client for the OpenWeatherMap current-conditions endpoint.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        normalize(location, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOUDY: &str = r#"{
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 27.6, "feels_like": 29.1, "humidity": 62},
        "wind": {"speed": 3.5, "deg": 250},
        "name": "Nashik"
    }"#;

    const RAINY: &str = r#"{
        "weather": [{"main": "Rain", "description": "light rain", "icon": "10n"}],
        "main": {"temp": 21.2, "humidity": 88},
        "wind": {"speed": 1.0},
        "rain": {"1h": 0.42}
    }"#;

    #[test]
    fn test_normalize_cloudy() {
        let report = normalize("Nashik,IN", CLOUDY).unwrap();

        assert_eq!(report.location, "Nashik,IN");
        assert_eq!(report.temperature, 28);
        assert_eq!(report.condition, "Clouds");
        assert_eq!(report.humidity, 62);
        assert_eq!(report.wind_speed, 13);
        assert_eq!(report.rainfall, 0.0);
        assert_eq!(report.icon, "cloud");
        assert_eq!(report.description, "Scattered Clouds");
        assert!(!report.is_mock);
    }

    #[test]
    fn test_normalize_reads_rain() {
        let report = normalize("Kochi", RAINY).unwrap();
        assert_eq!(report.rainfall, 0.42);
        assert_eq!(report.icon, "cloud-moon-rain");
        assert_eq!(report.description, "Light Rain");
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert!(matches!(
            normalize("x", r#"{"cod": "404", "message": "city not found"}"#),
            Err(WeatherError::Malformed(_))
        ));
        assert!(normalize("x", "not json").is_err());

        let no_conditions = r#"{"weather": [], "main": {"temp": 1, "humidity": 1}, "wind": {"speed": 0}}"#;
        assert!(matches!(
            normalize("x", no_conditions),
            Err(WeatherError::Malformed(_))
        ));
    }
}
