//! Weather service - Live readings with a deterministic fallback.
//!
//! Lookups never fail: without a configured provider, or when the provider
//! errors or times out, the mock reading for the location is returned.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::domain::weather::{forecast, mock_weather};
use crate::domain::{ForecastDay, WeatherReport};
use crate::infra::{OpenWeatherClient, WeatherSource};

/// Current conditions plus the short outlook.
#[derive(Debug, Clone)]
pub struct WeatherOutlook {
    pub current: WeatherReport,
    pub forecast: Vec<ForecastDay>,
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Current conditions at a location
    async fn current(&self, location: &str) -> WeatherReport;

    /// Current conditions and the three-day outlook
    async fn outlook(&self, location: &str) -> WeatherOutlook {
        let current = self.current(location).await;
        let forecast = forecast(&current);
        WeatherOutlook { current, forecast }
    }
}

pub struct WeatherReporter {
    source: Option<Arc<dyn WeatherSource>>,
}

impl WeatherReporter {
    pub fn new(source: Option<Arc<dyn WeatherSource>>) -> Self {
        Self { source }
    }

    /// Use the live provider when an API key is configured.
    pub fn from_config(config: &Config) -> Self {
        let Some(api_key) = config.weather_api_key() else {
            tracing::info!("WEATHER_API_KEY not set, serving mock weather");
            return Self::new(None);
        };

        match OpenWeatherClient::new(
            config.weather_base_url.clone(),
            api_key,
            Duration::from_secs(config.weather_timeout_secs),
        ) {
            Ok(client) => Self::new(Some(Arc::new(client))),
            Err(e) => {
                tracing::warn!("Weather client unavailable, serving mock weather: {}", e);
                Self::new(None)
            }
        }
    }
}

#[async_trait]
impl WeatherService for WeatherReporter {
    async fn current(&self, location: &str) -> WeatherReport {
        let Some(source) = &self.source else {
            return mock_weather(location);
        };

        match source.current(location).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(%location, "Weather lookup failed, using mock: {}", e);
                mock_weather(location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockWeatherSource, OpenWeatherClient, WeatherError};
    use tokio::net::TcpListener;

    fn live_report(location: &str) -> WeatherReport {
        WeatherReport {
            location: location.to_string(),
            temperature: 31,
            condition: "Clear".to_string(),
            humidity: 40,
            wind_speed: 9,
            rainfall: 0.0,
            icon: "sun".to_string(),
            description: "Clear Sky".to_string(),
            is_mock: false,
        }
    }

    #[tokio::test]
    async fn test_without_source_returns_mock() {
        let reporter = WeatherReporter::new(None);
        let report = reporter.current("Pune").await;
        assert!(report.is_mock);
        assert_eq!(report, mock_weather("Pune"));
    }

    #[tokio::test]
    async fn test_live_reading_passes_through() {
        let mut source = MockWeatherSource::new();
        source
            .expect_current()
            .returning(|location| Ok(live_report(location)));

        let reporter = WeatherReporter::new(Some(Arc::new(source)));
        let report = reporter.current("Jaipur").await;

        assert!(!report.is_mock);
        assert_eq!(report.temperature, 31);
    }

    #[tokio::test]
    async fn test_failure_falls_back_deterministically() {
        let mut source = MockWeatherSource::new();
        source
            .expect_current()
            .times(2)
            .returning(|_| Err(WeatherError::Malformed("boom".to_string())));

        let reporter = WeatherReporter::new(Some(Arc::new(source)));
        let first = reporter.current("Nagpur").await;
        let second = reporter.current("Nagpur").await;

        assert!(first.is_mock);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_outlook_has_three_days() {
        let reporter = WeatherReporter::new(None);
        let outlook = reporter.outlook("Surat").await;
        assert_eq!(outlook.forecast.len(), 3);
        assert_eq!(outlook.current.location, "Surat");
    }

    #[tokio::test]
    async fn test_provider_timeout_falls_back_to_mock() {
        // Accepts connections and never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = OpenWeatherClient::new(
            format!("http://{}/data/2.5/weather", addr),
            "test-key",
            Duration::from_secs(1),
        )
        .unwrap();
        let reporter = WeatherReporter::new(Some(Arc::new(client)));

        let report = tokio::time::timeout(Duration::from_secs(5), reporter.current("Indore"))
            .await
            .expect("lookup should give up after the client timeout");

        assert_eq!(report, mock_weather("Indore"));
    }
}
