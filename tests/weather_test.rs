//! Mock weather fallback through the service container.

mod common;

use common::TestApp;
use kisan_hub::domain::weather::mock_weather;
use kisan_hub::services::ServiceContainer;

#[tokio::test]
async fn test_mock_reading_is_stable_per_location() {
    let app = TestApp::new().await;
    let weather = app.services.weather();

    let first = weather.current("Nashik").await;
    let second = weather.current("Nashik").await;

    assert!(first.is_mock);
    assert_eq!(first, second);
    assert_eq!(first, mock_weather("Nashik"));
}

#[tokio::test]
async fn test_outlook_follows_current_reading() {
    let app = TestApp::new().await;

    let outlook = app.services.weather().outlook("Ludhiana").await;

    assert_eq!(outlook.current.location, "Ludhiana");
    assert_eq!(outlook.forecast.len(), 3);
    assert!(outlook.forecast.iter().all(|day| day.high > day.low));
}
