//! Weather page, alert subscription and the JSON weather endpoint.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::{flash_redirect, render, Flashed, Page};
use crate::api::flash::{self, FlashLevel};
use crate::api::middleware::CurrentUser;
use crate::api::views::{Layout, WeatherPage};
use crate::api::AppState;
use crate::config::DEFAULT_WEATHER_LOCATION;
use crate::domain::WeatherReport;
use crate::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

/// Create weather page routes
pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather))
        .route("/subscribe_alerts", post(subscribe_alerts))
}

/// Create public weather API routes
pub fn weather_api_routes() -> Router<AppState> {
    Router::new().route("/api/weather/:location", get(weather_json))
}

pub async fn weather(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    Query(query): Query<LocationQuery>,
) -> AppResult<Page> {
    let user = state.user_service.get_user(current.id).await?;

    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .or_else(|| user.location())
        .unwrap_or(DEFAULT_WEATHER_LOCATION)
        .to_string();

    let outlook = state.weather_service.outlook(&location).await;

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        WeatherPage {
            layout: Layout::new(Some(&current), flashes),
            weather: outlook.current.into(),
            forecast: outlook.forecast.into_iter().map(Into::into).collect(),
            location,
            subscribed: user.weather_alerts,
        },
    )
}

pub async fn subscribe_alerts(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Flashed> {
    let subscribed = state.user_service.toggle_weather_alerts(current.id).await?;

    Ok(if subscribed {
        flash_redirect(
            jar,
            FlashLevel::Success,
            "You have successfully subscribed to weather alerts!",
            "/weather",
        )
    } else {
        flash_redirect(
            jar,
            FlashLevel::Info,
            "You have unsubscribed from weather alerts.",
            "/weather",
        )
    })
}

/// Current weather for a location
#[utoipa::path(
    get,
    path = "/api/weather/{location}",
    tag = "Weather",
    params(
        ("location" = String, Path, description = "City name, optionally with a country code", example = "Nashik,IN")
    ),
    responses(
        (status = 200, description = "Current conditions; mock data when the provider is unavailable", body = WeatherReport)
    )
)]
pub async fn weather_json(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Json<WeatherReport> {
    Json(state.weather_service.current(location.trim()).await)
}
