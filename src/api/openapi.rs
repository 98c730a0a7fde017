//! OpenAPI documentation for the JSON endpoints.

use utoipa::OpenApi;

use crate::api::handlers::weather_handler;
use crate::domain::{ForecastDay, WeatherReport};

/// OpenAPI documentation for Kisan Hub
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kisan Hub",
        version = "0.1.0",
        description = "Farmer portal: weather, agronomy references, forum and farm-input shop",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        weather_handler::weather_json,
    ),
    components(
        schemas(WeatherReport, ForecastDay)
    ),
    tags(
        (name = "Weather", description = "Current conditions with mock fallback")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_path_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/weather/{location}"));
    }
}
