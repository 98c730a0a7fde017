//! Normalized weather readings, icon mapping and the deterministic mock.
//!
//! Mock readings and forecast variations are chosen by [`location_bucket`],
//! a 32-bit FNV-1a checksum of the UTF-8 bytes modulo [`BUCKETS`], so the
//! same location always yields the same output on every platform.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of mock weather variants.
pub const BUCKETS: usize = 4;

const CONDITIONS: [&str; BUCKETS] = ["Sunny", "Partly Cloudy", "Cloudy", "Light Rain"];
const MOCK_TEMPERATURES: [i32; BUCKETS] = [28, 25, 22, 19];
const MOCK_HUMIDITIES: [i32; BUCKETS] = [65, 70, 75, 80];
const MOCK_ICONS: [&str; BUCKETS] = ["sun", "cloud-sun", "cloud", "cloud-rain"];
const MOCK_WIND_KMH: i32 = 12;

const FORECAST_DELTAS: [i32; BUCKETS] = [-2, 0, 2, -1];
const FORECAST_ICON_CODES: [&str; BUCKETS] = ["01d", "02d", "03d", "09d"];
const FORECAST_DAYS: u32 = 3;

/// Icon used for provider codes missing from the table.
pub const FALLBACK_ICON: &str = "cloud";

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherReport {
    #[schema(example = "Nashik,IN")]
    pub location: String,
    /// Degrees Celsius, rounded
    #[schema(example = 28)]
    pub temperature: i32,
    #[schema(example = "Clouds")]
    pub condition: String,
    /// Relative humidity, percent
    #[schema(example = 70)]
    pub humidity: i32,
    /// Kilometres per hour, rounded
    #[schema(example = 12)]
    pub wind_speed: i32,
    /// Millimetres over the last hour
    #[schema(example = 0.0)]
    pub rainfall: f64,
    #[schema(example = "cloud-sun")]
    pub icon: String,
    #[schema(example = "Scattered Clouds")]
    pub description: String,
    /// True when the reading was synthesized rather than fetched
    pub is_mock: bool,
}

/// One day of the synthetic outlook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ForecastDay {
    #[schema(example = "In 2 days")]
    pub day: String,
    pub condition: String,
    pub high: i32,
    pub low: i32,
    pub icon: String,
}

/// Stable bucket for a location string.
pub fn location_bucket(location: &str) -> usize {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let hash = location
        .as_bytes()
        .iter()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME));
    hash as usize % BUCKETS
}

/// Map an OpenWeatherMap icon code to an icon identifier.
pub fn icon_for(code: &str) -> &'static str {
    match code {
        "01d" => "sun",
        "01n" => "moon",
        "02d" => "cloud-sun",
        "02n" => "cloud-moon",
        "03d" | "03n" | "04d" | "04n" => "cloud",
        "09d" | "09n" => "cloud-rain",
        "10d" => "cloud-sun-rain",
        "10n" => "cloud-moon-rain",
        "11d" | "11n" => "bolt",
        "13d" | "13n" => "snowflake",
        "50d" | "50n" => "smog",
        _ => FALLBACK_ICON,
    }
}

/// Synthetic reading used whenever the live provider is unavailable.
pub fn mock_weather(location: &str) -> WeatherReport {
    let bucket = location_bucket(location);
    WeatherReport {
        location: location.to_string(),
        temperature: MOCK_TEMPERATURES[bucket],
        condition: CONDITIONS[bucket].to_string(),
        humidity: MOCK_HUMIDITIES[bucket],
        wind_speed: MOCK_WIND_KMH,
        rainfall: if bucket == 3 { 2.0 } else { 0.0 },
        icon: MOCK_ICONS[bucket].to_string(),
        description: CONDITIONS[bucket].to_string(),
        is_mock: true,
    }
}

/// Three-day outlook derived from the current reading.
pub fn forecast(current: &WeatherReport) -> Vec<ForecastDay> {
    (1..=FORECAST_DAYS)
        .map(|offset| {
            let bucket = location_bucket(&format!("{}{}", current.location, offset));
            let base = current.temperature + FORECAST_DELTAS[bucket];
            ForecastDay {
                day: if offset == 1 {
                    "In 1 day".to_string()
                } else {
                    format!("In {} days", offset)
                },
                condition: CONDITIONS[bucket].to_string(),
                high: base + 2,
                low: base - 3,
                icon: icon_for(FORECAST_ICON_CODES[bucket]).to_string(),
            }
        })
        .collect()
}

/// Metres per second to whole kilometres per hour.
pub fn ms_to_kmh(speed: f64) -> i32 {
    (speed * 3.6).round() as i32
}

/// Capitalize the first letter of every word, as providers send lower case.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_is_stable() {
        // FNV-1a("") is the offset basis, 0x811c9dc5 % 4 == 1
        assert_eq!(location_bucket(""), 1);
        assert_eq!(location_bucket("Pune"), location_bucket("Pune"));
        assert!(location_bucket("Ludhiana,IN") < BUCKETS);
    }

    #[test]
    fn test_mock_is_deterministic() {
        let first = mock_weather("Nashik,IN");
        let second = mock_weather("Nashik,IN");
        assert_eq!(first, second);
        assert!(first.is_mock);
    }

    #[test]
    fn test_mock_fields_follow_bucket() {
        let report = mock_weather("Guntur");
        let bucket = location_bucket("Guntur");

        assert_eq!(report.temperature, MOCK_TEMPERATURES[bucket]);
        assert_eq!(report.condition, CONDITIONS[bucket]);
        assert_eq!(report.icon, MOCK_ICONS[bucket]);
        assert_eq!(report.wind_speed, 12);
        assert_eq!(report.rainfall > 0.0, bucket == 3);
    }

    #[test]
    fn test_icon_mapping() {
        assert_eq!(icon_for("01n"), "moon");
        assert_eq!(icon_for("10d"), "cloud-sun-rain");
        assert_eq!(icon_for("04n"), "cloud");
        assert_eq!(icon_for("99x"), FALLBACK_ICON);
    }

    #[test]
    fn test_forecast_shape() {
        let current = mock_weather("Indore");
        let days = forecast(&current);

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].day, "In 1 day");
        assert_eq!(days[2].day, "In 3 days");
        for day in &days {
            assert_eq!(day.high - day.low, 5);
            let delta = day.high - 2 - current.temperature;
            assert!(FORECAST_DELTAS.contains(&delta));
        }
        assert_eq!(days, forecast(&current));
    }

    #[test]
    fn test_unit_helpers() {
        assert_eq!(ms_to_kmh(3.5), 13);
        assert_eq!(ms_to_kmh(0.0), 0);
        assert_eq!(title_case("scattered clouds"), "Scattered Clouds");
        assert_eq!(title_case("light RAIN"), "Light Rain");
    }
}
