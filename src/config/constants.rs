//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Forum threads shown per page
pub const FORUM_PAGE_SIZE: u64 = 10;

// =============================================================================
// Sessions & Security
// =============================================================================

/// Fallback signing secret for local development only
pub const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// Minimum signing secret length (security requirement)
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Default session lifetime in hours
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "kisan_session";

/// Cookie carrying one-shot flash messages
pub const FLASH_COOKIE: &str = "kisan_flash";

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

// =============================================================================
// Profile
// =============================================================================

/// Language assigned to new users
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages the interface can be shown in
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "hi"];

/// Check if a language code is supported
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

// =============================================================================
// Forum
// =============================================================================

/// Category assigned to posts created without one
pub const DEFAULT_FORUM_CATEGORY: &str = "General";

/// Pseudo-category selecting every post
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Dashboard
// =============================================================================

/// Orders shown on the dashboard
pub const DASHBOARD_RECENT_ORDERS: u64 = 3;

/// Forum posts shown on the dashboard
pub const DASHBOARD_RECENT_POSTS: u64 = 5;

// =============================================================================
// Weather
// =============================================================================

/// OpenWeatherMap current-conditions endpoint
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Upper bound on the outbound weather call, in seconds
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;

/// Location used when neither the query nor the profile names one
pub const DEFAULT_WEATHER_LOCATION: &str = "New Delhi,IN";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://kisan_hub.db?mode=rwc";
