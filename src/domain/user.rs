//! User domain entity and profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered farmer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub farm_location: Option<String>,
    /// Farm size in acres
    pub farm_size: Option<f64>,
    /// Free-text, comma separated
    pub crops: Option<String>,
    pub phone: Option<String>,
    pub language: String,
    pub soil_type: Option<String>,
    pub weather_alerts: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Crops named in the profile, trimmed and lower-cased.
    pub fn crop_list(&self) -> Vec<String> {
        self.crops
            .as_deref()
            .map(|crops| {
                crops
                    .split(',')
                    .map(|crop| crop.trim().to_lowercase())
                    .filter(|crop| !crop.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Farm location, if one has been filled in.
    pub fn location(&self) -> Option<&str> {
        self.farm_location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

/// Registration input after form binding.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Editable profile attributes. Blank strings clear the field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub farm_location: Option<String>,
    pub farm_size: Option<f64>,
    pub crops: Option<String>,
    pub phone: Option<String>,
    pub soil_type: Option<String>,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farmer(crops: Option<&str>, location: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "ramesh".to_string(),
            email: "ramesh@example.com".to_string(),
            password_hash: "hashed".to_string(),
            farm_location: location.map(str::to_string),
            farm_size: None,
            crops: crops.map(str::to_string),
            phone: None,
            language: "en".to_string(),
            soil_type: None,
            weather_alerts: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_crop_list_is_normalized() {
        let user = farmer(Some(" Tomato, wheat ,,RICE"), None);
        assert_eq!(user.crop_list(), vec!["tomato", "wheat", "rice"]);
    }

    #[test]
    fn test_crop_list_empty_without_crops() {
        assert!(farmer(None, None).crop_list().is_empty());
    }

    #[test]
    fn test_blank_location_is_none() {
        assert_eq!(farmer(None, Some("   ")).location(), None);
        assert_eq!(farmer(None, Some("Nashik")).location(), Some("Nashik"));
    }
}
