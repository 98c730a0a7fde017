//! Profile handlers.

use axum::{extract::State, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use super::{flash_redirect, recover, render, Flashed, Page};
use crate::api::extractors::ValidatedForm;
use crate::api::flash::{self, FlashLevel};
use crate::api::middleware::CurrentUser;
use crate::api::views::{Layout, ProfilePage, SelectOption};
use crate::api::AppState;
use crate::domain::reference::SOIL_TYPES;
use crate::domain::ProfileUpdate;
use crate::errors::{AppError, AppResult};

const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("hi", "Hindi")];

/// Profile form
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(max = 200, message = "Farm location must be at most 200 characters"))]
    pub farm_location: Option<String>,
    #[serde(default)]
    pub farm_size: String,
    #[validate(length(max = 500, message = "Crops must be at most 500 characters"))]
    pub crops: Option<String>,
    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone: Option<String>,
    pub soil_type: Option<String>,
    #[serde(default)]
    pub language: String,
}

impl ProfileForm {
    fn into_update(self) -> Result<ProfileUpdate, AppError> {
        let farm_size = match self.farm_size.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .ok()
                    .filter(|size| size.is_finite() && *size >= 0.0)
                    .ok_or_else(|| AppError::validation("Farm size must be a positive number"))?,
            ),
        };

        Ok(ProfileUpdate {
            farm_location: self.farm_location,
            farm_size,
            crops: self.crops,
            phone: self.phone,
            soil_type: self.soil_type,
            language: self.language,
        })
    }
}

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(profile).post(update_profile))
}

pub async fn profile(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Page> {
    let user = state.user_service.get_user(current.id).await?;
    let soil = user.soil_type.clone().unwrap_or_default();

    let mut soil_types = vec![SelectOption::new("", "Select soil type", &soil)];
    soil_types.extend(SelectOption::list(SOIL_TYPES.iter().copied(), &soil));

    let languages = LANGUAGES
        .iter()
        .map(|(code, label)| SelectOption::new(code, label, &user.language))
        .collect();

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        ProfilePage {
            layout: Layout::new(Some(&current), flashes),
            member_since: user.created_at.format("%d %b %Y").to_string(),
            farm_size: user.farm_size.map(|s| s.to_string()).unwrap_or_default(),
            farm_location: user.farm_location.unwrap_or_default(),
            crops: user.crops.unwrap_or_default(),
            phone: user.phone.unwrap_or_default(),
            email: user.email,
            soil_types,
            languages,
            weather_alerts: user.weather_alerts,
        },
    )
}

pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    form: Result<ValidatedForm<ProfileForm>, AppError>,
) -> AppResult<Flashed> {
    let update = match form.and_then(|ValidatedForm(form)| form.into_update()) {
        Ok(update) => update,
        Err(e) => return recover(jar, e, "/profile"),
    };

    match state.user_service.update_profile(current.id, update).await {
        Ok(_) => Ok(flash_redirect(
            jar,
            FlashLevel::Success,
            "Profile updated successfully!",
            "/profile",
        )),
        Err(e) => recover(jar, e, "/profile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(farm_size: &str) -> ProfileForm {
        ProfileForm {
            farm_location: Some("Nashik".to_string()),
            farm_size: farm_size.to_string(),
            crops: None,
            phone: None,
            soil_type: None,
            language: "hi".to_string(),
        }
    }

    #[test]
    fn test_blank_farm_size_is_unset() {
        let update = form("  ").into_update().unwrap();
        assert_eq!(update.farm_size, None);
        assert_eq!(update.language, "hi");
    }

    #[test]
    fn test_farm_size_must_be_numeric() {
        assert_eq!(form("2.5").into_update().unwrap().farm_size, Some(2.5));
        assert!(matches!(
            form("two acres").into_update(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_farm_size_rejects_non_finite_and_negative() {
        for raw in ["NaN", "inf", "-inf", "-0.5"] {
            assert!(
                matches!(form(raw).into_update(), Err(AppError::Validation(_))),
                "{} accepted",
                raw
            );
        }
        assert_eq!(form("0").into_update().unwrap().farm_size, Some(0.0));
    }
}
