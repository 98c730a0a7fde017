//! One-shot messages carried across a redirect.
//!
//! Messages are stored in a short-lived cookie as base64 (URL-safe, no
//! padding) encoded JSON and removed by the first page that renders them.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::FLASH_COOKIE;

/// Message severity, rendered as the alert style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

fn encode(messages: &[FlashMessage]) -> Option<String> {
    serde_json::to_vec(messages)
        .ok()
        .map(|json| URL_SAFE_NO_PAD.encode(json))
}

/// Undecodable cookies yield no messages.
fn decode(value: &str) -> Vec<FlashMessage> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|json| serde_json::from_slice(&json).ok())
        .unwrap_or_default()
}

fn pending(jar: &CookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Queue a message for the next rendered page.
pub fn push(jar: CookieJar, level: FlashLevel, text: impl Into<String>) -> CookieJar {
    let mut messages = pending(&jar);
    messages.push(FlashMessage {
        level,
        text: text.into(),
    });

    match encode(&messages) {
        Some(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        None => jar,
    }
}

/// Remove and return every queued message.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let messages = pending(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, messages);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_take() {
        let jar = push(CookieJar::new(), FlashLevel::Success, "Cart updated!");
        let jar = push(jar, FlashLevel::Warning, "Your cart is empty!");

        let (jar, messages) = take(jar);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, FlashLevel::Success);
        assert_eq!(messages[1].text, "Your cart is empty!");

        let (_, again) = take(jar);
        assert!(again.is_empty());
    }

    #[test]
    fn test_garbage_cookie_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "%%%not-base64"));
        let (_, messages) = take(jar);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_level_names() {
        assert_eq!(FlashLevel::Danger.as_str(), "danger");
        assert_eq!(
            serde_json::to_string(&FlashLevel::Info).unwrap(),
            "\"info\""
        );
    }
}
