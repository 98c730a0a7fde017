//! Registration, login and session revocation.

mod common;

use tokio_test::{assert_err, assert_ok};

use common::{TestApp, TEST_PASSWORD};
use kisan_hub::domain::NewUser;
use kisan_hub::errors::AppError;
use kisan_hub::services::ServiceContainer;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        confirm_password: TEST_PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_register_hashes_password() {
    let app = TestApp::new().await;
    let user = app.register("ravi").await;

    assert_eq!(user.username, "ravi");
    assert_ne!(user.password_hash, TEST_PASSWORD);
    assert!(user.password_hash.starts_with("$argon2"));
    assert_eq!(user.language, "en");
    assert!(!user.weather_alerts);
}

#[tokio::test]
async fn test_duplicate_username_and_email_conflict() {
    let app = TestApp::new().await;
    app.register("ravi").await;
    let auth = app.services.auth();

    let by_name = auth.register(new_user("ravi", "other@example.com")).await;
    assert!(matches!(by_name, Err(AppError::Conflict(ref entity)) if entity == "Username"));

    let by_email = auth.register(new_user("meena", "ravi@example.com")).await;
    assert!(matches!(by_email, Err(AppError::Conflict(ref entity)) if entity == "Email"));
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new().await;
    let auth = app.services.auth();

    let mut mismatched = new_user("ravi", "ravi@example.com");
    mismatched.confirm_password = "something-else".to_string();
    assert!(matches!(
        auth.register(mismatched).await,
        Err(AppError::Validation(ref msg)) if msg == "Passwords do not match!"
    ));

    let blank = new_user("   ", "ravi@example.com");
    assert!(matches!(
        auth.register(blank).await,
        Err(AppError::Validation(ref msg)) if msg == "All fields are required!"
    ));
}

#[tokio::test]
async fn test_login_checks_password() {
    let app = TestApp::new().await;
    let user = app.register("ravi").await;
    let auth = app.services.auth();

    let wrong = auth.login("ravi", "not-the-password").await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

    let unknown = auth.login("nobody", TEST_PASSWORD).await;
    assert!(matches!(unknown, Err(AppError::InvalidCredentials)));

    let session = assert_ok!(auth.login("ravi", TEST_PASSWORD).await);
    assert_eq!(session.user.id, user.id);

    let claims = assert_ok!(auth.verify_session(&session.token));
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "ravi");
}

#[tokio::test]
async fn test_logout_revokes_only_that_session() {
    let app = TestApp::new().await;
    app.register("ravi").await;
    let auth = app.services.auth();

    let phone = assert_ok!(auth.login("ravi", TEST_PASSWORD).await);
    let laptop = assert_ok!(auth.login("ravi", TEST_PASSWORD).await);

    auth.logout(&phone.token);

    assert_err!(auth.verify_session(&phone.token));
    assert_ok!(auth.verify_session(&laptop.token));

    // Unknown tokens are ignored
    auth.logout("garbage");
}
