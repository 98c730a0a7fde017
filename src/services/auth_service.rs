//! Authentication service - Registration, login and session tokens.
//!
//! A login issues an HS256 token naming a server-side session id. Tokens are
//! only honoured while that session is registered in the [`SessionStore`],
//! so logout takes effect immediately.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::SqlErr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::password::DUMMY_HASH;
use crate::domain::{NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionStore, UnitOfWork};

/// Session token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// A freshly issued login session.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub user: User,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account
    async fn register(&self, new_user: NewUser) -> AppResult<User>;

    /// Check credentials and open a session
    async fn login(&self, username: &str, password: &str) -> AppResult<SessionToken>;

    /// Validate a session token, returning its claims while the session is live
    fn verify_session(&self, token: &str) -> AppResult<Claims>;

    /// Revoke the session named by a token. Invalid tokens are ignored.
    fn logout(&self, token: &str);
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    sessions: SessionStore,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config, sessions: SessionStore) -> Self {
        Self {
            uow,
            config,
            sessions,
        }
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.session_ttl_hours);
        let sid = self.sessions.create(user.id, expires_at);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            sid,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret_key_bytes()),
        )?;
        Ok(token)
    }

    fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_key_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, new_user: NewUser) -> AppResult<User> {
        let username = new_user.username.trim().to_string();
        let email = new_user.email.trim().to_string();

        if username.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(AppError::validation("All fields are required!"));
        }
        if new_user.password != new_user.confirm_password {
            return Err(AppError::validation("Passwords do not match!"));
        }

        let users = self.uow.users();
        if users.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }
        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&new_user.password)?.into_string();

        let user = users
            .create(username, email, password_hash)
            .await
            .map_err(|e| match e {
                AppError::Database(db)
                    if matches!(db.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    AppError::conflict("Account")
                }
                other => other,
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<SessionToken> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "Please enter both username and password",
            ));
        }

        let user = self.uow.users().find_by_username(username).await?;

        // Verify against a dummy hash for unknown users so both paths cost the same
        let stored = Password::from_hash(
            user.as_ref()
                .map_or(DUMMY_HASH, |u| u.password_hash.as_str())
                .to_string(),
        );
        let password_valid = stored.verify(password);

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                tracing::debug!("Rejected login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(SessionToken { token, user })
    }

    fn verify_session(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode(token)?;

        match self.sessions.get(claims.sid) {
            Some(record) if record.user_id == claims.sub => Ok(claims),
            _ => Err(AppError::Unauthorized),
        }
    }

    fn logout(&self, token: &str) {
        if let Ok(claims) = self.decode(token) {
            self.sessions.remove(claims.sid);
            tracing::info!(user_id = %claims.sub, "User logged out");
        }
    }
}
