//! Validated form extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// URL-encoded form body that has passed its `validator` rules.
///
/// Handlers that re-show the form take `Result<ValidatedForm<T>, AppError>`
/// and turn the error into a flash message.
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct CommentForm {
///     #[validate(length(min = 1, message = "Comment cannot be empty!"))]
///     content: String,
/// }
///
/// async fn add_comment(ValidatedForm(form): ValidatedForm<CommentForm>) {
///     // form is already validated
/// }
/// ```
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedForm(value))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    // Field order is not stable; duplicates come from shared messages
    messages.sort();
    messages.dedup();
    messages.join(", ")
}
