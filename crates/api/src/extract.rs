//! Request extractors and lenient input fields.

use axum::extract::{FromRequest, rejection::JsonRejection};
use serde::{Deserialize, Deserializer};
use tallykit_shared::AppError;

use crate::error::ApiError;

/// `Json` whose rejections render as `{ "error", "message" }` like every
/// other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Reads a field sent either as text (`"8.25"`) or as a JSON number
/// (`8.25`), yielding its text for the engine's parsers.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}
