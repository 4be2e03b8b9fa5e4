use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::server::response::ApiError;

/// Unwraps a JSON body, turning axum's plaintext rejection into the API's
/// JSON error envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "Rejected request body");
            Err(ApiError::bad_request("Invalid JSON body"))
        }
    }
}

/// Collects required request fields, reporting every missing one at once.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a string field; absent and empty both count as missing.
    pub fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    pub fn number(&mut self, name: &'static str, value: Option<f64>) -> f64 {
        value.unwrap_or_else(|| {
            self.missing.push(name);
            0.0
        })
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::bad_request(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}
