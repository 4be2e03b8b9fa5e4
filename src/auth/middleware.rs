use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::Error;
use crate::server::response::ApiError;
use crate::server::{AppState, run_blocking};
use crate::types::AccountId;

/// Header carrying the username on every protected request.
pub const AUTH_USER_HEADER: &str = "x-auth-user";
/// Header carrying the password on every protected request.
pub const AUTH_KEY_HEADER: &str = "x-auth-key";

/// Extractor that re-authenticates the caller from credential headers.
/// There is no session: every protected request proves its identity.
pub struct RequireAccount(pub AccountId);

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<Arc<AppState>> for RequireAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let username = header(parts, AUTH_USER_HEADER);
        let password = header(parts, AUTH_KEY_HEADER);

        tracing::debug!(username = username.as_deref(), "Authentication attempt");

        if let Some(username) = &username {
            tracing::Span::current().record("username", tracing::field::display(username));
        }

        let (Some(username), Some(password)) = (username, password) else {
            tracing::warn!("Authentication failed: missing credentials");
            return Err(ApiError::from(Error::Unauthenticated));
        };

        let credentials = state.credentials.clone();
        let user = username.clone();
        let result = run_blocking(move || credentials.verify(&user, &password)).await;

        match result {
            Ok(account_id) => {
                tracing::Span::current().record("account_id", tracing::field::display(account_id));
                tracing::info!(account_id = %account_id, username = %username, "Authentication successful");
                Ok(RequireAccount(account_id))
            }
            Err(Error::Unauthenticated) => {
                tracing::warn!(username = %username, "Authentication failed: invalid credentials");
                Err(ApiError::from(Error::Unauthenticated))
            }
            Err(e) => {
                tracing::error!(username = %username, error = %e, "Authentication failed: internal error");
                Err(ApiError::from(e))
            }
        }
    }
}
