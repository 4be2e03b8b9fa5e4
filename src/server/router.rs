use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::{
    Router,
    routing::{get, post, put},
};

use super::middleware::{log_request, security_headers};
use super::response::{ApiError, StatusResponse};
use super::{pages, syncs, users};
use crate::auth::{Credentials, PasswordHasher};
use crate::error::Result;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher) -> Result<Self> {
        let credentials = Credentials::new(store.clone(), hasher)?;
        Ok(Self {
            store,
            credentials: Arc::new(credentials),
        })
    }
}

/// Liveness only; never touches the store.
async fn health() -> impl IntoResponse {
    StatusResponse::new("ok")
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/health", get(health))
        .route("/users/create", post(users::create_user))
        .route("/users/auth", get(users::auth_user))
        .route("/syncs/progress", put(syncs::update_progress))
        .route("/syncs/progress/{document}", get(syncs::get_progress))
        .fallback(route_not_found)
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
