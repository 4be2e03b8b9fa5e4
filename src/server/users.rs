use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireAccount;
use crate::server::dto::CreateUserRequest;
use crate::server::response::{ApiError, StatusResponse, StoreResultExt};
use crate::server::validation::json_body;
use crate::server::{AppState, run_blocking};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let (username, password) = json_body(payload)
        .and_then(CreateUserRequest::into_parts)
        .map_err(|e| e.logged("register"))?;

    let credentials = state.credentials.clone();
    run_blocking(move || credentials.register(&username, &password))
        .await
        .api_err("register")?;

    Ok((StatusCode::CREATED, StatusResponse::new("success")))
}

pub async fn auth_user(_auth: RequireAccount) -> impl IntoResponse {
    StatusResponse::new("authenticated")
}
