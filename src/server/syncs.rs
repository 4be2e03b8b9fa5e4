use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::auth::RequireAccount;
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::UpdateProgressRequest;
use crate::server::response::{ApiError, StatusResponse, StoreResultExt};
use crate::server::validation::json_body;
use crate::sync::{latest_progress, record_progress};

pub async fn update_progress(
    RequireAccount(account_id): RequireAccount,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let update = json_body(payload)
        .and_then(UpdateProgressRequest::into_update)
        .map_err(|e| e.logged("update_progress"))?;

    record_progress(state.store.as_ref(), account_id, update).api_err("update_progress")?;

    Ok(StatusResponse::new("success"))
}

pub async fn get_progress(
    RequireAccount(account_id): RequireAccount,
    State(state): State<Arc<AppState>>,
    Path(document): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = match latest_progress(state.store.as_ref(), account_id, &document) {
        Err(Error::NotFound) => {
            return Err(ApiError::not_found("Progress not found").logged("get_progress"));
        }
        result => result.api_err("get_progress")?,
    };

    Ok(Json(record))
}
