use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .account_service
        .register(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::CREATED, principal.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}
