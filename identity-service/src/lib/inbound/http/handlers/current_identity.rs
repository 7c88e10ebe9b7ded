use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::identity::models::Identity;

pub async fn current_identity(
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    identity
        .principal()
        .map(|principal| ApiSuccess::new(StatusCode::OK, principal.into()))
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
