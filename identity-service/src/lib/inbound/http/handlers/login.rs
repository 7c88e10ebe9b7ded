use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<([(header::HeaderName, String); 1], ApiSuccess<LoginResponseData>), ApiError> {
    let success = state
        .account_service
        .login(&body.username, &body.password)
        .await?;

    let token = success.token.as_str().to_string();
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax",
        state.cookie_name, token
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                user: (&success.principal).into(),
                token,
            },
        ),
    ))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
}
