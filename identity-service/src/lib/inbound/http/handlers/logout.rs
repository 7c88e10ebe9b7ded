use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::session_token;
use crate::inbound::http::router::AppState;

/// Ends the caller's session, if any, and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<([(header::HeaderName, String); 1], ApiSuccess<LogoutResponseData>), ApiError> {
    if let Some(token) = session_token(&headers, &state.cookie_name) {
        state.account_service.logout(token).await?;
    }

    let cookie = format!(
        "{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0",
        state.cookie_name
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::new(StatusCode::OK, LogoutResponseData { logged_out: true }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub logged_out: bool,
}
