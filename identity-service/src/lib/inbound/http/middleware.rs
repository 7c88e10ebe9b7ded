use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the caller's identity and stores it in request
/// extensions. Anonymous callers pass through; handlers decide what they may
/// do.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(req.headers(), &state.cookie_name).map(str::to_owned);

    let identity = state
        .account_service
        .resolve_identity(token.as_deref())
        .await?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Session token sent with a request: `Authorization: Bearer` first, then the
/// session cookie.
pub fn session_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| parse_cookie(value, cookie_name))
}

/// Value of the first non-empty cookie `name` in a `Cookie` header.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .find(|value| !value.is_empty())
}
