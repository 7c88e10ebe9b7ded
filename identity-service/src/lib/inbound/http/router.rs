use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_identity::current_identity;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::middleware::resolve_identity;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub cookie_name: String,
}

pub fn create_router(account_service: Arc<dyn AccountServicePort>, cookie_name: String) -> Router {
    let state = AppState {
        account_service,
        cookie_name,
    };

    let public_routes = Router::new()
        .route("/api/users", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout));

    let identity_routes = Router::new()
        .route("/api/auth/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ));

    // Headers are left out of the span: they carry session tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(identity_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
