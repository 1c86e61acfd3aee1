use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::login::login_organization;
use super::handlers::login::login_user;
use super::handlers::register::register_organization;
use super::handlers::register::register_user;
use super::handlers::verify::verify_organization;
use super::handlers::verify::verify_user;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
}

pub fn create_router(account_service: Arc<dyn AccountServicePort>) -> Router {
    let state = AppState { account_service };

    // All auth routes are public; verification takes the token in the body,
    // so there is no bearer-header middleware here.
    let auth_routes = Router::new()
        .route("/api/auth/login", post(login_user))
        .route("/api/auth/login-organization", post(login_organization))
        .route("/api/auth/register", post(register_user))
        .route("/api/auth/register-organization", post(register_organization))
        .route("/api/auth/verify", post(verify_user))
        .route("/api/auth/verify-organization", post(verify_organization));

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
        .merge(auth_routes)
        .route("/health", get(health))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
