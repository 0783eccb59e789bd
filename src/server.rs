//! Plan proxy endpoint.
//!
//! Exposes one POST route that accepts the raw profile form, asks the
//! configured provider for a plan and returns it as JSON. Provider failures
//! come back as `500 {"error": ...}`; clients do their own fallback.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::error::{CoachError, Result};
use crate::models::ProfileForm;
use crate::provider::PlanProvider;

type SharedProvider = Arc<dyn PlanProvider>;

/// CORS for browser callers: any origin, the headers a hosted client sends.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            HeaderName::from_static("content-type"),
        ])
        .allow_methods([Method::POST, Method::OPTIONS])
}

pub fn router(provider: SharedProvider, route: &str) -> Router {
    Router::new()
        .route(route, post(generate_plan))
        .layer(cors_layer())
        .with_state(provider)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn generate_plan(
    State(provider): State<SharedProvider>,
    payload: std::result::Result<Json<ProfileForm>, JsonRejection>,
) -> Response {
    let Json(form) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Malformed plan request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let profile = match form.into_profile() {
        Ok(profile) => profile,
        Err(e) => {
            warn!(error = %e, "Rejected plan request");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match provider.generate(&profile).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => {
            error!(provider = provider.name(), error = %e, "Plan generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Plan endpoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Plan endpoint stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Parse a `host:port` bind address.
pub fn parse_bind(bind: &str) -> Result<SocketAddr> {
    bind.parse()
        .map_err(|e| CoachError::Config(format!("Invalid bind address '{}': {}", bind, e)))
}
