//! HTTP service exposing an in-memory todo collection.
//!
//! # Overview
//! `TodoStore` owns every record for the lifetime of the process. Handlers
//! receive a clone of the store handle through router state, validate the
//! payload, call the store, and serialize the result.
//!
//! # Design
//! - Validation runs before the store and reports all violations at once
//!   (400). The store only ever fails with `NotFound` (404).
//! - `app()` builds a router over a fresh store with default settings, which
//!   is what tests and the client integration suite start from.
//! - `router()` takes an explicit store and config; the binary uses it.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
pub mod validation;

use std::future::Future;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use config::ServerConfig;
pub use error::{AppError, StoreError, ValidationError};
pub use model::{NewTodo, Priority, Todo, TodoPatch};
pub use store::{Clock, SystemClock, TodoStore};

/// Router over a fresh, empty store with default settings.
pub fn app() -> Router {
    router(TodoStore::new(), &ServerConfig::default())
}

pub fn router(store: TodoStore, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::todo_routes())
        .with_state(store)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Serve `app()` on `listener` until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `router` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolve when `signal` fires. If listening for it fails, log and never
/// resolve, so a broken signal handler cannot stop the server.
pub async fn signal_or_pending<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!(error = %err, "could not listen for shutdown signal, running until killed");
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allow_origin)
}
