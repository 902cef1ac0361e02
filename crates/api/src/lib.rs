//! HTTP API server for delivery notes.
//!
//! Provides REST endpoints to create, list, fetch and send delivery notes,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::DeliveryNoteService;
use metrics_exporter_prometheus::PrometheusHandle;
use note_store::NoteStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::delivery_notes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: NoteStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::check))
        .route(
            "/delivery-notes",
            post(routes::delivery_notes::create::<S>).get(routes::delivery_notes::list::<S>),
        )
        .route("/delivery-notes/{id}", get(routes::delivery_notes::get::<S>))
        .route(
            "/delivery-notes/{id}/send",
            post(routes::delivery_notes::send::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over the given store handle.
pub fn create_state<S: NoteStore + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        delivery_notes: DeliveryNoteService::new(store),
    })
}
