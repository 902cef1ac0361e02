//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health: liveness probe.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "albarapp",
    })
}

#[derive(Serialize)]
pub struct RootResponse {
    pub ok: bool,
    pub service: &'static str,
}

/// GET /: liveness in the shape older clients expect.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        ok: true,
        service: "albarapp",
    })
}
