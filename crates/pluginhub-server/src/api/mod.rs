pub mod catalog;

use axum::{routing::get, Json, Router};
use pluginhub_catalog::PluginListService;
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState {
    pub catalog: PluginListService,
}

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

/// Routes mounted under `/api`.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plugins/catalog", get(catalog::get_catalog))
        .with_state(state)
}

async fn health() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
