//! Plugin catalog endpoint.

use axum::{extract::State, http::StatusCode, Json};
use pluginhub_catalog::{CatalogError, PluginList};
use std::sync::Arc;

use super::AppState;

/// Status reported for a failed catalog build.
fn error_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::Database(_) | CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CatalogError::Http(_)
        | CatalogError::Status { .. }
        | CatalogError::MalformedResponse(_)
        | CatalogError::Serialization(_) => StatusCode::BAD_GATEWAY,
    }
}

/// GET /api/plugins/catalog: registry plugins with local install state.
pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PluginList>, (StatusCode, Json<serde_json::Value>)> {
    let list = state.catalog.get_plugin_list().await.map_err(|e| {
        tracing::error!("failed to build plugin catalog: {e}");
        (
            error_status(&e),
            Json(serde_json::json!({ "error": format!("{e}") })),
        )
    })?;

    if !list.failures.is_empty() {
        tracing::warn!(
            failures = list.failures.len(),
            "plugin catalog built with skipped packages"
        );
    }

    Ok(Json(list))
}
