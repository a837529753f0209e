use axum::{http::HeaderValue, Router};
use pluginhub_catalog::{CatalogConfig, PluginListService};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod api;

use api::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection
    let db_config = pluginhub_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = pluginhub_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // The shop owns its schema; only seed it when asked to
    if std::env::var("RUN_MIGRATIONS")
        .unwrap_or_default()
        .eq_ignore_ascii_case("true")
    {
        tracing::info!("running database migrations...");
        pluginhub_migration::Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");
        tracing::info!("migrations complete");
    }

    let catalog_config = CatalogConfig::from_env();
    tracing::info!(
        registry = %catalog_config.registry_base_url,
        categories = ?catalog_config.categories,
        cache_ttl_secs = catalog_config.cache_ttl_secs,
        "catalog configured"
    );
    if catalog_config.include_installed_inactive {
        tracing::info!("inactive installed plugins are included in the local snapshot");
    }
    let catalog = PluginListService::from_config(db, catalog_config)
        .expect("invalid catalog configuration");

    let state = Arc::new(AppState { catalog });

    // CORS: restrict to configured origins
    let cors = {
        let allowed_origins_str = std::env::var("CORS_ORIGINS").unwrap_or_default();
        let cors = CorsLayer::new()
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers(tower_http::cors::Any);
        if allowed_origins_str.is_empty() {
            tracing::warn!("CORS_ORIGINS not set, cross-origin requests are rejected");
            cors.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            let origins: Vec<HeaderValue> = allowed_origins_str
                .split(',')
                .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
                .collect();
            tracing::info!("CORS allowed origins: {:?}", origins);
            cors.allow_origin(origins)
        }
    };

    let app = Router::new()
        .nest("/api", api::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));

    let addr: SocketAddr = std::env::var("PLUGINHUB_LISTEN_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));
    tracing::info!(%addr, "server started");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind listen address"),
        app,
    )
    .await
    .expect("server error");
}
