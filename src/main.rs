//! DocuHub Backend
//!
//! REST backend for the DocuHub document dashboard: Google sign-in, Drive and
//! Docs passthrough, an in-memory document catalog and persisted search preferences.

mod api;
mod auth;
mod catalog;
mod config;
mod db;
mod errors;
mod google;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog::DocumentCatalog;
use config::Config;
use db::PreferenceStore;
use google::GoogleClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<DocumentCatalog>,
    pub google: Arc<GoogleClient>,
    pub prefs: Arc<PreferenceStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DocuHub Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if !config.has_google_credentials() {
        tracing::warn!(
            "Google OAuth credentials not configured (GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET). \
             Sign-in will fail and the catalog will serve mock data."
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let prefs = Arc::new(PreferenceStore::new(pool));

    let google = Arc::new(GoogleClient::new(&config)?);

    let state = AppState {
        catalog: Arc::new(DocumentCatalog::new()),
        google,
        prefs,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Google passthrough, session cookie required
    let document_routes = Router::new()
        .route("/documents", get(api::list_documents))
        .route("/documents/{id}", get(api::get_document))
        .layer(middleware::from_fn(auth::session_auth_layer));

    let catalog_routes = Router::new()
        .route("/refresh", post(api::refresh_catalog))
        .route("/documents", get(api::list_catalog_documents))
        .route("/documents/{id}", get(api::get_catalog_document))
        .route(
            "/documents/{id}/tags/{tag_id}",
            put(api::add_document_tag).delete(api::remove_document_tag),
        )
        .route(
            "/documents/{id}/category",
            put(api::update_document_category),
        )
        .route("/categories", get(api::list_categories))
        .route("/categories/{id}/documents", get(api::category_documents))
        .route("/tags", get(api::list_tags))
        .route("/tags/{id}/documents", get(api::tag_documents))
        .route(
            "/priorities/{priority}/documents",
            get(api::priority_documents),
        )
        .route("/suggestions", get(api::search_suggestions));

    let search_routes = Router::new()
        .route("/preferences", get(api::get_search_preferences))
        .route(
            "/recent",
            post(api::add_recent_search).delete(api::clear_recent_searches),
        )
        .route("/saved", post(api::add_saved_search))
        .route("/saved/{id}", delete(api::remove_saved_search))
        .route("/filters", put(api::update_search_filters));

    let api_routes = Router::new()
        .route("/auth/google", get(api::google_oauth))
        .route("/search", get(api::search_documents))
        .merge(document_routes)
        .nest("/catalog", catalog_routes)
        .nest("/search", search_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
