pub mod openapi;
pub mod root;
pub mod schemas;
pub mod text;
pub mod thumbnails;
pub mod ws;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use drivenest_blob::BlobStore;
use drivenest_store::ThumbnailStore;

use crate::notify::SubscriberRegistry;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thumbnail metadata store.
    pub store: Arc<ThumbnailStore>,
    /// Filesystem blob store.
    pub blobs: Arc<BlobStore>,
    /// Live real-time subscriber set.
    pub registry: Arc<SubscriberRegistry>,
    /// Directory served under the media URL prefix.
    pub media_root: PathBuf,
    /// Origins allowed to make cross-origin requests.
    pub allowed_origins: Vec<String>,
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
}

/// Build the Axum router with all routes, middleware, static media
/// serving, and Swagger UI.
pub fn router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Credentials are allowed, so origins, methods, and headers must be
    // explicit or mirrored rather than wildcards.
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(root::read_root))
        .route("/reverse/", post(text::reverse))
        .route("/upload/", post(thumbnails::upload))
        .route("/thumbnails/", get(thumbnails::list))
        .route("/thumbnails/{id}", delete(thumbnails::remove))
        .route("/ws", get(ws::ws))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .nest_service("/media", ServeDir::new(&state.media_root))
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
