use drivenest_core::ThumbnailView;

use super::schemas::{
    DeleteResponse, ErrorResponse, ReverseRequest, ReverseResponse, ThumbnailListResponse,
    UploadForm, UploadResponse, WelcomeResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "DriveNest API",
        version = "1.0.0",
        description = "Cloud Storage API. Upload images, list and delete stored items, and receive upload notifications over WebSocket at /ws.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Root", description = "Service entry point"),
        (name = "Text", description = "Text utilities"),
        (name = "Thumbnails", description = "Image upload, listing, and deletion")
    ),
    paths(
        super::root::read_root,
        super::text::reverse,
        super::thumbnails::upload,
        super::thumbnails::list,
        super::thumbnails::remove,
    ),
    components(schemas(
        WelcomeResponse,
        ReverseRequest, ReverseResponse,
        UploadForm, UploadResponse,
        ThumbnailView, ThumbnailListResponse,
        DeleteResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;
