use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use drivenest_core::ThumbnailView;

/// Root welcome message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    /// Greeting shown to API explorers.
    #[schema(example = "Welcome to DriveNest API")]
    pub message: String,
}

/// Form body for the text reversal endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReverseRequest {
    /// Text to reverse.
    #[schema(example = "a-bC-dEf=ghIj")]
    pub text: String,
}

/// Result of reversing a text.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReverseResponse {
    /// The reversed text.
    #[schema(example = "j-Ih-gfE=dCba")]
    pub reversed: String,
}

/// Multipart form for uploads (documentation only; the handler consumes
/// the stream directly).
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// The image file to store.
    #[schema(value_type = String, format = Binary)]
    pub file: String,
}

/// Response after a successful upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Public URL the stored blob is served from.
    #[schema(example = "http://localhost:8000/media/550e8400-e29b-41d4-a716-446655440000.jpg")]
    pub url: String,
    /// Assigned record id.
    #[schema(example = 1)]
    pub id: i64,
    /// The client's original filename.
    #[schema(example = "photo.jpg")]
    pub filename: String,
}

/// Listing of every stored thumbnail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThumbnailListResponse {
    /// All stored items.
    pub images: Vec<ThumbnailView>,
}

/// Response after a successful deletion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Deletion status.
    #[schema(example = "deleted")]
    pub message: String,
}

/// Generic error response returned on failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    #[schema(example = "no images found")]
    pub error: String,
}
