use serde::{Deserialize, Serialize};

/// A persisted thumbnail row: server-assigned id plus the generated
/// storage filename. The table also declares a reserved binary column
/// that is never populated, so it has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailRecord {
    /// Server-assigned identifier. Monotonically increasing; never reused
    /// after deletion.
    pub id: i64,

    /// Generated storage filename (`{uuid}{ext}`), unique across all rows.
    pub filename: String,
}

/// A thumbnail as presented to API and real-time clients: the record
/// combined with a publicly servable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ThumbnailView {
    /// Record identifier.
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,

    /// Filename shown to the client. Listings carry the stored name;
    /// upload notifications carry the client's original name.
    #[cfg_attr(
        feature = "openapi",
        schema(example = "550e8400-e29b-41d4-a716-446655440000.jpg")
    )]
    pub filename: String,

    /// Public URL the blob is served from.
    #[cfg_attr(
        feature = "openapi",
        schema(example = "http://localhost:8000/media/550e8400-e29b-41d4-a716-446655440000.jpg")
    )]
    pub url: String,
}
