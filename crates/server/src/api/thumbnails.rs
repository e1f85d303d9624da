use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{info, warn};

use drivenest_core::{PushEvent, ThumbnailView};

use crate::error::ApiError;

use super::AppState;
use super::schemas::{
    DeleteResponse, ErrorResponse, ThumbnailListResponse, UploadForm, UploadResponse,
};

/// `POST /upload/` -- store an uploaded image.
///
/// Writes the blob under a generated name, records it in the metadata
/// store, and notifies every connected real-time client. The response
/// carries the client's original filename; listings show the stored name.
#[utoipa::path(
    post,
    path = "/upload/",
    tag = "Thumbnails",
    summary = "Upload image",
    description = "Stores the uploaded file under a generated unique name, records its metadata, and broadcasts an upload notification to connected WebSocket clients.",
    request_body(
        content = UploadForm,
        content_type = "multipart/form-data",
        description = "Multipart form with a `file` field"
    ),
    responses(
        (status = 201, description = "Upload stored", body = UploadResponse),
        (status = 400, description = "Missing or malformed file field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let original = field.file_name().unwrap_or("upload").to_owned();
            let data = field.bytes().await?;
            file = Some((original, data));
            break;
        }
    }
    let (original, data) =
        file.ok_or_else(|| ApiError::BadRequest("missing multipart field: file".into()))?;

    let stored = state.blobs.write(&original, &data).await?;

    let record = match state.store.insert(&stored).await {
        Ok(record) => record,
        Err(e) => {
            // Compensate for the write so a failed insert leaves no
            // orphaned blob behind.
            if let Err(remove_err) = state.blobs.remove(&stored).await {
                warn!(stored = %stored, error = %remove_err, "orphaned blob left after insert failure");
            }
            return Err(e.into());
        }
    };

    let url = state.blobs.url_for(&record.filename);
    let delivered = state
        .registry
        .broadcast(&PushEvent::thumbnail(record.id, original.clone(), url.clone()))
        .await;

    info!(
        id = record.id,
        stored = %record.filename,
        original = %original,
        notified = delivered,
        "thumbnail uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url,
            id: record.id,
            filename: original,
        }),
    ))
}

/// `GET /thumbnails/` -- list every stored thumbnail.
///
/// An empty store answers 404 rather than an empty listing.
#[utoipa::path(
    get,
    path = "/thumbnails/",
    tag = "Thumbnails",
    summary = "List thumbnails",
    description = "Returns every stored thumbnail with its public URL. Responds 404 when nothing has been uploaded.",
    responses(
        (status = 200, description = "All stored thumbnails", body = ThumbnailListResponse),
        (status = 404, description = "No images stored", body = ErrorResponse)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let records = state.store.list().await?;
    if records.is_empty() {
        return Err(ApiError::NotFound("no images found".into()));
    }

    let images = records
        .into_iter()
        .map(|record| {
            let url = state.blobs.url_for(&record.filename);
            ThumbnailView {
                id: record.id,
                filename: record.filename,
                url,
            }
        })
        .collect();

    Ok(Json(ThumbnailListResponse { images }))
}

/// `DELETE /thumbnails/{id}` -- delete one thumbnail and its blob.
#[utoipa::path(
    delete,
    path = "/thumbnails/{id}",
    tag = "Thumbnails",
    summary = "Delete thumbnail",
    description = "Removes the stored blob (if still present) and deletes the metadata record.",
    params(
        ("id" = i64, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Thumbnail deleted", body = DeleteResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse)
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("thumbnail not found: {id}")))?;

    state.blobs.remove(&record.filename).await?;
    state.store.delete(id).await?;

    info!(id, stored = %record.filename, "thumbnail deleted");

    Ok(Json(DeleteResponse {
        message: "deleted".into(),
    }))
}
