use axum::Form;
use axum::Json;
use axum::response::IntoResponse;

use drivenest_core::reverse_alphanumeric;

use super::schemas::{ReverseRequest, ReverseResponse};

/// `POST /reverse/` -- reverse the alphanumeric characters of a form
/// field, leaving punctuation in place.
#[utoipa::path(
    post,
    path = "/reverse/",
    tag = "Text",
    summary = "Reverse text",
    description = "Reverses the alphanumeric characters of the submitted text while keeping every other character at its original position. Input is trimmed first.",
    request_body(
        content = ReverseRequest,
        content_type = "application/x-www-form-urlencoded",
        description = "Form with a `text` field"
    ),
    responses(
        (status = 200, description = "Reversed text", body = ReverseResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn reverse(Form(request): Form<ReverseRequest>) -> impl IntoResponse {
    let reversed = reverse_alphanumeric(request.text.trim());
    Json(ReverseResponse { reversed })
}
