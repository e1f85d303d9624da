use axum::Json;
use axum::response::IntoResponse;

use super::schemas::WelcomeResponse;

/// `GET /` -- welcome message.
#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    summary = "Welcome",
    description = "Returns the service welcome message.",
    responses(
        (status = 200, description = "Service greeting", body = WelcomeResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn read_root() -> impl IntoResponse {
    Json(WelcomeResponse {
        message: "Welcome to DriveNest API".into(),
    })
}
