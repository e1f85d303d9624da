use serde::{Deserialize, Serialize};

use crate::thumbnail::ThumbnailView;

/// A payload pushed to connected real-time clients.
///
/// Serializes as either `{"thumbnail": {...}}` (a new upload) or
/// `{"message": "..."}` (an echo reply), matching the wire format the
/// frontend consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushEvent {
    /// A new thumbnail was uploaded.
    Thumbnail {
        /// The uploaded item, with the client's original filename.
        thumbnail: ThumbnailView,
    },
    /// An echoed text message, scoped to a single connection.
    Message {
        /// The echo reply text.
        message: String,
    },
}

impl PushEvent {
    /// Build an upload notification.
    pub fn thumbnail(id: i64, filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Thumbnail {
            thumbnail: ThumbnailView {
                id,
                filename: filename.into(),
                url: url.into(),
            },
        }
    }

    /// Build the echo reply for a received text message.
    pub fn echo(text: &str) -> Self {
        Self::Message {
            message: format!("Message received: {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_event_wire_format() {
        let event = PushEvent::thumbnail(7, "photo.jpg", "http://localhost:8000/media/x.jpg");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "thumbnail": {
                    "id": 7,
                    "filename": "photo.jpg",
                    "url": "http://localhost:8000/media/x.jpg"
                }
            })
        );
    }

    #[test]
    fn echo_event_wire_format() {
        let json = serde_json::to_value(PushEvent::echo("ping")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Message received: ping"}));
    }
}
