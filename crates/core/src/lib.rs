pub mod event;
pub mod text;
pub mod thumbnail;

pub use event::PushEvent;
pub use text::reverse_alphanumeric;
pub use thumbnail::{ThumbnailRecord, ThumbnailView};
