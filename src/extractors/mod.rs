//! Request extractors whose rejections use the `{detail}` error body.

mod body;
mod path;
pub use body::ValidJson;
pub use path::IdPath;
