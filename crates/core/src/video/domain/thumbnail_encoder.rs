use crate::shared::frame::Frame;

/// Produces the lightweight, text-safe image encoding sent on the preview
/// channel.
pub trait ThumbnailEncoder: Send {
    fn encode(&self, frame: &Frame) -> Result<String, Box<dyn std::error::Error>>;
}
