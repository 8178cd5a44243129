use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Pulls decoded frames from a video source one at a time.
///
/// Implementations handle I/O details (codec, container format, etc.)
/// while the nodes work with the abstract `Frame` and `VideoMetadata`
/// types.
pub trait VideoReader: Send {
    /// Opens a video file and returns its metadata. Any previously opened
    /// source is released first.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Decodes the next frame as RGB. `Ok(None)` signals end of stream.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Seeks back to the first frame.
    fn rewind(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Number of frames consumed since the last open or rewind.
    fn position(&self) -> usize;

    fn is_open(&self) -> bool;

    /// Releases any resources held by the reader. Safe to call when nothing
    /// is open.
    fn close(&mut self);
}
