use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Frame count reported by the container; 0 when unknown.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Metadata for a sequence of in-memory frames about to be encoded.
    pub fn for_frames(width: u32, height: u32, fps: f64, total_frames: usize) -> Self {
        Self {
            width,
            height,
            fps,
            total_frames,
            codec: String::new(),
            source_path: None,
        }
    }

    pub fn duration(&self) -> f64 {
        if self.fps > 0.0 {
            self.total_frames as f64 / self.fps
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction() {
        let meta = VideoMetadata {
            width: 1920,
            height: 1080,
            fps: 30.0,
            total_frames: 900,
            codec: "h264".to_string(),
            source_path: Some(PathBuf::from("/tmp/test.mp4")),
        };
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.total_frames, 900);
        assert_eq!(meta.source_path, Some(PathBuf::from("/tmp/test.mp4")));
    }

    #[test]
    fn test_for_frames_has_no_source() {
        let meta = VideoMetadata::for_frames(64, 48, 24.0, 12);
        assert_eq!(meta.source_path, None);
        assert!(meta.codec.is_empty());
    }

    #[test]
    fn test_duration() {
        assert_relative_eq!(VideoMetadata::for_frames(8, 8, 24.0, 48).duration(), 2.0);
        assert_relative_eq!(VideoMetadata::for_frames(8, 8, 0.0, 48).duration(), 0.0);
    }
}
