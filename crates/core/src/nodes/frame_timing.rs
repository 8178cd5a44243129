use serde::Deserialize;

/// Host-supplied context about the animation the frames belong to.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameTiming {
    /// Total frame budget declared by the animation, when known.
    pub max_frames: Option<usize>,
    /// The animation restarted; whatever is buffered must be flushed.
    pub reset: bool,
}

impl FrameTiming {
    pub fn with_max_frames(max_frames: usize) -> Self {
        Self {
            max_frames: Some(max_frames),
            reset: false,
        }
    }

    pub fn reset() -> Self {
        Self {
            max_frames: None,
            reset: true,
        }
    }
}
