/// Container extensions the frame source accepts.
pub const VIDEO_EXTENSIONS: &[&str] = &["webm", "mp4", "mkv", "gif"];

/// Audio codec used whenever an audio track is muxed into an output video.
pub const AUDIO_CODEC: &str = "aac";

/// Sample rate of the silent clip synthesized for previews without audio.
pub const PREVIEW_SAMPLE_RATE: u32 = 44100;

/// Longest side of a preview thumbnail, in pixels.
pub const PREVIEW_MAX_DIMENSION: u32 = 512;

/// Minimum number of buffered frames needed to form a video.
pub const MIN_FLUSH_FRAMES: usize = 2;

/// Margin added to the incoming batch when no frame-timing data is supplied.
pub const FALLBACK_CAP_MARGIN: usize = 2;

/// Margin used by the frame-less (or preview-less) recheck.
pub const RECHECK_CAP_MARGIN: usize = 5;

pub const DEFAULT_FILENAME_PREFIX: &str = "Deforum";
pub const DEFAULT_FPS: u32 = 24;
pub const DEFAULT_QUALITY: u8 = 10;
