use std::path::Path;

use crate::audio::domain::audio_track::AudioTrack;

/// Domain interface for encoding audio and muxing it into a video file.
pub trait AudioWriter: Send {
    /// Encode the track and mux it into an existing video file,
    /// replacing any existing audio track.
    fn write_audio(
        &self,
        video_path: &Path,
        audio: &AudioTrack,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
