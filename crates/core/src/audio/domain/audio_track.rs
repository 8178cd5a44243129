/// Audio attached to a sink invocation: interleaved PCM samples normalized
/// to [-1.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct AudioTrack {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        debug_assert!(channels >= 1, "an audio track needs at least one channel");
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// A silent track lasting exactly `frames` sample frames.
    pub fn silence(frames: usize, sample_rate: u32, channels: u16) -> Self {
        Self::new(vec![0.0; frames * channels as usize], sample_rate, channels)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (one sample per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_creates_track_with_correct_fields() {
        let samples = vec![0.25f32; 16000];
        let track = AudioTrack::new(samples.clone(), 16000, 1);
        assert_eq!(track.samples(), &samples[..]);
        assert_eq!(track.sample_rate(), 16000);
        assert_eq!(track.channels(), 1);
    }

    #[test]
    fn test_duration_mono() {
        let track = AudioTrack::new(vec![0.0; 48000], 16000, 1);
        assert_relative_eq!(track.duration(), 3.0);
    }

    #[test]
    fn test_duration_stereo() {
        let track = AudioTrack::new(vec![0.0; 96000], 48000, 2);
        assert_eq!(track.frame_count(), 48000);
        assert_relative_eq!(track.duration(), 1.0);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let track = AudioTrack::silence(10, 44100, 2);
        assert_eq!(track.samples().len(), 20);
        assert!(track.samples().iter().all(|&s| s == 0.0));
    }
}
