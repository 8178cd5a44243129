use crate::audio::domain::audio_track::AudioTrack;

/// Number of sample frames covering `duration` seconds at `sample_rate`.
pub fn target_frame_count(duration: f64, sample_rate: u32) -> usize {
    (duration * sample_rate as f64).round().max(0.0) as usize
}

/// Duration of `frame_count` video frames played at `fps`.
pub fn video_duration(frame_count: usize, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    frame_count as f64 / fps as f64
}

/// Trims or zero-pads `track` at the end so it lasts exactly `duration`
/// seconds. Sample rate and channel count are preserved, and whole sample
/// frames are kept so channels stay interleaved.
pub fn align_to_duration(track: &AudioTrack, duration: f64) -> AudioTrack {
    let channels = track.channels().max(1) as usize;
    let target = target_frame_count(duration, track.sample_rate()) * channels;
    let available = track.frame_count() * channels;

    let mut samples = track.samples()[..available.min(target)].to_vec();
    samples.resize(target, 0.0);
    AudioTrack::new(samples, track.sample_rate(), track.channels())
}

/// Aligns `track` to the length of `frame_count` frames at `fps`, or
/// synthesizes silence at `silence_rate` when there is no track.
pub fn fit_to_frames(
    track: Option<&AudioTrack>,
    frame_count: usize,
    fps: u32,
    silence_rate: u32,
) -> AudioTrack {
    let duration = video_duration(frame_count, fps);
    match track {
        Some(track) => align_to_duration(track, duration),
        None => AudioTrack::silence(target_frame_count(duration, silence_rate), silence_rate, 1),
    }
}
