use std::io::Cursor;
use std::path::Path;

use base64::Engine;

use crate::audio::domain::audio_track::AudioTrack;

/// Encodes a track as a 16-bit PCM WAV file held in memory.
pub fn encode_wav(track: &AudioTrack) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let spec = hound::WavSpec {
        channels: track.channels(),
        sample_rate: track.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in track.samples() {
            writer.write_sample(to_i16(sample))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// WAV bytes of `track`, base64-encoded for the preview channel.
pub fn encode_wav_base64(track: &AudioTrack) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = encode_wav(track)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Reads a WAV file into a track, normalizing integer PCM to [-1.0, 1.0].
pub fn read_wav(path: &Path) -> Result<AudioTrack, Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(AudioTrack::new(samples, spec.sample_rate, spec.channels))
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_encode_wav_has_riff_header() {
        let track = AudioTrack::new(vec![0.0; 100], 44100, 1);
        let bytes = encode_wav(&track).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte canonical header + 2 bytes per sample
        assert_eq!(bytes.len(), 44 + 200);
    }

    #[test]
    fn test_encode_wav_clamps_samples() {
        assert_eq!(to_i16(2.0), i16::MAX);
        assert_eq!(to_i16(-2.0), -i16::MAX);
        assert_eq!(to_i16(0.0), 0);
    }

    #[test]
    fn test_base64_decodes_back_to_wav() {
        let track = AudioTrack::new(vec![0.5, -0.5], 8000, 2);
        let encoded = encode_wav_base64(&track).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, encode_wav(&track).unwrap());
    }

    #[test]
    fn test_read_wav_roundtrip_preserves_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let track = AudioTrack::new(vec![0.25, -0.25, 0.5, -0.5], 22050, 2);
        std::fs::write(&path, encode_wav(&track).unwrap()).unwrap();

        let read = read_wav(&path).unwrap();
        assert_eq!(read.sample_rate(), 22050);
        assert_eq!(read.channels(), 2);
        assert_eq!(read.samples().len(), 4);
        for (a, b) in read.samples().iter().zip(track.samples()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_read_wav_missing_file() {
        assert!(read_wav(Path::new("/nonexistent/clip.wav")).is_err());
    }
}
