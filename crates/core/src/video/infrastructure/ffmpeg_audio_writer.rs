use std::path::{Path, PathBuf};

use crate::audio::domain::audio_track::AudioTrack;
use crate::shared::constants::AUDIO_CODEC;
use crate::video::domain::audio_writer::AudioWriter;

/// Muxes an audio track into an existing video file using ffmpeg-next.
///
/// The writer opens the video-only file, creates a temp output with the
/// original video stream copied and the track encoded as AAC, then replaces
/// the original file. The temp file is removed if anything fails.
pub struct FfmpegAudioWriter;

impl AudioWriter for FfmpegAudioWriter {
    fn write_audio(
        &self,
        video_path: &Path,
        audio: &AudioTrack,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let temp_path = temp_path_for(video_path);
        match mux(video_path, &temp_path, audio) {
            Ok(()) => {
                std::fs::rename(&temp_path, video_path)?;
                Ok(())
            }
            Err(e) => {
                if temp_path.exists() {
                    if let Err(cleanup) = std::fs::remove_file(&temp_path) {
                        log::warn!(
                            "Failed to remove temp file {}: {cleanup}",
                            temp_path.display()
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

/// `clip.mp4` -> `clip.tmp.mp4`, keeping the extension so ffmpeg picks the
/// same muxer.
fn temp_path_for(video_path: &Path) -> PathBuf {
    let ext = video_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");
    video_path.with_extension(format!("tmp.{ext}"))
}

fn mux(
    video_path: &Path,
    temp_path: &Path,
    audio: &AudioTrack,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ictx = ffmpeg_next::format::input(video_path)?;
    let mut octx = ffmpeg_next::format::output(temp_path)?;

    let video_stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or("No video stream in source file")?;
    let video_src_idx = video_stream.index();
    let video_in_tb = video_stream.time_base();

    let mut ost_video =
        octx.add_stream(ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::None))?;
    ost_video.set_parameters(video_stream.parameters());
    unsafe {
        (*ost_video.parameters().as_mut_ptr()).codec_tag = 0;
    }
    let video_ost_idx = ost_video.index();

    let audio_codec = ffmpeg_next::encoder::find_by_name(AUDIO_CODEC)
        .ok_or_else(|| format!("{AUDIO_CODEC} encoder not found"))?;
    let mut ost_audio = octx.add_stream(Some(audio_codec))?;
    let audio_ost_idx = ost_audio.index();

    let layout = channel_layout(audio.channels())?;
    let mut audio_encoder = ffmpeg_next::codec::context::Context::new_with_codec(audio_codec)
        .encoder()
        .audio()?;

    audio_encoder.set_rate(audio.sample_rate() as i32);
    audio_encoder.set_channel_layout(layout);
    audio_encoder.set_format(ffmpeg_next::format::Sample::F32(
        ffmpeg_next::format::sample::Type::Planar,
    ));

    let mut audio_encoder = audio_encoder.open_as(audio_codec)?;
    ost_audio.set_parameters(&audio_encoder);

    let audio_time_base = audio_encoder.time_base();
    let frame_size = audio_encoder.frame_size() as usize;

    octx.write_header()?;

    let ost_video_tb = octx
        .stream(video_ost_idx)
        .ok_or("video output stream missing")?
        .time_base();
    let ost_audio_tb = octx
        .stream(audio_ost_idx)
        .ok_or("audio output stream missing")?
        .time_base();

    for (stream, mut packet) in ictx.packets() {
        if stream.index() != video_src_idx {
            continue;
        }
        packet.rescale_ts(video_in_tb, ost_video_tb);
        packet.set_position(-1);
        packet.set_stream(video_ost_idx);
        packet.write_interleaved(&mut octx)?;
    }

    let target = AudioTarget {
        stream_idx: audio_ost_idx,
        enc_time_base: audio_time_base,
        ost_time_base: ost_audio_tb,
    };
    encode_track(&mut audio_encoder, audio, layout, &mut octx, &target, frame_size)?;

    octx.write_trailer()?;
    Ok(())
}

fn channel_layout(
    channels: u16,
) -> Result<ffmpeg_next::ChannelLayout, Box<dyn std::error::Error>> {
    use ffmpeg_next::ChannelLayout;
    match channels {
        1 => Ok(ChannelLayout::MONO),
        2 => Ok(ChannelLayout::STEREO),
        3 => Ok(ChannelLayout::SURROUND),
        4 => Ok(ChannelLayout::QUAD),
        5 => Ok(ChannelLayout::_5POINT0),
        6 => Ok(ChannelLayout::_5POINT1),
        n => Err(format!("unsupported audio channel count: {n}").into()),
    }
}

struct AudioTarget {
    stream_idx: usize,
    enc_time_base: ffmpeg_next::Rational,
    ost_time_base: ffmpeg_next::Rational,
}

/// Encode an interleaved track into AAC packets and write them to the output.
fn encode_track(
    encoder: &mut ffmpeg_next::codec::encoder::audio::Encoder,
    audio: &AudioTrack,
    layout: ffmpeg_next::ChannelLayout,
    octx: &mut ffmpeg_next::format::context::Output,
    target: &AudioTarget,
    frame_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let channels = audio.channels().max(1) as usize;
    let effective_frame_size = if frame_size == 0 { 1024 } else { frame_size };
    let whole = audio.frame_count() * channels;

    let mut pts: i64 = 0;

    for chunk in audio.samples()[..whole].chunks(effective_frame_size * channels) {
        let chunk_frames = chunk.len() / channels;
        let mut frame = ffmpeg_next::util::frame::audio::Audio::new(
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
            chunk_frames,
            layout,
        );
        frame.set_rate(audio.sample_rate());
        frame.set_pts(Some(pts));

        // De-interleave into one plane per channel
        for ch in 0..channels {
            let plane = frame.data_mut(ch);
            for (i, sample) in chunk.iter().skip(ch).step_by(channels).enumerate() {
                plane[i * 4..i * 4 + 4].copy_from_slice(&sample.to_ne_bytes());
            }
        }

        encoder.send_frame(&frame)?;
        flush_audio_packets(encoder, octx, target)?;

        pts += chunk_frames as i64;
    }

    encoder.send_eof()?;
    flush_audio_packets(encoder, octx, target)?;

    Ok(())
}

fn flush_audio_packets(
    encoder: &mut ffmpeg_next::codec::encoder::audio::Encoder,
    octx: &mut ffmpeg_next::format::context::Output,
    target: &AudioTarget,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut encoded = ffmpeg_next::Packet::empty();
    while encoder.receive_packet(&mut encoded).is_ok() {
        encoded.set_stream(target.stream_idx);
        encoded.rescale_ts(target.enc_time_base, target.ost_time_base);
        encoded.write_interleaved(octx)?;
    }
    Ok(())
}
