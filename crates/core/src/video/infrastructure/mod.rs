pub mod ffmpeg_audio_writer;
pub mod ffmpeg_reader;
pub mod ffmpeg_writer;
#[cfg(test)]
mod test_support;
pub mod webp_thumbnail_encoder;
