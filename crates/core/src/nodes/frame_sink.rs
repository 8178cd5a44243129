use std::path::{Path, PathBuf};

use crate::audio::domain::audio_aligner::{align_to_duration, fit_to_frames, video_duration};
use crate::audio::domain::audio_track::AudioTrack;
use crate::audio::infrastructure::wav_codec::encode_wav_base64;
use crate::nodes::flush_policy::{self, FlushDecision};
use crate::nodes::frame_timing::FrameTiming;
use crate::nodes::output_path;
use crate::nodes::preview::PreviewPayload;
use crate::nodes::sink_config::SinkConfig;
use crate::shared::constants::{
    FALLBACK_CAP_MARGIN, MIN_FLUSH_FRAMES, PREVIEW_SAMPLE_RATE, RECHECK_CAP_MARGIN,
};
use crate::shared::frame::Frame;
use crate::shared::frame_batch::FrameBatch;
use crate::shared::host_folders::HostFolders;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::audio_writer::AudioWriter;
use crate::video::domain::thumbnail_encoder::ThumbnailEncoder;
use crate::video::domain::video_writer::VideoWriter;

/// Everything the host passes to one sink invocation.
#[derive(Clone, Copy, Debug)]
pub struct SinkInput<'a> {
    pub config: &'a SinkConfig,
    pub images: Option<&'a [Frame]>,
    pub frame_timing: Option<&'a FrameTiming>,
    pub audio: Option<&'a AudioTrack>,
    pub waveform: Option<&'a Frame>,
}

impl<'a> SinkInput<'a> {
    pub fn new(config: &'a SinkConfig) -> Self {
        Self {
            config,
            images: None,
            frame_timing: None,
            audio: None,
            waveform: None,
        }
    }

    pub fn with_images(mut self, images: &'a [Frame]) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_timing(mut self, timing: &'a FrameTiming) -> Self {
        self.frame_timing = Some(timing);
        self
    }

    pub fn with_audio(mut self, audio: &'a AudioTrack) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_waveform(mut self, waveform: &'a Frame) -> Self {
        self.waveform = Some(waveform);
        self
    }
}

#[derive(Debug)]
pub enum SinkResult {
    /// Nothing flowed downstream this tick.
    Skip,
    Batch(FrameBatch),
}

impl SinkResult {
    pub fn is_skip(&self) -> bool {
        matches!(self, SinkResult::Skip)
    }

    pub fn batch(&self) -> Option<&FrameBatch> {
        match self {
            SinkResult::Batch(batch) => Some(batch),
            SinkResult::Skip => None,
        }
    }
}

#[derive(Debug)]
pub struct SinkOutput {
    pub preview: PreviewPayload,
    pub result: SinkResult,
    /// Files written during this invocation.
    pub saved: Vec<PathBuf>,
}

/// Accumulates frames across invocations and flushes them to a video file
/// and/or a stacked batch once a threshold is reached or a flush is forced.
pub struct FrameSink {
    folders: HostFolders,
    buffer: Vec<Frame>,
    writer: Box<dyn VideoWriter>,
    audio_writer: Box<dyn AudioWriter>,
    thumbnails: Box<dyn ThumbnailEncoder>,
}

impl FrameSink {
    pub fn new(
        folders: HostFolders,
        writer: Box<dyn VideoWriter>,
        audio_writer: Box<dyn AudioWriter>,
        thumbnails: Box<dyn ThumbnailEncoder>,
    ) -> Self {
        Self {
            folders,
            buffer: Vec::new(),
            writer,
            audio_writer,
            thumbnails,
        }
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Drops buffered frames without writing them.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn invoke(
        &mut self,
        input: SinkInput<'_>,
    ) -> Result<SinkOutput, Box<dyn std::error::Error>> {
        let config = input.config;
        config.validate()?;

        let images = input.images.filter(|images| !images.is_empty());
        let mut reset_pending = input.frame_timing.is_some_and(|t| t.reset);
        let mut result = SinkResult::Skip;
        let mut saved = Vec::new();

        let mut should_dump = false;
        if let Some(images) = images {
            let reset = std::mem::take(&mut reset_pending);
            let fallback = self.buffer.len() + images.len() + FALLBACK_CAP_MARGIN;
            let max_frames = flush_policy::max_frames(input.frame_timing, fallback);

            if !reset {
                self.cache(images);
            }
            let decision = FlushDecision::evaluate(
                config.dump_by,
                self.buffer.len(),
                max_frames,
                config.dump_every,
                reset || config.dump_now,
            );
            should_dump = decision.should_flush();
            if should_dump {
                if let Some(batch) = self.flush(config, input.audio, &mut saved)? {
                    result = SinkResult::Batch(batch);
                }
            }
            if reset {
                self.cache(images);
            }
        }

        let preview = match images {
            Some(images) if config.enable_preview => {
                self.preview(config, images, input.audio, input.waveform, should_dump)?
            }
            _ => {
                let fallback = self.buffer.len() + RECHECK_CAP_MARGIN;
                let max_frames = flush_policy::max_frames(input.frame_timing, fallback);
                let decision = FlushDecision::evaluate(
                    config.dump_by,
                    self.buffer.len(),
                    max_frames,
                    config.dump_every,
                    reset_pending || config.dump_now,
                );
                if decision.should_flush() {
                    if let Some(batch) = self.flush(config, input.audio, &mut saved)? {
                        result = SinkResult::Batch(batch);
                    }
                }
                PreviewPayload {
                    counter: self.buffer.len(),
                    should_dump: should_dump || decision.should_flush(),
                    frames: Vec::new(),
                    fps: config.fps,
                    audio: None,
                    waveform: None,
                }
            }
        };

        Ok(SinkOutput {
            preview,
            result,
            saved,
        })
    }

    fn cache(&mut self, images: &[Frame]) {
        self.buffer.extend_from_slice(images);
        log::info!("Video sink cached {} frames", self.buffer.len());
    }

    /// Empties the buffer, then saves and/or stacks what it held. Fewer
    /// than two frames are dropped.
    fn flush(
        &mut self,
        config: &SinkConfig,
        audio: Option<&AudioTrack>,
        saved: &mut Vec<PathBuf>,
    ) -> Result<Option<FrameBatch>, Box<dyn std::error::Error>> {
        let frames = std::mem::take(&mut self.buffer);
        if frames.len() < MIN_FLUSH_FRAMES {
            log::debug!("Skipping flush of {} frame(s)", frames.len());
            return Ok(None);
        }

        if !config.skip_save {
            saved.push(self.save_video(config, &frames, audio)?);
        }
        if config.skip_return {
            return Ok(None);
        }
        Ok(Some(FrameBatch::stack(&frames)?))
    }

    fn save_video(
        &mut self,
        config: &SinkConfig,
        frames: &[Frame],
        audio: Option<&AudioTrack>,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = output_path::allocate(&self.folders, &config.filename_prefix, config.format)?;
        let first = &frames[0];
        let mut metadata = VideoMetadata::for_frames(
            first.width(),
            first.height(),
            config.fps as f64,
            frames.len(),
        );
        metadata.source_path = Some(path.clone());

        log::info!("Saving video: {}", path.display());
        self.encode(&path, &metadata, config, frames)?;

        if let Some(audio) = audio {
            self.mux_audio(&path, config, frames.len(), audio)?;
        }
        Ok(path)
    }

    fn encode(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
        config: &SinkConfig,
        frames: &[Frame],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.open(path, metadata, &config.encode_settings())?;
        let written = frames.iter().try_for_each(|frame| self.writer.write(frame));
        let closed = self.writer.close();
        written?;
        closed
    }

    fn mux_audio(
        &self,
        path: &Path,
        config: &SinkConfig,
        frame_count: usize,
        audio: &AudioTrack,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !config.format.supports_audio() {
            log::warn!(
                "{} containers cannot carry audio, saving {} without it",
                config.format,
                path.display()
            );
            return Ok(());
        }
        let aligned = align_to_duration(audio, video_duration(frame_count, config.fps));
        self.audio_writer.write_audio(path, &aligned)
    }

    fn preview(
        &self,
        config: &SinkConfig,
        images: &[Frame],
        audio: Option<&AudioTrack>,
        waveform: Option<&Frame>,
        should_dump: bool,
    ) -> Result<PreviewPayload, Box<dyn std::error::Error>> {
        let shown = if config.restore { &self.buffer[..] } else { images };
        let frames = shown
            .iter()
            .map(|frame| self.thumbnails.encode(frame))
            .collect::<Result<Vec<_>, _>>()?;

        let clip = fit_to_frames(audio, self.buffer.len(), config.fps, PREVIEW_SAMPLE_RATE);
        let waveform = waveform.map(|w| self.thumbnails.encode(w)).transpose()?;

        Ok(PreviewPayload {
            counter: self.buffer.len(),
            should_dump,
            frames,
            fps: config.fps,
            audio: Some(encode_wav_base64(&clip)?),
            waveform,
        })
    }
}
