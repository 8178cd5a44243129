use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{DEFAULT_FILENAME_PREFIX, DEFAULT_FPS, DEFAULT_QUALITY};
use crate::shared::encode_settings::{ContainerFormat, EncodeSettings, PixelFormat, VideoCodec};
use crate::shared::error::ConfigError;

/// Which threshold triggers a flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DumpMode {
    /// Flush once the buffer holds the animation's total frame budget.
    #[default]
    #[serde(rename = "max_frames")]
    MaxFrames,
    /// Flush every `dump_every` frames.
    #[serde(rename = "per_N_frames")]
    PerNFrames,
}

impl DumpMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DumpMode::MaxFrames => "max_frames",
            DumpMode::PerNFrames => "per_N_frames",
        }
    }
}

impl FromStr for DumpMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max_frames" => Ok(DumpMode::MaxFrames),
            "per_N_frames" => Ok(DumpMode::PerNFrames),
            other => Err(ConfigError::UnknownOption {
                kind: "dump mode",
                value: other.to_string(),
                allowed: "max_frames, per_N_frames".to_string(),
            }),
        }
    }
}

impl fmt::Display for DumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-invocation settings of the frame sink.
///
/// Deserializes from the host's widget values; missing keys take the
/// widget defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub filename_prefix: String,
    pub fps: u32,
    pub codec: VideoCodec,
    pub pixel_format: PixelFormat,
    pub format: ContainerFormat,
    pub quality: u8,
    pub dump_by: DumpMode,
    pub dump_every: usize,
    pub dump_now: bool,
    pub skip_save: bool,
    pub skip_return: bool,
    pub enable_preview: bool,
    pub restore: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            fps: DEFAULT_FPS,
            codec: VideoCodec::default(),
            pixel_format: PixelFormat::default(),
            format: ContainerFormat::default(),
            quality: DEFAULT_QUALITY,
            dump_by: DumpMode::default(),
            dump_every: 0,
            dump_now: false,
            skip_save: false,
            skip_return: true,
            enable_preview: true,
            restore: false,
        }
    }
}

impl SinkConfig {
    pub const FPS_RANGE: (i64, i64) = (1, 10000);
    pub const QUALITY_RANGE: (i64, i64) = (1, 10);
    pub const DUMP_EVERY_RANGE: (i64, i64) = (0, 4096);

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Path::new(&self.filename_prefix).file_name().is_none() {
            return Err(ConfigError::MissingFilename(self.filename_prefix.clone()));
        }
        check_range("fps", self.fps as i64, Self::FPS_RANGE)?;
        check_range("quality", self.quality as i64, Self::QUALITY_RANGE)?;
        check_range("dump_every", self.dump_every as i64, Self::DUMP_EVERY_RANGE)?;
        Ok(())
    }

    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            fps: self.fps,
            codec: self.codec,
            pixel_format: self.pixel_format,
            container: self.format,
            quality: self.quality,
        }
    }
}

fn check_range(field: &'static str, value: i64, (min, max): (i64, i64)) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}
