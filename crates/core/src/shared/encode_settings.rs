use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodec {
    #[serde(rename = "libx265")]
    Libx265,
    #[serde(rename = "libx264")]
    Libx264,
    #[serde(rename = "libvpx-vp9")]
    LibvpxVp9,
    #[serde(rename = "libaom-av1")]
    LibaomAv1,
    #[serde(rename = "mpeg4")]
    Mpeg4,
    #[serde(rename = "libvpx")]
    Libvpx,
}

impl VideoCodec {
    pub const ALL: &'static [VideoCodec] = &[
        VideoCodec::Libx265,
        VideoCodec::Libx264,
        VideoCodec::LibvpxVp9,
        VideoCodec::LibaomAv1,
        VideoCodec::Mpeg4,
        VideoCodec::Libvpx,
    ];

    /// Encoder name as registered with ffmpeg.
    pub fn as_str(self) -> &'static str {
        match self {
            VideoCodec::Libx265 => "libx265",
            VideoCodec::Libx264 => "libx264",
            VideoCodec::LibvpxVp9 => "libvpx-vp9",
            VideoCodec::LibaomAv1 => "libaom-av1",
            VideoCodec::Mpeg4 => "mpeg4",
            VideoCodec::Libvpx => "libvpx",
        }
    }
}

impl Default for VideoCodec {
    fn default() -> Self {
        VideoCodec::Libx265
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Yuv420p,
    Yuv422p,
    Yuv444p,
    Yuvj420p,
    Yuvj422p,
    Yuvj444p,
    Rgb24,
    Rgba,
    Nv12,
    Nv21,
}

impl PixelFormat {
    pub const ALL: &'static [PixelFormat] = &[
        PixelFormat::Yuv420p,
        PixelFormat::Yuv422p,
        PixelFormat::Yuv444p,
        PixelFormat::Yuvj420p,
        PixelFormat::Yuvj422p,
        PixelFormat::Yuvj444p,
        PixelFormat::Rgb24,
        PixelFormat::Rgba,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Yuv420p => "yuv420p",
            PixelFormat::Yuv422p => "yuv422p",
            PixelFormat::Yuv444p => "yuv444p",
            PixelFormat::Yuvj420p => "yuvj420p",
            PixelFormat::Yuvj422p => "yuvj422p",
            PixelFormat::Yuvj444p => "yuvj444p",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Rgba => "rgba",
            PixelFormat::Nv12 => "nv12",
            PixelFormat::Nv21 => "nv21",
        }
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Yuv420p
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Mp4,
    Mov,
    Gif,
    Avi,
}

impl ContainerFormat {
    pub const ALL: &'static [ContainerFormat] = &[
        ContainerFormat::Mp4,
        ContainerFormat::Mov,
        ContainerFormat::Gif,
        ContainerFormat::Avi,
    ];

    /// File extension, also used by ffmpeg to pick the muxer.
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::Mov => "mov",
            ContainerFormat::Gif => "gif",
            ContainerFormat::Avi => "avi",
        }
    }

    pub fn supports_audio(self) -> bool {
        !matches!(self, ContainerFormat::Gif)
    }
}

impl Default for ContainerFormat {
    fn default() -> Self {
        ContainerFormat::Mp4
    }
}

fn parse_option<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, ConfigError> {
    all.iter()
        .copied()
        .find(|v| name(*v) == value)
        .ok_or_else(|| ConfigError::UnknownOption {
            kind,
            value: value.to_string(),
            allowed: all.iter().map(|v| name(*v)).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for VideoCodec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("codec", s, Self::ALL, Self::as_str)
    }
}

impl FromStr for PixelFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("pixel format", s, Self::ALL, Self::as_str)
    }
}

impl FromStr for ContainerFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("container format", s, Self::ALL, Self::extension)
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything a video writer needs besides the frames themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeSettings {
    pub fps: u32,
    pub codec: VideoCodec,
    pub pixel_format: PixelFormat,
    pub container: ContainerFormat,
    /// Carried through to the writer; no encoder maps it yet.
    pub quality: u8,
}
