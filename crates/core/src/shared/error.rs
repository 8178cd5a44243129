use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid video file: {0}")]
    InvalidVideoFile(String),
    #[error("unsupported video extension for {0} (expected one of webm, mp4, mkv, gif)")]
    UnsupportedExtension(String),
    #[error("no frame could be decoded from {path} after rewinding")]
    Unreadable { path: PathBuf },
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown {kind} '{value}' (expected one of: {allowed})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        allowed: String,
    },
    #[error("filename prefix '{0}' does not name a file")]
    MissingFilename(String),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

#[derive(Error, Debug)]
pub enum OutputPathError {
    #[error("saving outside the output folder is not allowed: {0}")]
    OutsideOutputDir(PathBuf),
    #[error("failed to prepare output folder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum BatchError {
    #[error("cannot stack an empty frame list")]
    Empty,
    #[error("frame {position} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        position: usize,
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_video_message_names_file() {
        let err = SourceError::InvalidVideoFile("missing.mp4".to_string());
        assert_eq!(err.to_string(), "Invalid video file: missing.mp4");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::OutOfRange {
            field: "fps",
            min: 1,
            max: 10000,
            value: 0,
        };
        assert_eq!(err.to_string(), "fps must be between 1 and 10000, got 0");
    }
}
