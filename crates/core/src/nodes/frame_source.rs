use std::path::{Path, PathBuf};

use crate::shared::error::SourceError;
use crate::shared::frame::Frame;
use crate::shared::host_folders::{is_video_name, HostFolders};
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

/// A decoded frame together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFrame {
    pub frame: Frame,
    /// Cursor into the source; restarts at 0 after a rewind or reopen.
    pub frame_index: usize,
    /// Frames consumed by the decoder so far.
    pub position: usize,
}

/// Serves one decoded frame per tick, looping over the source forever.
///
/// The decoder is reopened when the requested video changes, when the host
/// asks for a reset, or once the stream is known to be fully consumed.
pub struct FrameSource {
    reader: Box<dyn VideoReader>,
    folders: HostFolders,
    current_path: Option<PathBuf>,
    metadata: Option<VideoMetadata>,
    frame_index: i64,
}

impl FrameSource {
    pub fn new(reader: Box<dyn VideoReader>, folders: HostFolders) -> Self {
        Self {
            reader,
            folders,
            current_path: None,
            metadata: None,
            frame_index: -1,
        }
    }

    /// Rejects names that do not resolve to an existing video file.
    pub fn validate(&self, video: &str) -> Result<(), SourceError> {
        if !self.folders.exists_annotated(video) {
            return Err(SourceError::InvalidVideoFile(video.to_string()));
        }
        let path = self.folders.annotated_path(video);
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !is_video_name(name) {
            return Err(SourceError::UnsupportedExtension(video.to_string()));
        }
        Ok(())
    }

    pub fn load_frame(
        &mut self,
        video: &str,
        reset: bool,
    ) -> Result<SourceFrame, Box<dyn std::error::Error>> {
        self.validate(video)?;
        let path = self.folders.annotated_path(video);

        if self.needs_reopen(&path, reset) {
            self.reopen(&path)?;
        }

        let frame = match self.reader.read_frame()? {
            Some(frame) => {
                self.frame_index += 1;
                frame
            }
            None => {
                log::debug!("End of {} reached, rewinding", path.display());
                self.reader.rewind()?;
                let frame = self
                    .reader
                    .read_frame()?
                    .ok_or_else(|| SourceError::Unreadable { path: path.clone() })?;
                self.frame_index = 0;
                frame
            }
        };

        Ok(SourceFrame {
            frame,
            frame_index: self.frame_index.max(0) as usize,
            position: self.reader.position(),
        })
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// -1 until the first frame has been read from the current source.
    pub fn frame_index(&self) -> i64 {
        self.frame_index
    }

    fn needs_reopen(&self, path: &Path, reset: bool) -> bool {
        if reset || !self.reader.is_open() {
            return true;
        }
        if self.current_path.as_deref() != Some(path) {
            return true;
        }
        match &self.metadata {
            Some(metadata) if metadata.total_frames > 0 => {
                self.reader.position() >= metadata.total_frames
            }
            _ => false,
        }
    }

    fn reopen(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if self.reader.is_open() {
            self.reader.close();
        }
        self.frame_index = -1;
        self.metadata = None;
        self.current_path = None;

        log::debug!("Opening {}", path.display());
        let metadata = self.reader.open(path)?;
        self.current_path = Some(path.to_path_buf());
        self.metadata = Some(metadata);
        Ok(())
    }
}
