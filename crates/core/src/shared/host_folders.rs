use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::shared::constants::VIDEO_EXTENSIONS;
use crate::shared::error::OutputPathError;

const OUTPUT_ANNOTATION: &str = " [output]";
const INPUT_ANNOTATION: &str = " [input]";
const TEMP_ANNOTATION: &str = " [temp]";

/// The host's input, output and temp directories.
///
/// Node inputs name files relative to one of these folders; a trailing
/// `[input]`, `[output]` or `[temp]` annotation picks the folder, and
/// unannotated names resolve against the input folder.
#[derive(Clone, Debug, PartialEq)]
pub struct HostFolders {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
}

impl HostFolders {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// All three folders rooted at one directory (`input/`, `output/`, `temp/`).
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("input"), root.join("output"), root.join("temp"))
    }

    pub fn annotated_path(&self, name: &str) -> PathBuf {
        if let Some(stripped) = name.strip_suffix(OUTPUT_ANNOTATION) {
            self.output_dir.join(stripped)
        } else if let Some(stripped) = name.strip_suffix(TEMP_ANNOTATION) {
            self.temp_dir.join(stripped)
        } else if let Some(stripped) = name.strip_suffix(INPUT_ANNOTATION) {
            self.input_dir.join(stripped)
        } else {
            self.input_dir.join(name)
        }
    }

    pub fn exists_annotated(&self, name: &str) -> bool {
        self.annotated_path(name).is_file()
    }

    /// Names of loadable videos in the input folder, sorted.
    pub fn list_videos(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.input_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_video_name(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Splits a filename prefix such as `clips/run` into the folder the file
    /// goes in and its bare name, creating the folder if needed.
    pub fn save_location(&self, prefix: &str) -> Result<(PathBuf, String), OutputPathError> {
        let relative = Path::new(prefix);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(OutputPathError::OutsideOutputDir(self.output_dir.join(relative)));
        }

        let filename = relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder = match relative.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.output_dir.join(parent),
            _ => self.output_dir.clone(),
        };

        fs::create_dir_all(&folder).map_err(|source| OutputPathError::Io {
            path: folder.clone(),
            source,
        })?;
        Ok((folder, filename))
    }
}

pub fn is_video_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("clip.mp4", "input/clip.mp4")]
    #[case("clip.mp4 [input]", "input/clip.mp4")]
    #[case("clip.mp4 [output]", "output/clip.mp4")]
    #[case("clip.mp4 [temp]", "temp/clip.mp4")]
    fn test_annotated_path(#[case] name: &str, #[case] expected: &str) {
        let folders = HostFolders::under(Path::new("/host"));
        assert_eq!(folders.annotated_path(name), Path::new("/host").join(expected));
    }

    #[test]
    fn test_exists_annotated_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        fs::create_dir_all(&folders.input_dir).unwrap();
        fs::write(folders.input_dir.join("a.mp4"), b"x").unwrap();
        fs::create_dir_all(folders.input_dir.join("dir.mp4")).unwrap();

        assert!(folders.exists_annotated("a.mp4"));
        assert!(!folders.exists_annotated("dir.mp4"));
        assert!(!folders.exists_annotated("missing.mp4"));
    }

    #[test]
    fn test_list_videos_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        fs::create_dir_all(&folders.input_dir).unwrap();
        for name in ["b.webm", "a.mp4", "notes.txt", "noext", "c.GIF"] {
            fs::write(folders.input_dir.join(name), b"x").unwrap();
        }
        fs::create_dir_all(folders.input_dir.join("sub.mkv")).unwrap();

        assert_eq!(
            folders.list_videos().unwrap(),
            vec!["a.mp4".to_string(), "b.webm".to_string(), "c.GIF".to_string()]
        );
    }

    #[test]
    fn test_save_location_creates_subfolder() {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        let (folder, name) = folders.save_location("clips/run").unwrap();
        assert_eq!(folder, folders.output_dir.join("clips"));
        assert_eq!(name, "run");
        assert!(folder.is_dir());
    }

    #[test]
    fn test_save_location_plain_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        let (folder, name) = folders.save_location("Deforum").unwrap();
        assert_eq!(folder, folders.output_dir);
        assert_eq!(name, "Deforum");
    }

    #[rstest]
    #[case("../escape")]
    #[case("clips/../../escape")]
    #[case("/abs/path")]
    fn test_save_location_rejects_escape(#[case] prefix: &str) {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        assert!(matches!(
            folders.save_location(prefix),
            Err(OutputPathError::OutsideOutputDir(_))
        ));
    }
}
