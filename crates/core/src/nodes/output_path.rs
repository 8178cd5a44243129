use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::encode_settings::ContainerFormat;
use crate::shared::error::OutputPathError;
use crate::shared::host_folders::HostFolders;

/// Next unused counter for files named `{prefix}_{counter}.{ext}` in `dir`.
///
/// Counters start at 0; gaps are not reused, the result is always one past
/// the highest existing counter.
pub fn next_index(dir: &Path, prefix: &str, ext: &str) -> std::io::Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let suffix = format!(".{ext}");
    let mut next = 0;
    for entry in entries {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let counter = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok());
        if let Some(counter) = counter {
            next = next.max(counter + 1);
        }
    }
    Ok(next)
}

/// Resolves the path of the next video file for `prefix`, creating the
/// prefix's subfolder inside the output folder if needed.
pub fn allocate(
    folders: &HostFolders,
    prefix: &str,
    container: ContainerFormat,
) -> Result<PathBuf, OutputPathError> {
    let (folder, filename) = folders.save_location(prefix)?;
    let ext = container.extension();
    let counter = next_index(&folder, &filename, ext).map_err(|source| OutputPathError::Io {
        path: folder.clone(),
        source,
    })?;
    Ok(folder.join(format!("{filename}_{counter}.{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_empty_dir_starts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(next_index(dir.path(), "Deforum", "mp4").unwrap(), 0);
    }

    #[test]
    fn test_missing_dir_starts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            next_index(&dir.path().join("absent"), "Deforum", "mp4").unwrap(),
            0
        );
    }

    #[test]
    fn test_next_after_highest_counter() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Deforum_0.mp4");
        touch(dir.path(), "Deforum_4.mp4");
        touch(dir.path(), "Deforum_2.mp4");
        assert_eq!(next_index(dir.path(), "Deforum", "mp4").unwrap(), 5);
    }

    #[test]
    fn test_counters_are_per_prefix_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Deforum_7.mov");
        touch(dir.path(), "Other_9.mp4");
        touch(dir.path(), "Deforum_x.mp4");
        touch(dir.path(), "Deforum_3.mp4.tmp");
        touch(dir.path(), "Deforum_extra_3.mp4");
        assert_eq!(next_index(dir.path(), "Deforum", "mp4").unwrap(), 0);
        assert_eq!(next_index(dir.path(), "Deforum", "mov").unwrap(), 8);
    }

    #[test]
    fn test_allocate_joins_prefix_counter_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        fs::create_dir_all(&folders.output_dir).unwrap();
        touch(&folders.output_dir, "run_1.gif");

        let path = allocate(&folders, "run", ContainerFormat::Gif).unwrap();
        assert_eq!(path, folders.output_dir.join("run_2.gif"));
    }

    #[test]
    fn test_allocate_in_subfolder() {
        let dir = tempfile::tempdir().unwrap();
        let folders = HostFolders::under(dir.path());
        let path = allocate(&folders, "clips/run", ContainerFormat::Avi).unwrap();
        assert_eq!(path, folders.output_dir.join("clips").join("run_0.avi"));
    }
}
