use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("error creating output file {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `contents` to `path` so that `path` is either fully replaced or
/// left as it was.
///
/// The text is staged in a uniquely named temporary file next to `path`
/// and persisted over it once fully written. The staging file is removed
/// on any failure.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    stage_and_persist(path, contents).map_err(|source| OutputError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

fn stage_and_persist(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.c");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new contents").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents");
        // only the target is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("image.c");

        let err = write_atomic(&path, b"data").unwrap_err();

        assert!(err.to_string().contains("image.c"));
        assert!(!path.exists());
    }

    #[test]
    fn test_concurrent_writers_never_mix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.c");
        let a = vec![b'a'; 64 * 1024];
        let b = vec![b'b'; 64 * 1024];

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| write_atomic(&path, &a).unwrap());
                s.spawn(|| write_atomic(&path, &b).unwrap());
            }
        });

        let written = fs::read(&path).unwrap();
        assert!(written == a || written == b);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
