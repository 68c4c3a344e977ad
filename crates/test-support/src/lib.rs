#![deny(unsafe_code)]

//! Temporary directory helpers for tests that need real files on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use tempfile::TempDir;

/// Temporary directory removed when dropped.
#[derive(Debug)]
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Creates a fresh temporary directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Returns the directory root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: impl AsRef<Path>, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Creates the directory `relative` and its parents.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Sets the modification time of `relative`.
    pub fn set_modified(&self, relative: impl AsRef<Path>, time: SystemTime) -> io::Result<()> {
        let path = self.dir.path().join(relative);
        filetime::set_file_mtime(path, FileTime::from_system_time(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_dir_cleans_up() {
        let path_copy;
        {
            let test_dir = TestDir::new().expect("create test dir");
            path_copy = test_dir.path().to_path_buf();
            assert!(path_copy.exists());
        }
        assert!(!path_copy.exists());
    }

    #[test]
    fn write_file_creates_parents() {
        let test_dir = TestDir::new().expect("create test dir");
        let path = test_dir
            .write_file("nested/dir/a.txt", b"content")
            .expect("write file");
        assert_eq!(fs::read(path).expect("read back"), b"content");
    }

    #[test]
    fn set_modified_updates_mtime() {
        let test_dir = TestDir::new().expect("create test dir");
        let path = test_dir.write_file("a.txt", b"x").expect("write file");
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        test_dir.set_modified("a.txt", time).expect("set mtime");
        let modified = fs::metadata(path).and_then(|m| m.modified()).expect("mtime");
        assert_eq!(modified, time);
    }
}
