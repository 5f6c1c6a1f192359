//! File system abstraction
//!
//! The stager and synchronizer talk to the filesystem through this trait so
//! their decision logic can be unit-tested against `MockFileSystem` without
//! touching disk. `LocalFs` is the real implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{GoliveError, GoliveResult};

/// Abstract file system interface
pub trait FileSystem {
    /// Check if a path exists (file or directory)
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> GoliveResult<()>;

    /// Read file content as bytes
    fn read(&self, path: &Path) -> GoliveResult<Vec<u8>>;

    /// Write file content atomically (tempfile + rename)
    fn write_atomic(&self, path: &Path, content: &[u8]) -> GoliveResult<()>;

    /// Compute SHA256 hash of file content
    fn hash_file(&self, path: &Path) -> GoliveResult<String>;
}

/// Compute SHA-256 hash of in-memory content
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}

/// Expand ~ to the user home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let p = path.to_string_lossy();
    if let Some(rest) = p.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if p == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    path.to_path_buf()
}

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> GoliveResult<()> {
        std::fs::create_dir_all(path).map_err(GoliveError::Io)
    }

    fn read(&self, path: &Path) -> GoliveResult<Vec<u8>> {
        std::fs::read(path).map_err(GoliveError::Io)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> GoliveResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        // Tempfile in the destination directory so the rename stays on one filesystem
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(content)?;
        tmp.persist(path)
            .map_err(|e| GoliveError::Io(e.error))?;
        Ok(())
    }

    fn hash_file(&self, path: &Path) -> GoliveResult<String> {
        let content = self.read(path)?;
        Ok(hash_content(&content))
    }
}

/// Mock file system for testing
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[cfg(test)]
#[derive(Clone)]
pub struct MockFileSystem {
    pub files: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<PathBuf, Vec<u8>>>>,
    pub dirs: std::sync::Arc<std::sync::Mutex<std::collections::HashSet<PathBuf>>>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: std::sync::Arc::new(std::sync::Mutex::new(std::collections::HashMap::new())),
            dirs: std::sync::Arc::new(std::sync::Mutex::new(std::collections::HashSet::new())),
        }
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, content: &[u8]) {
        self.files.lock().unwrap().insert(path.into(), content.to_vec());
    }

    pub fn file_content(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

#[cfg(test)]
impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> GoliveResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> GoliveResult<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            GoliveError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "file not found",
            ))
        })
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> GoliveResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn hash_file(&self, path: &Path) -> GoliveResult<String> {
        let content = self.read(path)?;
        Ok(hash_content(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        let fs = LocalFs::new();
        fs.write_atomic(&path, b"Hello, World!").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hello, World!");
    }

    #[test]
    fn atomic_write_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        fs::write(&path, "Original").unwrap();
        LocalFs::new().write_atomic(&path, b"Replaced").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Replaced");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("test.txt");

        LocalFs::new().write_atomic(&path, b"content").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn hash_content_works() {
        let hash = hash_content(b"Hello, World!");
        assert!(hash.starts_with("sha256:"));
        // SHA-256 is 64 hex chars + "sha256:" prefix
        assert_eq!(hash.len(), 71);
    }

    #[test]
    fn hash_file_matches_hash_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, "Content").unwrap();

        let hash = LocalFs::new().hash_file(&path).unwrap();
        assert_eq!(hash, hash_content(b"Content"));
    }

    #[test]
    fn mock_fs_tracks_files_and_dirs() {
        let fs = MockFileSystem::new();
        fs.insert_file("/live/data.csv", b"pairs-v1");

        assert!(fs.exists(Path::new("/live/data.csv")));
        assert!(!fs.is_dir(Path::new("/live/data.csv")));

        fs.create_dir_all(Path::new("/live/output")).unwrap();
        assert!(fs.is_dir(Path::new("/live/output")));
        assert!(fs.is_dir(Path::new("/live")));
    }
}
