use crate::core::Storage;
use crate::utils::error::{Result, SplitError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).map_err(|source| SplitError::OutputWriteError {
            path: self.base_path.clone(),
            source,
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        // Truncates whatever was there before.
        fs::write(&full_path, data).map_err(|source| SplitError::OutputWriteError {
            path: full_path,
            source,
        })
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("compose-services"));

        storage.prepare().unwrap();
        storage.prepare().unwrap();
        assert!(storage.root().is_dir());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        storage.prepare().unwrap();

        storage
            .write_file("radarr.yml", b"a much longer first version\n")
            .unwrap();
        storage.write_file("radarr.yml", b"short\n").unwrap();

        let written = fs::read_to_string(temp_dir.path().join("radarr.yml")).unwrap();
        assert_eq!(written, "short\n");
    }

    #[test]
    fn test_write_without_prepare_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("missing"));

        let err = storage.write_file("radarr.yml", b"x").unwrap_err();
        assert!(matches!(err, SplitError::OutputWriteError { .. }));
    }
}
