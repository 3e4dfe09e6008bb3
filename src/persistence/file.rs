//! Native best score file

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{ScoreStore, StoreError, parse_score};

/// File name inside the per-user data directory
pub const BEST_FILE_NAME: &str = "best_score.txt";

/// Best score kept as decimal text in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `best_score.txt` in the platform's per-user data directory, if it has one
    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "sky-flap")?;
        Some(dirs.data_dir().join(BEST_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_score(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        // Write beside the target then rename so a crash never leaves half a number
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, best.to_string())?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", best, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sky-flap-{}-{}.txt", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_absent() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.save(31).unwrap();
        assert_eq!(store.load().unwrap(), Some(31));
        assert_eq!(fs::read_to_string(&path).unwrap(), "31");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = std::env::temp_dir().join(format!("sky-flap-dir-{}", std::process::id()));
        let path = dir.join("nested").join(BEST_FILE_NAME);
        let mut store = FileStore::new(&path);
        store.save(12).unwrap();
        assert_eq!(store.load().unwrap(), Some(12));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_path_is_per_user() {
        // Headless machines may have no home directory at all
        if let Some(path) = FileStore::default_path() {
            assert!(path.is_absolute());
            assert!(path.ends_with(BEST_FILE_NAME));
        }
    }

    #[test]
    fn test_garbage_is_absent() {
        let path = temp_path("garbage");
        fs::write(&path, "not a number").unwrap();
        let store = FileStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        let _ = fs::remove_file(&path);
    }
}
