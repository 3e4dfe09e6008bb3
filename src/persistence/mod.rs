//! Best score persistence
//!
//! One integer under one key. Every backend is best-effort: the session
//! logs failures and carries on with what it has in memory.
//!
//! Backends:
//! - `MemoryStore`: tests and fallback
//! - `FileStore`: native, plain-text integer in a file
//! - `LocalStorageStore`: browser LocalStorage

use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "flappyHighScore";

/// Storage failure
#[derive(Debug)]
pub enum StoreError {
    /// Backend missing or refused the operation
    Unavailable(String),
    /// Filesystem error
    Io(std::io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Durable slot holding the best score
pub trait ScoreStore {
    /// Stored best score, `None` if nothing (valid) was stored yet
    fn load(&self) -> Result<Option<u32>, StoreError>;
    /// Overwrite the stored best score
    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

/// Parse stored text; anything that is not a non-negative integer counts as absent
pub fn parse_score(text: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(score) => Some(score),
        Err(_) => {
            log::warn!("Ignoring unreadable best score {:?}", text);
            None
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    /// Number of successful saves (lets tests check write-through)
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(best: u32) -> Self {
        Self {
            value: Some(best),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.value = Some(best);
        self.writes += 1;
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        (**self).save(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("42"), Some(42));
        assert_eq!(parse_score(" 7\n"), Some(7));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("-3"), None);
        assert_eq!(parse_score("lots"), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(12).unwrap();
        assert_eq!(store.load().unwrap(), Some(12));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::with_value(3));
        assert_eq!(store.load().unwrap(), Some(3));
        store.save(4).unwrap();
        assert_eq!(store.load().unwrap(), Some(4));
    }
}
