//! Browser LocalStorage backend

use super::{BEST_SCORE_KEY, ScoreStore, StoreError, parse_score};

/// Best score in `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        let item = storage
            .get_item(BEST_SCORE_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        Ok(item.as_deref().and_then(parse_score))
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(BEST_SCORE_KEY, &best.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Best score saved ({})", best);
        Ok(())
    }
}
