use std::sync::RwLock;

use super::{insert_unique, remove_by_ref, FavoritesError, FavoritesStore};
use crate::verse::{VerseRecord, VerseRef};

/// Favorites held in memory (useful for testing).
#[derive(Debug, Default)]
pub struct InMemoryFavoritesStore {
    verses: RwLock<Vec<VerseRecord>>,
}

impl InMemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> FavoritesError {
    FavoritesError::Internal("favorites lock poisoned".to_string())
}

impl FavoritesStore for InMemoryFavoritesStore {
    fn list(&self) -> Result<Vec<VerseRecord>, FavoritesError> {
        Ok(self.verses.read().map_err(poisoned)?.clone())
    }

    fn add(&self, verse: &VerseRecord) -> Result<bool, FavoritesError> {
        let mut verses = self.verses.write().map_err(poisoned)?;
        Ok(insert_unique(&mut verses, verse))
    }

    fn remove(&self, reference: VerseRef) -> Result<bool, FavoritesError> {
        let mut verses = self.verses.write().map_err(poisoned)?;
        Ok(remove_by_ref(&mut verses, reference))
    }
}
