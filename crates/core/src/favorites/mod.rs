//! Saved verses.
//!
//! Favorites are kept as one ordered list of verse records, keyed by
//! (surah, verse). The resolution pipeline never touches this store; the
//! orchestrator saves verses after a successful resolution.

mod memory;
mod sqlite;

pub use memory::InMemoryFavoritesStore;
pub use sqlite::{SqliteFavoritesStore, FAVORITES_KEY};

use thiserror::Error;

use crate::verse::{VerseRecord, VerseRef};

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt favorites data: {0}")]
    Corrupt(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Trait for favorites storage.
pub trait FavoritesStore: Send + Sync {
    /// All saved verses, oldest first.
    fn list(&self) -> Result<Vec<VerseRecord>, FavoritesError>;

    /// Save a verse. Returns false if it was already saved.
    fn add(&self, verse: &VerseRecord) -> Result<bool, FavoritesError>;

    /// Remove a verse. Returns false if it was not saved.
    fn remove(&self, reference: VerseRef) -> Result<bool, FavoritesError>;

    /// Whether a verse is saved.
    fn contains(&self, reference: VerseRef) -> Result<bool, FavoritesError> {
        Ok(self.list()?.iter().any(|v| v.reference == reference))
    }
}

/// Append unless present.
fn insert_unique(list: &mut Vec<VerseRecord>, verse: &VerseRecord) -> bool {
    if list.iter().any(|v| v.reference == verse.reference) {
        return false;
    }
    list.push(verse.clone());
    true
}

/// Remove by reference.
fn remove_by_ref(list: &mut Vec<VerseRecord>, reference: VerseRef) -> bool {
    let before = list.len();
    list.retain(|v| v.reference != reference);
    list.len() != before
}
