//! SQLite-backed favorites store.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{insert_unique, remove_by_ref, FavoritesError, FavoritesStore};
use crate::verse::{VerseRecord, VerseRef};

/// Key of the favorites blob in the key-value table.
pub const FAVORITES_KEY: &str = "favoriteVerses";

/// Favorites persisted as a JSON array under one key of a key-value table.
pub struct SqliteFavoritesStore {
    conn: Mutex<Connection>,
}

impl SqliteFavoritesStore {
    /// Create a new store, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, FavoritesError> {
        let conn = Connection::open(path).map_err(|e| FavoritesError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, FavoritesError> {
        let conn =
            Connection::open_in_memory().map_err(|e| FavoritesError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), FavoritesError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| FavoritesError::Database(e.to_string()))?;

        Ok(())
    }

    fn read_blob(conn: &Connection) -> Result<Vec<VerseRecord>, FavoritesError> {
        let blob: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![FAVORITES_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| FavoritesError::Database(e.to_string()))?;

        match blob {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| FavoritesError::Corrupt(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn write_blob(conn: &Connection, verses: &[VerseRecord]) -> Result<(), FavoritesError> {
        let json =
            serde_json::to_string(verses).map_err(|e| FavoritesError::Internal(e.to_string()))?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![FAVORITES_KEY, json, Utc::now().to_rfc3339()],
        )
        .map_err(|e| FavoritesError::Database(e.to_string()))?;
        debug!("Stored {} favorite verse(s)", verses.len());
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, FavoritesError> {
        self.conn
            .lock()
            .map_err(|_| FavoritesError::Internal("connection lock poisoned".to_string()))
    }
}

impl FavoritesStore for SqliteFavoritesStore {
    fn list(&self) -> Result<Vec<VerseRecord>, FavoritesError> {
        let conn = self.lock()?;
        Self::read_blob(&conn)
    }

    fn add(&self, verse: &VerseRecord) -> Result<bool, FavoritesError> {
        let conn = self.lock()?;
        let mut verses = Self::read_blob(&conn)?;
        if !insert_unique(&mut verses, verse) {
            return Ok(false);
        }
        Self::write_blob(&conn, &verses)?;
        Ok(true)
    }

    fn remove(&self, reference: VerseRef) -> Result<bool, FavoritesError> {
        let conn = self.lock()?;
        let mut verses = Self::read_blob(&conn)?;
        if !remove_by_ref(&mut verses, reference) {
            return Ok(false);
        }
        Self::write_blob(&conn, &verses)?;
        Ok(true)
    }
}
