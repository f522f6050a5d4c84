//! Mock text source for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::text_source::{AyahText, TextPart, TextSource, TextSourceError};
use crate::verse::VerseRef;

/// Mock implementation of the TextSource trait.
///
/// Answers every verse with configurable text. Unless set, the text is
/// `"<part> text for <surah>:<verse>"` and no surah metadata is reported.
#[derive(Debug)]
pub struct MockTextSource {
    texts: Arc<RwLock<HashMap<TextPart, String>>>,
    metadata: Arc<RwLock<Option<(String, String)>>>,
    failing: Arc<RwLock<HashSet<TextPart>>>,
    fetches: Arc<RwLock<Vec<(VerseRef, TextPart)>>>,
}

impl Default for MockTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextSource {
    /// Create a new mock text source.
    pub fn new() -> Self {
        Self {
            texts: Arc::new(RwLock::new(HashMap::new())),
            metadata: Arc::new(RwLock::new(None)),
            failing: Arc::new(RwLock::new(HashSet::new())),
            fetches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fixed text for a part.
    pub async fn set_text(&self, part: TextPart, text: impl Into<String>) {
        self.texts.write().await.insert(part, text.into());
    }

    /// Surah name and revelation type reported with every answer.
    pub async fn set_metadata(&self, surah_name: impl Into<String>, revelation_type: impl Into<String>) {
        *self.metadata.write().await = Some((surah_name.into(), revelation_type.into()));
    }

    /// Make every fetch of `part` fail.
    pub async fn fail_part(&self, part: TextPart) {
        self.failing.write().await.insert(part);
    }

    /// Fetches received so far.
    pub async fn fetches(&self) -> Vec<(VerseRef, TextPart)> {
        self.fetches.read().await.clone()
    }
}

#[async_trait]
impl TextSource for MockTextSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, reference: VerseRef, part: TextPart) -> Result<AyahText, TextSourceError> {
        self.fetches.write().await.push((reference, part));

        if self.failing.read().await.contains(&part) {
            return Err(TextSourceError::ApiError {
                status: 503,
                message: format!("mock {} failure", part.as_str()),
            });
        }

        let text = self
            .texts
            .read()
            .await
            .get(&part)
            .cloned()
            .unwrap_or_else(|| format!("{} text for {}", part.as_str(), reference));

        let (surah_name, revelation_type) = match self.metadata.read().await.clone() {
            Some((name, revelation)) => (Some(name), Some(revelation)),
            None => (None, None),
        };

        Ok(AyahText {
            text,
            surah_name,
            revelation_type,
        })
    }
}
