//! Text source that serves verses from the local corpus.

use std::sync::Arc;

use async_trait::async_trait;

use super::{AyahText, TextPart, TextSource, TextSourceError};
use crate::verse::{Corpus, VerseRef};

/// Serves Arabic text and translation straight from corpus records.
///
/// Verses outside the corpus are reported as not found, as is a missing
/// translation.
pub struct CorpusTextSource {
    corpus: Arc<Corpus>,
}

impl CorpusTextSource {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }
}

#[async_trait]
impl TextSource for CorpusTextSource {
    fn name(&self) -> &'static str {
        "corpus"
    }

    async fn fetch(&self, reference: VerseRef, part: TextPart) -> Result<AyahText, TextSourceError> {
        let record = self
            .corpus
            .get(reference)
            .ok_or_else(|| TextSourceError::NotFound(reference.to_string()))?;

        let text = match part {
            TextPart::Arabic => record.arabic_text.clone(),
            TextPart::Translation => record.translation.clone().ok_or_else(|| {
                TextSourceError::NotFound(format!("translation for {}", reference))
            })?,
        };

        Ok(AyahText {
            text,
            surah_name: Some(record.surah_name.clone()),
            revelation_type: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verse::AudioUrlTemplate;

    fn source() -> CorpusTextSource {
        CorpusTextSource::new(Arc::new(Corpus::sample(&AudioUrlTemplate::default()).unwrap()))
    }

    #[tokio::test]
    async fn test_fetch_both_parts() {
        let source = source();
        let reference = VerseRef::new(96, 1).unwrap();

        let arabic = source.fetch(reference, TextPart::Arabic).await.unwrap();
        let translation = source.fetch(reference, TextPart::Translation).await.unwrap();

        assert!(!arabic.text.is_empty());
        assert!(translation.text.starts_with("Read in the name"));
        assert_eq!(arabic.surah_name.as_deref(), Some("Al-Alaq"));
    }

    #[tokio::test]
    async fn test_unknown_verse_is_not_found() {
        let result = source()
            .fetch(VerseRef::new(1, 1).unwrap(), TextPart::Arabic)
            .await;
        assert!(matches!(result, Err(TextSourceError::NotFound(_))));
    }
}
