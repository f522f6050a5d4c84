//! In-memory verse corpus.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::{AudioUrlTemplate, VerseRecord, VerseRef};
use crate::facet::FacetSelection;
use crate::filter::filter_verses;

/// Sample dataset shipped with the crate.
const SAMPLE_CORPUS: &str = include_str!("../../data/sample_corpus.json");

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Corpus is empty")]
    Empty,
}

/// An ordered collection of tagged verse records.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<VerseRecord>,
}

impl Corpus {
    /// Build a corpus from records, filling in missing audio URLs.
    pub fn from_records(
        records: Vec<VerseRecord>,
        audio: &AudioUrlTemplate,
    ) -> Result<Self, CorpusError> {
        if records.is_empty() {
            return Err(CorpusError::Empty);
        }

        let records = records
            .into_iter()
            .map(|mut r| {
                if r.audio_url.is_empty() {
                    r.audio_url = audio.url_for(r.reference);
                }
                r
            })
            .collect();

        Ok(Self { records })
    }

    /// Parse a JSON array of verse records.
    pub fn from_json_str(json: &str, audio: &AudioUrlTemplate) -> Result<Self, CorpusError> {
        let records: Vec<VerseRecord> = serde_json::from_str(json)?;
        Self::from_records(records, audio)
    }

    /// Load a JSON corpus file.
    pub fn from_json_file(path: &Path, audio: &AudioUrlTemplate) -> Result<Self, CorpusError> {
        let json = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let corpus = Self::from_json_str(&json, audio)?;
        debug!("Loaded {} verses from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// The built-in sample corpus.
    pub fn sample(audio: &AudioUrlTemplate) -> Result<Self, CorpusError> {
        Self::from_json_str(SAMPLE_CORPUS, audio)
    }

    pub fn records(&self) -> &[VerseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the record for a reference.
    pub fn get(&self, reference: VerseRef) -> Option<&VerseRecord> {
        self.records.iter().find(|r| r.reference == reference)
    }

    /// Records matching a selection, in corpus order.
    pub fn filter(&self, selection: &FacetSelection) -> Vec<&VerseRecord> {
        filter_verses(&self.records, selection)
    }
}
