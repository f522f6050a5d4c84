//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the recommendation and
//! text source traits plus deterministic index pickers, so the resolution
//! pipeline can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use verse_core::testing::{FixedPicker, MockRecommender, MockTextSource};
//!
//! let recommender = MockRecommender::with_pairs(&[(2, 255)]);
//! let text_source = MockTextSource::new();
//! text_source.fail_part(TextPart::Translation).await;
//!
//! let resolver = RecommendationResolver::new(Arc::new(recommender), Arc::new(text_source))
//!     .with_picker(Arc::new(FixedPicker::new(0)));
//! ```

mod mock_recommender;
mod mock_text_source;
mod pickers;

pub use mock_recommender::MockRecommender;
pub use mock_text_source::MockTextSource;
pub use pickers::{FixedPicker, SequencePicker};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::facet::{Facet, FacetSelection};
    use crate::verse::{AudioUrlTemplate, Corpus, FacetTags, VerseRecord, VerseRef};

    /// The built-in sample corpus with default audio URLs.
    pub fn sample_corpus() -> Corpus {
        Corpus::sample(&AudioUrlTemplate::default()).expect("sample corpus is valid")
    }

    /// A verse record with placeholder text and the given tags.
    pub fn verse_record(surah: i64, verse: i64, tags: FacetTags) -> VerseRecord {
        let reference = VerseRef::new(surah, verse).expect("valid reference");
        VerseRecord {
            reference,
            surah_name: format!("Surah {}", surah),
            arabic_text: format!("arabic {}", reference),
            translation: Some(format!("translation {}", reference)),
            audio_url: AudioUrlTemplate::default().url_for(reference),
            tags,
        }
    }

    /// Tags built from `(facet, value)` pairs.
    pub fn tags(values: &[(Facet, &str)]) -> FacetTags {
        let mut tags = FacetTags::default();
        for &(facet, value) in values {
            tags.insert(facet, value);
        }
        tags
    }

    /// A selection built from `(facet, value)` pairs.
    pub fn selection(values: &[(Facet, &str)]) -> FacetSelection {
        values
            .iter()
            .fold(FacetSelection::new(), |s, &(facet, value)| s.with(facet, value))
    }

    /// A selection with every facet set.
    pub fn full_selection() -> FacetSelection {
        selection(&[
            (Facet::Theme, "knowledge"),
            (Facet::Audience, "believers"),
            (Facet::Length, "short"),
            (Facet::Tone, "command"),
            (Facet::Location, "makkah"),
        ])
    }
}
