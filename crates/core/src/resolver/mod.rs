//! Selection-to-verse resolution pipeline.
//!
//! Stages, strictly in order:
//! 1. Recommend: ask the recommender for candidates, bounded by a timeout
//! 2. Select: pick one candidate uniformly at random
//! 3. Validate: reject references outside the Quran's bounds
//! 4. Resolve text: fetch Arabic text and translation concurrently
//! 5. Synthesize the audio URL
//! 6. Assemble the verse record
//!
//! Stages 1-3 end the resolution with a [`Failure`]. A failed text fetch
//! is replaced by a placeholder and reported as [`ResolutionOutcome::PartialSuccess`].

mod factory;
mod outcome;
mod picker;

pub use factory::{
    create_recommender, create_resolver, create_text_source, load_corpus, SetupError,
};
pub use outcome::{
    DegradedField, Failure, FailureKind, ResolutionOutcome, ARABIC_PLACEHOLDER,
    TRANSLATION_PLACEHOLDER,
};
pub use picker::{IndexPicker, SeededPicker, ThreadRngPicker};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::facet::FacetSelection;
use crate::metrics::{RECOMMEND_DURATION, RESOLUTIONS, RESOLUTION_FAILURES, TEXT_DEGRADATIONS};
use crate::recommender::{Recommendation, Recommender};
use crate::text_source::{location_for_revelation, AyahText, TextPart, TextSource};
use crate::verse::{AudioUrlTemplate, FacetTags, VerseRecord, VerseRef};

/// Default bound on the recommend call.
pub const DEFAULT_RECOMMEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves facet selections into verse records.
pub struct RecommendationResolver {
    recommender: Arc<dyn Recommender>,
    text_source: Arc<dyn TextSource>,
    picker: Arc<dyn IndexPicker>,
    audio: AudioUrlTemplate,
    recommend_timeout: Duration,
}

impl RecommendationResolver {
    /// Create a resolver with a thread-RNG picker, default audio template
    /// and the default recommend timeout.
    pub fn new(recommender: Arc<dyn Recommender>, text_source: Arc<dyn TextSource>) -> Self {
        Self {
            recommender,
            text_source,
            picker: Arc::new(ThreadRngPicker),
            audio: AudioUrlTemplate::default(),
            recommend_timeout: DEFAULT_RECOMMEND_TIMEOUT,
        }
    }

    pub fn with_picker(mut self, picker: Arc<dyn IndexPicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn with_audio(mut self, audio: AudioUrlTemplate) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_recommend_timeout(mut self, timeout: Duration) -> Self {
        self.recommend_timeout = timeout;
        self
    }

    pub fn recommend_timeout(&self) -> Duration {
        self.recommend_timeout
    }

    /// Name of the configured recommender.
    pub fn recommender_name(&self) -> &'static str {
        self.recommender.name()
    }

    /// Run the full pipeline for a selection.
    pub async fn resolve(&self, selection: &FacetSelection) -> ResolutionOutcome {
        let outcome = match self.run(selection).await {
            Ok(outcome) => outcome,
            Err(failure) => {
                warn!(
                    "Resolution failed ({}): {}",
                    failure.kind.as_str(),
                    failure.detail
                );
                RESOLUTION_FAILURES
                    .with_label_values(&[failure.kind.as_str()])
                    .inc();
                ResolutionOutcome::Failure(failure)
            }
        };

        RESOLUTIONS.with_label_values(&[outcome.label()]).inc();
        outcome
    }

    async fn run(&self, selection: &FacetSelection) -> Result<ResolutionOutcome, Failure> {
        let candidates = self.recommend(selection).await?;
        if candidates.is_empty() {
            return Err(Failure::new(
                FailureKind::NotFound,
                format!("no recommendation for {} constraint(s)", selection.len()),
            ));
        }

        let index = self.picker.pick(candidates.len());
        let chosen = candidates
            .into_iter()
            .nth(index)
            .ok_or_else(|| Failure::new(FailureKind::NotFound, "picked index out of range"))?;

        let reference = VerseRef::try_from(chosen.reference)?;
        info!("Resolving verse {} via {}", reference, self.text_source.name());

        let (arabic, translation) = futures::future::join(
            self.fetch_part(reference, TextPart::Arabic),
            self.fetch_part(reference, TextPart::Translation),
        )
        .await;

        let audio_url = self.audio.url_for(reference);
        Ok(assemble(
            reference,
            chosen.tags,
            selection,
            arabic,
            translation,
            audio_url,
        ))
    }

    async fn recommend(&self, selection: &FacetSelection) -> Result<Vec<Recommendation>, Failure> {
        let started = Instant::now();
        let result =
            tokio::time::timeout(self.recommend_timeout, self.recommender.recommend(selection))
                .await;
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Err(_) => {
                RECOMMEND_DURATION.with_label_values(&["timeout"]).observe(elapsed);
                Err(Failure::new(
                    FailureKind::Timeout,
                    format!(
                        "{} recommender exceeded {:?}",
                        self.recommender.name(),
                        self.recommend_timeout
                    ),
                ))
            }
            Ok(Err(e)) => {
                RECOMMEND_DURATION.with_label_values(&["error"]).observe(elapsed);
                Err(Failure::from(e))
            }
            Ok(Ok(candidates)) => {
                RECOMMEND_DURATION.with_label_values(&["ok"]).observe(elapsed);
                debug!(
                    "{} recommender returned {} candidate(s)",
                    self.recommender.name(),
                    candidates.len()
                );
                Ok(candidates)
            }
        }
    }

    async fn fetch_part(&self, reference: VerseRef, part: TextPart) -> Option<AyahText> {
        match self.text_source.fetch(reference, part).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    "Degrading {} for {}: {}",
                    part.as_str(),
                    reference,
                    e
                );
                TEXT_DEGRADATIONS.with_label_values(&[part.as_str()]).inc();
                None
            }
        }
    }
}

fn assemble(
    reference: VerseRef,
    tags: Option<FacetTags>,
    selection: &FacetSelection,
    arabic: Option<AyahText>,
    translation: Option<AyahText>,
    audio_url: String,
) -> ResolutionOutcome {
    let mut tags = tags.unwrap_or_else(|| {
        let mut tags = FacetTags::default();
        for (facet, value) in selection.constraints() {
            tags.insert(facet, value);
        }
        tags
    });

    let metadata = [arabic.as_ref(), translation.as_ref()];
    if tags.location.is_none() {
        tags.location = metadata
            .iter()
            .flatten()
            .filter_map(|t| t.revelation_type.as_deref())
            .find_map(location_for_revelation)
            .map(str::to_string);
    }
    let surah_name = metadata
        .iter()
        .flatten()
        .find_map(|t| t.surah_name.clone())
        .unwrap_or_else(|| format!("Surah {}", reference.surah()));

    let mut degraded = Vec::new();
    let arabic_text = match arabic {
        Some(t) => t.text,
        None => {
            degraded.push(DegradedField::ArabicText);
            ARABIC_PLACEHOLDER.to_string()
        }
    };
    let translation = match translation {
        Some(t) => t.text,
        None => {
            degraded.push(DegradedField::Translation);
            TRANSLATION_PLACEHOLDER.to_string()
        }
    };

    let verse = VerseRecord {
        reference,
        surah_name,
        arabic_text,
        translation: Some(translation),
        audio_url,
        tags,
    };

    if degraded.is_empty() {
        ResolutionOutcome::Success { verse }
    } else {
        ResolutionOutcome::PartialSuccess { verse, degraded }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::Facet;
    use crate::recommender::RecommendError;
    use crate::testing::{FixedPicker, MockRecommender, MockTextSource, SequencePicker};

    fn resolver(recommender: MockRecommender, text: MockTextSource) -> RecommendationResolver {
        RecommendationResolver::new(Arc::new(recommender), Arc::new(text))
            .with_picker(Arc::new(FixedPicker::new(0)))
    }

    #[tokio::test]
    async fn test_success_populates_every_field() {
        let text = MockTextSource::new();
        text.set_text(TextPart::Arabic, "اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ").await;
        text.set_text(TextPart::Translation, "Allah - there is no deity except Him").await;
        text.set_metadata("Al-Baqara", "Medinan").await;

        let resolver = resolver(MockRecommender::with_pairs(&[(2, 255)]), text);
        let selection = FacetSelection::new().with(Facet::Theme, "knowledge");
        let outcome = resolver.resolve(&selection).await;

        assert!(outcome.is_success(), "unexpected outcome: {:?}", outcome);
        let verse = outcome.verse().unwrap();
        assert_eq!((verse.surah(), verse.verse()), (2, 255));
        assert_eq!(verse.surah_name, "Al-Baqara");
        assert_eq!(
            verse.translation.as_deref(),
            Some("Allah - there is no deity except Him")
        );
        assert!(verse.audio_url.ends_with("/002255.mp3"));
        assert!(verse.tags.themes.contains("knowledge"));
        assert_eq!(verse.tags.location.as_deref(), Some("madinah"));
    }

    #[tokio::test]
    async fn test_recommendation_tags_take_precedence() {
        let mut tags = FacetTags::default();
        tags.insert(Facet::Theme, "charity");
        tags.insert(Facet::Location, "madinah");
        let recommender = MockRecommender::new();
        recommender
            .set_results(vec![Recommendation {
                reference: crate::verse::ReferencePair(2, 261),
                tags: Some(tags.clone()),
            }])
            .await;

        let text = MockTextSource::new();
        text.set_metadata("Al-Baqara", "Meccan").await;
        let outcome = resolver(recommender, text)
            .resolve(&FacetSelection::new().with(Facet::Theme, "patience"))
            .await;

        assert_eq!(outcome.verse().unwrap().tags, tags);
    }

    #[tokio::test]
    async fn test_single_degraded_part() {
        let text = MockTextSource::new();
        text.fail_part(TextPart::Translation).await;

        let outcome = resolver(MockRecommender::with_pairs(&[(96, 1)]), text)
            .resolve(&FacetSelection::new())
            .await;

        match outcome {
            ResolutionOutcome::PartialSuccess { verse, degraded } => {
                assert_eq!(degraded, vec![DegradedField::Translation]);
                assert_ne!(verse.arabic_text, ARABIC_PLACEHOLDER);
                assert_eq!(verse.translation.as_deref(), Some(TRANSLATION_PLACEHOLDER));
            }
            other => panic!("expected partial success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_metadata_falls_back_to_surah_number() {
        let text = MockTextSource::new();
        text.fail_part(TextPart::Arabic).await;
        text.fail_part(TextPart::Translation).await;

        let outcome = resolver(MockRecommender::with_pairs(&[(103, 1)]), text)
            .resolve(&FacetSelection::new())
            .await;
        assert_eq!(outcome.verse().unwrap().surah_name, "Surah 103");
    }

    #[tokio::test]
    async fn test_invalid_reference_is_terminal() {
        let text = MockTextSource::new();
        let outcome = resolver(MockRecommender::with_pairs(&[(115, 1)]), text)
            .resolve(&FacetSelection::new())
            .await;

        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(FailureKind::InvalidReference)
        );
    }

    #[tokio::test]
    async fn test_text_is_not_fetched_after_recommend_failure() {
        let recommender = MockRecommender::new();
        recommender
            .set_next_error(RecommendError::Unreachable("connection refused".into()))
            .await;
        let text = Arc::new(MockTextSource::new());
        let resolver = RecommendationResolver::new(Arc::new(recommender), text.clone());

        let outcome = resolver.resolve(&FacetSelection::new()).await;
        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(FailureKind::NetworkUnavailable)
        );
        assert!(text.fetches().await.is_empty());
    }

    #[tokio::test]
    async fn test_picker_chooses_among_candidates() {
        let resolver = RecommendationResolver::new(
            Arc::new(MockRecommender::with_pairs(&[(2, 255), (96, 1), (17, 9)])),
            Arc::new(MockTextSource::new()),
        )
        .with_picker(Arc::new(SequencePicker::new(vec![2, 1])));

        let first = resolver.resolve(&FacetSelection::new()).await;
        let second = resolver.resolve(&FacetSelection::new()).await;

        assert_eq!(first.verse().unwrap().reference, VerseRef::new(17, 9).unwrap());
        assert_eq!(second.verse().unwrap().reference, VerseRef::new(96, 1).unwrap());
    }
}
