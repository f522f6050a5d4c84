//! Recommender backed by the local corpus.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{RecommendError, Recommendation, Recommender};
use crate::facet::FacetSelection;
use crate::metrics::CORPUS_WIDENED;
use crate::verse::{Corpus, VerseRecord};

/// Filters the in-memory corpus with the facet selection.
///
/// With `widen_when_empty`, a selection that matches nothing falls back to
/// the whole corpus so the user still gets a verse.
pub struct CorpusRecommender {
    corpus: Arc<Corpus>,
    widen_when_empty: bool,
}

impl CorpusRecommender {
    pub fn new(corpus: Arc<Corpus>, widen_when_empty: bool) -> Self {
        Self {
            corpus,
            widen_when_empty,
        }
    }

    /// References matching the selection, without widening.
    pub fn matching(&self, selection: &FacetSelection) -> Vec<Recommendation> {
        self.corpus.filter(selection).into_iter().map(to_recommendation).collect()
    }
}

fn to_recommendation(record: &VerseRecord) -> Recommendation {
    Recommendation {
        reference: record.reference.pair(),
        tags: Some(record.tags.clone()),
    }
}

#[async_trait]
impl Recommender for CorpusRecommender {
    fn name(&self) -> &'static str {
        "corpus"
    }

    async fn recommend(
        &self,
        selection: &FacetSelection,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let matches = self.matching(selection);
        debug!(
            "Corpus filter matched {} of {} verses",
            matches.len(),
            self.corpus.len()
        );

        if matches.is_empty() && self.widen_when_empty {
            info!(
                "No verse matched {} constraint(s), widening to full corpus",
                selection.len()
            );
            CORPUS_WIDENED.inc();
            return Ok(self.corpus.records().iter().map(to_recommendation).collect());
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::Facet;
    use crate::verse::{AudioUrlTemplate, ReferencePair};

    fn corpus() -> Arc<Corpus> {
        Arc::new(Corpus::sample(&AudioUrlTemplate::default()).unwrap())
    }

    #[tokio::test]
    async fn test_recommends_matching_verses_with_tags() {
        let recommender = CorpusRecommender::new(corpus(), false);
        let selection = FacetSelection::new().with(Facet::Theme, "charity");
        let result = recommender.recommend(&selection).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].reference, ReferencePair(2, 261));
        let tags = result[0].tags.as_ref().unwrap();
        assert!(tags.themes.contains("charity"));
    }

    #[tokio::test]
    async fn test_empty_match_without_widening() {
        let recommender = CorpusRecommender::new(corpus(), false);
        let selection = FacetSelection::new()
            .with(Facet::Theme, "charity")
            .with(Facet::Tone, "warning");
        assert!(recommender.recommend(&selection).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_match_widens_to_corpus() {
        let corpus = corpus();
        let recommender = CorpusRecommender::new(Arc::clone(&corpus), true);
        let selection = FacetSelection::new()
            .with(Facet::Theme, "charity")
            .with(Facet::Tone, "warning");
        let result = recommender.recommend(&selection).await.unwrap();
        assert_eq!(result.len(), corpus.len());
    }
}
