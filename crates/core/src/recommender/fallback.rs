//! Primary/secondary recommender composition.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{RecommendError, Recommendation, Recommender};
use crate::facet::FacetSelection;
use crate::metrics::RECOMMENDER_FALLBACKS;

/// Asks the primary first and the fallback only when the primary is
/// unavailable. "Not found" and rejected requests are passed through.
pub struct FallbackRecommender {
    primary: Arc<dyn Recommender>,
    fallback: Arc<dyn Recommender>,
}

impl FallbackRecommender {
    pub fn new(primary: Arc<dyn Recommender>, fallback: Arc<dyn Recommender>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Recommender for FallbackRecommender {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn recommend(
        &self,
        selection: &FacetSelection,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        match self.primary.recommend(selection).await {
            Err(e) if e.is_unavailable() => {
                warn!(
                    "{} recommender unavailable ({}), using {}",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                );
                RECOMMENDER_FALLBACKS.inc();
                self.fallback.recommend(selection).await
            }
            other => other,
        }
    }
}
