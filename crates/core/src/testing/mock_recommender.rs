//! Mock recommender for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::facet::FacetSelection;
use crate::recommender::{RecommendError, Recommendation, Recommender};

/// Mock implementation of the Recommender trait.
///
/// Provides controllable behavior for testing:
/// - Fixed candidate lists
/// - One-shot error injection
/// - Artificial latency for timeout tests
/// - Recorded selections for assertions
///
/// # Example
///
/// ```rust,ignore
/// use verse_core::testing::MockRecommender;
///
/// let recommender = MockRecommender::with_pairs(&[(2, 255)]);
/// recommender.set_delay(Duration::from_secs(5)).await;
///
/// let result = recommender.recommend(&selection).await?;
/// assert_eq!(recommender.call_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockRecommender {
    /// Candidates returned by every successful call.
    results: Arc<RwLock<Vec<Recommendation>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<RecommendError>>>,
    /// Delay before answering.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Selections received.
    selections: Arc<RwLock<Vec<FacetSelection>>>,
}

impl Default for MockRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecommender {
    /// Create a mock that returns no candidates.
    pub fn new() -> Self {
        Self::from_results(Vec::new())
    }

    /// Create a mock that returns the given reference pairs.
    pub fn with_pairs(pairs: &[(i64, i64)]) -> Self {
        Self::from_results(
            pairs
                .iter()
                .map(|&(surah, verse)| Recommendation::bare(surah, verse))
                .collect(),
        )
    }

    fn from_results(results: Vec<Recommendation>) -> Self {
        Self {
            results: Arc::new(RwLock::new(results)),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
            selections: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the candidate list.
    pub async fn set_results(&self, results: Vec<Recommendation>) {
        *self.results.write().await = results;
    }

    /// Make the next call fail.
    pub async fn set_next_error(&self, error: RecommendError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every answer.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Selections received so far.
    pub async fn recorded_selections(&self) -> Vec<FacetSelection> {
        self.selections.read().await.clone()
    }

    /// Number of recommend calls.
    pub async fn call_count(&self) -> usize {
        self.selections.read().await.len()
    }
}

#[async_trait]
impl Recommender for MockRecommender {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recommend(
        &self,
        selection: &FacetSelection,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        self.selections.write().await.push(selection.clone());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self.results.read().await.clone())
    }
}
