//! Recommendation stage backends.
//!
//! A [`Recommender`] turns a facet selection into candidate verse
//! references. Backends:
//! - [`CorpusRecommender`]: filters the local corpus
//! - [`RemoteRecommender`]: calls the recommendation endpoint over HTTP
//! - [`FallbackRecommender`]: primary backend with a secondary for outages

mod corpus;
mod fallback;
mod remote;

pub use corpus::CorpusRecommender;
pub use fallback::FallbackRecommender;
pub use remote::{RemoteRecommender, RemoteRecommenderConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::facet::FacetSelection;
use crate::verse::{FacetTags, ReferencePair};

/// Errors from a recommendation backend.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The service could not be reached (DNS, connect, reset).
    #[error("Recommendation service unreachable: {0}")]
    Unreachable(String),

    /// The service did not answer in time.
    #[error("Recommendation request timed out")]
    Timeout,

    /// The service reported 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service failed with a 5xx status.
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// The service rejected the request (4xx other than 404).
    #[error("Request rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// The response could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RecommendError {
    /// Whether the error means the backend is down rather than that the
    /// request itself was bad.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RecommendError::Unreachable(_)
                | RecommendError::Timeout
                | RecommendError::Server { .. }
                | RecommendError::InvalidResponse(_)
        )
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RecommendError::Timeout
        } else if e.is_decode() {
            RecommendError::InvalidResponse(e.to_string())
        } else {
            RecommendError::Unreachable(e.to_string())
        }
    }
}

/// One candidate returned by a recommender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Unvalidated reference as the backend reported it.
    pub reference: ReferencePair,
    /// Facet tags, when the backend knows them.
    pub tags: Option<FacetTags>,
}

impl Recommendation {
    /// A bare reference without tag information.
    pub fn bare(surah: i64, verse: i64) -> Self {
        Self {
            reference: ReferencePair(surah, verse),
            tags: None,
        }
    }
}

/// A source of verse recommendations for a selection.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Backend name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Candidate references for the selection. An empty list means nothing
    /// matched.
    async fn recommend(
        &self,
        selection: &FacetSelection,
    ) -> Result<Vec<Recommendation>, RecommendError>;
}
