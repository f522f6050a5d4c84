//! HTTP client for the recommendation endpoint.
//!
//! The endpoint takes the facet selection as a JSON body and answers with
//! an envelope:
//! - `{"success": true, "data": [[2, 255], ...], "total_found": 1}`
//! - `{"success": true, "data": [], "message": "No matching verses found"}`
//! - `{"success": false, "error": "...", "details": [...]}` with 4xx/5xx
//!
//! The service validates location as `makki`/`madani`, so canonical
//! location values are sent in that spelling unless `location_aliases`
//! is turned off.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{RecommendError, Recommendation, Recommender};
use crate::facet::{Facet, FacetCatalog, FacetSelection};
use crate::metrics::observe_external_call;
use crate::verse::ReferencePair;

/// Remote recommendation endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRecommenderConfig {
    /// Full URL of the endpoint (e.g., "http://localhost:5000/recommend").
    pub url: String,
    /// Per-request timeout in seconds (default: 5).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Send alternate facet spellings (`makki`/`madani`) instead of the
    /// canonical ones (default: true).
    #[serde(default = "default_location_aliases")]
    pub location_aliases: bool,
}

fn default_timeout() -> u64 {
    5
}

fn default_location_aliases() -> bool {
    true
}

/// Recommender that calls a remote endpoint.
pub struct RemoteRecommender {
    client: Client,
    url: String,
    location_aliases: bool,
}

impl RemoteRecommender {
    /// Create a new remote recommender.
    pub fn new(config: RemoteRecommenderConfig) -> Result<Self, RecommendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url,
            location_aliases: config.location_aliases,
        })
    }
}

/// Outgoing request body; unset facets are sent as empty strings.
#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    theme: &'a str,
    audience: &'a str,
    length: &'a str,
    tone: &'a str,
    location: &'a str,
}

impl<'a> RecommendRequest<'a> {
    fn new(selection: &'a FacetSelection, use_aliases: bool) -> Self {
        Self {
            theme: wire_value(selection, Facet::Theme, use_aliases),
            audience: wire_value(selection, Facet::Audience, use_aliases),
            length: wire_value(selection, Facet::Length, use_aliases),
            tone: wire_value(selection, Facet::Tone, use_aliases),
            location: wire_value(selection, Facet::Location, use_aliases),
        }
    }
}

fn wire_value(selection: &FacetSelection, facet: Facet, use_aliases: bool) -> &str {
    let value = selection.get(facet).unwrap_or_default();
    if use_aliases {
        FacetCatalog::alias_of(facet, value).unwrap_or(value)
    } else {
        value
    }
}

#[derive(Debug, Deserialize)]
struct RecommendEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<ReferencePair>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Vec<String>,
}

impl RecommendEnvelope {
    fn error_message(&self) -> String {
        let mut message = self.error.clone().unwrap_or_default();
        if !self.details.is_empty() {
            message.push_str(": ");
            message.push_str(&self.details.join("; "));
        }
        message
    }
}

#[async_trait]
impl Recommender for RemoteRecommender {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn recommend(
        &self,
        selection: &FacetSelection,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        debug!("Remote recommend: url={}, constraints={}", self.url, selection.len());
        let started = Instant::now();

        let result = self.send(selection).await;
        observe_external_call(
            "recommendation",
            "recommend",
            started.elapsed().as_secs_f64(),
            result.is_ok(),
        );
        result
    }
}

impl RemoteRecommender {
    async fn send(&self, selection: &FacetSelection) -> Result<Vec<Recommendation>, RecommendError> {
        let request = RecommendRequest::new(selection, self.location_aliases);
        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RecommendError::NotFound(self.url.clone()));
        }

        let body = response.text().await?;
        let envelope: Option<RecommendEnvelope> = serde_json::from_str(&body).ok();

        if status.is_server_error() {
            let message = envelope
                .map(|e| e.error_message())
                .unwrap_or_else(|| body.chars().take(200).collect());
            warn!("Recommendation service error {}: {}", status, message);
            return Err(RecommendError::Server {
                status: status.as_u16(),
                message,
            });
        }
        if status.is_client_error() {
            let message = envelope
                .map(|e| e.error_message())
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(RecommendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = envelope.ok_or_else(|| {
            RecommendError::InvalidResponse(format!(
                "Failed to parse recommend response: {}",
                body.chars().take(200).collect::<String>()
            ))
        })?;

        if !envelope.success {
            return Err(RecommendError::InvalidResponse(envelope.error_message()));
        }

        Ok(envelope
            .data
            .into_iter()
            .map(|reference| Recommendation {
                reference,
                tags: None,
            })
            .collect())
    }
}
