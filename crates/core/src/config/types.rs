use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::recommender::RemoteRecommenderConfig;
use crate::text_source::AlQuranCloudConfig;
use crate::verse::AudioUrlTemplate;

/// Root configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub recommender: RecommenderConfig,
    #[serde(default)]
    pub text_source: TextSourceConfig,
    #[serde(default)]
    pub audio: AudioUrlTemplate,
    #[serde(default)]
    pub journeys: JourneysConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Database configuration (favorites store)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("verse-journey.db")
}

/// In-memory journey retention
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JourneysConfig {
    /// Journeys untouched for this long are dropped (default: 1 hour).
    #[serde(default = "default_journey_ttl")]
    pub ttl_secs: u64,
    /// Upper bound on journeys held at once; the least recently
    /// updated are dropped first (default: 10000).
    #[serde(default = "default_max_journeys")]
    pub max_active: usize,
}

impl Default for JourneysConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_journey_ttl(),
            max_active: default_max_journeys(),
        }
    }
}

fn default_journey_ttl() -> u64 {
    3600
}

fn default_max_journeys() -> usize {
    10_000
}

/// Available recommendation backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommenderBackend {
    /// Local corpus filtered by facet selection
    #[default]
    Corpus,
    /// Remote recommendation endpoint
    Remote,
}

impl RecommenderBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommenderBackend::Corpus => "corpus",
            RecommenderBackend::Remote => "remote",
        }
    }
}

/// Recommendation stage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommenderConfig {
    #[serde(default)]
    pub backend: RecommenderBackend,
    /// Bound on the whole recommend stage in seconds (default: 10)
    #[serde(default = "default_recommend_timeout")]
    pub timeout_secs: u64,
    /// Return the whole corpus when a corpus filter matches nothing (default: true)
    #[serde(default = "default_true")]
    pub widen_when_empty: bool,
    /// Answer from the corpus when the remote endpoint is unavailable (default: false)
    #[serde(default)]
    pub fallback_to_corpus: bool,
    /// JSON corpus file; the built-in sample corpus is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,
    /// Remote endpoint (required when backend = "remote")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteRecommenderConfig>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            backend: RecommenderBackend::default(),
            timeout_secs: default_recommend_timeout(),
            widen_when_empty: true,
            fallback_to_corpus: false,
            corpus_path: None,
            remote: None,
        }
    }
}

fn default_recommend_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// Available text source backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextSourceBackend {
    /// alquran.cloud v1 API
    #[default]
    AlquranCloud,
    /// Text from the loaded corpus (offline)
    Corpus,
}

impl TextSourceBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSourceBackend::AlquranCloud => "alquran_cloud",
            TextSourceBackend::Corpus => "corpus",
        }
    }
}

/// Text source configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TextSourceConfig {
    #[serde(default)]
    pub backend: TextSourceBackend,
    #[serde(flatten)]
    pub alquran_cloud: AlQuranCloudConfig,
}

/// Config view served by the API
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub recommender: SanitizedRecommenderConfig,
    pub text_source: SanitizedTextSourceConfig,
    pub audio: AudioUrlTemplate,
    pub journeys: JourneysConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRecommenderConfig {
    pub backend: String,
    pub timeout_secs: u64,
    pub widen_when_empty: bool,
    pub fallback_to_corpus: bool,
    pub corpus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTextSourceConfig {
    pub backend: String,
    pub base_url: String,
    pub arabic_edition: String,
    pub translation_edition: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let recommender = &config.recommender;
        let text = &config.text_source;
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            recommender: SanitizedRecommenderConfig {
                backend: recommender.backend.as_str().to_string(),
                timeout_secs: recommender.timeout_secs,
                widen_when_empty: recommender.widen_when_empty,
                fallback_to_corpus: recommender.fallback_to_corpus,
                corpus: recommender
                    .corpus_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "builtin".to_string()),
                remote_url: recommender.remote.as_ref().map(|r| r.url.clone()),
            },
            text_source: SanitizedTextSourceConfig {
                backend: text.backend.as_str().to_string(),
                base_url: text.alquran_cloud.base_url.clone(),
                arabic_edition: text.alquran_cloud.arabic_edition.clone(),
                translation_edition: text.alquran_cloud.translation_edition.clone(),
            },
            audio: config.audio.clone(),
            journeys: config.journeys.clone(),
        }
    }
}
