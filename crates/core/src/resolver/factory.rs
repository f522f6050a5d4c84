//! Builds the resolution pipeline from configuration.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use super::RecommendationResolver;
use crate::config::{Config, RecommenderBackend, TextSourceBackend};
use crate::recommender::{
    CorpusRecommender, FallbackRecommender, RecommendError, Recommender, RemoteRecommender,
};
use crate::text_source::{AlQuranCloudClient, CorpusTextSource, TextSource, TextSourceError};
use crate::verse::{Corpus, CorpusError};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to load corpus: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Failed to create recommender: {0}")]
    Recommender(#[from] RecommendError),

    #[error("Failed to create text source: {0}")]
    TextSource(#[from] TextSourceError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Load the configured corpus file, or the built-in sample corpus.
pub fn load_corpus(config: &Config) -> Result<Arc<Corpus>, CorpusError> {
    let corpus = match &config.recommender.corpus_path {
        Some(path) => Corpus::from_json_file(path, &config.audio)?,
        None => Corpus::sample(&config.audio)?,
    };
    info!("Corpus loaded with {} verses", corpus.len());
    Ok(Arc::new(corpus))
}

/// Create the configured recommender.
pub fn create_recommender(
    config: &Config,
    corpus: Arc<Corpus>,
) -> Result<Arc<dyn Recommender>, SetupError> {
    let settings = &config.recommender;
    let corpus_recommender = || -> Arc<dyn Recommender> {
        Arc::new(CorpusRecommender::new(
            Arc::clone(&corpus),
            settings.widen_when_empty,
        ))
    };

    let recommender = match settings.backend {
        RecommenderBackend::Corpus => corpus_recommender(),
        RecommenderBackend::Remote => {
            let remote = settings.remote.clone().ok_or_else(|| {
                SetupError::Config("recommender.remote is required for the remote backend".into())
            })?;
            let remote: Arc<dyn Recommender> = Arc::new(RemoteRecommender::new(remote)?);
            if settings.fallback_to_corpus {
                Arc::new(FallbackRecommender::new(remote, corpus_recommender()))
            } else {
                remote
            }
        }
    };

    info!("Recommender backend: {}", recommender.name());
    Ok(recommender)
}

/// Create the configured text source.
pub fn create_text_source(
    config: &Config,
    corpus: Arc<Corpus>,
) -> Result<Arc<dyn TextSource>, SetupError> {
    let source: Arc<dyn TextSource> = match config.text_source.backend {
        TextSourceBackend::AlquranCloud => Arc::new(AlQuranCloudClient::new(
            config.text_source.alquran_cloud.clone(),
        )?),
        TextSourceBackend::Corpus => Arc::new(CorpusTextSource::new(corpus)),
    };

    info!("Text source backend: {}", source.name());
    Ok(source)
}

/// Create a resolver wired from configuration.
pub fn create_resolver(
    config: &Config,
    corpus: Arc<Corpus>,
) -> Result<RecommendationResolver, SetupError> {
    let recommender = create_recommender(config, Arc::clone(&corpus))?;
    let text_source = create_text_source(config, corpus)?;

    Ok(RecommendationResolver::new(recommender, text_source)
        .with_audio(config.audio.clone())
        .with_recommend_timeout(Duration::from_secs(config.recommender.timeout_secs)))
}
