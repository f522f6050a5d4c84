//! Verse text retrieval.
//!
//! A [`TextSource`] returns one part of a verse (Arabic or translation)
//! together with whatever surah metadata the source knows. The resolver
//! fetches both parts independently so either can degrade alone.

mod alquran_cloud;
mod corpus;

pub use alquran_cloud::{AlQuranCloudClient, AlQuranCloudConfig};
pub use corpus::CorpusTextSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::verse::VerseRef;

/// Errors that can occur when fetching verse text.
#[derive(Debug, Error)]
pub enum TextSourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Verse or edition not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Which text of a verse to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPart {
    Arabic,
    Translation,
}

impl TextPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextPart::Arabic => "arabic",
            TextPart::Translation => "translation",
        }
    }
}

/// Text for one part of a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AyahText {
    pub text: String,
    /// Surah name in English, when the source reports it.
    pub surah_name: Option<String>,
    /// "Meccan" or "Medinan", when the source reports it.
    pub revelation_type: Option<String>,
}

impl AyahText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            surah_name: None,
            revelation_type: None,
        }
    }
}

/// Map a revelation type to the location facet value.
pub fn location_for_revelation(revelation_type: &str) -> Option<&'static str> {
    match revelation_type.trim().to_ascii_lowercase().as_str() {
        "meccan" | "makki" | "makkah" => Some("makkah"),
        "medinan" | "madani" | "madinah" => Some("madinah"),
        _ => None,
    }
}

/// A source of verse text.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Source name for logs.
    fn name(&self) -> &'static str;

    /// Fetch one part of the given verse.
    async fn fetch(&self, reference: VerseRef, part: TextPart) -> Result<AyahText, TextSourceError>;
}
