//! alquran.cloud API client.
//!
//! One request per verse part: `GET {base}/ayah/{surah}:{verse}/{edition}`.
//! The Arabic edition is a recitation edition so its surah metadata matches
//! the audio.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AyahText, TextPart, TextSource, TextSourceError};
use crate::metrics::observe_external_call;
use crate::verse::VerseRef;

/// alquran.cloud client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlQuranCloudConfig {
    /// Base URL (default: https://api.alquran.cloud/v1).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Edition for the Arabic text (default: ar.alafasy).
    #[serde(default = "default_arabic_edition")]
    pub arabic_edition: String,
    /// Edition for the translation (default: en.sahih).
    #[serde(default = "default_translation_edition")]
    pub translation_edition: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.alquran.cloud/v1".to_string()
}

fn default_arabic_edition() -> String {
    "ar.alafasy".to_string()
}

fn default_translation_edition() -> String {
    "en.sahih".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for AlQuranCloudConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            arabic_edition: default_arabic_edition(),
            translation_edition: default_translation_edition(),
            timeout_secs: default_timeout(),
        }
    }
}

/// alquran.cloud API client.
pub struct AlQuranCloudClient {
    client: Client,
    config: AlQuranCloudConfig,
}

impl AlQuranCloudClient {
    /// Create a new alquran.cloud client.
    pub fn new(config: AlQuranCloudConfig) -> Result<Self, TextSourceError> {
        let client = Client::builder()
            .user_agent(format!("verse-journey/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn edition(&self, part: TextPart) -> &str {
        match part {
            TextPart::Arabic => &self.config.arabic_edition,
            TextPart::Translation => &self.config.translation_edition,
        }
    }

    fn ayah_url(&self, reference: VerseRef, part: TextPart) -> String {
        format!(
            "{}/ayah/{}:{}/{}",
            self.config.base_url.trim_end_matches('/'),
            reference.surah(),
            reference.verse(),
            self.edition(part)
        )
    }

    async fn get_ayah(&self, url: &str, reference: VerseRef) -> Result<AyahText, TextSourceError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == 404 {
            return Err(TextSourceError::NotFound(reference.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TextSourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: AqcResponse = response.json().await.map_err(|e| {
            TextSourceError::ParseError(format!("Failed to parse ayah response: {}", e))
        })?;

        match envelope.data {
            Some(data) if envelope.code == 200 => Ok(data.into()),
            _ => Err(TextSourceError::ApiError {
                status: envelope.code,
                message: envelope.status.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl TextSource for AlQuranCloudClient {
    fn name(&self) -> &'static str {
        "alquran_cloud"
    }

    async fn fetch(&self, reference: VerseRef, part: TextPart) -> Result<AyahText, TextSourceError> {
        let url = self.ayah_url(reference, part);
        debug!("alquran.cloud fetch: {}", url);

        let started = Instant::now();
        let result = self.get_ayah(&url, reference).await;
        observe_external_call(
            "alquran_cloud",
            part.as_str(),
            started.elapsed().as_secs_f64(),
            result.is_ok(),
        );

        if let Err(e) = &result {
            warn!("alquran.cloud {} fetch for {} failed: {}", part.as_str(), reference, e);
        }
        result
    }
}

// alquran.cloud API response types

#[derive(Debug, Deserialize)]
struct AqcResponse {
    code: u16,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<AqcAyah>,
}

#[derive(Debug, Deserialize)]
struct AqcAyah {
    text: String,
    #[serde(default)]
    surah: Option<AqcSurah>,
}

#[derive(Debug, Deserialize)]
struct AqcSurah {
    #[serde(rename = "englishName", default)]
    english_name: Option<String>,
    #[serde(rename = "revelationType", default)]
    revelation_type: Option<String>,
}

impl From<AqcAyah> for AyahText {
    fn from(ayah: AqcAyah) -> Self {
        let (surah_name, revelation_type) = match ayah.surah {
            Some(s) => (s.english_name, s.revelation_type),
            None => (None, None),
        };
        AyahText {
            text: ayah.text,
            surah_name,
            revelation_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ayah_url() {
        let client = AlQuranCloudClient::new(AlQuranCloudConfig {
            base_url: "https://api.alquran.cloud/v1/".to_string(),
            ..Default::default()
        })
        .unwrap();
        let reference = VerseRef::new(2, 255).unwrap();

        assert_eq!(
            client.ayah_url(reference, TextPart::Arabic),
            "https://api.alquran.cloud/v1/ayah/2:255/ar.alafasy"
        );
        assert_eq!(
            client.ayah_url(reference, TextPart::Translation),
            "https://api.alquran.cloud/v1/ayah/2:255/en.sahih"
        );
    }

    #[test]
    fn test_parse_ayah_response() {
        let json = r#"{
            "code": 200,
            "status": "OK",
            "data": {
                "number": 262,
                "text": "Allah - there is no deity except Him",
                "audio": "https://cdn.islamic.network/quran/audio/128/ar.alafasy/262.mp3",
                "numberInSurah": 255,
                "surah": {
                    "number": 2,
                    "name": "سُورَةُ البَقَرَةِ",
                    "englishName": "Al-Baqara",
                    "revelationType": "Medinan"
                }
            }
        }"#;

        let response: AqcResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.code, 200);
        let text: AyahText = response.data.unwrap().into();
        assert_eq!(text.text, "Allah - there is no deity except Him");
        assert_eq!(text.surah_name.as_deref(), Some("Al-Baqara"));
        assert_eq!(text.revelation_type.as_deref(), Some("Medinan"));
    }

    #[test]
    fn test_non_ok_code_has_no_data() {
        let response: AqcResponse =
            serde_json::from_str(r#"{"code": 400, "status": "Bad Request"}"#).unwrap();
        assert_eq!(response.code, 400);
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let client = AlQuranCloudClient::new(AlQuranCloudConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        let result = client
            .fetch(VerseRef::new(1, 1).unwrap(), TextPart::Arabic)
            .await;
        assert!(matches!(result, Err(TextSourceError::HttpError(_))));
    }
}
