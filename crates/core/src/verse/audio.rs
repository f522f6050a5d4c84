//! Recitation audio URL synthesis.

use serde::{Deserialize, Serialize};

use super::VerseRef;

/// Template for per-verse recitation files.
///
/// URLs look like `{base_url}/{recitation_set}/SSSVVV.mp3`, with surah and
/// verse zero-padded to three digits and no separator between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioUrlTemplate {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recitation_set")]
    pub recitation_set: String,
}

fn default_base_url() -> String {
    "https://everyayah.com/data".to_string()
}

fn default_recitation_set() -> String {
    "Alafasy_128kbps".to_string()
}

impl Default for AudioUrlTemplate {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recitation_set: default_recitation_set(),
        }
    }
}

impl AudioUrlTemplate {
    /// Build the audio URL for a verse.
    pub fn url_for(&self, reference: VerseRef) -> String {
        format!(
            "{}/{}/{:03}{:03}.mp3",
            self.base_url.trim_end_matches('/'),
            self.recitation_set.trim_matches('/'),
            reference.surah(),
            reference.verse()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ayat_al_kursi_suffix() {
        let url = AudioUrlTemplate::default().url_for(VerseRef::new(2, 255).unwrap());
        assert_eq!(url, "https://everyayah.com/data/Alafasy_128kbps/002255.mp3");
        assert!(url.ends_with("002255.mp3"));
    }

    #[test]
    fn test_single_digit_padding() {
        let url = AudioUrlTemplate::default().url_for(VerseRef::new(1, 7).unwrap());
        assert!(url.ends_with("/001007.mp3"));
    }

    #[test]
    fn test_trailing_slashes_are_normalized() {
        let template = AudioUrlTemplate {
            base_url: "https://cdn.example.org/audio/".to_string(),
            recitation_set: "/Husary_64kbps/".to_string(),
        };
        assert_eq!(
            template.url_for(VerseRef::new(114, 6).unwrap()),
            "https://cdn.example.org/audio/Husary_64kbps/114006.mp3"
        );
    }
}
