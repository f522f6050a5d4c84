//! Verse identity and record types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::facet::Facet;

/// Number of surahs in the Quran.
pub const SURAH_COUNT: i64 = 114;

/// A reference as received from a recommendation source, before validation.
///
/// Serialized as a two-element array: `[surah, verse]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePair(pub i64, pub i64);

/// Rejected reference pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid reference {surah}:{verse}")]
pub struct InvalidReference {
    pub surah: i64,
    pub verse: i64,
}

/// A validated (surah, verse) reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "VerseRefWire", into = "VerseRefWire")]
pub struct VerseRef {
    surah: u16,
    verse: u16,
}

impl VerseRef {
    /// Validate a reference: surah in `1..=114`, verse at least 1.
    pub fn new(surah: i64, verse: i64) -> Result<Self, InvalidReference> {
        let invalid = InvalidReference { surah, verse };
        if !(1..=SURAH_COUNT).contains(&surah) || verse < 1 {
            return Err(invalid);
        }
        let verse = u16::try_from(verse).map_err(|_| invalid)?;
        Ok(Self {
            surah: surah as u16,
            verse,
        })
    }

    pub fn surah(&self) -> u16 {
        self.surah
    }

    pub fn verse(&self) -> u16 {
        self.verse
    }

    /// The unvalidated pair form of this reference.
    pub fn pair(&self) -> ReferencePair {
        ReferencePair(self.surah as i64, self.verse as i64)
    }
}

impl TryFrom<ReferencePair> for VerseRef {
    type Error = InvalidReference;

    fn try_from(pair: ReferencePair) -> Result<Self, Self::Error> {
        VerseRef::new(pair.0, pair.1)
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.verse)
    }
}

#[derive(Serialize, Deserialize)]
struct VerseRefWire {
    surah_number: i64,
    verse_number: i64,
}

impl TryFrom<VerseRefWire> for VerseRef {
    type Error = InvalidReference;

    fn try_from(wire: VerseRefWire) -> Result<Self, Self::Error> {
        VerseRef::new(wire.surah_number, wire.verse_number)
    }
}

impl From<VerseRef> for VerseRefWire {
    fn from(r: VerseRef) -> Self {
        Self {
            surah_number: r.surah as i64,
            verse_number: r.verse as i64,
        }
    }
}

/// Facet tags a verse satisfies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTags {
    #[serde(default)]
    pub themes: BTreeSet<String>,
    #[serde(default)]
    pub audience: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl FacetTags {
    /// Whether these tags satisfy `facet == value`.
    ///
    /// Multi-valued facets match on membership, the rest on equality.
    pub fn matches(&self, facet: Facet, value: &str) -> bool {
        match facet {
            Facet::Theme => self.themes.contains(value),
            Facet::Audience => self.audience.contains(value),
            Facet::Length => self.length.as_deref() == Some(value),
            Facet::Tone => self.tone.as_deref() == Some(value),
            Facet::Location => self.location.as_deref() == Some(value),
        }
    }

    /// Set a tag value. Multi-valued facets accumulate.
    pub fn insert(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        match facet {
            Facet::Theme => {
                self.themes.insert(value);
            }
            Facet::Audience => {
                self.audience.insert(value);
            }
            Facet::Length => self.length = Some(value),
            Facet::Tone => self.tone = Some(value),
            Facet::Location => self.location = Some(value),
        }
    }
}

/// A fully resolved verse.
///
/// The JSON shape is flat so it can be stored and exchanged as-is:
/// `surah_number`, `verse_number`, `surah_name`, `text`, `translation`,
/// `audio`, and the tag fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    #[serde(flatten)]
    pub reference: VerseRef,
    pub surah_name: String,
    #[serde(rename = "text")]
    pub arabic_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(rename = "audio", default)]
    pub audio_url: String,
    #[serde(flatten)]
    pub tags: FacetTags,
}

impl VerseRecord {
    pub fn surah(&self) -> u16 {
        self.reference.surah()
    }

    pub fn verse(&self) -> u16 {
        self.reference.verse()
    }
}
