//! Facets and facet selections.
//!
//! A facet is one of the five independent dimensions a user can narrow the
//! corpus by. A [`FacetSelection`] holds at most one value per facet; an
//! unset facet places no constraint on the result.

mod catalog;

pub use catalog::{FacetCatalog, FacetOption, FacetStep};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five selection dimensions.
///
/// The declaration order is the order in which the wizard asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Theme,
    Audience,
    Length,
    Tone,
    Location,
}

impl Facet {
    /// All facets in wizard order.
    pub const ALL: [Facet; 5] = [
        Facet::Theme,
        Facet::Audience,
        Facet::Length,
        Facet::Tone,
        Facet::Location,
    ];

    /// Stable wire name of the facet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Theme => "theme",
            Facet::Audience => "audience",
            Facet::Length => "length",
            Facet::Tone => "tone",
            Facet::Location => "location",
        }
    }

    /// Whether records carry a set of tags for this facet rather than one value.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Facet::Theme | Facet::Audience)
    }

    /// Position of this facet in the wizard sequence.
    pub fn index(&self) -> usize {
        match self {
            Facet::Theme => 0,
            Facet::Audience => 1,
            Facet::Length => 2,
            Facet::Tone => 3,
            Facet::Location => 4,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "theme" => Ok(Facet::Theme),
            "audience" => Ok(Facet::Audience),
            "length" => Ok(Facet::Length),
            "tone" => Ok(Facet::Tone),
            "location" => Ok(Facet::Location),
            other => Err(format!("unknown facet: {}", other)),
        }
    }
}

/// A partial assignment of values to facets.
///
/// On the wire this is an object with all five facet keys, where an empty
/// string means "unconstrained":
///
/// ```json
/// { "theme": "patience", "audience": "", "length": "", "tone": "", "location": "" }
/// ```
///
/// A single facet cannot be unset: a selection only gains values, or is
/// replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionWire", into = "SelectionWire")]
pub struct FacetSelection {
    values: BTreeMap<Facet, String>,
}

impl FacetSelection {
    /// An empty selection with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper returning a selection with `facet` set to `value`.
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn with(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.set(facet, value);
        self
    }

    /// Record a value for a facet. Empty values are ignored.
    pub(crate) fn set(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.values.insert(facet, trimmed.to_string());
        }
    }

    /// The value selected for a facet, if any.
    pub fn get(&self, facet: Facet) -> Option<&str> {
        self.values.get(&facet).map(String::as_str)
    }

    /// Iterate over the constrained facets in wizard order.
    pub fn constraints(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Number of constrained facets.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no facet is constrained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Flat wire representation with one string per facet.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SelectionWire {
    #[serde(default)]
    theme: String,
    #[serde(default)]
    audience: String,
    #[serde(default)]
    length: String,
    #[serde(default)]
    tone: String,
    #[serde(default)]
    location: String,
}

impl From<SelectionWire> for FacetSelection {
    fn from(wire: SelectionWire) -> Self {
        FacetSelection::new()
            .with(Facet::Theme, wire.theme)
            .with(Facet::Audience, wire.audience)
            .with(Facet::Length, wire.length)
            .with(Facet::Tone, wire.tone)
            .with(Facet::Location, wire.location)
    }
}

impl From<FacetSelection> for SelectionWire {
    fn from(selection: FacetSelection) -> Self {
        let value = |facet| selection.get(facet).unwrap_or_default().to_string();
        SelectionWire {
            theme: value(Facet::Theme),
            audience: value(Facet::Audience),
            length: value(Facet::Length),
            tone: value(Facet::Tone),
            location: value(Facet::Location),
        }
    }
}
