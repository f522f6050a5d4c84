//! Static catalog of selectable facet values.

use serde::Serialize;

use super::Facet;

/// A selectable value for one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    /// Stable identifier used as the filter key.
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Illustration shown next to the option.
    pub image: &'static str,
    pub description: &'static str,
}

/// One wizard step: a facet plus the copy and options shown for it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FacetStep {
    pub facet: Facet,
    pub title: &'static str,
    pub description: &'static str,
    pub background_image: &'static str,
    pub options: &'static [FacetOption],
}

/// Read-only lookup over the facet option tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetCatalog;

impl FacetCatalog {
    /// All steps in wizard order.
    pub fn steps() -> &'static [FacetStep] {
        &STEPS
    }

    /// The step for a facet.
    pub fn step(facet: Facet) -> &'static FacetStep {
        &STEPS[facet.index()]
    }

    /// Options for a facet in display order.
    pub fn options(facet: Facet) -> &'static [FacetOption] {
        Self::step(facet).options
    }

    /// Map a value (or a known alias) to its canonical identifier.
    pub fn canonicalize(facet: Facet, value: &str) -> Option<&'static str> {
        let value = value.trim();
        if let Some(option) = Self::options(facet).iter().find(|o| o.value == value) {
            return Some(option.value);
        }
        ALIASES
            .iter()
            .find(|(f, alias, _)| *f == facet && *alias == value)
            .map(|(_, _, canonical)| *canonical)
    }

    /// Look up the full option for a value or alias.
    pub fn lookup(facet: Facet, value: &str) -> Option<&'static FacetOption> {
        let canonical = Self::canonicalize(facet, value)?;
        Self::options(facet).iter().find(|o| o.value == canonical)
    }

    /// Valid canonical values for a facet.
    pub fn values(facet: Facet) -> Vec<&'static str> {
        Self::options(facet).iter().map(|o| o.value).collect()
    }

    /// Alternate spellings accepted for a facet, in catalog order.
    pub fn aliases(facet: Facet) -> Vec<&'static str> {
        ALIASES
            .iter()
            .filter(|(f, _, _)| *f == facet)
            .map(|(_, alias, _)| *alias)
            .collect()
    }

    /// The alternate spelling of a canonical value, if it has one.
    pub fn alias_of(facet: Facet, canonical: &str) -> Option<&'static str> {
        ALIASES
            .iter()
            .find(|(f, _, c)| *f == facet && *c == canonical)
            .map(|(_, alias, _)| *alias)
    }
}

/// Alternate spellings used by the Prolog-backed recommendation service.
const ALIASES: [(Facet, &str, &str); 2] = [
    (Facet::Location, "makki", "makkah"),
    (Facet::Location, "madani", "madinah"),
];

const THEME_OPTIONS: [FacetOption; 6] = [
    FacetOption {
        value: "knowledge",
        label: "Knowledge & Wisdom",
        image: "https://images.pexels.com/photos/3769697/pexels-photo-3769697.jpeg",
        description: "Verses about learning, understanding, and divine wisdom",
    },
    FacetOption {
        value: "justice",
        label: "Justice & Equity",
        image: "https://images.pexels.com/photos/5668473/pexels-photo-5668473.jpeg",
        description: "Verses about fairness, balance, and moral righteousness",
    },
    FacetOption {
        value: "rule",
        label: "Divine Commands",
        image: "https://images.pexels.com/photos/1164572/pexels-photo-1164572.jpeg",
        description: "Verses containing guidance and commandments from Allah",
    },
    FacetOption {
        value: "story",
        label: "Quranic Stories",
        image: "https://images.pexels.com/photos/2846814/pexels-photo-2846814.jpeg",
        description: "Narratives of prophets and historical events",
    },
    FacetOption {
        value: "patience",
        label: "Patience & Perseverance",
        image: "https://images.pexels.com/photos/1428277/pexels-photo-1428277.jpeg",
        description: "Verses about endurance and steadfastness",
    },
    FacetOption {
        value: "charity",
        label: "Charity & Giving",
        image: "https://images.pexels.com/photos/45842/clasped-hands-comfort-hands-people-45842.jpeg",
        description: "Verses about generosity and helping others",
    },
];

const AUDIENCE_OPTIONS: [FacetOption; 3] = [
    FacetOption {
        value: "believers",
        label: "The Believers",
        image: "https://images.pexels.com/photos/8851634/pexels-photo-8851634.jpeg",
        description: "Messages specifically addressed to the Muslim community",
    },
    FacetOption {
        value: "humanity",
        label: "All Humanity",
        image: "https://images.pexels.com/photos/7108/notebook-computer-chill-relax.jpg",
        description: "Universal messages for all of mankind",
    },
    FacetOption {
        value: "prophet",
        label: "Prophet Muhammad",
        image: "https://images.pexels.com/photos/1878293/pexels-photo-1878293.jpeg",
        description: "Verses specifically addressing the Prophet (peace be upon him)",
    },
];

const LENGTH_OPTIONS: [FacetOption; 3] = [
    FacetOption {
        value: "short",
        label: "Brief & Concise",
        image: "https://images.pexels.com/photos/733857/pexels-photo-733857.jpeg",
        description: "Short verses that deliver clear messages",
    },
    FacetOption {
        value: "medium",
        label: "Moderate Length",
        image: "https://images.pexels.com/photos/5834/nature-grass-leaf-green.jpg",
        description: "Balanced verses with detailed guidance",
    },
    FacetOption {
        value: "long",
        label: "Extended Wisdom",
        image: "https://images.pexels.com/photos/1112186/pexels-photo-1112186.jpeg",
        description: "Longer verses with comprehensive teachings",
    },
];

const TONE_OPTIONS: [FacetOption; 5] = [
    FacetOption {
        value: "encouragement",
        label: "Encouragement",
        image: "https://images.pexels.com/photos/1624600/pexels-photo-1624600.jpeg",
        description: "Uplifting verses that inspire and motivate",
    },
    FacetOption {
        value: "hopeful",
        label: "Hope & Optimism",
        image: "https://images.pexels.com/photos/1624496/pexels-photo-1624496.jpeg",
        description: "Messages of hope and positive outlook",
    },
    FacetOption {
        value: "command",
        label: "Divine Instructions",
        image: "https://images.pexels.com/photos/1761279/pexels-photo-1761279.jpeg",
        description: "Clear guidance and commands from Allah",
    },
    FacetOption {
        value: "glad_tidings",
        label: "Glad Tidings",
        image: "https://images.pexels.com/photos/1624438/pexels-photo-1624438.jpeg",
        description: "Good news and divine promises",
    },
    FacetOption {
        value: "warning",
        label: "Divine Warnings",
        image: "https://images.pexels.com/photos/1446076/pexels-photo-1446076.jpeg",
        description: "Cautionary messages and reminders",
    },
];

const LOCATION_OPTIONS: [FacetOption; 2] = [
    FacetOption {
        value: "makkah",
        label: "Makkan Period",
        image: "https://images.pexels.com/photos/2832034/pexels-photo-2832034.jpeg",
        description: "Revelations from the early period focusing on faith and spirituality",
    },
    FacetOption {
        value: "madinah",
        label: "Madinan Period",
        image: "https://images.pexels.com/photos/2832039/pexels-photo-2832039.jpeg",
        description: "Later revelations focusing on social and legal guidance",
    },
];

static STEPS: [FacetStep; 5] = [
    FacetStep {
        facet: Facet::Theme,
        title: "Begin Your Journey",
        description: "Choose a theme that resonates with your heart and current needs. Each selection will guide you to relevant verses from the Holy Quran.",
        background_image: "https://images.pexels.com/photos/1428277/pexels-photo-1428277.jpeg",
        options: &THEME_OPTIONS,
    },
    FacetStep {
        facet: Facet::Audience,
        title: "Divine Addressees",
        description: "The Quran speaks to different audiences. Select who this divine message was intended for.",
        background_image: "https://images.pexels.com/photos/8851634/pexels-photo-8851634.jpeg",
        options: &AUDIENCE_OPTIONS,
    },
    FacetStep {
        facet: Facet::Length,
        title: "Depth of Guidance",
        description: "How detailed would you like the divine message to be? Choose the length that suits your contemplation.",
        background_image: "https://images.pexels.com/photos/1112186/pexels-photo-1112186.jpeg",
        options: &LENGTH_OPTIONS,
    },
    FacetStep {
        facet: Facet::Tone,
        title: "Nature of the Message",
        description: "The Quran carries different tones for different purposes. What kind of message are you seeking today?",
        background_image: "https://images.pexels.com/photos/1624496/pexels-photo-1624496.jpeg",
        options: &TONE_OPTIONS,
    },
    FacetStep {
        facet: Facet::Location,
        title: "Period of Revelation",
        description: "The Quran was revealed in two distinct periods, each with its unique focus and characteristics.",
        background_image: "https://images.pexels.com/photos/2832034/pexels-photo-2832034.jpeg",
        options: &LOCATION_OPTIONS,
    },
];
