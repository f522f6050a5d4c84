//! Resolution outcome types.

use serde::{Deserialize, Serialize};

use crate::recommender::RecommendError;
use crate::text_source::TextPart;
use crate::verse::{InvalidReference, VerseRecord};

/// Shown in place of Arabic text that could not be fetched.
pub const ARABIC_PLACEHOLDER: &str = "Arabic text is currently unavailable.";

/// Shown in place of a translation that could not be fetched.
pub const TRANSLATION_PLACEHOLDER: &str = "Translation is currently unavailable.";

/// Class of a terminal resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Nothing matched the selection, or the service answered 404.
    NotFound,
    /// The service failed (5xx) or answered with something unreadable.
    ServerUnavailable,
    /// The service could not be reached.
    NetworkUnavailable,
    /// The recommend call exceeded its time bound.
    Timeout,
    /// The service returned a reference outside the valid range.
    InvalidReference,
    /// The service rejected the selection.
    InvalidSelection,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NotFound => "not_found",
            FailureKind::ServerUnavailable => "server_unavailable",
            FailureKind::NetworkUnavailable => "network_unavailable",
            FailureKind::Timeout => "timeout",
            FailureKind::InvalidReference => "invalid_reference",
            FailureKind::InvalidSelection => "invalid_selection",
        }
    }

    /// End-user message for this kind of failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::NotFound => {
                "No verses matched your choices. Try again with fewer selections."
            }
            FailureKind::ServerUnavailable => {
                "The recommendation service is unavailable right now. Please try again later."
            }
            FailureKind::NetworkUnavailable => {
                "Could not reach the recommendation service. Check your connection and try again."
            }
            FailureKind::Timeout => "The recommendation took too long. Please try again.",
            FailureKind::InvalidReference => {
                "The recommended verse could not be found. Please try again."
            }
            FailureKind::InvalidSelection => {
                "Some of your choices were not accepted. Please start a new journey."
            }
        }
    }
}

/// A terminal resolution failure.
///
/// `message` is safe to show to users; `detail` is for logs only and is
/// never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip)]
    pub detail: String,
}

impl Failure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
            detail: detail.into(),
        }
    }
}

impl From<RecommendError> for Failure {
    fn from(e: RecommendError) -> Self {
        let kind = match &e {
            RecommendError::Unreachable(_) => FailureKind::NetworkUnavailable,
            RecommendError::Timeout => FailureKind::Timeout,
            RecommendError::NotFound(_) => FailureKind::NotFound,
            RecommendError::Server { .. } | RecommendError::InvalidResponse(_) => {
                FailureKind::ServerUnavailable
            }
            RecommendError::Rejected { .. } => FailureKind::InvalidSelection,
        };
        Failure::new(kind, e.to_string())
    }
}

impl From<InvalidReference> for Failure {
    fn from(e: InvalidReference) -> Self {
        Failure::new(FailureKind::InvalidReference, e.to_string())
    }
}

/// A verse field that holds a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedField {
    ArabicText,
    Translation,
}

impl From<TextPart> for DegradedField {
    fn from(part: TextPart) -> Self {
        match part {
            TextPart::Arabic => DegradedField::ArabicText,
            TextPart::Translation => DegradedField::Translation,
        }
    }
}

/// Result of resolving a selection to a verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    Success {
        verse: VerseRecord,
    },
    PartialSuccess {
        verse: VerseRecord,
        degraded: Vec<DegradedField>,
    },
    Failure(Failure),
}

impl ResolutionOutcome {
    /// The resolved verse, if any.
    pub fn verse(&self) -> Option<&VerseRecord> {
        match self {
            ResolutionOutcome::Success { verse } | ResolutionOutcome::PartialSuccess { verse, .. } => {
                Some(verse)
            }
            ResolutionOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ResolutionOutcome::Failure(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResolutionOutcome::Success { .. })
    }

    /// Metric label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::Success { .. } => "success",
            ResolutionOutcome::PartialSuccess { .. } => "partial_success",
            ResolutionOutcome::Failure(_) => "failure",
        }
    }
}

impl From<Failure> for ResolutionOutcome {
    fn from(f: Failure) -> Self {
        ResolutionOutcome::Failure(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_errors_map_to_kinds() {
        let cases = [
            (RecommendError::Unreachable("refused".into()), FailureKind::NetworkUnavailable),
            (RecommendError::Timeout, FailureKind::Timeout),
            (RecommendError::NotFound("/recommend".into()), FailureKind::NotFound),
            (
                RecommendError::Server {
                    status: 500,
                    message: "boom".into(),
                },
                FailureKind::ServerUnavailable,
            ),
            (
                RecommendError::Rejected {
                    status: 400,
                    message: "Validation failed".into(),
                },
                FailureKind::InvalidSelection,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(Failure::from(error).kind, kind);
        }
    }

    #[test]
    fn test_failure_detail_is_not_serialized() {
        let failure = Failure::new(FailureKind::Timeout, "recommend exceeded 10s");
        let json = serde_json::to_value(ResolutionOutcome::Failure(failure)).unwrap();

        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "timeout");
        assert_eq!(json["message"], FailureKind::Timeout.user_message());
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let kinds = [
            FailureKind::NotFound,
            FailureKind::ServerUnavailable,
            FailureKind::NetworkUnavailable,
            FailureKind::Timeout,
            FailureKind::InvalidReference,
            FailureKind::InvalidSelection,
        ];
        let messages: std::collections::HashSet<_> =
            kinds.iter().map(|k| k.user_message()).collect();
        assert_eq!(messages.len(), kinds.len());
    }
}
