//! Recommendation endpoint backed by the local corpus.
//!
//! Serves the same envelope a remote recommendation service returns, so a
//! second instance can point its `remote` recommender at this one.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;
use verse_core::{facet::Facet, FacetCatalog, FacetSelection, ReferencePair};

use crate::state::AppState;

/// Response envelope for `POST /recommend`
#[derive(Debug, Default, Serialize)]
pub struct RecommendEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ReferencePair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl RecommendEnvelope {
    fn failure(error: impl Into<String>, details: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            details,
            ..Default::default()
        }
    }
}

/// Recommend verse references matching the posted choices
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<RecommendEnvelope>) {
    let choices: Value = match serde_json::from_slice(&body) {
        Ok(value) if is_truthy(&value) => value,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(RecommendEnvelope::failure("No JSON data provided", None)),
            )
        }
    };

    let selection = match parse_choices(&choices) {
        Ok(selection) => selection,
        Err(details) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(RecommendEnvelope::failure("Validation failed", Some(details))),
            )
        }
    };

    let pairs: Vec<ReferencePair> = state
        .corpus()
        .filter(&selection)
        .into_iter()
        .map(|record| record.reference.pair())
        .collect();
    debug!(
        "Recommend matched {} verse(s) for {} constraint(s)",
        pairs.len(),
        selection.len()
    );

    let envelope = if pairs.is_empty() {
        RecommendEnvelope {
            success: true,
            data: Some(Vec::new()),
            message: Some("No matching verses found".to_string()),
            ..Default::default()
        }
    } else {
        RecommendEnvelope {
            success: true,
            total_found: Some(pairs.len()),
            data: Some(pairs),
            ..Default::default()
        }
    };
    (StatusCode::OK, Json(envelope))
}

/// Validate raw choices against the catalog and build a selection.
///
/// Missing, null and empty values leave a facet unconstrained. Every
/// invalid facet contributes one detail line.
fn parse_choices(choices: &Value) -> Result<FacetSelection, Vec<String>> {
    let Some(object) = choices.as_object() else {
        return Err(vec![
            "Invalid request format. Expected a JSON object with user choices.".to_string(),
        ]);
    };

    let mut selection = FacetSelection::new();
    let mut errors = Vec::new();
    for facet in Facet::ALL {
        match choice_value(object, facet) {
            Ok(None) => {}
            Ok(Some(canonical)) => selection = selection.with(facet, canonical),
            Err(()) => errors.push(format!(
                "Invalid {}. Valid options: {}",
                facet,
                format_options(facet)
            )),
        }
    }

    if errors.is_empty() {
        Ok(selection)
    } else {
        Err(errors)
    }
}

fn choice_value(object: &Map<String, Value>, facet: Facet) -> Result<Option<&'static str>, ()> {
    match object.get(facet.as_str()) {
        None => Ok(None),
        Some(value) if !is_truthy(value) => Ok(None),
        Some(Value::String(value)) => FacetCatalog::canonicalize(facet, value).map(Some).ok_or(()),
        Some(_) => Err(()),
    }
}

/// Every accepted spelling: canonical values, then aliases.
fn format_options(facet: Facet) -> String {
    let quoted: Vec<String> = FacetCatalog::values(facet)
        .into_iter()
        .chain(FacetCatalog::aliases(facet))
        .map(|value| format!("'{}'", value))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// JSON truthiness: null, false, zero and empty containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
