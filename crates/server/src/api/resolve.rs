//! One-shot resolution of an explicit selection.

use axum::{extract::State, Json};
use std::sync::Arc;
use verse_core::{FacetSelection, ResolutionOutcome};

use crate::state::AppState;

/// Resolve a selection without going through the wizard.
///
/// Always answers 200; the outcome's `status` field carries success,
/// partial success or the failure kind.
pub async fn resolve_selection(
    State(state): State<Arc<AppState>>,
    Json(selection): Json<FacetSelection>,
) -> Json<ResolutionOutcome> {
    Json(state.resolver().resolve(&selection).await)
}
