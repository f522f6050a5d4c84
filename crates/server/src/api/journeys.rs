//! Journey API handlers.
//!
//! A journey owns one [`SelectionWizard`]. Handlers mutate it under the
//! state lock, then run resolution after the lock is released so a slow
//! recommendation call never blocks other journeys.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use verse_core::{
    wizard::STEP_COUNT, Advance, FacetCatalog, FacetSelection, FacetStep, ResolutionOutcome,
    SelectionWizard, WizardError,
};

use super::handlers::{api_error, ApiError};
use crate::metrics::{JOURNEYS_STARTED_TOTAL, JOURNEY_ACTIONS};
use crate::state::{AppState, Journey};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for answering the current step
#[derive(Debug, Deserialize)]
pub struct SelectBody {
    pub value: String,
}

/// Snapshot of a journey returned by every journey endpoint
#[derive(Debug, Serialize)]
pub struct JourneyView {
    pub id: String,
    pub state: &'static str,
    pub step_index: isize,
    pub total_steps: usize,
    pub progress: f32,
    pub selection: FacetSelection,
    /// The step being asked, while the wizard is awaiting a facet.
    pub current_step: Option<&'static FacetStep>,
    /// Resolution outcome, once the wizard is terminal.
    pub outcome: Option<ResolutionOutcome>,
    pub created_at: String,
    pub updated_at: String,
}

impl JourneyView {
    fn new(id: Uuid, journey: &Journey) -> Self {
        let wizard = &journey.wizard;
        Self {
            id: id.to_string(),
            state: wizard.state().name(),
            step_index: wizard.step_index(),
            total_steps: STEP_COUNT,
            progress: wizard.progress(),
            selection: wizard.selection().clone(),
            current_step: wizard.current_facet().map(FacetCatalog::step),
            outcome: journey.outcome.clone(),
            created_at: format_time(journey.created_at),
            updated_at: format_time(journey.updated_at),
        }
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| journey_not_found(id))
}

fn journey_not_found(id: impl std::fmt::Display) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("Journey not found: {}", id))
}

fn wizard_error(error: WizardError) -> ApiError {
    let status = match error {
        WizardError::UnknownValue { .. } => StatusCode::BAD_REQUEST,
        WizardError::AlreadyStarted | WizardError::NotAwaiting(_) => StatusCode::CONFLICT,
    };
    api_error(status, error.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// Start a new journey at the first facet
pub async fn create_journey(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<JourneyView>), ApiError> {
    let mut wizard = SelectionWizard::new();
    wizard.start().map_err(wizard_error)?;

    let journey = Journey::new(wizard);
    let view_source = journey.clone();
    let id = state.insert_journey(journey).await;
    JOURNEYS_STARTED_TOTAL.inc();
    info!("Started journey {}", id);

    Ok((StatusCode::CREATED, Json(JourneyView::new(id, &view_source))))
}

/// Get the current view of a journey
pub async fn get_journey(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JourneyView>, ApiError> {
    let id = parse_id(&id)?;
    match state.journey(&id).await {
        Some(journey) => Ok(Json(JourneyView::new(id, &journey))),
        None => Err(journey_not_found(id)),
    }
}

/// Answer the current step
pub async fn select_value(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SelectBody>,
) -> Result<Json<JourneyView>, ApiError> {
    let id = parse_id(&id)?;
    JOURNEY_ACTIONS.with_label_values(&["select"]).inc();
    step(&state, id, |wizard| {
        wizard.select_value(&body.value).map(completed_selection)
    })
    .await
}

/// Leave the current facet unconstrained
pub async fn skip_step(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JourneyView>, ApiError> {
    let id = parse_id(&id)?;
    JOURNEY_ACTIONS.with_label_values(&["skip"]).inc();
    step(&state, id, |wizard| wizard.skip().map(completed_selection)).await
}

/// Bypass the remaining steps and resolve with what has been collected
pub async fn skip_all(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JourneyView>, ApiError> {
    let id = parse_id(&id)?;
    JOURNEY_ACTIONS.with_label_values(&["skip_all"]).inc();
    step(&state, id, |wizard| {
        if wizard.is_terminal() {
            return Err(WizardError::NotAwaiting(wizard.state().name()));
        }
        Ok(Some(wizard.skip_all()))
    })
    .await
}

/// Re-issue resolution for a terminal journey
pub async fn retry_journey(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JourneyView>, ApiError> {
    let id = parse_id(&id)?;
    JOURNEY_ACTIONS.with_label_values(&["retry"]).inc();
    step(&state, id, |wizard| {
        if !wizard.is_terminal() {
            return Err(WizardError::NotAwaiting(wizard.state().name()));
        }
        Ok(Some(wizard.selection().clone()))
    })
    .await
}

/// Exit: discard the journey
pub async fn delete_journey(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    match state.remove_journey(&id).await {
        Some(mut journey) => {
            journey.wizard.reset();
            JOURNEY_ACTIONS.with_label_values(&["exit"]).inc();
            info!("Journey {} exited", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(journey_not_found(id)),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn completed_selection(advance: Advance) -> Option<FacetSelection> {
    match advance {
        Advance::Next(_) => None,
        Advance::Complete(selection) => Some(selection),
    }
}

/// Apply one wizard transition and, if it hands over a selection, resolve it.
async fn step(
    state: &AppState,
    id: Uuid,
    transition: impl FnOnce(&mut SelectionWizard) -> Result<Option<FacetSelection>, WizardError>,
) -> Result<Json<JourneyView>, ApiError> {
    let to_resolve = state
        .update_journey(&id, |journey| {
            let result = transition(&mut journey.wizard);
            if matches!(result, Ok(Some(_))) {
                journey.outcome = None;
            }
            result
        })
        .await
        .ok_or_else(|| journey_not_found(id))?
        .map_err(wizard_error)?;

    if let Some(selection) = to_resolve {
        debug!(
            "Journey {} resolving with {} facet(s) set",
            id,
            selection.len()
        );
        let outcome = state.resolver().resolve(&selection).await;
        info!("Journey {} resolved: {}", id, outcome.label());

        // The journey may have been exited while resolution was in flight.
        state
            .update_journey(&id, |journey| journey.outcome = Some(outcome))
            .await
            .ok_or_else(|| journey_not_found(id))?;
    }

    state
        .journey(&id)
        .await
        .map(|journey| Json(JourneyView::new(id, &journey)))
        .ok_or_else(|| journey_not_found(id))
}
