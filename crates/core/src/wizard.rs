//! Step-wise facet selection.
//!
//! The wizard walks the facets in [`Facet::ALL`] order. Each step either
//! records a value or skips the facet. Once the last step is answered the
//! wizard is `Complete`; `skip_all` ends it early with whatever has been
//! collected so far.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::facet::{Facet, FacetCatalog, FacetSelection};

/// Number of steps in a journey.
pub const STEP_COUNT: usize = Facet::ALL.len();

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "facet", rename_all = "snake_case")]
pub enum WizardState {
    NotStarted,
    AwaitingFacet(Facet),
    Complete,
    /// Remaining steps were bypassed with `skip_all`.
    Bypassed,
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::NotStarted => "not_started",
            WizardState::AwaitingFacet(_) => "awaiting_facet",
            WizardState::Complete => "complete",
            WizardState::Bypassed => "bypassed",
        }
    }
}

/// Result of advancing one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The wizard now waits for this facet.
    Next(Facet),
    /// All steps answered; resolve with this selection.
    Complete(FacetSelection),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Wizard has already been started")]
    AlreadyStarted,

    #[error("Wizard is not waiting for a facet (state: {0})")]
    NotAwaiting(&'static str),

    #[error("Unknown value '{value}' for {facet}")]
    UnknownValue { facet: Facet, value: String },
}

/// Finite-state sequencer over the facets.
#[derive(Debug, Clone)]
pub struct SelectionWizard {
    state: WizardState,
    selection: FacetSelection,
    bypassed_at: usize,
}

impl Default for SelectionWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::NotStarted,
            selection: FacetSelection::new(),
            bypassed_at: 0,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// The selection accumulated so far.
    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    /// The facet currently being asked for.
    pub fn current_facet(&self) -> Option<Facet> {
        match self.state {
            WizardState::AwaitingFacet(facet) => Some(facet),
            _ => None,
        }
    }

    /// Step index: `-1` before start, `0..N` while active, `N` once complete.
    ///
    /// A bypassed wizard reports the step it was bypassed at.
    pub fn step_index(&self) -> isize {
        match self.state {
            WizardState::NotStarted => -1,
            WizardState::AwaitingFacet(facet) => facet.index() as isize,
            WizardState::Complete => STEP_COUNT as isize,
            WizardState::Bypassed => self.bypassed_at as isize,
        }
    }

    /// Fraction of steps answered, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        match self.state {
            WizardState::NotStarted => 0.0,
            _ => self.step_index().max(0) as f32 / STEP_COUNT as f32,
        }
    }

    /// Whether the wizard has handed off to resolution.
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, WizardState::Complete | WizardState::Bypassed)
    }

    /// Begin the journey at the first facet.
    pub fn start(&mut self) -> Result<Facet, WizardError> {
        if self.state != WizardState::NotStarted {
            return Err(WizardError::AlreadyStarted);
        }
        let first = Facet::ALL[0];
        self.state = WizardState::AwaitingFacet(first);
        debug!("Wizard started at {}", first);
        Ok(first)
    }

    /// Record a value for the current facet and advance.
    ///
    /// The value must be one of the catalog options (or a known alias) for
    /// the facet; it is stored in canonical form.
    pub fn select_value(&mut self, value: &str) -> Result<Advance, WizardError> {
        let facet = self.awaiting()?;
        let canonical =
            FacetCatalog::canonicalize(facet, value).ok_or_else(|| WizardError::UnknownValue {
                facet,
                value: value.to_string(),
            })?;
        self.selection.set(facet, canonical);
        debug!("Wizard recorded {}={}", facet, canonical);
        Ok(self.advance_from(facet))
    }

    /// Leave the current facet unset and advance.
    pub fn skip(&mut self) -> Result<Advance, WizardError> {
        let facet = self.awaiting()?;
        debug!("Wizard skipped {}", facet);
        Ok(self.advance_from(facet))
    }

    /// Stop asking and hand over the selection collected so far.
    ///
    /// Valid from any state. The wizard becomes terminal; it only counts as
    /// `Complete` if it already was.
    pub fn skip_all(&mut self) -> FacetSelection {
        if self.state != WizardState::Complete {
            self.bypassed_at = self.step_index().max(0) as usize;
            self.state = WizardState::Bypassed;
        }
        debug!(
            "Wizard bypassed remaining steps with {} facet(s) set",
            self.selection.len()
        );
        self.selection.clone()
    }

    /// Discard everything and return to `NotStarted`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn awaiting(&self) -> Result<Facet, WizardError> {
        self.current_facet()
            .ok_or(WizardError::NotAwaiting(self.state.name()))
    }

    fn advance_from(&mut self, facet: Facet) -> Advance {
        match Facet::ALL.get(facet.index() + 1) {
            Some(next) => {
                self.state = WizardState::AwaitingFacet(*next);
                Advance::Next(*next)
            }
            None => {
                self.state = WizardState::Complete;
                Advance::Complete(self.selection.clone())
            }
        }
    }
}
