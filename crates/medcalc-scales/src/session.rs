//! Calculator session: the in-progress answers for one scale and the last
//! result computed from them.
//!
//! A result is only ever held alongside the exact answers it was computed
//! from. Any change to the answers drops it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Scale;
use crate::definition::Outcome;
use crate::error::ScaleError;
use crate::guidance::{CriticalFinding, GuidanceBundle};
use crate::scoring::{Answer, Answers, ScoreValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    /// Nothing answered yet. A scale without required criteria can still
    /// be calculated from here.
    Empty,
    /// Some answers recorded, required criteria still missing.
    Partial,
    /// Every required criterion answered; ready to calculate.
    Complete,
    /// A result matching the current answers is available.
    Resolved,
}

/// Immutable output of one `calculate` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorResult {
    pub scale_id: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub outcome: Outcome,
    pub calculated_at: jiff::Timestamp,
}

impl CalculatorResult {
    pub fn score(&self) -> &ScoreValue {
        &self.outcome.score
    }

    pub fn tier_id(&self) -> &str {
        &self.outcome.tier_id
    }

    pub fn bundle(&self) -> &GuidanceBundle {
        &self.outcome.bundle
    }

    pub fn critical_findings(&self) -> &[CriticalFinding] {
        &self.outcome.critical_findings
    }

    /// Equal in everything but the timestamp.
    pub fn same_outcome(&self, other: &CalculatorResult) -> bool {
        self.scale_id == other.scale_id && self.outcome == other.outcome
    }
}

pub struct Session<'a> {
    scale: &'a dyn Scale,
    answers: Answers,
    result: Option<CalculatorResult>,
}

impl<'a> Session<'a> {
    pub fn new(scale: &'a dyn Scale) -> Self {
        Self {
            scale,
            answers: Answers::new(),
            result: None,
        }
    }

    pub fn scale(&self) -> &'a dyn Scale {
        self.scale
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Record an answer. A changed answer discards any existing result;
    /// re-recording the same answer is not a change.
    pub fn set_answer(&mut self, criterion_id: &str, answer: Answer) -> Result<(), ScaleError> {
        self.scale
            .definition()
            .model
            .check_answer(self.scale.id(), criterion_id, &answer)?;

        if self.answers.get(criterion_id) == Some(&answer) {
            return Ok(());
        }

        self.answers.insert(criterion_id.to_string(), answer);
        self.invalidate();
        Ok(())
    }

    /// Remove the answer for a criterion, if any.
    pub fn clear_answer(&mut self, criterion_id: &str) {
        if self.answers.remove(criterion_id).is_some() {
            self.invalidate();
        }
    }

    /// Back to `Empty` from any state.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.result = None;
    }

    pub fn missing(&self) -> Vec<String> {
        self.scale.definition().model.missing(&self.answers)
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn state(&self) -> SessionState {
        if self.result.is_some() {
            SessionState::Resolved
        } else if self.answers.is_empty() {
            SessionState::Empty
        } else if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::Partial
        }
    }

    pub fn result(&self) -> Option<&CalculatorResult> {
        self.result.as_ref()
    }

    pub fn calculate(&mut self) -> Result<&CalculatorResult, ScaleError> {
        self.calculate_at(jiff::Timestamp::now())
    }

    /// Run the pipeline and install a fresh result stamped `at`. On error
    /// the session is left exactly as it was.
    pub fn calculate_at(&mut self, at: jiff::Timestamp) -> Result<&CalculatorResult, ScaleError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ScaleError::IncompleteInput {
                scale_id: self.scale.id().to_string(),
                missing,
            });
        }

        let outcome = self.scale.evaluate(&self.answers)?;
        let result = self.result.insert(CalculatorResult {
            scale_id: self.scale.id().to_string(),
            outcome,
            calculated_at: at,
        });
        Ok(result)
    }

    fn invalidate(&mut self) {
        if self.result.take().is_some() {
            tracing::debug!(scale_id = %self.scale.id(), "answers changed, result discarded");
        }
    }
}
