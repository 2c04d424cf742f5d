use thiserror::Error;

use crate::scoring::SelectionMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("duplicate scale id in registry: {0}")]
    DuplicateScale(String),

    #[error("{scale_id}: incomplete input, missing answers for {missing:?}")]
    IncompleteInput {
        scale_id: String,
        missing: Vec<String>,
    },

    #[error("{scale_id}: unknown criterion '{criterion_id}'")]
    UnknownCriterion {
        scale_id: String,
        criterion_id: String,
    },

    #[error("{scale_id}: criterion '{criterion_id}' has no option '{option_id}'")]
    UnknownOption {
        scale_id: String,
        criterion_id: String,
        option_id: String,
    },

    #[error("{scale_id}: criterion '{criterion_id}' expects a {expected:?}-select answer")]
    AnswerShape {
        scale_id: String,
        criterion_id: String,
        expected: SelectionMode,
    },

    #[error("{scale_id}: score {score} is not covered by any classification entry")]
    ClassificationGap { scale_id: String, score: String },

    #[error("{scale_id}: score {score} matches more than one tier: {tiers:?}")]
    AmbiguousLookup {
        scale_id: String,
        score: String,
        tiers: Vec<String>,
    },

    #[error("{scale_id}: score kind does not match the classification table")]
    ScoreKindMismatch { scale_id: String },

    #[error("{scale_id}: tier '{tier_id}' has no guidance bundle")]
    UnknownTier { scale_id: String, tier_id: String },

    #[error("{scale_id}: invalid definition: {reason}")]
    InvalidDefinition { scale_id: String, reason: String },
}

impl ScaleError {
    /// The scale the error was raised for, when it belongs to one.
    pub fn scale_id(&self) -> Option<&str> {
        match self {
            Self::UnknownScale(_) | Self::DuplicateScale(_) => None,
            Self::IncompleteInput { scale_id, .. }
            | Self::UnknownCriterion { scale_id, .. }
            | Self::UnknownOption { scale_id, .. }
            | Self::AnswerShape { scale_id, .. }
            | Self::ClassificationGap { scale_id, .. }
            | Self::AmbiguousLookup { scale_id, .. }
            | Self::ScoreKindMismatch { scale_id }
            | Self::UnknownTier { scale_id, .. }
            | Self::InvalidDefinition { scale_id, .. } => Some(scale_id),
        }
    }

    pub(crate) fn invalid(scale_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            scale_id: scale_id.to_string(),
            reason: reason.into(),
        }
    }
}
