//! medcalc-scales
//!
//! Clinical scoring scales as pure data over one generic engine. Each scale
//! declares its criteria, classification bands (or composite lookup),
//! guidance bundles and critical rules; the engine aggregates answers,
//! classifies the score and resolves the guidance.

pub mod classification;
pub mod definition;
pub mod error;
pub mod guidance;
pub mod scales;
pub mod scoring;
pub mod session;

use std::collections::HashSet;

use definition::{Outcome, ScaleDefinition};
use error::ScaleError;
use guidance::ResolvedGuidance;
use scoring::{Answers, ScoreValue};

/// Trait implemented by each clinical scale.
pub trait Scale: Send + Sync {
    /// The scale's static definition.
    fn definition(&self) -> &ScaleDefinition;

    /// Unique identifier (e.g. "bishop", "pediatric_gcs").
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Human-readable name (e.g. "Bishop Score").
    fn name(&self) -> &str {
        &self.definition().name
    }

    fn aggregate(&self, answers: &Answers) -> Result<ScoreValue, ScaleError> {
        self.definition().aggregate(answers)
    }

    fn classify(&self, score: &ScoreValue) -> Result<&str, ScaleError> {
        self.definition().classify(score)
    }

    fn resolve(&self, tier_id: &str, answers: &Answers) -> Result<ResolvedGuidance, ScaleError> {
        self.definition().resolve(tier_id, answers)
    }

    /// Aggregate, classify and resolve in one step.
    fn evaluate(&self, answers: &Answers) -> Result<Outcome, ScaleError> {
        self.definition().evaluate(answers)
    }

    /// Format answers as structured text, one line per answered criterion.
    fn to_structured_input(&self, answers: &Answers) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for answered in self.definition().model.answered(answers) {
            let shown = if answered.selection.is_empty() {
                "none".to_string()
            } else {
                answered.selection.join(", ")
            };
            output.push_str(&format!("- {}: {}\n", answered.label, shown));
        }
        output
    }
}

/// Return all registered scales.
pub fn all_scales() -> Vec<Box<dyn Scale>> {
    vec![
        Box::new(scales::asa::Asa),
        Box::new(scales::bishop::Bishop),
        Box::new(scales::chads2::Chads2),
        Box::new(scales::alvarado::Alvarado),
        Box::new(scales::apfel::Apfel),
        Box::new(scales::pediatric_gcs::PediatricGcs),
        Box::new(scales::beck::Beck),
        Box::new(scales::lown::Lown),
        Box::new(scales::avpu::Avpu),
        Box::new(scales::tnm::Tnm),
    ]
}

/// Look up a scale by ID.
pub fn get_scale(id: &str) -> Option<Box<dyn Scale>> {
    all_scales().into_iter().find(|s| s.id() == id)
}

/// Every registered scale, validated once at load.
pub struct ScaleRegistry {
    scales: Vec<Box<dyn Scale>>,
}

impl ScaleRegistry {
    /// Validate and register all scales. Fails on the first broken scale.
    pub fn load() -> Result<Self, ScaleError> {
        Self::from_scales(all_scales())
    }

    pub fn from_scales(scales: Vec<Box<dyn Scale>>) -> Result<Self, ScaleError> {
        let mut ids = HashSet::new();
        for scale in &scales {
            if !ids.insert(scale.id().to_string()) {
                return Err(ScaleError::DuplicateScale(scale.id().to_string()));
            }
            if let Err(e) = scale.definition().validate() {
                tracing::error!(scale_id = %scale.id(), error = %e, "scale failed validation");
                return Err(e);
            }
        }
        tracing::info!(count = scales.len(), "scale registry loaded");
        Ok(Self { scales })
    }

    pub fn get(&self, id: &str) -> Result<&dyn Scale, ScaleError> {
        self.scales
            .iter()
            .find(|s| s.id() == id)
            .map(|s| &**s)
            .ok_or_else(|| ScaleError::UnknownScale(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Scale> {
        self.scales.iter().map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}
