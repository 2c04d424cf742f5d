use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::classification::{Band, Classification, LookupTable, OverrideCondition};
use crate::error::ScaleError;
use crate::guidance::{
    resolve_bundle, CriticalFinding, CriticalRule, CriticalTrigger, GuidanceBundle, ResolvedGuidance,
};
use crate::scoring::{Aggregation, Answers, AxisValue, ScoreValue, ScoringModel};

/// Everything one clinical scale is made of: criteria, bands or lookup,
/// bundles and critical rules. Built once per scale, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleDefinition {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub model: ScoringModel,
    pub classification: Classification,
    pub bundles: Vec<GuidanceBundle>,
    pub critical_rules: Vec<CriticalRule>,
}

/// The outcome of one aggregate → classify → resolve pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Outcome {
    pub score: ScoreValue,
    pub tier_id: String,
    pub bundle: GuidanceBundle,
    pub critical_findings: Vec<CriticalFinding>,
}

impl ScaleDefinition {
    pub fn bundle(&self, tier_id: &str) -> Option<&GuidanceBundle> {
        self.bundles.iter().find(|b| b.tier_id == tier_id)
    }

    pub fn aggregate(&self, answers: &Answers) -> Result<ScoreValue, ScaleError> {
        self.model.aggregate(&self.id, answers)
    }

    pub fn classify(&self, score: &ScoreValue) -> Result<&str, ScaleError> {
        self.classification.classify(&self.id, score)
    }

    pub fn resolve(&self, tier_id: &str, answers: &Answers) -> Result<ResolvedGuidance, ScaleError> {
        resolve_bundle(
            &self.id,
            &self.bundles,
            &self.critical_rules,
            &self.model,
            tier_id,
            answers,
        )
    }

    /// Run the whole pipeline. Either every step succeeds or nothing is
    /// produced.
    pub fn evaluate(&self, answers: &Answers) -> Result<Outcome, ScaleError> {
        let score = self.aggregate(answers)?;
        let tier_id = self.classify(&score)?.to_string();
        let ResolvedGuidance { bundle, findings } = self.resolve(&tier_id, answers)?;

        tracing::debug!(
            scale_id = %self.id,
            score = %score,
            tier = %tier_id,
            critical = bundle.critical_flag,
            "scale evaluated"
        );

        Ok(Outcome {
            score,
            tier_id,
            bundle,
            critical_findings: findings,
        })
    }

    /// Load-time integrity check. A scale that passes can classify and
    /// resolve every complete answer set.
    pub fn validate(&self) -> Result<(), ScaleError> {
        self.validate_criteria()?;

        match (&self.classification, self.model.aggregation) {
            (Classification::Lookup(table), Aggregation::Composite) => self.validate_lookup(table)?,
            (Classification::Bands(bands), aggregation) if aggregation != Aggregation::Composite => {
                self.validate_bands(bands)?
            }
            _ => {
                return Err(ScaleError::invalid(
                    &self.id,
                    "composite models need a lookup table, scalar models need bands",
                ))
            }
        }

        self.validate_bundles()?;
        self.validate_rules()
    }

    fn validate_criteria(&self) -> Result<(), ScaleError> {
        if self.model.criteria.is_empty() {
            return Err(ScaleError::invalid(&self.id, "no criteria"));
        }

        let mut criterion_ids = HashSet::new();
        for criterion in &self.model.criteria {
            if !criterion_ids.insert(criterion.id.as_str()) {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!("duplicate criterion '{}'", criterion.id),
                ));
            }
            if criterion.options.is_empty() {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!("criterion '{}' has no options", criterion.id),
                ));
            }
            let mut option_ids = HashSet::new();
            for option in &criterion.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(ScaleError::invalid(
                        &self.id,
                        format!("duplicate option '{}' in '{}'", option.id, criterion.id),
                    ));
                }
            }
            if self.model.aggregation == Aggregation::Composite && !criterion.is_required() {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!("composite axis '{}' must be single-select", criterion.id),
                ));
            }
        }
        Ok(())
    }

    /// Bands must be ascending, contiguous and span exactly the theoretical
    /// range.
    fn validate_bands(&self, bands: &[Band]) -> Result<(), ScaleError> {
        let range = self
            .model
            .theoretical_range()
            .ok_or_else(|| ScaleError::invalid(&self.id, "scalar model without a range"))?;

        let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
            return Err(ScaleError::invalid(&self.id, "no classification bands"));
        };

        for band in bands {
            if band.lower > band.upper {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!("band {}..={} is inverted", band.lower, band.upper),
                ));
            }
        }

        if first.lower > range.min {
            return Err(self.gap(range.min, first.lower - 1));
        }
        if first.lower < range.min || last.upper > range.max {
            return Err(ScaleError::invalid(
                &self.id,
                format!(
                    "bands span {}..={} but scores span {}..={}",
                    first.lower, last.upper, range.min, range.max
                ),
            ));
        }

        for pair in bands.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.lower <= prev.upper {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!(
                        "bands '{}' and '{}' overlap at {}",
                        prev.tier_id, next.tier_id, next.lower
                    ),
                ));
            }
            if next.lower > prev.upper + 1 {
                return Err(self.gap(prev.upper + 1, next.lower - 1));
            }
        }

        if last.upper < range.max {
            return Err(self.gap(last.upper + 1, range.max));
        }
        Ok(())
    }

    fn gap(&self, from: i32, to: i32) -> ScaleError {
        let score = if from == to {
            from.to_string()
        } else {
            format!("{from}..={to}")
        };
        ScaleError::ClassificationGap {
            scale_id: self.id.clone(),
            score,
        }
    }

    /// Every combination of axis options must land on exactly one tier.
    fn validate_lookup(&self, table: &LookupTable) -> Result<(), ScaleError> {
        let axes = &self.model.criteria;

        for rule in &table.overrides {
            if let OverrideCondition::AxisIs {
                criterion_id,
                option_id,
            } = &rule.condition
            {
                let known = self
                    .model
                    .criterion(criterion_id)
                    .is_some_and(|c| c.option(option_id).is_some());
                if !known {
                    return Err(ScaleError::invalid(
                        &self.id,
                        format!("override refers to unknown axis value {criterion_id}={option_id}"),
                    ));
                }
            }
        }

        for entry in &table.entries {
            if entry.pattern.len() != axes.len() {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!(
                        "lookup entry for '{}' has {} axes, expected {}",
                        entry.tier_id,
                        entry.pattern.len(),
                        axes.len()
                    ),
                ));
            }
            for (accepted, criterion) in entry.pattern.iter().zip(axes) {
                if let Some(unknown) = accepted.iter().find(|id| criterion.option(id).is_none()) {
                    return Err(ScaleError::invalid(
                        &self.id,
                        format!("lookup entry refers to unknown option {}={unknown}", criterion.id),
                    ));
                }
            }
        }

        let mut code: Vec<AxisValue> = Vec::with_capacity(axes.len());
        self.walk_codes(0, &mut code)
    }

    /// Depth-first over the cartesian product of axis options.
    fn walk_codes(&self, depth: usize, code: &mut Vec<AxisValue>) -> Result<(), ScaleError> {
        let Some(criterion) = self.model.criteria.get(depth) else {
            let score = ScoreValue::Composite { axes: code.clone() };
            return self.classify(&score).map(|_| ());
        };

        for option in &criterion.options {
            code.push(AxisValue {
                criterion_id: criterion.id.clone(),
                option_id: option.id.clone(),
                unknown: option.unknown,
            });
            self.walk_codes(depth + 1, code)?;
            code.pop();
        }
        Ok(())
    }

    fn validate_bundles(&self) -> Result<(), ScaleError> {
        let mut seen = HashSet::new();
        for bundle in &self.bundles {
            if !seen.insert(bundle.tier_id.as_str()) {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!("tier '{}' has more than one bundle", bundle.tier_id),
                ));
            }
        }

        let tiers = self.classification.tier_ids();
        for tier in &tiers {
            if !seen.contains(tier) {
                return Err(ScaleError::UnknownTier {
                    scale_id: self.id.clone(),
                    tier_id: tier.to_string(),
                });
            }
        }

        if let Some(orphan) = self
            .bundles
            .iter()
            .find(|b| !tiers.contains(&b.tier_id.as_str()))
        {
            return Err(ScaleError::invalid(
                &self.id,
                format!("bundle '{}' is not reachable from any tier", orphan.tier_id),
            ));
        }
        Ok(())
    }

    fn validate_rules(&self) -> Result<(), ScaleError> {
        for rule in &self.critical_rules {
            let criterion = self.model.criterion(&rule.criterion_id).ok_or_else(|| {
                ScaleError::invalid(
                    &self.id,
                    format!(
                        "critical rule '{}' refers to unknown criterion '{}'",
                        rule.id, rule.criterion_id
                    ),
                )
            })?;

            if let CriticalTrigger::OptionSelected { option_ids } = &rule.trigger
                && let Some(unknown) = option_ids.iter().find(|id| criterion.option(id).is_none())
            {
                return Err(ScaleError::invalid(
                    &self.id,
                    format!("critical rule '{}' refers to unknown option '{unknown}'", rule.id),
                ));
            }
        }
        Ok(())
    }
}
