//! Score → tier resolution.
//!
//! Scalar scores walk an ascending list of inclusive bands. Composite codes
//! go through an explicit lookup table: override rules first, in declaration
//! order, then exactly one matching entry.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScaleError;
use crate::scoring::{AxisValue, ScoreValue};

/// `[lower, upper]`, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub lower: i32,
    pub upper: i32,
    pub tier_id: String,
}

impl Band {
    pub fn new(lower: i32, upper: i32, tier_id: &str) -> Self {
        Self {
            lower,
            upper,
            tier_id: tier_id.to_string(),
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.lower && value <= self.upper
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum OverrideCondition {
    /// Any axis holds an option marked unknown.
    AnyAxisUnknown,
    /// A specific axis holds a specific option.
    AxisIs {
        criterion_id: String,
        option_id: String,
    },
}

impl OverrideCondition {
    pub fn axis_is(criterion_id: &str, option_id: &str) -> Self {
        Self::AxisIs {
            criterion_id: criterion_id.to_string(),
            option_id: option_id.to_string(),
        }
    }

    fn matches(&self, axes: &[AxisValue]) -> bool {
        match self {
            Self::AnyAxisUnknown => axes.iter().any(|a| a.unknown),
            Self::AxisIs {
                criterion_id,
                option_id,
            } => axes
                .iter()
                .any(|a| &a.criterion_id == criterion_id && &a.option_id == option_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LookupOverride {
    pub condition: OverrideCondition,
    pub tier_id: String,
}

impl LookupOverride {
    pub fn new(condition: OverrideCondition, tier_id: &str) -> Self {
        Self {
            condition,
            tier_id: tier_id.to_string(),
        }
    }
}

/// One row of a composite lookup table.
///
/// `pattern` holds one list of accepted option ids per axis, in criterion
/// order. An empty list accepts any option on that axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LookupEntry {
    pub pattern: Vec<Vec<String>>,
    pub tier_id: String,
}

impl LookupEntry {
    pub fn new(pattern: &[&[&str]], tier_id: &str) -> Self {
        Self {
            pattern: pattern
                .iter()
                .map(|axis| axis.iter().map(|id| id.to_string()).collect())
                .collect(),
            tier_id: tier_id.to_string(),
        }
    }

    fn matches(&self, axes: &[AxisValue]) -> bool {
        self.pattern.len() == axes.len()
            && self
                .pattern
                .iter()
                .zip(axes)
                .all(|(accepted, axis)| accepted.is_empty() || accepted.contains(&axis.option_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LookupTable {
    pub overrides: Vec<LookupOverride>,
    pub entries: Vec<LookupEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Classification {
    Bands(Vec<Band>),
    Lookup(LookupTable),
}

impl Classification {
    /// Resolve a score to its tier id.
    pub fn classify<'a>(&'a self, scale_id: &str, score: &ScoreValue) -> Result<&'a str, ScaleError> {
        match (self, score) {
            (Self::Bands(bands), ScoreValue::Scalar { value }) => bands
                .iter()
                .find(|band| band.contains(*value))
                .map(|band| band.tier_id.as_str())
                .ok_or_else(|| ScaleError::ClassificationGap {
                    scale_id: scale_id.to_string(),
                    score: score.to_string(),
                }),
            (Self::Lookup(table), ScoreValue::Composite { axes }) => {
                if let Some(rule) = table.overrides.iter().find(|o| o.condition.matches(axes)) {
                    return Ok(rule.tier_id.as_str());
                }

                let matched: Vec<&LookupEntry> =
                    table.entries.iter().filter(|e| e.matches(axes)).collect();
                match matched.as_slice() {
                    [entry] => Ok(entry.tier_id.as_str()),
                    [] => Err(ScaleError::ClassificationGap {
                        scale_id: scale_id.to_string(),
                        score: score.to_string(),
                    }),
                    many => Err(ScaleError::AmbiguousLookup {
                        scale_id: scale_id.to_string(),
                        score: score.to_string(),
                        tiers: many.iter().map(|e| e.tier_id.clone()).collect(),
                    }),
                }
            }
            _ => Err(ScaleError::ScoreKindMismatch {
                scale_id: scale_id.to_string(),
            }),
        }
    }

    /// Every tier id the table can produce, first occurrence order.
    pub fn tier_ids(&self) -> Vec<&str> {
        let all: Vec<&str> = match self {
            Self::Bands(bands) => bands.iter().map(|b| b.tier_id.as_str()).collect(),
            Self::Lookup(table) => table
                .overrides
                .iter()
                .map(|o| o.tier_id.as_str())
                .chain(table.entries.iter().map(|e| e.tier_id.as_str()))
                .collect(),
        };

        let mut tiers = Vec::new();
        for tier in all {
            if !tiers.contains(&tier) {
                tiers.push(tier);
            }
        }
        tiers
    }
}
