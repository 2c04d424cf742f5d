use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScaleError;
use crate::scoring::{Answers, ScoringModel};

/// How soon a finding needs acting on. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Urgency {
    Routine,
    Monitor,
    Urgent,
    Emergent,
}

/// Interpretive text attached to one tier. Reference data: never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuidanceBundle {
    pub tier_id: String,
    pub title: String,
    pub interpretation: String,
    pub recommendations: Vec<String>,
    pub follow_up: Vec<String>,
    pub urgency: Urgency,
    #[serde(default)]
    pub critical_flag: bool,
    /// Named supplementary texts, e.g. `induction_recommendation`.
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
}

impl GuidanceBundle {
    pub fn new(tier_id: &str, title: &str, urgency: Urgency, interpretation: &str) -> Self {
        Self {
            tier_id: tier_id.to_string(),
            title: title.to_string(),
            interpretation: interpretation.to_string(),
            recommendations: Vec::new(),
            follow_up: Vec::new(),
            urgency,
            critical_flag: false,
            sections: BTreeMap::new(),
        }
    }

    pub fn recommend(mut self, items: &[&str]) -> Self {
        self.recommendations
            .extend(items.iter().map(|s| s.to_string()));
        self
    }

    pub fn follow_up(mut self, items: &[&str]) -> Self {
        self.follow_up.extend(items.iter().map(|s| s.to_string()));
        self
    }

    pub fn section(mut self, key: &str, text: &str) -> Self {
        self.sections.insert(key.to_string(), text.to_string());
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical_flag = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum CriticalTrigger {
    /// Fires when any of these options is selected.
    OptionSelected { option_ids: Vec<String> },
    /// Fires when a selected option carries at least this many points.
    PointsAtLeast { points: i32 },
}

/// A single-criterion finding that raises urgency regardless of the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriticalRule {
    pub id: String,
    pub criterion_id: String,
    pub trigger: CriticalTrigger,
    pub urgency: Urgency,
    pub finding: String,
    /// Replaces the tier interpretation when set.
    pub interpretation: Option<String>,
    /// Put ahead of the tier's own recommendations.
    pub recommendations: Vec<String>,
}

impl CriticalRule {
    pub fn when_selected(
        id: &str,
        criterion_id: &str,
        option_ids: &[&str],
        urgency: Urgency,
        finding: &str,
    ) -> Self {
        Self::new(
            id,
            criterion_id,
            CriticalTrigger::OptionSelected {
                option_ids: option_ids.iter().map(|s| s.to_string()).collect(),
            },
            urgency,
            finding,
        )
    }

    pub fn when_points_at_least(
        id: &str,
        criterion_id: &str,
        points: i32,
        urgency: Urgency,
        finding: &str,
    ) -> Self {
        Self::new(
            id,
            criterion_id,
            CriticalTrigger::PointsAtLeast { points },
            urgency,
            finding,
        )
    }

    fn new(
        id: &str,
        criterion_id: &str,
        trigger: CriticalTrigger,
        urgency: Urgency,
        finding: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            criterion_id: criterion_id.to_string(),
            trigger,
            urgency,
            finding: finding.to_string(),
            interpretation: None,
            recommendations: Vec::new(),
        }
    }

    pub fn interpretation(mut self, text: &str) -> Self {
        self.interpretation = Some(text.to_string());
        self
    }

    pub fn recommend(mut self, items: &[&str]) -> Self {
        self.recommendations
            .extend(items.iter().map(|s| s.to_string()));
        self
    }

    /// Whether the raw answer to this rule's criterion fires it.
    pub fn is_triggered(&self, model: &ScoringModel, answers: &Answers) -> bool {
        let (Some(criterion), Some(answer)) = (
            model.criterion(&self.criterion_id),
            answers.get(&self.criterion_id),
        ) else {
            return false;
        };

        let selected = answer.selected();
        match &self.trigger {
            CriticalTrigger::OptionSelected { option_ids } => selected
                .iter()
                .any(|id| option_ids.iter().any(|o| o.as_str() == *id)),
            CriticalTrigger::PointsAtLeast { points } => selected
                .iter()
                .filter_map(|id| criterion.option(id))
                .any(|option| option.points >= *points),
        }
    }
}

/// A critical rule that fired for a particular answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriticalFinding {
    pub rule_id: String,
    pub criterion_id: String,
    pub finding: String,
    pub urgency: Urgency,
}

/// The tier bundle after critical rules have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGuidance {
    pub bundle: GuidanceBundle,
    pub findings: Vec<CriticalFinding>,
}

/// Look up the bundle for `tier_id` and apply every triggered critical rule.
///
/// The reference bundle is cloned; the returned copy carries the elevated
/// urgency, the critical flag, rule recommendations ahead of the tier's own,
/// and the interpretation of the most urgent rule that supplies one.
pub fn resolve_bundle(
    scale_id: &str,
    bundles: &[GuidanceBundle],
    rules: &[CriticalRule],
    model: &ScoringModel,
    tier_id: &str,
    answers: &Answers,
) -> Result<ResolvedGuidance, ScaleError> {
    let reference = bundles
        .iter()
        .find(|b| b.tier_id == tier_id)
        .ok_or_else(|| ScaleError::UnknownTier {
            scale_id: scale_id.to_string(),
            tier_id: tier_id.to_string(),
        })?;

    let fired: Vec<&CriticalRule> = rules
        .iter()
        .filter(|rule| rule.is_triggered(model, answers))
        .collect();

    let mut bundle = reference.clone();
    if fired.is_empty() {
        return Ok(ResolvedGuidance {
            bundle,
            findings: Vec::new(),
        });
    }

    let mut leading = Vec::new();
    let mut replacement: Option<(&CriticalRule, &str)> = None;
    for rule in &fired {
        tracing::warn!(
            scale_id = %scale_id,
            rule = %rule.id,
            criterion = %rule.criterion_id,
            "critical override triggered"
        );
        bundle.urgency = bundle.urgency.max(rule.urgency);
        leading.extend(rule.recommendations.iter().cloned());
        if let Some(text) = rule.interpretation.as_deref() {
            match replacement {
                Some((current, _)) if current.urgency >= rule.urgency => {}
                _ => replacement = Some((*rule, text)),
            }
        }
    }

    bundle.critical_flag = true;
    if let Some((_, text)) = replacement {
        bundle.interpretation = text.to_string();
    }
    leading.append(&mut bundle.recommendations);
    bundle.recommendations = leading;

    let findings = fired
        .iter()
        .map(|rule| CriticalFinding {
            rule_id: rule.id.clone(),
            criterion_id: rule.criterion_id.clone(),
            finding: rule.finding.clone(),
            urgency: rule.urgency,
        })
        .collect();

    Ok(ResolvedGuidance { bundle, findings })
}
