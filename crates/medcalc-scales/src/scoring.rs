use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScaleError;

/// How answers to a criterion are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SelectionMode {
    /// Radio-style: exactly one option, always required.
    Single,
    /// Checkbox-style: zero or more options, each contributing on its own.
    Multi,
}

/// One selectable answer within a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
    pub points: i32,
    pub description: Option<String>,
    /// Marks "cannot be assessed" answers (e.g. TX, NX).
    #[serde(default)]
    pub unknown: bool,
}

impl AnswerOption {
    pub fn new(id: &str, label: &str, points: i32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            points,
            description: None,
            unknown: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn marked_unknown(mut self) -> Self {
        self.unknown = true;
        self
    }
}

/// A single clinical observation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    pub mode: SelectionMode,
    pub options: Vec<AnswerOption>,
    pub description: Option<String>,
}

impl Criterion {
    pub fn single(id: &str, label: &str, options: Vec<AnswerOption>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            mode: SelectionMode::Single,
            options,
            description: None,
        }
    }

    pub fn multi(id: &str, label: &str, options: Vec<AnswerOption>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            mode: SelectionMode::Multi,
            options,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Single-select criteria must be answered before calculating.
    pub fn is_required(&self) -> bool {
        self.mode == SelectionMode::Single
    }

    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// The answer recorded for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Answer {
    Single(String),
    Multi(BTreeSet<String>),
}

impl Answer {
    pub fn single(option_id: &str) -> Self {
        Self::Single(option_id.to_string())
    }

    pub fn multi<'a>(option_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Multi(option_ids.into_iter().map(str::to_string).collect())
    }

    /// Selected option ids, in a stable order.
    pub fn selected(&self) -> Vec<&str> {
        match self {
            Self::Single(id) => vec![id.as_str()],
            Self::Multi(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multi(_) => SelectionMode::Multi,
        }
    }
}

/// Answers keyed by criterion id.
pub type Answers = BTreeMap<String, Answer>;

/// One answered criterion with the labels of its selected options, for
/// display and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnsweredCriterion {
    pub criterion_id: String,
    pub label: String,
    pub selection: Vec<String>,
}

/// One axis of a composite code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AxisValue {
    pub criterion_id: String,
    pub option_id: String,
    #[serde(default)]
    pub unknown: bool,
}

/// Output of aggregation: a number, or a code with one value per axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreValue {
    Scalar { value: i32 },
    Composite { axes: Vec<AxisValue> },
}

impl ScoreValue {
    pub fn as_scalar(&self) -> Option<i32> {
        match self {
            Self::Scalar { value } => Some(*value),
            Self::Composite { .. } => None,
        }
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { value } => write!(f, "{value}"),
            Self::Composite { axes } => {
                let code: Vec<&str> = axes.iter().map(|a| a.option_id.as_str()).collect();
                write!(f, "{}", code.join(" "))
            }
        }
    }
}

/// How selected options are folded into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Aggregation {
    /// Sum of the points of every selected option.
    Sum,
    /// Number of selected options carrying positive points.
    CountSelected,
    /// Highest points among selected options, 0 when nothing is selected.
    HighestSelected,
    /// One axis per criterion; classified by lookup.
    Composite,
}

/// Inclusive range of reachable scalar scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Ordered criteria plus the rule that aggregates their answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringModel {
    pub criteria: Vec<Criterion>,
    pub aggregation: Aggregation,
}

impl ScoringModel {
    pub fn new(aggregation: Aggregation, criteria: Vec<Criterion>) -> Self {
        Self {
            criteria,
            aggregation,
        }
    }

    pub fn criterion(&self, criterion_id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == criterion_id)
    }

    /// Check one answer against the criterion it targets.
    pub fn check_answer(
        &self,
        scale_id: &str,
        criterion_id: &str,
        answer: &Answer,
    ) -> Result<&Criterion, ScaleError> {
        let criterion =
            self.criterion(criterion_id)
                .ok_or_else(|| ScaleError::UnknownCriterion {
                    scale_id: scale_id.to_string(),
                    criterion_id: criterion_id.to_string(),
                })?;

        if answer.mode() != criterion.mode {
            return Err(ScaleError::AnswerShape {
                scale_id: scale_id.to_string(),
                criterion_id: criterion_id.to_string(),
                expected: criterion.mode,
            });
        }

        for option_id in answer.selected() {
            if criterion.option(option_id).is_none() {
                return Err(ScaleError::UnknownOption {
                    scale_id: scale_id.to_string(),
                    criterion_id: criterion_id.to_string(),
                    option_id: option_id.to_string(),
                });
            }
        }

        Ok(criterion)
    }

    /// Answered criteria in criterion order, option ids replaced by labels.
    pub fn answered(&self, answers: &Answers) -> Vec<AnsweredCriterion> {
        self.criteria
            .iter()
            .filter_map(|criterion| {
                let answer = answers.get(&criterion.id)?;
                let selection = answer
                    .selected()
                    .into_iter()
                    .filter_map(|id| criterion.option(id))
                    .map(|option| option.label.clone())
                    .collect();
                Some(AnsweredCriterion {
                    criterion_id: criterion.id.clone(),
                    label: criterion.label.clone(),
                    selection,
                })
            })
            .collect()
    }

    /// Ids of required criteria without an answer, in criterion order.
    pub fn missing(&self, answers: &Answers) -> Vec<String> {
        self.criteria
            .iter()
            .filter(|c| c.is_required() && !answers.contains_key(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Fold a complete answer set into a score.
    ///
    /// Every answer is checked first; a missing required answer is an
    /// [`ScaleError::IncompleteInput`], never a zero default.
    pub fn aggregate(&self, scale_id: &str, answers: &Answers) -> Result<ScoreValue, ScaleError> {
        for (criterion_id, answer) in answers {
            self.check_answer(scale_id, criterion_id, answer)?;
        }

        let missing = self.missing(answers);
        if !missing.is_empty() {
            return Err(ScaleError::IncompleteInput {
                scale_id: scale_id.to_string(),
                missing,
            });
        }

        let score = match self.aggregation {
            Aggregation::Sum => ScoreValue::Scalar {
                value: self.selected(answers).map(|o| o.points).sum(),
            },
            Aggregation::CountSelected => ScoreValue::Scalar {
                value: self.selected(answers).filter(|o| o.points > 0).count() as i32,
            },
            Aggregation::HighestSelected => ScoreValue::Scalar {
                value: self.selected(answers).map(|o| o.points).max().unwrap_or(0),
            },
            Aggregation::Composite => {
                let mut axes = Vec::with_capacity(self.criteria.len());
                for criterion in &self.criteria {
                    let Some(Answer::Single(option_id)) = answers.get(&criterion.id) else {
                        return Err(ScaleError::AnswerShape {
                            scale_id: scale_id.to_string(),
                            criterion_id: criterion.id.clone(),
                            expected: SelectionMode::Single,
                        });
                    };
                    let unknown = criterion
                        .option(option_id)
                        .is_some_and(|option| option.unknown);
                    axes.push(AxisValue {
                        criterion_id: criterion.id.clone(),
                        option_id: option_id.clone(),
                        unknown,
                    });
                }
                ScoreValue::Composite { axes }
            }
        };

        Ok(score)
    }

    /// Every score a complete answer set can produce lies in this range.
    /// `None` for composite models.
    pub fn theoretical_range(&self) -> Option<ScoreRange> {
        let singles = self.criteria.iter().filter(|c| c.is_required());
        let multis = self.criteria.iter().filter(|c| !c.is_required());

        match self.aggregation {
            Aggregation::Composite => None,
            Aggregation::Sum => {
                let (mut min, mut max) = (0, 0);
                for criterion in singles {
                    min += criterion.options.iter().map(|o| o.points).min().unwrap_or(0);
                    max += criterion.options.iter().map(|o| o.points).max().unwrap_or(0);
                }
                for criterion in multis {
                    min += criterion.options.iter().map(|o| o.points.min(0)).sum::<i32>();
                    max += criterion.options.iter().map(|o| o.points.max(0)).sum::<i32>();
                }
                Some(ScoreRange { min, max })
            }
            Aggregation::CountSelected => {
                let (mut min, mut max) = (0, 0);
                for criterion in singles {
                    if criterion.options.iter().all(|o| o.points > 0) {
                        min += 1;
                    }
                    if criterion.options.iter().any(|o| o.points > 0) {
                        max += 1;
                    }
                }
                for criterion in multis {
                    max += criterion.options.iter().filter(|o| o.points > 0).count() as i32;
                }
                Some(ScoreRange { min, max })
            }
            Aggregation::HighestSelected => {
                let floor = singles
                    .map(|c| c.options.iter().map(|o| o.points).min().unwrap_or(0))
                    .max();
                let min = match floor {
                    Some(floor) => floor,
                    None => self
                        .criteria
                        .iter()
                        .flat_map(|c| &c.options)
                        .map(|o| o.points)
                        .fold(0, i32::min),
                };
                let top = self
                    .criteria
                    .iter()
                    .flat_map(|c| &c.options)
                    .map(|o| o.points)
                    .max()
                    .unwrap_or(0);
                let max = if floor.is_none() { top.max(0) } else { top.max(min) };
                Some(ScoreRange { min, max })
            }
        }
    }

    /// Selected options across all criteria, in criterion order.
    fn selected<'a>(&'a self, answers: &'a Answers) -> impl Iterator<Item = &'a AnswerOption> + 'a {
        self.criteria.iter().flat_map(move |criterion| {
            answers
                .get(&criterion.id)
                .map(|answer| answer.selected())
                .unwrap_or_default()
                .into_iter()
                .filter_map(move |option_id| criterion.option(option_id))
        })
    }
}
