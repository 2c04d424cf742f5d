//! Answers from the command line and from JSON answer files.

use std::path::Path;

use medcalc_scales::Scale;
use medcalc_scales::scoring::{Answer, Answers, SelectionMode};

/// One `--answer criterion=option[,option]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerArg {
    pub criterion_id: String,
    pub option_ids: Vec<String>,
}

impl std::str::FromStr for AnswerArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (criterion, options) = s
            .split_once('=')
            .ok_or_else(|| format!("expected criterion=option, got '{s}'"))?;
        let criterion = criterion.trim();
        if criterion.is_empty() {
            return Err(format!("missing criterion id in '{s}'"));
        }
        let option_ids = options
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            criterion_id: criterion.to_string(),
            option_ids,
        })
    }
}

/// Read a JSON answer file: an object of criterion id to an option id or a
/// list of option ids.
pub fn read_answers_file(path: &Path) -> eyre::Result<Answers> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
    let answers = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid answers file {}: {e}", path.display()))?;
    Ok(answers)
}

/// Merge command-line answers over `base`. The criterion's selection mode
/// decides whether an argument becomes a single or a multi answer.
pub fn merge_answer_args(scale: &dyn Scale, mut base: Answers, args: &[AnswerArg]) -> eyre::Result<Answers> {
    for arg in args {
        let criterion = scale
            .definition()
            .model
            .criterion(&arg.criterion_id)
            .ok_or_else(|| eyre::eyre!("{} has no criterion '{}'", scale.id(), arg.criterion_id))?;

        let answer = match (criterion.mode, arg.option_ids.as_slice()) {
            (SelectionMode::Single, [option]) => Answer::single(option),
            (SelectionMode::Single, _) => {
                return Err(eyre::eyre!(
                    "criterion '{}' takes exactly one option",
                    arg.criterion_id
                ));
            }
            (SelectionMode::Multi, options) => Answer::multi(options.iter().map(String::as_str)),
        };
        base.insert(arg.criterion_id.clone(), answer);
    }
    Ok(base)
}
