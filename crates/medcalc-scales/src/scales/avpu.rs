use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{CriticalRule, GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// AVPU responsiveness scale.
pub struct Avpu;

impl Scale for Avpu {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "avpu".to_string(),
                name: "AVPU".to_string(),
                description: Some("Rapid assessment of responsiveness".to_string()),
                model: ScoringModel::new(
                    Aggregation::Sum,
                    vec![Criterion::single(
                        "responsiveness",
                        "Best response",
                        vec![
                            AnswerOption::new("alert", "Alert", 0),
                            AnswerOption::new("voice", "Responds to voice", 1),
                            AnswerOption::new("pain", "Responds to pain", 2),
                            AnswerOption::new("unresponsive", "Unresponsive", 3),
                        ],
                    )],
                ),
                classification: Classification::Bands(vec![
                    Band::new(0, 0, "alert"),
                    Band::new(1, 1, "voice"),
                    Band::new(2, 2, "pain"),
                    Band::new(3, 3, "unresponsive"),
                ]),
                bundles: vec![
                    GuidanceBundle::new("alert", "Alert", Urgency::Routine, "Fully awake and responsive.")
                        .follow_up(&["Continue routine observations"]),
                    GuidanceBundle::new(
                        "voice",
                        "Responds to voice",
                        Urgency::Monitor,
                        "Reduced level of consciousness, roughly GCS 13.",
                    )
                    .recommend(&["Check glucose", "Look for a cause of reduced consciousness"])
                    .follow_up(&["Increase observation frequency"]),
                    GuidanceBundle::new(
                        "pain",
                        "Responds to pain",
                        Urgency::Urgent,
                        "Markedly reduced level of consciousness, roughly GCS 8.",
                    )
                    .recommend(&["Assess airway patency", "Call for senior review"])
                    .follow_up(&["Continuous monitoring"]),
                    GuidanceBundle::new(
                        "unresponsive",
                        "Unresponsive",
                        Urgency::Emergent,
                        "No response to voice or pain.",
                    )
                    .recommend(&["Full ABCDE assessment"]),
                ],
                critical_rules: vec![
                    CriticalRule::when_selected(
                        "unresponsive",
                        "responsiveness",
                        &["unresponsive"],
                        Urgency::Emergent,
                        "Patient unresponsive",
                    )
                    .interpretation(
                        "Unresponsive patient: the airway is at risk. Treat as GCS 8 or below until proven otherwise.",
                    )
                    .recommend(&[
                        "Call the resuscitation team",
                        "Open and protect the airway, recovery position if breathing",
                    ]),
                ],
            }
        });
        &DEFINITION
    }
}
