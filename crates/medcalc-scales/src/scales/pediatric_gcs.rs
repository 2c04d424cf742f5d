use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Pediatric Glasgow Coma Scale (pre-verbal child).
/// Eye 1–4, verbal 1–5, motor 1–6. Total 3–15; every component is required.
pub struct PediatricGcs;

impl Scale for PediatricGcs {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "pediatric_gcs".to_string(),
                name: "Pediatric Glasgow Coma Scale".to_string(),
                description: Some(
                    "Level of consciousness in infants and pre-verbal children".to_string(),
                ),
                model: ScoringModel::new(
                    Aggregation::Sum,
                    vec![
                        Criterion::single(
                            "eye",
                            "Eye opening",
                            vec![
                                AnswerOption::new("spontaneous", "Spontaneous", 4),
                                AnswerOption::new("to_sound", "To sound", 3),
                                AnswerOption::new("to_pain", "To pain", 2),
                                AnswerOption::new("none", "None", 1),
                            ],
                        ),
                        Criterion::single(
                            "verbal",
                            "Verbal response",
                            vec![
                                AnswerOption::new("coos_babbles", "Coos, babbles", 5),
                                AnswerOption::new("irritable_cry", "Irritable cry, consolable", 4),
                                AnswerOption::new("cries_to_pain", "Cries to pain", 3),
                                AnswerOption::new("moans_to_pain", "Moans to pain", 2),
                                AnswerOption::new("none", "None", 1),
                            ],
                        ),
                        Criterion::single(
                            "motor",
                            "Motor response",
                            vec![
                                AnswerOption::new("spontaneous", "Moves spontaneously and purposefully", 6),
                                AnswerOption::new("withdraws_touch", "Withdraws to touch", 5),
                                AnswerOption::new("withdraws_pain", "Withdraws to pain", 4),
                                AnswerOption::new(
                                    "abnormal_flexion",
                                    "Abnormal flexion to pain (decorticate)",
                                    3,
                                ),
                                AnswerOption::new("extension", "Extension to pain (decerebrate)", 2),
                                AnswerOption::new("none", "None", 1),
                            ],
                        ),
                    ],
                ),
                classification: Classification::Bands(vec![
                    Band::new(3, 8, "severe"),
                    Band::new(9, 12, "moderate"),
                    Band::new(13, 15, "mild"),
                ]),
                bundles: vec![
                    GuidanceBundle::new(
                        "severe",
                        "Severe brain injury",
                        Urgency::Emergent,
                        "Severely impaired consciousness; the airway may not be protected.",
                    )
                    .recommend(&[
                        "Secure the airway, consider intubation",
                        "Urgent CT head and paediatric neurosurgical referral",
                        "Paediatric intensive care",
                    ])
                    .follow_up(&["Neurological observations every 15 minutes"]),
                    GuidanceBundle::new(
                        "moderate",
                        "Moderate brain injury",
                        Urgency::Urgent,
                        "Moderately impaired consciousness.",
                    )
                    .recommend(&["CT head", "Admit for close observation"])
                    .follow_up(&["Neurological observations every 30 minutes", "Escalate on any fall in score"]),
                    GuidanceBundle::new(
                        "mild",
                        "Mild or no brain injury",
                        Urgency::Monitor,
                        "Consciousness normal or mildly impaired.",
                    )
                    .recommend(&["Apply head-injury imaging rules to decide on CT"])
                    .follow_up(&["Observe until back to baseline", "Give head-injury advice to carers"]),
                ],
                critical_rules: vec![],
            }
        });
        &DEFINITION
    }
}
