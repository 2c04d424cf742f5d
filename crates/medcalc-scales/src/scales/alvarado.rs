use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Alvarado score (MANTRELS) for acute appendicitis.
/// Three weighted checklists: symptoms, signs, laboratory. Total 0–10.
pub struct Alvarado;

impl Scale for Alvarado {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "alvarado".to_string(),
                name: "Alvarado Score".to_string(),
                description: Some("Likelihood of acute appendicitis".to_string()),
                model: ScoringModel::new(
                    Aggregation::Sum,
                    vec![
                        Criterion::multi(
                            "symptoms",
                            "Symptoms",
                            vec![
                                AnswerOption::new(
                                    "migration",
                                    "Migration of pain to the right iliac fossa",
                                    1,
                                ),
                                AnswerOption::new("anorexia", "Anorexia", 1),
                                AnswerOption::new("nausea_vomiting", "Nausea or vomiting", 1),
                            ],
                        ),
                        Criterion::multi(
                            "signs",
                            "Signs",
                            vec![
                                AnswerOption::new(
                                    "tenderness_rlq",
                                    "Tenderness in the right lower quadrant",
                                    2,
                                ),
                                AnswerOption::new("rebound", "Rebound tenderness", 1),
                                AnswerOption::new("fever", "Elevated temperature (37.3 °C or more)", 1),
                            ],
                        ),
                        Criterion::multi(
                            "laboratory",
                            "Laboratory",
                            vec![
                                AnswerOption::new("leukocytosis", "Leukocytosis (WBC above 10,000/µL)", 2),
                                AnswerOption::new("left_shift", "Shift to the left of neutrophils", 1),
                            ],
                        ),
                    ],
                ),
                classification: Classification::Bands(vec![
                    Band::new(0, 4, "low"),
                    Band::new(5, 6, "intermediate"),
                    Band::new(7, 8, "high"),
                    Band::new(9, 10, "very_high"),
                ]),
                bundles: vec![
                    GuidanceBundle::new(
                        "low",
                        "Appendicitis unlikely",
                        Urgency::Routine,
                        "Low probability of acute appendicitis.",
                    )
                    .recommend(&["Consider alternative diagnoses", "Discharge with safety-net advice if well"])
                    .follow_up(&["Re-examine if pain persists or worsens"])
                    .section("appendicitis_probability", "Below 25%"),
                    GuidanceBundle::new(
                        "intermediate",
                        "Possible appendicitis",
                        Urgency::Monitor,
                        "Intermediate probability of acute appendicitis.",
                    )
                    .recommend(&[
                        "Observe and repeat clinical assessment",
                        "Imaging (ultrasound or CT) to clarify the diagnosis",
                    ])
                    .follow_up(&["Serial abdominal examination over 6-12 hours"])
                    .section("appendicitis_probability", "25-50%"),
                    GuidanceBundle::new(
                        "high",
                        "Probable appendicitis",
                        Urgency::Urgent,
                        "High probability of acute appendicitis.",
                    )
                    .recommend(&["Surgical consultation", "Nil by mouth and IV fluids"])
                    .follow_up(&["Imaging if the diagnosis remains uncertain"])
                    .section("appendicitis_probability", "50-85%"),
                    GuidanceBundle::new(
                        "very_high",
                        "Very probable appendicitis",
                        Urgency::Emergent,
                        "Very high probability of acute appendicitis.",
                    )
                    .recommend(&["Urgent surgical referral for appendicectomy", "Start IV antibiotics"])
                    .section("appendicitis_probability", "Above 85%"),
                ],
                critical_rules: vec![],
            }
        });
        &DEFINITION
    }
}
