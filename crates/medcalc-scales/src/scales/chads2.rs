use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// CHADS2: stroke risk in non-valvular atrial fibrillation.
/// Weighted checklist, prior stroke/TIA counts double. Total 0–6.
pub struct Chads2;

impl Scale for Chads2 {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "chads2".to_string(),
                name: "CHADS2".to_string(),
                description: Some("Annual stroke risk in atrial fibrillation".to_string()),
                model: ScoringModel::new(
                    Aggregation::Sum,
                    vec![Criterion::multi(
                        "risk_factors",
                        "Risk factors",
                        vec![
                            AnswerOption::new("chf", "Congestive heart failure", 1),
                            AnswerOption::new("hypertension", "Hypertension", 1),
                            AnswerOption::new("age_75", "Age 75 or older", 1),
                            AnswerOption::new("diabetes", "Diabetes mellitus", 1),
                            AnswerOption::new("stroke_tia", "Prior stroke or TIA", 2),
                        ],
                    )],
                ),
                classification: Classification::Bands(vec![
                    Band::new(0, 0, "low"),
                    Band::new(1, 1, "moderate"),
                    Band::new(2, 6, "high"),
                ]),
                bundles: vec![
                    GuidanceBundle::new(
                        "low",
                        "Low risk",
                        Urgency::Routine,
                        "Low annual stroke risk.",
                    )
                    .recommend(&["Anticoagulation generally not required; aspirin or no therapy"])
                    .follow_up(&["Re-score annually or when a new risk factor appears"])
                    .section("annual_stroke_risk", "About 1.9%"),
                    GuidanceBundle::new(
                        "moderate",
                        "Moderate risk",
                        Urgency::Monitor,
                        "Moderate annual stroke risk.",
                    )
                    .recommend(&[
                        "Consider oral anticoagulation, weighing bleeding risk",
                        "Refine the estimate with CHA2DS2-VASc",
                    ])
                    .follow_up(&["Review at each visit"])
                    .section("annual_stroke_risk", "About 2.8%"),
                    GuidanceBundle::new(
                        "high",
                        "High risk",
                        Urgency::Urgent,
                        "High annual stroke risk.",
                    )
                    .recommend(&[
                        "Oral anticoagulation recommended unless contraindicated",
                        "Assess bleeding risk (e.g. HAS-BLED) before starting",
                    ])
                    .follow_up(&[
                        "Monitor renal function and adherence",
                        "INR monitoring when on a vitamin K antagonist",
                    ])
                    .section(
                        "annual_stroke_risk",
                        "4.0% at 2 points, rising to 18.2% at 6 points",
                    ),
                ],
                critical_rules: vec![],
            }
        });
        &DEFINITION
    }
}
