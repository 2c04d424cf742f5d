use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Apfel simplified score for postoperative nausea and vomiting.
/// Count of four risk factors, 0–4.
pub struct Apfel;

impl Scale for Apfel {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            let tiers = [
                ("very_low", "Very low risk", Urgency::Routine, "About 10%", "No prophylaxis or a single agent"),
                ("low", "Low risk", Urgency::Routine, "About 20%", "Single-agent prophylaxis"),
                ("moderate", "Moderate risk", Urgency::Monitor, "About 40%", "Two-agent prophylaxis"),
                ("high", "High risk", Urgency::Monitor, "About 60%", "Two or more agents, consider TIVA"),
                (
                    "very_high",
                    "Very high risk",
                    Urgency::Monitor,
                    "About 80%",
                    "Multimodal prophylaxis with three or more agents and TIVA",
                ),
            ];

            let bands = tiers
                .iter()
                .zip(0..)
                .map(|((id, ..), count)| Band::new(count, count, id))
                .collect();

            let bundles = tiers
                .iter()
                .map(|(id, title, urgency, risk, prophylaxis)| {
                    GuidanceBundle::new(
                        id,
                        title,
                        *urgency,
                        &format!("Estimated PONV risk {}.", risk.to_lowercase()),
                    )
                    .recommend(&[*prophylaxis])
                    .follow_up(&["Rescue antiemetic from a different class if PONV occurs"])
                    .section("ponv_risk", risk)
                })
                .collect();

            ScaleDefinition {
                id: "apfel".to_string(),
                name: "Apfel Score".to_string(),
                description: Some("Risk of postoperative nausea and vomiting".to_string()),
                model: ScoringModel::new(
                    Aggregation::CountSelected,
                    vec![Criterion::multi(
                        "risk_factors",
                        "Risk factors",
                        vec![
                            AnswerOption::new("female", "Female sex", 1),
                            AnswerOption::new("non_smoker", "Non-smoker", 1),
                            AnswerOption::new(
                                "ponv_history",
                                "History of PONV or motion sickness",
                                1,
                            ),
                            AnswerOption::new("postoperative_opioids", "Postoperative opioids", 1),
                        ],
                    )],
                ),
                classification: Classification::Bands(bands),
                bundles,
                critical_rules: vec![],
            }
        });
        &DEFINITION
    }
}
