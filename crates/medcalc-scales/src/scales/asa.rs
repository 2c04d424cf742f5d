use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{CriticalRule, GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// ASA Physical Status Classification.
/// Class I–VI scored 1–6, plus the "E" emergency modifier which carries no
/// points but raises urgency.
pub struct Asa;

impl Scale for Asa {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            let classes = [
                ("asa_1", "ASA I", "A normal healthy patient"),
                ("asa_2", "ASA II", "A patient with mild systemic disease"),
                ("asa_3", "ASA III", "A patient with severe systemic disease"),
                (
                    "asa_4",
                    "ASA IV",
                    "A patient with severe systemic disease that is a constant threat to life",
                ),
                (
                    "asa_5",
                    "ASA V",
                    "A moribund patient who is not expected to survive without the operation",
                ),
                (
                    "asa_6",
                    "ASA VI",
                    "A declared brain-dead patient whose organs are being removed for donor purposes",
                ),
            ];

            let options = classes
                .iter()
                .zip(1..)
                .map(|((id, label, description), points)| {
                    AnswerOption::new(id, label, points).with_description(description)
                })
                .collect();

            let bands = classes
                .iter()
                .zip(1..)
                .map(|((id, _, _), points)| Band::new(points, points, id))
                .collect();

            ScaleDefinition {
                id: "asa".to_string(),
                name: "ASA Physical Status".to_string(),
                description: Some(
                    "Pre-anaesthetic assessment of overall physical status".to_string(),
                ),
                model: ScoringModel::new(
                    Aggregation::Sum,
                    vec![
                        Criterion::single("physical_status", "Physical status", options),
                        Criterion::multi(
                            "modifiers",
                            "Modifiers",
                            vec![AnswerOption::new("emergency", "E - Emergency operation", 0)
                                .with_description(
                                    "Delay in treatment would lead to a significant increase in threat to life or body part",
                                )],
                        ),
                    ],
                ),
                classification: Classification::Bands(bands),
                bundles: vec![
                    GuidanceBundle::new(
                        "asa_1",
                        "ASA I",
                        Urgency::Routine,
                        "Healthy patient with minimal anaesthetic risk.",
                    )
                    .recommend(&["Standard pre-anaesthetic evaluation"])
                    .follow_up(&["Routine post-anaesthesia care"])
                    .section("examples", "Healthy, non-smoking, no or minimal alcohol use"),
                    GuidanceBundle::new(
                        "asa_2",
                        "ASA II",
                        Urgency::Routine,
                        "Mild systemic disease without substantive functional limitation.",
                    )
                    .recommend(&[
                        "Standard pre-anaesthetic evaluation",
                        "Confirm chronic conditions are controlled on current therapy",
                    ])
                    .follow_up(&["Routine post-anaesthesia care"])
                    .section(
                        "examples",
                        "Current smoker, social drinker, pregnancy, BMI 30-40, well-controlled diabetes or hypertension",
                    ),
                    GuidanceBundle::new(
                        "asa_3",
                        "ASA III",
                        Urgency::Monitor,
                        "Severe systemic disease with substantive functional limitation.",
                    )
                    .recommend(&[
                        "Optimise comorbidities before elective surgery",
                        "Consider specialist pre-operative review",
                    ])
                    .follow_up(&["Extended post-operative monitoring"])
                    .section(
                        "examples",
                        "Poorly controlled diabetes or hypertension, COPD, BMI 40 or more, dialysis, remote MI",
                    ),
                    GuidanceBundle::new(
                        "asa_4",
                        "ASA IV",
                        Urgency::Urgent,
                        "Severe systemic disease that is a constant threat to life.",
                    )
                    .recommend(&[
                        "Senior anaesthetist involvement",
                        "Plan for invasive monitoring",
                        "Discuss risk explicitly during consent",
                    ])
                    .follow_up(&["High-dependency or intensive care bed post-operatively"])
                    .section(
                        "examples",
                        "Recent MI or stroke, ongoing cardiac ischaemia, severe valve dysfunction, sepsis",
                    ),
                    GuidanceBundle::new(
                        "asa_5",
                        "ASA V",
                        Urgency::Emergent,
                        "Moribund patient not expected to survive without the operation.",
                    )
                    .recommend(&[
                        "Proceed only with life-saving surgery",
                        "Consultant-led anaesthetic and surgical team",
                    ])
                    .follow_up(&["Intensive care admission"])
                    .section(
                        "examples",
                        "Ruptured abdominal aortic aneurysm, massive trauma, intracranial bleed with mass effect",
                    ),
                    GuidanceBundle::new(
                        "asa_6",
                        "ASA VI",
                        Urgency::Urgent,
                        "Brain-dead organ donor.",
                    )
                    .recommend(&[
                        "Coordinate with the organ procurement team",
                        "Maintain physiological support for organ perfusion",
                    ]),
                ],
                critical_rules: vec![
                    CriticalRule::when_selected(
                        "emergency_modifier",
                        "modifiers",
                        &["emergency"],
                        Urgency::Urgent,
                        "Emergency operation (E modifier)",
                    )
                    .recommend(&["Append \"E\" to the assigned class and proceed on the emergency pathway"]),
                ],
            }
        });
        &DEFINITION
    }
}
