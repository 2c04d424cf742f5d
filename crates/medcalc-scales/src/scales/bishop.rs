use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Bishop Score: cervical readiness before induction of labour.
/// Five cervical findings, total 0–13.
pub struct Bishop;

impl Scale for Bishop {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "bishop".to_string(),
                name: "Bishop Score".to_string(),
                description: Some(
                    "Pre-induction cervical assessment: 0-5 unfavourable, 6-7 intermediate, 8-13 favourable"
                        .to_string(),
                ),
                model: ScoringModel::new(
                    Aggregation::Sum,
                    vec![
                        Criterion::single(
                            "dilation",
                            "Dilation",
                            vec![
                                AnswerOption::new("closed", "Closed", 0),
                                AnswerOption::new("1_2cm", "1-2 cm", 1),
                                AnswerOption::new("3_4cm", "3-4 cm", 2),
                                AnswerOption::new("5cm_plus", "5 cm or more", 3),
                            ],
                        ),
                        Criterion::single(
                            "effacement",
                            "Effacement",
                            vec![
                                AnswerOption::new("0_30", "0-30%", 0),
                                AnswerOption::new("40_50", "40-50%", 1),
                                AnswerOption::new("60_70", "60-70%", 2),
                                AnswerOption::new("80_plus", "80% or more", 3),
                            ],
                        ),
                        Criterion::single(
                            "station",
                            "Fetal station",
                            vec![
                                AnswerOption::new("minus_3", "-3", 0),
                                AnswerOption::new("minus_2", "-2", 1),
                                AnswerOption::new("minus_1_0", "-1 or 0", 2),
                                AnswerOption::new("plus_1_2", "+1 or +2", 3),
                            ],
                        ),
                        Criterion::single(
                            "consistency",
                            "Cervical consistency",
                            vec![
                                AnswerOption::new("firm", "Firm", 0),
                                AnswerOption::new("medium", "Medium", 1),
                                AnswerOption::new("soft", "Soft", 2),
                            ],
                        ),
                        Criterion::single(
                            "position",
                            "Cervical position",
                            vec![
                                AnswerOption::new("posterior", "Posterior", 0),
                                AnswerOption::new("mid", "Mid-position", 1),
                                AnswerOption::new("anterior", "Anterior", 2),
                            ],
                        ),
                    ],
                ),
                classification: Classification::Bands(vec![
                    Band::new(0, 5, "immature"),
                    Band::new(6, 7, "intermediate"),
                    Band::new(8, 13, "mature"),
                ]),
                bundles: vec![
                    GuidanceBundle::new(
                        "immature",
                        "Unfavourable cervix",
                        Urgency::Monitor,
                        "The cervix is not ready for labour; induction without ripening is likely to fail.",
                    )
                    .recommend(&[
                        "Cervical ripening before induction (prostaglandins or balloon catheter)",
                        "Review the indication and timing of induction",
                    ])
                    .follow_up(&["Reassess the Bishop score after ripening"])
                    .section(
                        "induction_recommendation",
                        "Unfavourable cervix: ripen the cervix before attempting induction.",
                    ),
                    GuidanceBundle::new(
                        "intermediate",
                        "Intermediate cervix",
                        Urgency::Monitor,
                        "Partial cervical readiness; induction success is uncertain.",
                    )
                    .recommend(&[
                        "Consider ripening agents depending on parity and clinical context",
                    ])
                    .follow_up(&["Reassess within 6-12 hours or after ripening"])
                    .section(
                        "induction_recommendation",
                        "Intermediate cervix: individualise, ripening is often still advisable.",
                    ),
                    GuidanceBundle::new(
                        "mature",
                        "Favourable cervix",
                        Urgency::Routine,
                        "The cervix is ripe; induction is likely to result in vaginal delivery.",
                    )
                    .recommend(&[
                        "Induction with amniotomy and/or oxytocin is appropriate",
                    ])
                    .follow_up(&["Continuous fetal monitoring once oxytocin is started"])
                    .section(
                        "induction_recommendation",
                        "Favourable cervix: induction of labour is likely to succeed.",
                    ),
                ],
                critical_rules: vec![],
            }
        });
        &DEFINITION
    }
}
