use crate::Scale;
use crate::classification::{Classification, LookupEntry, LookupOverride, LookupTable, OverrideCondition};
use crate::definition::ScaleDefinition;
use crate::guidance::{GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Generic TNM anatomical staging.
///
/// The score is the T/N/M code itself. M1 forces stage IV whatever T and N
/// are; otherwise an unknown axis (TX, NX, MX) forces the indeterminate
/// stage. Both are checked before the lookup rows, in that order.
pub struct Tnm;

impl Scale for Tnm {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "tnm".to_string(),
                name: "TNM Staging".to_string(),
                description: Some("Anatomical stage grouping from T, N and M categories".to_string()),
                model: ScoringModel::new(
                    Aggregation::Composite,
                    vec![
                        Criterion::single(
                            "t",
                            "Primary tumour (T)",
                            vec![
                                AnswerOption::new("TX", "TX - cannot be assessed", 0).marked_unknown(),
                                AnswerOption::new("Tis", "Tis - carcinoma in situ", 0),
                                AnswerOption::new("T1", "T1", 1),
                                AnswerOption::new("T2", "T2", 2),
                                AnswerOption::new("T3", "T3", 3),
                                AnswerOption::new("T4", "T4", 4),
                            ],
                        ),
                        Criterion::single(
                            "n",
                            "Regional lymph nodes (N)",
                            vec![
                                AnswerOption::new("NX", "NX - cannot be assessed", 0).marked_unknown(),
                                AnswerOption::new("N0", "N0 - no regional node metastasis", 0),
                                AnswerOption::new("N1", "N1", 1),
                                AnswerOption::new("N2", "N2", 2),
                                AnswerOption::new("N3", "N3", 3),
                            ],
                        ),
                        Criterion::single(
                            "m",
                            "Distant metastasis (M)",
                            vec![
                                AnswerOption::new("MX", "MX - cannot be assessed", 0).marked_unknown(),
                                AnswerOption::new("M0", "M0 - no distant metastasis", 0),
                                AnswerOption::new("M1", "M1 - distant metastasis", 1),
                            ],
                        ),
                    ],
                ),
                classification: Classification::Lookup(LookupTable {
                    overrides: vec![
                        LookupOverride::new(OverrideCondition::axis_is("m", "M1"), "stage_iv"),
                        LookupOverride::new(OverrideCondition::AnyAxisUnknown, "indeterminate"),
                    ],
                    entries: vec![
                        LookupEntry::new(&[&["Tis"], &["N0"], &["M0"]], "stage_0"),
                        LookupEntry::new(&[&["T1", "T2"], &["N0"], &["M0"]], "stage_i"),
                        LookupEntry::new(&[&["T3", "T4"], &["N0"], &["M0"]], "stage_ii"),
                        LookupEntry::new(&[&[], &["N1", "N2", "N3"], &["M0"]], "stage_iii"),
                    ],
                }),
                bundles: vec![
                    GuidanceBundle::new(
                        "indeterminate",
                        "Stage indeterminate",
                        Urgency::Monitor,
                        "At least one category cannot be assessed, so no stage group can be assigned.",
                    )
                    .recommend(&["Complete the staging work-up (imaging, pathology, node sampling)"])
                    .follow_up(&["Re-stage once all categories are known"]),
                    GuidanceBundle::new(
                        "stage_0",
                        "Stage 0",
                        Urgency::Monitor,
                        "Carcinoma in situ without nodal or distant spread.",
                    )
                    .recommend(&["Local treatment per site-specific guidance"])
                    .follow_up(&["Surveillance for recurrence"]),
                    GuidanceBundle::new(
                        "stage_i",
                        "Stage I",
                        Urgency::Urgent,
                        "Localised tumour without nodal or distant spread.",
                    )
                    .recommend(&["Multidisciplinary team review", "Curative-intent local treatment"])
                    .follow_up(&["Scheduled surveillance after treatment"]),
                    GuidanceBundle::new(
                        "stage_ii",
                        "Stage II",
                        Urgency::Urgent,
                        "Locally advanced tumour without nodal or distant spread.",
                    )
                    .recommend(&[
                        "Multidisciplinary team review",
                        "Local treatment, consider adjuvant therapy",
                    ])
                    .follow_up(&["Scheduled surveillance after treatment"]),
                    GuidanceBundle::new(
                        "stage_iii",
                        "Stage III",
                        Urgency::Urgent,
                        "Regional lymph node involvement without distant metastasis.",
                    )
                    .recommend(&[
                        "Multidisciplinary team review",
                        "Multimodal treatment (surgery, systemic therapy, radiotherapy)",
                    ])
                    .follow_up(&["Close surveillance with imaging"]),
                    GuidanceBundle::new(
                        "stage_iv",
                        "Stage IV",
                        Urgency::Emergent,
                        "Distant metastatic disease.",
                    )
                    .recommend(&[
                        "Multidisciplinary team review",
                        "Systemic therapy; discuss goals of care",
                        "Early palliative care involvement",
                    ])
                    .follow_up(&["Response assessment during systemic therapy"]),
                ],
                critical_rules: vec![],
            }
        });
        &DEFINITION
    }
}
