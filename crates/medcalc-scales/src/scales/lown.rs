use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{CriticalRule, GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Lown grading of ventricular ectopy.
///
/// Findings are ticked independently; the grade is the most severe finding
/// present. Grades 4a and 4b occupy points 4 and 5, R-on-T (grade 5) is 6.
pub struct Lown;

impl Scale for Lown {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            ScaleDefinition {
                id: "lown".to_string(),
                name: "Lown Classification".to_string(),
                description: Some("Severity of ventricular premature beats on Holter".to_string()),
                model: ScoringModel::new(
                    Aggregation::HighestSelected,
                    vec![Criterion::multi(
                        "findings",
                        "Ventricular ectopy",
                        vec![
                            AnswerOption::new("occasional_pvc", "Occasional isolated PVCs (under 30/h)", 1),
                            AnswerOption::new("frequent_pvc", "Frequent PVCs (30/h or more)", 2),
                            AnswerOption::new("multiform", "Multiform PVCs", 3),
                            AnswerOption::new("couplets", "Couplets", 4),
                            AnswerOption::new("runs_vt", "Runs of 3 or more PVCs (salvos)", 5),
                            AnswerOption::new("r_on_t", "R-on-T phenomenon", 6),
                        ],
                    )
                    .with_description("Tick every finding present")],
                ),
                classification: Classification::Bands(vec![
                    Band::new(0, 0, "grade_0"),
                    Band::new(1, 1, "grade_1"),
                    Band::new(2, 2, "grade_2"),
                    Band::new(3, 3, "grade_3"),
                    Band::new(4, 4, "grade_4a"),
                    Band::new(5, 5, "grade_4b"),
                    Band::new(6, 6, "grade_5"),
                ]),
                bundles: vec![
                    GuidanceBundle::new("grade_0", "Grade 0", Urgency::Routine, "No ventricular ectopy."),
                    GuidanceBundle::new(
                        "grade_1",
                        "Grade 1",
                        Urgency::Routine,
                        "Occasional isolated ventricular premature beats.",
                    )
                    .recommend(&["No specific treatment if asymptomatic"]),
                    GuidanceBundle::new(
                        "grade_2",
                        "Grade 2",
                        Urgency::Monitor,
                        "Frequent ventricular premature beats.",
                    )
                    .recommend(&["Check electrolytes", "Echocardiography to assess structural heart disease"])
                    .follow_up(&["Repeat Holter monitoring"]),
                    GuidanceBundle::new(
                        "grade_3",
                        "Grade 3",
                        Urgency::Monitor,
                        "Multiform ventricular premature beats.",
                    )
                    .recommend(&["Cardiology review", "Look for ischaemia and structural disease"])
                    .follow_up(&["Repeat Holter monitoring"]),
                    GuidanceBundle::new(
                        "grade_4a",
                        "Grade 4a",
                        Urgency::Urgent,
                        "Repetitive ventricular ectopy: couplets.",
                    )
                    .recommend(&["Cardiology review", "Consider antiarrhythmic therapy"])
                    .follow_up(&["Continuous ECG monitoring"]),
                    GuidanceBundle::new(
                        "grade_4b",
                        "Grade 4b",
                        Urgency::Urgent,
                        "Salvos of ventricular premature beats (non-sustained VT).",
                    )
                    .recommend(&["Urgent cardiology review", "Risk-stratify for sudden cardiac death"])
                    .follow_up(&["Continuous ECG monitoring"]),
                    GuidanceBundle::new(
                        "grade_5",
                        "Grade 5",
                        Urgency::Emergent,
                        "Early ventricular premature beats (R-on-T).",
                    )
                    .recommend(&["Immediate cardiology review"]),
                ],
                critical_rules: vec![
                    CriticalRule::when_selected(
                        "r_on_t",
                        "findings",
                        &["r_on_t"],
                        Urgency::Emergent,
                        "R-on-T phenomenon",
                    )
                    .interpretation(
                        "R-on-T ectopy falls in the vulnerable period of repolarisation and can trigger ventricular fibrillation.",
                    )
                    .recommend(&[
                        "Continuous ECG monitoring with a defibrillator at hand",
                        "Correct potassium and magnesium",
                    ]),
                ],
            }
        });
        &DEFINITION
    }
}
