use crate::Scale;
use crate::classification::{Band, Classification};
use crate::definition::ScaleDefinition;
use crate::guidance::{CriticalRule, GuidanceBundle, Urgency};
use crate::scoring::{Aggregation, AnswerOption, Criterion, ScoringModel};

/// Beck Depression Inventory (second edition layout).
/// 21 items, each rated 0–3 (options "0".."3"). Total 0–63.
///
/// The `suicide` item is checked on its own: a rating of 2 or more is a
/// critical finding whatever the total.
pub struct Beck;

const ITEMS: [(&str, &str, [&str; 4]); 21] = [
    ("sadness", "Sadness", ["Not sad", "Sad much of the time", "Sad all the time", "So sad it is unbearable"]),
    ("pessimism", "Pessimism", ["Not discouraged about the future", "More discouraged than usual", "Does not expect things to work out", "Future feels hopeless"]),
    ("past_failure", "Past failure", ["Does not feel like a failure", "Has failed more than should have", "Sees a lot of failures", "Feels a total failure"]),
    ("loss_of_pleasure", "Loss of pleasure", ["Enjoys things as much as ever", "Enjoys things less than before", "Gets very little pleasure", "Gets no pleasure at all"]),
    ("guilty_feelings", "Guilty feelings", ["No particular guilt", "Guilty over many things", "Guilty most of the time", "Guilty all of the time"]),
    ("punishment_feelings", "Punishment feelings", ["Does not feel punished", "May be punished", "Expects to be punished", "Feels punished"]),
    ("self_dislike", "Self-dislike", ["Feels the same about self", "Has lost confidence in self", "Disappointed in self", "Dislikes self"]),
    ("self_criticalness", "Self-criticalness", ["No more self-critical than usual", "More critical of self than before", "Criticises self for all faults", "Blames self for everything bad"]),
    ("suicide", "Suicidal thoughts or wishes", ["No thoughts of killing self", "Thoughts of killing self, would not carry them out", "Would like to kill self", "Would kill self given the chance"]),
    ("crying", "Crying", ["Cries no more than before", "Cries more than before", "Cries over every little thing", "Feels like crying but cannot"]),
    ("agitation", "Agitation", ["No more restless than usual", "More restless than usual", "So restless it is hard to stay still", "Has to keep moving or doing something"]),
    ("loss_of_interest", "Loss of interest", ["Has not lost interest in people or activities", "Less interested than before", "Lost most interest", "Hard to get interested in anything"]),
    ("indecisiveness", "Indecisiveness", ["Makes decisions as well as ever", "Finds decisions harder than usual", "Much greater difficulty deciding", "Has trouble making any decision"]),
    ("worthlessness", "Worthlessness", ["Does not feel worthless", "Feels less worthwhile than before", "Feels more worthless than others", "Feels utterly worthless"]),
    ("loss_of_energy", "Loss of energy", ["As much energy as ever", "Less energy than before", "Not enough energy to do very much", "Not enough energy to do anything"]),
    ("sleep_changes", "Changes in sleeping pattern", ["No change in sleep", "Sleeps somewhat more or less than usual", "Sleeps a lot more or less than usual", "Sleeps most of the day or wakes very early"]),
    ("irritability", "Irritability", ["No more irritable than usual", "More irritable than usual", "Much more irritable than usual", "Irritable all the time"]),
    ("appetite_changes", "Changes in appetite", ["No change in appetite", "Appetite somewhat changed", "Appetite much changed", "No appetite or craves food all the time"]),
    ("concentration", "Concentration difficulty", ["Concentrates as well as ever", "Cannot concentrate as well as usual", "Hard to keep mind on anything for long", "Cannot concentrate on anything"]),
    ("tiredness", "Tiredness or fatigue", ["No more tired than usual", "Tires more easily than usual", "Too tired to do many usual things", "Too tired to do most usual things"]),
    ("loss_of_libido", "Loss of interest in sex", ["No recent change in interest in sex", "Less interested in sex than before", "Much less interested in sex now", "Lost interest in sex completely"]),
];

impl Scale for Beck {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> = std::sync::LazyLock::new(|| {
            let criteria = ITEMS
                .iter()
                .map(|(id, label, statements)| {
                    let options = statements
                        .iter()
                        .zip(0i32..)
                        .map(|(statement, points)| {
                            AnswerOption::new(&points.to_string(), statement, points)
                        })
                        .collect();
                    Criterion::single(id, label, options)
                })
                .collect();

            ScaleDefinition {
                id: "beck".to_string(),
                name: "Beck Depression Inventory".to_string(),
                description: Some(
                    "0-13 minimal, 14-19 mild, 20-28 moderate, 29-63 severe".to_string(),
                ),
                model: ScoringModel::new(Aggregation::Sum, criteria),
                classification: Classification::Bands(vec![
                    Band::new(0, 13, "minimal"),
                    Band::new(14, 19, "mild"),
                    Band::new(20, 28, "moderate"),
                    Band::new(29, 63, "severe"),
                ]),
                bundles: vec![
                    GuidanceBundle::new(
                        "minimal",
                        "Minimal depression",
                        Urgency::Routine,
                        "Score within the normal range.",
                    )
                    .follow_up(&["Re-screen if symptoms develop"]),
                    GuidanceBundle::new(
                        "mild",
                        "Mild depression",
                        Urgency::Monitor,
                        "Mild depressive symptoms.",
                    )
                    .recommend(&[
                        "Psychoeducation and guided self-help",
                        "Encourage physical activity and sleep hygiene",
                    ])
                    .follow_up(&["Review in 2-4 weeks"]),
                    GuidanceBundle::new(
                        "moderate",
                        "Moderate depression",
                        Urgency::Urgent,
                        "Moderate depressive symptoms.",
                    )
                    .recommend(&[
                        "Refer for psychological therapy",
                        "Discuss antidepressant treatment",
                    ])
                    .follow_up(&["Review within 2 weeks", "Repeat the inventory to track response"]),
                    GuidanceBundle::new(
                        "severe",
                        "Severe depression",
                        Urgency::Urgent,
                        "Severe depressive symptoms.",
                    )
                    .recommend(&[
                        "Prompt referral to specialist mental health services",
                        "Combined pharmacological and psychological treatment",
                        "Assess risk to self at every contact",
                    ])
                    .follow_up(&["Review within 1 week"]),
                ],
                critical_rules: vec![
                    CriticalRule::when_points_at_least(
                        "suicidal_ideation",
                        "suicide",
                        2,
                        Urgency::Emergent,
                        "Active suicidal ideation",
                    )
                    .interpretation(
                        "Suicidal ideation reported. This takes precedence over the total score and needs same-day safety assessment.",
                    )
                    .recommend(&[
                        "Do not leave the person alone; assess immediate safety",
                        "Contact a crisis line or emergency services now (e.g. 988 in the US, 112 in the EU, 999 in the UK)",
                        "Arrange same-day psychiatric assessment",
                    ]),
                ],
            }
        });
        &DEFINITION
    }
}
