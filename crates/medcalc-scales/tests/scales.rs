use medcalc_scales::guidance::Urgency;
use medcalc_scales::scoring::{Answer, Answers, ScoreValue};
use medcalc_scales::{ScaleRegistry, all_scales, get_scale};

fn answers(pairs: &[(&str, Answer)]) -> Answers {
    pairs
        .iter()
        .map(|(id, answer)| (id.to_string(), answer.clone()))
        .collect()
}

fn beck_answers(suicide: &str) -> Answers {
    let scale = get_scale("beck").expect("beck registered");
    scale
        .definition()
        .model
        .criteria
        .iter()
        .map(|c| {
            let option = if c.id == "suicide" { suicide } else { "0" };
            (c.id.clone(), Answer::single(option))
        })
        .collect()
}

#[test]
fn registry_loads_every_scale() {
    let registry = ScaleRegistry::load().expect("all scales validate");
    assert_eq!(registry.len(), all_scales().len());
    for id in [
        "asa",
        "bishop",
        "chads2",
        "alvarado",
        "apfel",
        "pediatric_gcs",
        "beck",
        "lown",
        "avpu",
        "tnm",
    ] {
        assert!(registry.get(id).is_ok(), "missing scale {id}");
    }
}

#[test]
fn every_scale_validates_on_its_own() {
    for scale in all_scales() {
        scale
            .definition()
            .validate()
            .unwrap_or_else(|e| panic!("{} failed validation: {e}", scale.id()));
    }
}

#[test]
fn every_band_value_classifies_to_a_tier_with_a_bundle() {
    for scale in all_scales() {
        let Some(range) = scale.definition().model.theoretical_range() else {
            continue;
        };
        for value in range.min..=range.max {
            let tier = scale
                .classify(&ScoreValue::Scalar { value })
                .unwrap_or_else(|e| panic!("{}: {e}", scale.id()));
            assert!(
                scale.definition().bundle(tier).is_some(),
                "{}: tier {tier} has no bundle",
                scale.id()
            );
        }
    }
}

#[test]
fn alvarado_five_is_intermediate() {
    let scale = get_scale("alvarado").unwrap();
    let input = answers(&[
        ("symptoms", Answer::multi(["migration", "anorexia"])),
        ("signs", Answer::multi(["tenderness_rlq", "fever"])),
        ("laboratory", Answer::multi([])),
    ]);

    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 5 });
    assert_eq!(outcome.tier_id, "intermediate");
    assert_eq!(
        outcome.bundle.sections.get("appendicitis_probability").map(String::as_str),
        Some("25-50%")
    );
    assert!(!outcome.bundle.critical_flag);
}

#[test]
fn alvarado_tenderness_leukocytosis_fever_is_intermediate() {
    let scale = get_scale("alvarado").unwrap();
    let input = answers(&[
        ("signs", Answer::multi(["tenderness_rlq", "fever"])),
        ("laboratory", Answer::multi(["leukocytosis"])),
    ]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 5 });
    assert_eq!(outcome.tier_id, "intermediate");
}

#[test]
fn alvarado_with_no_findings_scores_zero() {
    let scale = get_scale("alvarado").unwrap();
    let outcome = scale.evaluate(&Answers::new()).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 0 });
    assert_eq!(outcome.tier_id, "low");
}

#[test]
fn bishop_maximum_is_mature_with_induction_text() {
    let scale = get_scale("bishop").unwrap();
    let input = answers(&[
        ("dilation", Answer::single("5cm_plus")),
        ("effacement", Answer::single("80_plus")),
        ("station", Answer::single("plus_1_2")),
        ("consistency", Answer::single("soft")),
        ("position", Answer::single("anterior")),
    ]);

    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 13 });
    assert_eq!(outcome.tier_id, "mature");
    assert!(outcome.bundle.sections.contains_key("induction_recommendation"));
}

#[test]
fn bishop_band_edges() {
    let scale = get_scale("bishop").unwrap();
    assert_eq!(scale.classify(&ScoreValue::Scalar { value: 5 }).unwrap(), "immature");
    assert_eq!(scale.classify(&ScoreValue::Scalar { value: 6 }).unwrap(), "intermediate");
    assert_eq!(scale.classify(&ScoreValue::Scalar { value: 7 }).unwrap(), "intermediate");
    assert_eq!(scale.classify(&ScoreValue::Scalar { value: 8 }).unwrap(), "mature");
}

#[test]
fn chads2_stroke_alone_is_high() {
    let scale = get_scale("chads2").unwrap();
    let input = answers(&[("risk_factors", Answer::multi(["stroke_tia"]))]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 2 });
    assert_eq!(outcome.tier_id, "high");
}

#[test]
fn apfel_counts_factors() {
    let scale = get_scale("apfel").unwrap();
    let input = answers(&[(
        "risk_factors",
        Answer::multi(["female", "non_smoker", "postoperative_opioids"]),
    )]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 3 });
    assert_eq!(outcome.tier_id, "high");
}

#[test]
fn pediatric_gcs_lowest_is_severe() {
    let scale = get_scale("pediatric_gcs").unwrap();
    let input = answers(&[
        ("eye", Answer::single("none")),
        ("verbal", Answer::single("none")),
        ("motor", Answer::single("none")),
    ]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 3 });
    assert_eq!(outcome.tier_id, "severe");
    assert_eq!(outcome.bundle.urgency, Urgency::Emergent);
}

#[test]
fn lown_takes_the_highest_finding() {
    let scale = get_scale("lown").unwrap();
    let input = answers(&[("findings", Answer::multi(["frequent_pvc", "couplets"]))]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 4 });
    assert_eq!(outcome.tier_id, "grade_4a");
    assert!(outcome.critical_findings.is_empty());
}

#[test]
fn lown_r_on_t_is_critical() {
    let scale = get_scale("lown").unwrap();
    let input = answers(&[("findings", Answer::multi(["occasional_pvc", "r_on_t"]))]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.tier_id, "grade_5");
    assert!(outcome.bundle.critical_flag);
    assert_eq!(outcome.bundle.urgency, Urgency::Emergent);
    assert_eq!(outcome.critical_findings.len(), 1);
    assert_eq!(outcome.critical_findings[0].rule_id, "r_on_t");
}

#[test]
fn avpu_unresponsive_overrides_interpretation() {
    let scale = get_scale("avpu").unwrap();
    let reference = scale.definition().bundle("unresponsive").unwrap().clone();
    let input = answers(&[("responsiveness", Answer::single("unresponsive"))]);

    let outcome = scale.evaluate(&input).unwrap();
    assert!(outcome.bundle.critical_flag);
    assert_ne!(outcome.bundle.interpretation, reference.interpretation);
    assert_eq!(outcome.bundle.recommendations[0], "Call the resuscitation team");
    assert_eq!(
        outcome.bundle.recommendations.last(),
        reference.recommendations.last()
    );

    // the stored bundle is left untouched
    assert_eq!(scale.definition().bundle("unresponsive"), Some(&reference));
}

#[test]
fn beck_suicide_item_raises_urgency_despite_minimal_total() {
    let scale = get_scale("beck").unwrap();
    let outcome = scale.evaluate(&beck_answers("2")).unwrap();

    assert_eq!(outcome.score, ScoreValue::Scalar { value: 2 });
    assert_eq!(outcome.tier_id, "minimal");
    assert!(outcome.bundle.critical_flag);
    assert_eq!(outcome.bundle.urgency, Urgency::Emergent);
    assert!(outcome.bundle.interpretation.contains("Suicidal ideation"));
    assert_eq!(outcome.critical_findings[0].rule_id, "suicidal_ideation");
}

#[test]
fn beck_low_suicide_rating_is_not_critical() {
    let scale = get_scale("beck").unwrap();
    let outcome = scale.evaluate(&beck_answers("1")).unwrap();
    assert_eq!(outcome.tier_id, "minimal");
    assert!(!outcome.bundle.critical_flag);
    assert_eq!(outcome.bundle.urgency, Urgency::Routine);
}

#[test]
fn asa_emergency_modifier_flags_without_changing_class() {
    let scale = get_scale("asa").unwrap();
    let input = answers(&[
        ("physical_status", Answer::single("asa_2")),
        ("modifiers", Answer::multi(["emergency"])),
    ]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score, ScoreValue::Scalar { value: 2 });
    assert_eq!(outcome.tier_id, "asa_2");
    assert!(outcome.bundle.critical_flag);
}

#[test]
fn tnm_metastasis_is_stage_iv() {
    let scale = get_scale("tnm").unwrap();
    let input = answers(&[
        ("t", Answer::single("T2")),
        ("n", Answer::single("N1")),
        ("m", Answer::single("M1")),
    ]);
    let outcome = scale.evaluate(&input).unwrap();
    assert_eq!(outcome.score.to_string(), "T2 N1 M1");
    assert_eq!(outcome.tier_id, "stage_iv");
}

#[test]
fn tnm_metastasis_wins_over_unknown_t_or_n() {
    let scale = get_scale("tnm").unwrap();
    for (t, n) in [("TX", "N0"), ("T2", "NX"), ("TX", "NX")] {
        let input = answers(&[
            ("t", Answer::single(t)),
            ("n", Answer::single(n)),
            ("m", Answer::single("M1")),
        ]);
        let outcome = scale.evaluate(&input).unwrap();
        assert_eq!(outcome.tier_id, "stage_iv", "{t} {n} M1");
    }
}

#[test]
fn tnm_unknown_axis_is_indeterminate() {
    let scale = get_scale("tnm").unwrap();
    for (t, n, m) in [("TX", "N0", "M0"), ("T1", "NX", "M0"), ("T3", "N1", "MX")] {
        let input = answers(&[
            ("t", Answer::single(t)),
            ("n", Answer::single(n)),
            ("m", Answer::single(m)),
        ]);
        let outcome = scale.evaluate(&input).unwrap();
        assert_eq!(outcome.tier_id, "indeterminate", "{t} {n} {m}");
    }
}

#[test]
fn tnm_stage_groups() {
    let scale = get_scale("tnm").unwrap();
    for (t, n, expected) in [
        ("Tis", "N0", "stage_0"),
        ("T1", "N0", "stage_i"),
        ("T4", "N0", "stage_ii"),
        ("Tis", "N3", "stage_iii"),
    ] {
        let input = answers(&[
            ("t", Answer::single(t)),
            ("n", Answer::single(n)),
            ("m", Answer::single("M0")),
        ]);
        assert_eq!(scale.evaluate(&input).unwrap().tier_id, expected, "{t} {n}");
    }
}

#[test]
fn structured_input_lists_answered_criteria() {
    let scale = get_scale("chads2").unwrap();
    let input = answers(&[("risk_factors", Answer::multi(["chf", "diabetes"]))]);
    let text = scale.to_structured_input(&input);
    assert!(text.starts_with("## CHADS"));
    assert!(text.contains("Congestive heart failure"));
    assert!(text.contains("Diabetes mellitus"));

    let empty = answers(&[("risk_factors", Answer::multi([]))]);
    assert!(scale.to_structured_input(&empty).contains(": none"));
}

#[test]
fn answers_deserialize_from_plain_json() {
    let input: Answers = serde_json::from_str(
        r#"{ "risk_factors": ["hypertension", "age_75"] }"#,
    )
    .unwrap();
    let scale = get_scale("chads2").unwrap();
    assert_eq!(scale.evaluate(&input).unwrap().tier_id, "high");

    let input: Answers = serde_json::from_str(r#"{ "responsiveness": "voice" }"#).unwrap();
    assert_eq!(input["responsiveness"], Answer::single("voice"));
}

#[test]
fn every_tnm_code_resolves() {
    let scale = get_scale("tnm").unwrap();
    let criteria = &scale.definition().model.criteria;
    let (t, n, m) = (&criteria[0], &criteria[1], &criteria[2]);

    for t_opt in &t.options {
        for n_opt in &n.options {
            for m_opt in &m.options {
                let input = answers(&[
                    ("t", Answer::single(&t_opt.id)),
                    ("n", Answer::single(&n_opt.id)),
                    ("m", Answer::single(&m_opt.id)),
                ]);
                let outcome = scale.evaluate(&input).unwrap();
                let expected_override = if m_opt.id == "M1" {
                    Some("stage_iv")
                } else if t_opt.unknown || n_opt.unknown || m_opt.unknown {
                    Some("indeterminate")
                } else {
                    None
                };
                if let Some(tier) = expected_override {
                    assert_eq!(outcome.tier_id, tier, "{}", outcome.score);
                }
            }
        }
    }
}
