use medcalc_export::docx::{Block, generate_docx, parse_blocks};
use medcalc_export::error::ExportError;
use medcalc_export::render::{load_template, render_report};
use medcalc_export::styles::ReportStyles;
use medcalc_scales::get_scale;
use medcalc_scales::scoring::{Answer, Answers};
use medcalc_scales::session::Session;

fn calculated(scale_id: &str, pairs: &[(&str, Answer)]) -> (Answers, medcalc_scales::session::CalculatorResult) {
    let scale = get_scale(scale_id).unwrap();
    let mut session = Session::new(scale.as_ref());
    for (criterion, answer) in pairs {
        session.set_answer(criterion, answer.clone()).unwrap();
    }
    let at = jiff::Timestamp::from_second(1_700_000_000).unwrap();
    let result = session.calculate_at(at).unwrap().clone();
    (session.answers().clone(), result)
}

#[test]
fn default_report_includes_tier_guidance_and_answers() {
    let scale = get_scale("bishop").unwrap();
    let (answers, result) = calculated(
        "bishop",
        &[
            ("dilation", Answer::single("5cm_plus")),
            ("effacement", Answer::single("80_plus")),
            ("station", Answer::single("plus_1_2")),
            ("consistency", Answer::single("soft")),
            ("position", Answer::single("anterior")),
        ],
    );

    let report = render_report(scale.as_ref(), &result, &answers, None).unwrap();
    assert!(report.starts_with("# Bishop Score"));
    assert!(report.contains("**Score:** 13"));
    assert!(report.contains(&result.bundle().title));
    assert!(report.contains("### Induction recommendation"));
    assert!(report.contains("- Dilation: 5 cm or more"));
    assert!(report.contains("2023-11-14T22:13:20Z"));
    assert!(!report.contains("CRITICAL"));
}

#[test]
fn critical_findings_render_as_alerts() {
    let scale = get_scale("avpu").unwrap();
    let (answers, result) = calculated("avpu", &[("responsiveness", Answer::single("unresponsive"))]);

    let report = render_report(scale.as_ref(), &result, &answers, None).unwrap();
    assert!(report.contains("> CRITICAL: Patient unresponsive"));
    assert!(report.contains("**Urgency:** emergent"));

    let alerts: Vec<Block> = parse_blocks(&report)
        .into_iter()
        .filter(|b| matches!(b, Block::Alert(_)))
        .collect();
    assert_eq!(alerts, vec![Block::Alert("CRITICAL: Patient unresponsive")]);
}

#[test]
fn composite_score_renders_as_code() {
    let scale = get_scale("tnm").unwrap();
    let (answers, result) = calculated(
        "tnm",
        &[
            ("t", Answer::single("T3")),
            ("n", Answer::single("N0")),
            ("m", Answer::single("M0")),
        ],
    );
    let report = render_report(scale.as_ref(), &result, &answers, Some("{{ score_text }} -> {{ tier_id }}")).unwrap();
    assert_eq!(report, "T3 N0 M0 -> stage_ii");
}

#[test]
fn broken_template_is_a_parse_error() {
    let scale = get_scale("avpu").unwrap();
    let (answers, result) = calculated("avpu", &[("responsiveness", Answer::single("alert"))]);
    let err = render_report(scale.as_ref(), &result, &answers, Some("{% if %}")).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn missing_template_file_is_reported() {
    let path = std::env::temp_dir().join("medcalc-export-no-such-template.md");
    assert!(matches!(
        load_template(&path),
        Err(ExportError::TemplateNotFound(_))
    ));
}

#[test]
fn blocks_follow_the_markdown_subset() {
    let blocks = parse_blocks("# Title\n\n## Sub\n- item\n> alert\n---\nplain **bold**");
    assert_eq!(
        blocks,
        vec![
            Block::Heading { level: 1, text: "Title" },
            Block::Blank,
            Block::Heading { level: 2, text: "Sub" },
            Block::Bullet("item"),
            Block::Alert("alert"),
            Block::PageBreak,
            Block::Body("plain **bold**"),
        ]
    );
}

#[test]
fn docx_is_a_zip_package() {
    let scale = get_scale("chads2").unwrap();
    let (answers, result) = calculated("chads2", &[("risk_factors", Answer::multi(["chf"]))]);
    let report = render_report(scale.as_ref(), &result, &answers, None).unwrap();

    let bytes = generate_docx(&report, &ReportStyles::default()).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK");
}
