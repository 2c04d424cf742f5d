use medcalc_cli::cli::CalculateArgs;
use medcalc_cli::commands;
use medcalc_cli::config::{MedcalcConfig, OutputFormat};
use medcalc_cli::input::{AnswerArg, merge_answer_args};
use medcalc_scales::scoring::{Answer, Answers};
use medcalc_scales::{ScaleRegistry, all_scales, get_scale};

fn arg(s: &str) -> AnswerArg {
    s.parse().unwrap()
}

fn output(f: impl FnOnce(&mut Vec<u8>) -> eyre::Result<()>) -> String {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn answer_args_parse() {
    assert_eq!(
        arg("dilation=3_4cm"),
        AnswerArg {
            criterion_id: "dilation".to_string(),
            option_ids: vec!["3_4cm".to_string()],
        }
    );
    assert_eq!(arg("signs=rebound, fever").option_ids, vec!["rebound", "fever"]);
    assert!(arg("laboratory=").option_ids.is_empty());
    assert!("dilation".parse::<AnswerArg>().is_err());
    assert!("=x".parse::<AnswerArg>().is_err());
}

#[test]
fn answer_args_follow_the_criterion_mode() {
    let scale = get_scale("alvarado").unwrap();
    let answers = merge_answer_args(
        scale.as_ref(),
        Answers::new(),
        &[arg("signs=rebound,fever"), arg("laboratory=")],
    )
    .unwrap();
    assert_eq!(answers["signs"], Answer::multi(["rebound", "fever"]));
    assert_eq!(answers["laboratory"], Answer::multi([]));

    let scale = get_scale("avpu").unwrap();
    assert!(merge_answer_args(scale.as_ref(), Answers::new(), &[arg("responsiveness=alert,voice")]).is_err());
    assert!(merge_answer_args(scale.as_ref(), Answers::new(), &[arg("mood=low")]).is_err());
}

#[test]
fn command_line_answers_override_file_answers() {
    let scale = get_scale("avpu").unwrap();
    let mut base = Answers::new();
    base.insert("responsiveness".to_string(), Answer::single("alert"));
    let merged = merge_answer_args(scale.as_ref(), base, &[arg("responsiveness=pain")]).unwrap();
    assert_eq!(merged["responsiveness"], Answer::single("pain"));
}

#[test]
fn list_prints_every_scale() {
    let registry = ScaleRegistry::load().unwrap();
    let text = output(|out| commands::list(&registry, out));
    assert_eq!(text.lines().count(), registry.len());
    assert!(text.contains("pediatric_gcs"));
}

#[test]
fn show_prints_bands_and_lookup() {
    let registry = ScaleRegistry::load().unwrap();
    let bishop = output(|out| commands::show(registry.get("bishop").unwrap(), out));
    assert!(bishop.contains("mature"));
    assert!(bishop.contains("5cm_plus"));

    let tnm = output(|out| commands::show(registry.get("tnm").unwrap(), out));
    assert!(tnm.contains("if any axis unknown -> indeterminate"));
    assert!(tnm.contains("* N1|N2|N3 M0 -> stage_iii"));
}

#[test]
fn validate_reports_every_scale() {
    let text = output(|out| commands::validate(&all_scales(), out));
    assert_eq!(text.lines().filter(|l| l.starts_with("ok")).count(), all_scales().len());
}

#[test]
fn calculate_renders_text_report() {
    let registry = ScaleRegistry::load().unwrap();
    let args = CalculateArgs {
        scale: "pediatric_gcs".to_string(),
        answers: vec![arg("eye=to_pain"), arg("verbal=moans_to_pain"), arg("motor=abnormal_flexion")],
        ..CalculateArgs::default()
    };

    let mut buf = Vec::new();
    let result = commands::calculate(&registry, &args, &MedcalcConfig::default(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(result.tier_id(), "severe");
    assert!(text.contains("**Score:** 7"));
}

#[test]
fn calculate_prints_json_when_asked() {
    let registry = ScaleRegistry::load().unwrap();
    let args = CalculateArgs {
        scale: "chads2".to_string(),
        answers: vec![arg("risk_factors=chf,hypertension")],
        format: Some(OutputFormat::Json),
        ..CalculateArgs::default()
    };

    let mut buf = Vec::new();
    commands::calculate(&registry, &args, &MedcalcConfig::default(), &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json["scale_id"], "chads2");
    assert_eq!(json["tier_id"], "high");
    assert_eq!(json["score"]["value"], 2);
}

#[test]
fn calculate_refuses_incomplete_answers() {
    let registry = ScaleRegistry::load().unwrap();
    let args = CalculateArgs {
        scale: "bishop".to_string(),
        answers: vec![arg("dilation=closed")],
        ..CalculateArgs::default()
    };
    let mut buf = Vec::new();
    let err = commands::calculate(&registry, &args, &MedcalcConfig::default(), &mut buf).unwrap_err();
    assert!(err.to_string().contains("incomplete input"));
    assert!(buf.is_empty());
}

#[test]
fn calculate_reads_answer_files_and_writes_docx() {
    let dir = std::env::temp_dir().join(format!("medcalc-cli-calc-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let answers_path = dir.join("answers.json");
    std::fs::write(&answers_path, r#"{ "t": "T1", "n": "N0", "m": "M0" }"#).unwrap();
    let docx_path = dir.join("result.docx");

    let registry = ScaleRegistry::load().unwrap();
    let args = CalculateArgs {
        scale: "tnm".to_string(),
        answers_file: Some(answers_path),
        docx: Some(docx_path.clone()),
        ..CalculateArgs::default()
    };
    let mut buf = Vec::new();
    let result = commands::calculate(&registry, &args, &MedcalcConfig::default(), &mut buf).unwrap();

    assert_eq!(result.tier_id(), "stage_i");
    assert!(std::fs::metadata(&docx_path).unwrap().len() > 0);
    let _ = std::fs::remove_dir_all(&dir);
}
