use medcalc_cli::config::{
    CURRENT_VERSION, MedcalcConfig, OutputFormat, load_config, migrate, parse_config, save_config,
};

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("medcalc-cli-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn pre_versioned_config_is_migrated() {
    let config = parse_config(r#"{ "format": "json", "log_level": "debug" }"#).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.output_format, OutputFormat::Json);
    assert_eq!(config.log_filter, "debug");
    assert!(!config.json_logs);
    assert_eq!(config.migrated_from, Some(0));
}

#[test]
fn current_config_reports_no_migration() {
    let config = parse_config(r#"{ "config_version": 2, "output_format": "json" }"#).unwrap();
    assert_eq!(config.migrated_from, None);

    let config = parse_config(r#"{ "config_version": 1, "log_level": "info" }"#).unwrap();
    assert_eq!(config.migrated_from, Some(1));
    assert_eq!(config.log_filter, "info");
}

#[test]
fn v1_config_only_runs_later_migrations() {
    let json = serde_json::json!({
        "config_version": 1,
        "output_format": "text",
        "log_level": "info",
        "format": "json"
    });
    let migrated = migrate(json, 1).unwrap();
    assert_eq!(migrated["config_version"], 2);
    assert_eq!(migrated["log_filter"], "info");
    // only the v0 migration knows about `format`
    assert_eq!(migrated["format"], "json");
    assert_eq!(migrated["output_format"], "text");
}

#[test]
fn existing_new_key_wins_over_old_one() {
    let config = parse_config(r#"{ "format": "json", "output_format": "text" }"#).unwrap();
    assert_eq!(config.output_format, OutputFormat::Text);
}

#[test]
fn newer_config_is_refused() {
    let err = parse_config(r#"{ "config_version": 99 }"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_refused() {
    assert!(parse_config("[1, 2, 3]").is_err());
}

#[test]
fn missing_file_gives_defaults() {
    let dir = scratch_dir("missing");
    let config = load_config(&dir.join("config.json")).unwrap();
    assert_eq!(config, MedcalcConfig::default());
}

#[test]
fn saved_config_loads_back() {
    let dir = scratch_dir("save");
    let path = dir.join("nested").join("config.json");

    let config = MedcalcConfig {
        config_version: 0,
        output_format: OutputFormat::Json,
        template_path: Some("report.tera".into()),
        json_logs: true,
        ..MedcalcConfig::default()
    };
    save_config(&config, &path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.output_format, OutputFormat::Json);
    assert_eq!(loaded.template_path, config.template_path);
    assert!(loaded.json_logs);

    let _ = std::fs::remove_dir_all(&dir);
}
