use std::path::{Path, PathBuf};

use medcalc_export::styles::ReportStyles;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Rendered report text.
    #[default]
    Text,
    /// The calculator result as JSON.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedcalcConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Custom Tera report template; the built-in one when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub json_logs: bool,
    #[serde(default)]
    pub report_styles: ReportStyles,
    /// On-disk version when loading had to migrate; never written.
    #[serde(skip)]
    pub migrated_from: Option<u32>,
}

impl Default for MedcalcConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            output_format: OutputFormat::default(),
            template_path: None,
            log_filter: default_log_filter(),
            json_logs: false,
            report_styles: ReportStyles::default(),
            migrated_from: None,
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("medcalc").join("config.json"))
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> eyre::Result<MedcalcConfig> {
    if !path.exists() {
        return Ok(MedcalcConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> eyre::Result<MedcalcConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let mut config: MedcalcConfig = serde_json::from_value(migrated)?;
    if on_disk_version < CURRENT_VERSION {
        config.migrated_from = Some(on_disk_version);
    }
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value. Loading runs
/// before logging is set up, so nothing is logged here; callers report
/// [`MedcalcConfig::migrated_from`] instead.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update medcalc."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    // v0 → v1: `format` renamed to `output_format`
    if from_version < 1 {
        if let Some(format) = obj.remove("format") {
            obj.entry("output_format").or_insert(format);
        }
        obj.insert("config_version".to_string(), serde_json::Value::Number(1.into()));
    }

    // v1 → v2: `log_level` (a bare level) became `log_filter` (a directive)
    if from_version < 2 {
        if let Some(level) = obj.remove("log_level") {
            obj.entry("log_filter").or_insert(level);
        }
        obj.insert("config_version".to_string(), serde_json::Value::Number(2.into()));
    }

    Ok(json)
}

pub fn save_config(config: &MedcalcConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
