use std::io::Write;
use std::path::Path;

use medcalc_export::docx::generate_docx;
use medcalc_export::render::{load_template, render_report};
use medcalc_scales::classification::{Classification, OverrideCondition};
use medcalc_scales::scoring::Answers;
use medcalc_scales::session::{CalculatorResult, Session};
use medcalc_scales::{Scale, ScaleRegistry};

use crate::cli::CalculateArgs;
use crate::config::{self, MedcalcConfig, OutputFormat};
use crate::input::{merge_answer_args, read_answers_file};

pub fn list(registry: &ScaleRegistry, out: &mut impl Write) -> eyre::Result<()> {
    for scale in registry.iter() {
        writeln!(out, "{:<15} {}", scale.id(), scale.name())?;
    }
    Ok(())
}

pub fn show(scale: &dyn Scale, out: &mut impl Write) -> eyre::Result<()> {
    let definition = scale.definition();
    writeln!(out, "{} ({})", definition.name, definition.id)?;
    if let Some(description) = &definition.description {
        writeln!(out, "{description}")?;
    }

    writeln!(out, "\nCriteria ({:?}):", definition.model.aggregation)?;
    for criterion in &definition.model.criteria {
        writeln!(
            out,
            "  {} - {} [{:?}]",
            criterion.id, criterion.label, criterion.mode
        )?;
        for option in &criterion.options {
            let unknown = if option.unknown { " (unknown)" } else { "" };
            writeln!(
                out,
                "    {:<20} {:>3}  {}{unknown}",
                option.id, option.points, option.label
            )?;
        }
    }

    writeln!(out, "\nTiers:")?;
    match &definition.classification {
        Classification::Bands(bands) => {
            for band in bands {
                let title = definition.bundle(&band.tier_id).map_or("", |b| b.title.as_str());
                writeln!(
                    out,
                    "  {:>3}..={:<3} {:<15} {title}",
                    band.lower, band.upper, band.tier_id
                )?;
            }
        }
        Classification::Lookup(table) => {
            for rule in &table.overrides {
                let when = match &rule.condition {
                    OverrideCondition::AnyAxisUnknown => "any axis unknown".to_string(),
                    OverrideCondition::AxisIs {
                        criterion_id,
                        option_id,
                    } => format!("{criterion_id} = {option_id}"),
                };
                writeln!(out, "  if {when} -> {}", rule.tier_id)?;
            }
            for entry in &table.entries {
                let pattern: Vec<String> = entry
                    .pattern
                    .iter()
                    .map(|axis| {
                        if axis.is_empty() {
                            "*".to_string()
                        } else {
                            axis.join("|")
                        }
                    })
                    .collect();
                writeln!(out, "  {} -> {}", pattern.join(" "), entry.tier_id)?;
            }
        }
    }

    if !definition.critical_rules.is_empty() {
        writeln!(out, "\nCritical rules:")?;
        for rule in &definition.critical_rules {
            writeln!(
                out,
                "  {} on {} ({:?}): {}",
                rule.id, rule.criterion_id, rule.urgency, rule.finding
            )?;
        }
    }
    Ok(())
}

/// Validate each scale on its own and report every result, not just the
/// first failure.
pub fn validate(scales: &[Box<dyn Scale>], out: &mut impl Write) -> eyre::Result<()> {
    let mut failed = 0;
    for scale in scales {
        match scale.definition().validate() {
            Ok(()) => writeln!(out, "ok     {}", scale.id())?,
            Err(e) => {
                failed += 1;
                writeln!(out, "FAILED {}: {e}", scale.id())?;
            }
        }
    }
    if failed > 0 {
        return Err(eyre::eyre!("{failed} of {} scales failed validation", scales.len()));
    }
    Ok(())
}

pub fn calculate(
    registry: &ScaleRegistry,
    args: &CalculateArgs,
    config: &MedcalcConfig,
    out: &mut impl Write,
) -> eyre::Result<CalculatorResult> {
    let scale = registry.get(&args.scale)?;

    let base = match &args.answers_file {
        Some(path) => read_answers_file(path)?,
        None => Answers::new(),
    };
    let answers = merge_answer_args(scale, base, &args.answers)?;

    let mut session = Session::new(scale);
    for (criterion_id, answer) in answers {
        session.set_answer(&criterion_id, answer)?;
    }
    let result = session.calculate()?.clone();

    let format = args.format.unwrap_or(config.output_format);
    let report = if format == OutputFormat::Text || args.docx.is_some() {
        let template = match args.template.as_ref().or(config.template_path.as_ref()) {
            Some(path) => Some(load_template(path)?),
            None => None,
        };
        Some(render_report(scale, &result, session.answers(), template.as_deref())?)
    } else {
        None
    };

    match (format, &report) {
        (OutputFormat::Text, Some(report)) => write!(out, "{report}")?,
        _ => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        }
    }

    if let (Some(path), Some(report)) = (&args.docx, &report) {
        let bytes = generate_docx(report, &config.report_styles)?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), "result sheet written");
    }

    Ok(result)
}

pub fn config_show(config: &MedcalcConfig, path: &Path, out: &mut impl Write) -> eyre::Result<()> {
    let source = if path.exists() { "" } else { " (not found, defaults)" };
    writeln!(out, "# {}{source}", path.display())?;
    writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(())
}

pub fn config_init(path: &Path, force: bool, out: &mut impl Write) -> eyre::Result<()> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "{} already exists; pass --force to overwrite",
            path.display()
        ));
    }
    config::save_config(&MedcalcConfig::default(), path)?;
    writeln!(out, "wrote {}", path.display())?;
    Ok(())
}
