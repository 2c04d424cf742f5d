use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};

use medcalc_scales::Scale;
use medcalc_scales::guidance::{CriticalFinding, GuidanceBundle};
use medcalc_scales::scoring::{AnsweredCriterion, Answers, ScoreValue};
use medcalc_scales::session::CalculatorResult;

use crate::error::ExportError;

/// Built-in report layout. Uses the same Markdown subset the DOCX builder
/// understands; `> ` lines are critical alerts.
pub const DEFAULT_TEMPLATE: &str = r#"# {{ scale_name }}

**Score:** {{ score_text }}
**Result:** {{ bundle.title }}
**Urgency:** {{ bundle.urgency }}
{% for finding in critical_findings %}
> CRITICAL: {{ finding.finding }}
{%- endfor %}

## Interpretation

{{ bundle.interpretation }}
{% if bundle.recommendations %}
## Recommendations
{% for item in bundle.recommendations %}
- {{ item }}
{%- endfor %}
{% endif %}{% if bundle.follow_up %}
## Follow-up
{% for item in bundle.follow_up %}
- {{ item }}
{%- endfor %}
{% endif %}{% for name, text in bundle.sections %}
### {{ name | replace(from="_", to=" ") | capitalize }}

{{ text }}
{% endfor %}{% if answers %}
## Answers
{% for answer in answers %}
- {{ answer.label }}: {% if answer.selection %}{{ answer.selection | join(sep=", ") }}{% else %}none{% endif %}
{%- endfor %}
{% endif %}
Calculated {{ calculated_at }}
"#;

/// Everything a report template can refer to.
#[derive(Debug, Serialize)]
pub struct ReportContext<'a> {
    pub scale_id: &'a str,
    pub scale_name: &'a str,
    pub score_text: String,
    pub score: &'a ScoreValue,
    pub tier_id: &'a str,
    pub bundle: &'a GuidanceBundle,
    pub critical_findings: &'a [CriticalFinding],
    pub answers: Vec<AnsweredCriterion>,
    pub calculated_at: String,
}

impl<'a> ReportContext<'a> {
    pub fn new(scale: &'a dyn Scale, result: &'a CalculatorResult, answers: &Answers) -> Self {
        Self {
            scale_id: &result.scale_id,
            scale_name: scale.name(),
            score_text: result.score().to_string(),
            score: result.score(),
            tier_id: result.tier_id(),
            bundle: result.bundle(),
            critical_findings: result.critical_findings(),
            answers: scale.definition().model.answered(answers),
            calculated_at: result.calculated_at.to_string(),
        }
    }
}

/// Render a Tera template against a calculator result.
///
/// `template_content` is the raw template string (Jinja2 syntax); `None`
/// uses [`DEFAULT_TEMPLATE`].
pub fn render_report(
    scale: &dyn Scale,
    result: &CalculatorResult,
    answers: &Answers,
    template_content: Option<&str>,
) -> Result<String, ExportError> {
    let template_name = "report.md";
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content.unwrap_or(DEFAULT_TEMPLATE))
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let report = ReportContext::new(scale, result, answers);
    let value = serde_json::to_value(&report)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    tracing::debug!(scale_id = %result.scale_id, bytes = rendered.len(), "report rendered");
    Ok(rendered)
}

/// Read a custom template from disk.
pub fn load_template(path: &Path) -> Result<String, ExportError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ExportError::TemplateNotFound(path.display().to_string()),
        _ => ExportError::TemplateRead {
            path: path.display().to_string(),
            source,
        },
    })
}
