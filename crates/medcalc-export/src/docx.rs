use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::ReportStyles;

/// One line of rendered report text, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Heading { level: u8, text: &'a str },
    Bullet(&'a str),
    /// `> ` lines: critical alerts, set in the alert colour.
    Alert(&'a str),
    PageBreak,
    Blank,
    Body(&'a str),
}

/// Split rendered report text into blocks. The subset:
/// `#`/`##`/`###` headings, `- ` bullets, `> ` alerts, `---` page breaks,
/// `**bold**` inline.
pub fn parse_blocks(rendered: &str) -> Vec<Block<'_>> {
    rendered
        .lines()
        .map(str::trim)
        .map(|line| {
            if line.is_empty() {
                Block::Blank
            } else if line == "---" {
                Block::PageBreak
            } else if let Some(text) = line.strip_prefix("### ") {
                Block::Heading { level: 3, text }
            } else if let Some(text) = line.strip_prefix("## ") {
                Block::Heading { level: 2, text }
            } else if let Some(text) = line.strip_prefix("# ") {
                Block::Heading { level: 1, text }
            } else if let Some(text) = line.strip_prefix("- ") {
                Block::Bullet(text)
            } else if let Some(text) = line.strip_prefix("> ") {
                Block::Alert(text)
            } else {
                Block::Body(line)
            }
        })
        .collect()
}

/// Build a DOCX result sheet from rendered report text.
pub fn generate_docx(rendered: &str, styles: &ReportStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style(1, styles.heading1_size))
        .add_style(heading_style(2, styles.heading2_size))
        .add_style(heading_style(3, styles.heading3_size));

    let mut previous_blank = false;
    for block in parse_blocks(rendered) {
        let blank = block == Block::Blank;
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;

        let paragraph = match block {
            Block::Heading { level, text } => Paragraph::new()
                .style(&format!("Heading{level}"))
                .add_run(Run::new().add_text(text).fonts(font(&styles.heading_font))),
            Block::Bullet(text) => runs(
                Paragraph::new().add_run(Run::new().add_text("\u{2022} ").fonts(font(&styles.body_font))),
                text,
                styles,
            ),
            Block::Alert(text) => Paragraph::new().add_run(
                Run::new()
                    .add_text(text)
                    .bold()
                    .color(&styles.alert_color)
                    .size(styles.body_size * 2)
                    .fonts(font(&styles.body_font)),
            ),
            Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            Block::Blank => Paragraph::new(),
            Block::Body(text) => runs(Paragraph::new(), text, styles),
        };
        docx = docx.add_paragraph(paragraph.align(AlignmentType::Left));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(level: u8, size_pt: usize) -> Style {
    Style::new(&format!("Heading{level}"), StyleType::Paragraph)
        .name(&format!("heading {level}"))
        .size(size_pt * 2) // half-points
}

fn font(name: &str) -> RunFonts {
    RunFonts::new().ascii(name)
}

/// Append `text` to `paragraph`, `**`-delimited segments in bold. Text after
/// an unmatched `**` stays plain.
fn runs(mut paragraph: Paragraph, text: &str, styles: &ReportStyles) -> Paragraph {
    let segments: Vec<&str> = text.split("**").collect();
    let closed = segments.len() % 2 == 1;
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        let is_last = i == segments.len() - 1;
        let mut run = Run::new()
            .add_text(*segment)
            .size(styles.body_size * 2)
            .fonts(font(&styles.body_font));
        if i % 2 == 1 && (closed || !is_last) {
            run = run.bold();
        }
        paragraph = paragraph.add_run(run);
    }
    paragraph
}
