//! Rendering extracted references for the console

use crate::record::ReferenceRecord;
use anyhow::Result;
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NULL_CELL: &str = "null";
const HEADERS: [&str; 4] = ["(index)", "url", "type", "title"];

/// Output format for the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn table, one row per reference
    #[default]
    Table,
    /// Pretty JSON report
    Json,
    /// YAML report
    Yaml,
}

/// Serialized report for JSON/YAML output
#[derive(Debug, Serialize)]
pub struct ReferenceReport<'a> {
    pub page: Option<String>,
    pub extracted_at: String,
    pub total: usize,
    pub references: &'a [ReferenceRecord],
}

impl<'a> ReferenceReport<'a> {
    pub fn new(page: Option<String>, references: &'a [ReferenceRecord]) -> Self {
        Self {
            page,
            extracted_at: Utc::now().to_rfc3339(),
            total: references.len(),
            references,
        }
    }
}

/// Render references in `format`
pub fn render(
    references: &[ReferenceRecord],
    page: Option<String>,
    format: OutputFormat,
    max_width: usize,
) -> Result<String> {
    let output = match format {
        OutputFormat::Table => render_table(references, max_width),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&ReferenceReport::new(page, references))?
        }
        OutputFormat::Yaml => serde_yaml::to_string(&ReferenceReport::new(page, references))?,
    };
    Ok(output)
}

/// Render references as a table with `(index)`, `url`, `type`, `title`
///
/// Unset fields show as `null`. `max_width` caps each cell in terminal
/// columns (0 = no cap); wide characters count as two.
pub fn render_table(references: &[ReferenceRecord], max_width: usize) -> String {
    let rows: Vec<[String; 4]> = references
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                i.to_string(),
                cell(r.url.as_deref(), max_width),
                cell(r.citation_type.as_deref(), max_width),
                cell(r.title.as_deref(), max_width),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (w, value) in widths.iter_mut().zip(row) {
            *w = (*w).max(value.width());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, '┌', '┬', '┐'));
    out.push_str(&line(&HEADERS.map(String::from), &widths));
    out.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &rows {
        out.push_str(&line(row, &widths));
    }
    out.push_str(&border(&widths, '└', '┴', '┘'));
    out
}

fn cell(value: Option<&str>, max_width: usize) -> String {
    match value {
        Some(v) => {
            let collapsed = v.split_whitespace().collect::<Vec<_>>().join(" ");
            truncate(&collapsed, max_width)
        }
        None => NULL_CELL.to_string(),
    }
}

fn border(widths: &[usize; 4], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&mid.to_string()), right)
}

fn line(values: &[String; 4], widths: &[usize; 4]) -> String {
    let cells: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(v, w)| format!(" {}{} ", v, " ".repeat(w - v.width())))
        .collect();
    format!("│{}│\n", cells.join("│"))
}

fn truncate(s: &str, max: usize) -> String {
    if max == 0 || s.width() <= max {
        return s.to_string();
    }
    let (budget, ellipsis) = if max <= 3 { (max, "") } else { (max - 3, "...") };

    let mut head = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        head.push(c);
    }
    format!("{}{}", head, ellipsis)
}
