//! CLI presentation: tables for humans, JSON for scripts.

use crate::config::ValidationError;
use crate::error::SegmentError;
use crate::evaluator::{ListedFragment, SegmentName};
use crate::fragment::Fragment;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

/// One evaluated segment of `vimseg render`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSegment {
    pub segment: SegmentName,
    pub fragment: Option<Fragment>,
}

fn absent() -> String {
    "(absent)".dimmed().to_string()
}

fn contents_cell(fragment: Option<&Fragment>) -> String {
    fragment.map(Fragment::contents).unwrap_or_else(absent)
}

/// Highlight groups of every part, `;`-separated per part
fn groups_cell(fragment: Option<&Fragment>) -> String {
    match fragment.and_then(Fragment::parts) {
        Some(parts) => parts
            .iter()
            .map(|part| part.highlight_group.join(","))
            .collect::<Vec<_>>()
            .join("; "),
        None => "-".to_string(),
    }
}

fn gradient_cell(fragment: Option<&Fragment>) -> String {
    fragment
        .and_then(Fragment::parts)
        .and_then(|parts| parts.iter().find_map(|part| part.gradient_level))
        .map(|level| format!("{:.1}", level))
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_rendered_text(rows: &[RenderedSegment]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Segment", "Contents", "Groups", "Gradient"]);
    for row in rows {
        let fragment = row.fragment.as_ref();
        table.add_row(vec![
            row.segment.to_string(),
            contents_cell(fragment),
            groups_cell(fragment),
            gradient_cell(fragment),
        ]);
    }
    table.to_string()
}

pub fn format_rendered_json(rows: &[RenderedSegment]) -> Result<String, SegmentError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn format_listed_text(segment: SegmentName, rows: &[ListedFragment]) -> String {
    if rows.is_empty() {
        return format!("No tab pages or buffers to list for {}.", segment);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Tab", "Buffer", "Mode", "Priority", "Contents"]);
    for row in rows {
        let tab = row
            .context
            .tabnr
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            tab,
            row.context.bufnr.to_string(),
            row.mode().to_string(),
            format!("{:.3}", row.priority_multiplier()),
            contents_cell(row.fragment.as_ref()),
        ]);
    }
    table.to_string()
}

pub fn format_listed_json(segment: SegmentName, rows: &[ListedFragment]) -> Result<String, SegmentError> {
    let entries: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            json!({
                "tabnr": row.context.tabnr,
                "bufnr": row.context.bufnr,
                "mode": row.mode(),
                "priority_multiplier": row.priority_multiplier(),
                "fragment": row.fragment,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json!({
        "segment": segment,
        "entries": entries,
    }))?)
}

pub fn format_check_result(source: &str, result: &Result<(), Vec<ValidationError>>) -> String {
    match result {
        Ok(()) => format!("{} Configuration valid ({})", "✓".green(), source),
        Err(errors) => {
            let mut out = format!(
                "{} Configuration invalid ({}): {} error(s)\n",
                "✗".red(),
                source,
                errors.len()
            );
            for error in errors {
                out.push_str(&format!("  - {}\n", error));
            }
            out
        }
    }
}
