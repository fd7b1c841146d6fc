//! Terminal formatting for trees, validation results and replay summaries.

use crate::tree::validate::ValidateResult;
use crate::tree::NodeKind;
use crate::views::TreeRow;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Indented outline, folders suffixed with `/`, selection marked with `*`.
pub fn format_tree_outline(rows: &[TreeRow], color: bool) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = if row.selected { "*" } else { " " };
        let indent = "  ".repeat(row.depth);
        let label = match row.kind {
            NodeKind::Folder => format!("{}/", row.name),
            NodeKind::File => row.name.clone(),
        };
        let label = if !color {
            label
        } else if row.kind == NodeKind::Folder {
            format!("{}", label.blue().bold())
        } else {
            label
        };
        out.push_str(&format!("{} {}{} ({})\n", marker, indent, label, row.id));
    }
    out
}

/// Tabular listing with one row per node.
pub fn format_tree_table(rows: &[TreeRow]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Type", "Depth", "Name", "Children", "Bytes"]);
    for row in rows {
        table.add_row(vec![
            row.id.clone(),
            row.kind.to_string(),
            row.depth.to_string(),
            format!("{}{}", "  ".repeat(row.depth), row.name),
            row.child_count.to_string(),
            row.content_bytes.to_string(),
        ]);
    }
    format!("{}", table)
}

pub fn format_validate_text(result: &ValidateResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tree validation")));
    out.push_str(&format!(
        "  Status: {}\n",
        if result.valid { "valid" } else { "invalid" }
    ));
    out.push_str(&format!("  Nodes: {}\n", result.node_count));
    out.push_str(&format!(
        "  Fingerprint: {}...\n",
        &result.fingerprint[..result.fingerprint.len().min(12)]
    ));
    if !result.errors.is_empty() {
        out.push_str("\n  Errors:\n");
        for error in &result.errors {
            out.push_str(&format!("    - {}\n", error));
        }
    }
    if !result.warnings.is_empty() {
        out.push_str("\n  Warnings:\n");
        for warning in &result.warnings {
            out.push_str(&format!("    - {}\n", warning));
        }
    }
    out
}
