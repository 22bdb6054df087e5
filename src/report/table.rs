//! Plain-text rendering of a filtered view for the terminal.

use crate::core::{AlarmClass, Record};

use super::stats::Stats;

/// Render the Stats block.
pub fn render_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total: {}  Enabled: {}  Disabled: {}  With interlock: {}\n",
        stats.total, stats.enabled_count, stats.disabled_count, stats.with_interlock_count
    ));
    let classes: Vec<String> = AlarmClass::ALL
        .iter()
        .map(|c| format!("{}: {}", c.short_label(), stats.class_count(*c)))
        .collect();
    out.push_str(&classes.join("  "));
    out.push('\n');
    out
}

const PREVIEW_HEADERS: [&str; 7] = ["#", "Chart", "Block", "Alarm", "Value", "Status", "Interlock"];

/// Render at most `limit` records as an aligned table.
///
/// `enabled_label`/`disabled_label` are the same labels the display export uses.
pub fn render_rows(records: &[Record], limit: usize, enabled_label: &str, disabled_label: &str) -> String {
    let rows: Vec<[String; 7]> = records
        .iter()
        .take(limit)
        .map(|r| {
            [
                r.id.to_string(),
                r.chart.clone(),
                r.block.clone(),
                r.io_name.clone(),
                r.value.to_string(),
                (if r.is_enabled() { enabled_label } else { disabled_label }).to_string(),
                if r.interlock.is_empty() { "-".to_string() } else { r.interlock.clone() },
            ]
        })
        .collect();

    let mut widths: Vec<usize> = PREVIEW_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, PREVIEW_HEADERS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    if records.len() > rows.len() {
        out.push_str(&format!("... {} more\n", records.len() - rows.len()));
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
