// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render `data` as pretty JSON, or with `text` otherwise.
pub fn format_or_json<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
    }
}

/// Left-aligned text table with a header row.
///
/// Column widths fit the widest cell; the last column is not padded.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = render_row(&widths, headers.iter().copied());
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(&widths, row.iter().map(String::as_str)));
    }
    out
}

fn render_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        match widths.get(i) {
            Some(width) if i + 1 < widths.len() => {
                line.push_str(&format!("{:<width$}  ", cell, width = *width));
            }
            _ => line.push_str(cell),
        }
    }
    line.trim_end().to_string()
}
