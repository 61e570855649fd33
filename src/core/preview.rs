use crate::error::{DatasnapError, Result};
use csv::ReaderBuilder;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Longest cell rendered before truncation with `...`.
const MAX_CELL_WIDTH: usize = 50;
const COLUMN_GAP: &str = "  ";

/// The header and leading rows of a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows in the whole file, not just the previewed ones.
    pub total_rows: usize,
}

impl TabularPreview {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

impl fmt::Display for TabularPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self
            .rows
            .len()
            .checked_sub(1)
            .map(|last| last.to_string().len())
            .unwrap_or(0);

        let headers: Vec<String> = self.headers.iter().map(|h| format_cell(h)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| format_cell(c)).collect())
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>index_width$}", "")?;
        for (header, width) in headers.iter().zip(&widths) {
            write_right_aligned(f, header, *width)?;
        }

        for (index, row) in rows.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{index:<index_width$}")?;
            for (cell, width) in row.iter().zip(&widths) {
                write_right_aligned(f, cell, *width)?;
            }
        }

        Ok(())
    }
}

/// Pad by terminal display width, not char count, so wide glyphs line up.
fn write_right_aligned(f: &mut fmt::Formatter<'_>, cell: &str, width: usize) -> fmt::Result {
    let pad = width.saturating_sub(cell.width());
    write!(f, "{COLUMN_GAP}{:pad$}{cell}", "")
}

/// A cell as it is rendered: control characters escaped, then truncated.
fn format_cell(cell: &str) -> String {
    truncate_cell(&escape_cell(cell))
}

/// Keep every row on a single output line.
fn escape_cell(cell: &str) -> String {
    let mut escaped = String::with_capacity(cell.len());
    for c in cell.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.extend(c.escape_default()),
            c => escaped.push(c),
        }
    }
    escaped
}

fn truncate_cell(cell: &str) -> String {
    if cell.width() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }

    let budget = MAX_CELL_WIDTH - 3;
    let mut kept = String::new();
    let mut used = 0;
    for c in cell.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }
    kept.push_str("...");
    kept
}

/// Read `path` as CSV and keep the header plus the first `rows` records.
///
/// The whole file is parsed so that malformed records anywhere in it are
/// reported, the same way a full table load would fail.
pub fn read_preview(path: &Path, rows: usize) -> Result<TabularPreview> {
    if !path.is_file() {
        return Err(DatasnapError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DatasnapError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let mut kept = Vec::with_capacity(rows);
    let mut total_rows = 0;

    for record in reader.records() {
        let record = record?;
        if kept.len() < rows {
            kept.push(record.iter().map(str::to_string).collect());
        }
        total_rows += 1;
    }

    debug!(path = %path.display(), total_rows, shown = kept.len(), "read preview");

    Ok(TabularPreview {
        headers,
        rows: kept,
        total_rows,
    })
}

/// Prints the leading rows of CSV files before and after processing.
pub struct Previewer {
    external_input: PathBuf,
    output_dir: PathBuf,
}

impl Previewer {
    pub fn new(external_input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            external_input: external_input.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn external_input(&self) -> &Path {
        &self.external_input
    }

    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }

    /// Print the first `rows` rows of the external input to stdout.
    pub fn preview_before(&self, rows: usize) -> Result<TabularPreview> {
        self.preview_before_to(rows, &mut std::io::stdout().lock())
    }

    /// Print the first `rows` rows of `filename` in the output dir to stdout.
    pub fn preview_after(&self, filename: &str, rows: usize) -> Result<TabularPreview> {
        self.preview_after_to(filename, rows, &mut std::io::stdout().lock())
    }

    pub fn preview_before_to<W: Write>(&self, rows: usize, out: &mut W) -> Result<TabularPreview> {
        show(&self.external_input, rows, out)
    }

    pub fn preview_after_to<W: Write>(
        &self,
        filename: &str,
        rows: usize,
        out: &mut W,
    ) -> Result<TabularPreview> {
        show(&self.output_path(filename), rows, out)
    }
}

/// Read first, then print, so nothing is written when reading fails.
pub fn show<W: Write>(path: &Path, rows: usize, out: &mut W) -> Result<TabularPreview> {
    let preview = read_preview(path, rows)?;
    writeln!(out, "{preview}")?;
    Ok(preview)
}
