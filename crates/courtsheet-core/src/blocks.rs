//! Splitting report text into per-part blocks.
//!
//! A block starts at a line like `31 FARBER` (1-3 digit part number followed
//! by an all-caps name) and runs until the next such line. Report headers and
//! column headings repeat on every page and are dropped before splitting.
//!
//! Any data row that happens to start with a number and a capitalised word
//! also opens a block. The flattened text carries no column positions to tell
//! the two apart.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::LineScan;

static BLOCK_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\s+[A-Z]{2,}").expect("block start pattern"));

/// The report title, with or without the building on the same row.
static REPORT_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bAM\s+PM\s+REPORT\b").expect("report title pattern"));

/// The building half of a header that wrapped onto its own row.
static BUILDING_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{3}\s+CENTRE\b").expect("building line pattern"));

static CENTRE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bCENTRE\b").expect("centre"));

const COLUMN_LABELS: &[&str] = &[
    "Sending Part",
    "Defendant",
    "Top Charge",
    "STATUS",
    "Attorneys",
    "Date Trans",
];

/// True for report headers and column headings.
///
/// A line that carries a label but also reads as a docket row is kept.
pub fn is_boilerplate(line: &str) -> bool {
    line.starts_with("P U R P") || REPORT_TITLE_RE.is_match(line) || is_column_heading(line)
}

fn is_column_heading(line: &str) -> bool {
    if COLUMN_LABELS.iter().any(|label| line.starts_with(label)) {
        return true;
    }
    COLUMN_LABELS.iter().any(|label| line.contains(label))
        && !is_block_start(line)
        && !LineScan::new(line).is_case_row()
}

/// True when `line` opens a new part block.
pub fn is_block_start(line: &str) -> bool {
    BLOCK_START_RE.is_match(line)
}

/// Trimmed, non-empty, non-boilerplate lines in document order.
///
/// A header whose building wrapped onto the next row (`... AM PM REPORT`
/// then `111 CENTRE`) is dropped as a whole.
pub fn content_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut wrapped_title = false;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let building_tail = wrapped_title && BUILDING_LINE_RE.is_match(line);
        wrapped_title = REPORT_TITLE_RE.is_match(line) && !CENTRE_RE.is_match(line);
        if building_tail || is_boilerplate(line) {
            continue;
        }
        lines.push(line);
    }
    lines
}

/// Partition `text` into blocks of lines.
///
/// Lines before the first block start form a block of their own; the block
/// parser rejects it. Concatenating the result reproduces
/// [`content_lines`] exactly.
pub fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content_lines(text) {
        if is_block_start(line) && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    tracing::debug!(blocks = blocks.len(), "split report into blocks");
    blocks
}
