//! Parsing one part block into an [`ExtractedPart`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::split_blocks;
use crate::report::{Case, ExtractedPart, HIGH_CONFIDENCE, LOW_CONFIDENCE};
use crate::rules::scan_case;

static PART_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3})\s+([A-Z][A-Z]+)").expect("part header"));

static CALENDAR_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bCal\.?\s+(Mon|Tues|Wed|Thurs|Fri)\b").expect("calendar day"));

static OUT_DATES_RE: Lazy<Regex> = Lazy::new(|| {
    let date = r"\d{1,2}/\d{1,2}(?:/\d{2,4})?(?:-\d{1,2}(?:/\d{1,2})?)?";
    Regex::new(&format!(r"\bOUT[ \t]+({date}(?:[ \t]*[;,][ \t]*{date})*)"))
        .expect("out dates")
});

static AVAILABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bAVAILABLE\b").expect("available"));
static CONF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bCONF\b").expect("conf"));
static CHAMBERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bCHAMBERS\b").expect("chambers"));
static SITTING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bSITTING\s+IN\s+PT\.?\s*(\d+)").expect("sitting"));
static CALENDAR_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bCALENDAR\s*\(\s*(\d+)\s*\)").expect("calendar count"));

/// Parse a block whose first line names the part and judge.
///
/// Returns `None` when the first line is not a part header. Anything after
/// that degrades to empty fields and a low confidence, never an error.
pub fn parse_block(lines: &[&str]) -> Option<ExtractedPart> {
    let first = lines.first()?;
    let caps = PART_HEADER_RE.captures(first)?;
    let part = caps[1].to_string();
    let judge = caps[2].to_string();

    let joined = lines.join("\n");
    let calendar_day = CALENDAR_DAY_RE
        .captures(&joined)
        .map(|c| format!("Cal {}", &c[1]));
    let out_dates = OUT_DATES_RE
        .captures(&joined)
        .map(|c| split_dates(&c[1]))
        .unwrap_or_default();

    let mut cases: Vec<Case> = lines[1..].iter().filter_map(|line| scan_case(line)).collect();
    if cases.is_empty() {
        cases.push(Case::placeholder(summarize_status(&joined)));
    }

    let confidence = if cases.iter().any(Case::is_identified) {
        HIGH_CONFIDENCE
    } else {
        LOW_CONFIDENCE
    };

    tracing::debug!(
        part = %part,
        judge = %judge,
        cases = cases.len(),
        confidence,
        "parsed part block"
    );

    Some(ExtractedPart {
        part,
        judge,
        calendar_day,
        out_dates,
        confidence,
        cases,
    })
}

/// Split reconstructed text into blocks and parse each, keeping the valid parts.
pub fn extract_parts(text: &str) -> Vec<ExtractedPart> {
    let blocks = split_blocks(text);
    let total = blocks.len();
    let parts: Vec<ExtractedPart> = blocks.iter().filter_map(|b| parse_block(b)).collect();
    if parts.len() < total {
        tracing::debug!(rejected = total - parts.len(), "blocks without a part header");
    }
    parts
}

fn split_dates(run: &str) -> Vec<String> {
    run.split([';', ','])
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Status for a part with no docket rows, e.g. `AVAILABLE; SITTING IN PT 51`.
fn summarize_status(block: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut push = |s: String| {
        if !parts.contains(&s) {
            parts.push(s);
        }
    };

    for re in [&*AVAILABLE_RE, &*CONF_RE, &*CHAMBERS_RE] {
        if let Some(m) = re.find(block) {
            push(m.as_str().to_string());
        }
    }
    for caps in SITTING_RE.captures_iter(block) {
        push(format!("SITTING IN PT {}", &caps[1]));
    }
    for caps in CALENDAR_COUNT_RE.captures_iter(block) {
        push(format!("CALENDAR({})", &caps[1]));
    }

    parts.join("; ")
}
