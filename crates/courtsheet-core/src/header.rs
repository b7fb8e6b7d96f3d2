//! Report header parsing.
//!
//! The first line of an AM/PM report reads like
//! `11-21-25 AM PM REPORT 111 CENTRE`. From it we recover the report date
//! (normalised to ISO `YYYY-MM-DD`) and the building (`111 Centre Street`).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})[-/](\d{1,2})[-/](\d{2}|\d{4})\s+AM\s+PM\s+REPORT\s+(\d{3})\s+CENTRE")
        .expect("header pattern")
});

/// Date and building recovered from the report header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub report_date: String,
    pub building: String,
}

impl ReportHeader {
    pub fn is_empty(&self) -> bool {
        self.report_date.is_empty() && self.building.is_empty()
    }
}

/// Find the report header anywhere in `text`.
///
/// A missing header is not an error: both fields come back empty and the
/// rest of the pipeline still runs.
pub fn parse_header(text: &str) -> ReportHeader {
    let Some(caps) = HEADER_RE.captures(text) else {
        return ReportHeader::default();
    };

    let report_date = normalize_date(&caps[1], &caps[2], &caps[3]).unwrap_or_default();
    ReportHeader {
        report_date,
        building: format!("{} Centre Street", &caps[4]),
    }
}

/// Zero-pad month/day and expand a two-digit year into 20YY.
///
/// Returns `None` for dates that do not exist on the calendar.
pub fn normalize_date(month: &str, day: &str, year: &str) -> Option<String> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}
