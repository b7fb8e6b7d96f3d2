//! Vertical card display for extracted reports.
//!
//! Renders each court part as a grouped, human-readable card with its
//! docket rows underneath, skipping empty fields.

use std::fmt::Write;

use courtsheet_core::{Case, ExtractedPart, ExtractedReport};

const MAX_CASES: usize = 25;
const LABEL_WIDTH: usize = 22;

// ── Public API ──

/// Render the whole report: header block, then one card per part.
pub fn render_report(report: &ExtractedReport) -> String {
    let mut out = String::new();
    let date = non_empty(&report.report_date).unwrap_or("(no date)");
    let building = non_empty(&report.building).unwrap_or("(unknown building)");

    let _ = writeln!(out, "=== {} - {} ===", report.report_type, date);
    let _ = writeln!(out, "{building}");
    let _ = writeln!(
        out,
        "{} parts, {} docket rows",
        report.entries.len(),
        report.case_count()
    );
    let _ = writeln!(out);

    for part in &report.entries {
        render_part(&mut out, part);
    }
    out
}

/// One line per part: part, judge, rows, confidence.
pub fn render_summary(report: &ExtractedReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<18} {:>5} {:>6}", "PART", "JUDGE", "ROWS", "CONF");
    for part in &report.entries {
        let _ = writeln!(
            out,
            "{:<6} {:<18} {:>5} {:>6.2}",
            part.part,
            part.judge,
            part.cases.len(),
            part.confidence
        );
    }
    out
}

// ── Part rendering ──

fn render_part(out: &mut String, part: &ExtractedPart) {
    let _ = writeln!(out, "Part {} - {}", part.part, part.judge);
    field(out, "calendar_day", part.calendar_day.as_deref());
    if !part.out_dates.is_empty() {
        field(out, "out_dates", Some(part.out_dates.join(", ").as_str()));
    }
    field(out, "confidence", Some(format!("{:.2}", part.confidence).as_str()));

    let show = part.cases.len().min(MAX_CASES);
    for (i, case) in part.cases.iter().take(show).enumerate() {
        let _ = writeln!(out, "  [{}]", i + 1);
        render_case(out, case);
    }
    if part.cases.len() > show {
        let _ = writeln!(out, "  ... and {} more", part.cases.len() - show);
    }
    let _ = writeln!(out);
}

fn render_case(out: &mut String, case: &Case) {
    let rows = [
        ("sending_part", case.sending_part.as_str()),
        ("defendant", case.defendant.as_str()),
        ("indictment", case.indictment.as_str()),
        ("purpose", case.purpose.as_str()),
        ("transfer_date", case.transfer_date.as_str()),
        ("top_charge", case.top_charge.as_str()),
        ("status", case.status.as_str()),
        ("attorney", case.attorney.as_str()),
        ("estimated_final_date", case.estimated_final_date.as_str()),
    ];
    for (label, value) in rows {
        field(out, label, non_empty(value));
    }
    if case.is_juvenile {
        field(out, "juvenile", Some("yes"));
    }
    if case.is_jury {
        field(out, "jury", Some("yes"));
    }
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "    {label:<width$} {value}", width = LABEL_WIDTH);
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtsheet_core::REPORT_TYPE;

    fn report() -> ExtractedReport {
        ExtractedReport {
            report_date: "2025-11-21".into(),
            building: "111 Centre Street".into(),
            report_type: REPORT_TYPE.into(),
            entries: vec![
                ExtractedPart {
                    part: "31".into(),
                    judge: "FARBER".into(),
                    calendar_day: Some("Cal Mon".into()),
                    out_dates: vec!["11/24".into(), "11/25".into()],
                    confidence: 0.85,
                    cases: vec![Case {
                        defendant: "JONES".into(),
                        top_charge: "ROB 2".into(),
                        is_juvenile: true,
                        ..Case::default()
                    }],
                },
                ExtractedPart {
                    part: "52".into(),
                    judge: "HARRIS".into(),
                    calendar_day: None,
                    out_dates: vec![],
                    confidence: 0.7,
                    cases: vec![Case::placeholder("AVAILABLE".into())],
                },
            ],
        }
    }

    #[test]
    fn card_lists_parts_and_non_empty_fields() {
        let text = render_report(&report());
        assert!(text.contains("=== AM PM REPORT - 2025-11-21 ==="));
        assert!(text.contains("2 parts, 2 docket rows"));
        assert!(text.contains("Part 31 - FARBER"));
        assert!(text.contains("11/24, 11/25"));
        assert!(text.contains("juvenile"));
        assert!(!text.contains("sending_part"));
        assert!(text.contains("AVAILABLE"));
    }

    #[test]
    fn summary_has_one_row_per_part() {
        let text = render_summary(&report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("31"));
        assert!(lines[1].ends_with("0.85"));
        assert!(lines[2].contains("HARRIS"));
    }

    #[test]
    fn long_case_lists_are_truncated() {
        let mut report = report();
        report.entries[0].cases = vec![Case::placeholder("OPEN".into()); MAX_CASES + 3];
        let text = render_report(&report);
        assert!(text.contains("... and 3 more"));
    }
}
