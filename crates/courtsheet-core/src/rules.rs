//! Line rule table for docket rows.
//!
//! Each docket row is scanned by a fixed list of regex rules in priority
//! order. A rule claims the byte spans it matches; later rules skip any match
//! that overlaps a claimed span. So `JS-3` is always a status and never the
//! purpose `JS`, and the date in `ADJ 12/05` is never a transfer date.
//!
//! | # | rule         | cardinality |
//! |---|--------------|-------------|
//! | 1 | juvenile `(J)*` | all      |
//! | 2 | jury `(J)`   | all         |
//! | 3 | status       | all         |
//! | 4 | indictment   | first       |
//! | 5 | sending part | first       |
//! | 6 | attorney     | first       |
//! | 7 | charge       | first       |
//! | 8 | purpose      | first       |
//! | 9 | date         | all         |

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::Case;

/// Purpose codes as printed in the `P U R P` column.
pub const PURPOSE_CODES: &[&str] = &["JS", "HRG", "SENT", "MOT", "PLEA", "CONF", "HEAR"];

/// Words that look like names but never are.
const NOT_NAMES: &[&str] = &["OWN", "PT", "AP", "TAP", "ADA", "OPEN", "IND", "OUT"];

static JUVENILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(J\)\*").expect("juvenile"));

static JURY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(J\)").expect("jury"));

static STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\bADJ\.?\s+\d{1,2}/\d{1,2}(?:/\d{2,4})?\b|\bCALENDAR\s*\(\s*\d+\s*\)|\bJS-\d+\b|\bOPEN\b|\bCONT['’]?D\b|\bS&C\b",
    )
    .expect("status")
});

static INDICTMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bIND[-\s]?\d{4,5}[-/]\d{2}\b").expect("indictment"));

static SENDING_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:PT\s*\d+[A-Z]?|TAP\s+[A-Z]|OWN|RTA-\d+|AP\s*\d+)\b").expect("sending part")
});

static ATTORNEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bADA\s+[A-Z][A-Z'\-]+\b").expect("attorney"));

static CHARGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:ATT(?:EMPTED)?\.?\s+)?(?:(?:MURDER|MANSLAUGHTER|ROBBERY|ASSAULT|BURGLARY|RAPE|KIDNAPPING|ARSON|STRANGULATION|GRAND\s+LARCENY|CRIMINAL\s+SEXUAL\s+ACT|SEXUAL\s+ABUSE)(?:\s+\d{1,2}(?:ST|ND|RD|TH)?)?|(?:MANSL|ROB|ASLT|BURG|KIDNAP|STRANG|GL|CPW|CSCS|CPCS|CSA)\s*\d{1,2}(?:ST|ND|RD|TH)?)\b",
    )
    .expect("charge")
});

static PURPOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:JS|HRG|SENT|MOT|PLEA|CONF|HEAR)\b").expect("purpose"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}/\d{1,2})(?:/(?:\d{4}|\d{2}))?\b").expect("date"));

static NAME_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z'.\-]*,?$").expect("name word"));

static TRAILING_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s,;]*([A-Z][A-Z'\-]+(?:\s+[A-Z][A-Z'\-]+){0,2})[\s,;]*$").expect("trailing name")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Juvenile,
    Jury,
    Status,
    Indictment,
    SendingPart,
    Attorney,
    Charge,
    Purpose,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality {
    First,
    All,
}

const RULE_ORDER: &[(RuleKind, Cardinality)] = &[
    (RuleKind::Juvenile, Cardinality::All),
    (RuleKind::Jury, Cardinality::All),
    (RuleKind::Status, Cardinality::All),
    (RuleKind::Indictment, Cardinality::First),
    (RuleKind::SendingPart, Cardinality::First),
    (RuleKind::Attorney, Cardinality::First),
    (RuleKind::Charge, Cardinality::First),
    (RuleKind::Purpose, Cardinality::First),
    (RuleKind::Date, Cardinality::All),
];

impl RuleKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Juvenile => &*JUVENILE_RE,
            Self::Jury => &*JURY_RE,
            Self::Status => &*STATUS_RE,
            Self::Indictment => &*INDICTMENT_RE,
            Self::SendingPart => &*SENDING_PART_RE,
            Self::Attorney => &*ATTORNEY_RE,
            Self::Charge => &*CHARGE_RE,
            Self::Purpose => &*PURPOSE_RE,
            Self::Date => &*DATE_RE,
        }
    }

    /// Matching any of these makes a line a docket row.
    fn marks_case_row(self) -> bool {
        matches!(
            self,
            Self::SendingPart | Self::Indictment | Self::Charge | Self::Purpose
        )
    }
}

/// One rule match on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: RuleKind,
    pub span: Range<usize>,
    /// Matched text with internal whitespace collapsed.
    pub text: String,
    /// First capture group when the rule has one, else `text`.
    pub value: String,
}

/// The tokens claimed on one line by the rule table.
#[derive(Debug, Clone)]
pub struct LineScan<'a> {
    line: &'a str,
    tokens: Vec<Token>,
}

impl<'a> LineScan<'a> {
    pub fn new(line: &'a str) -> Self {
        let mut scan = Self {
            line,
            tokens: Vec::new(),
        };
        for &(kind, cardinality) in RULE_ORDER {
            scan.apply(kind, cardinality);
        }
        scan.tokens.sort_by_key(|t| t.span.start);
        scan
    }

    fn apply(&mut self, kind: RuleKind, cardinality: Cardinality) {
        for caps in kind.pattern().captures_iter(self.line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let span = whole.range();
            if self.is_claimed(&span) {
                continue;
            }
            let text = collapse_whitespace(whole.as_str());
            let value = caps
                .get(1)
                .map(|m| collapse_whitespace(m.as_str()))
                .unwrap_or_else(|| text.clone());
            self.tokens.push(Token {
                kind,
                span,
                text,
                value,
            });
            if cardinality == Cardinality::First {
                break;
            }
        }
    }

    fn is_claimed(&self, span: &Range<usize>) -> bool {
        self.tokens
            .iter()
            .any(|t| t.span.start < span.end && span.start < t.span.end)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn first(&self, kind: RuleKind) -> Option<&Token> {
        self.tokens.iter().find(|t| t.kind == kind)
    }

    pub fn all(&self, kind: RuleKind) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.kind == kind)
    }

    pub fn has(&self, kind: RuleKind) -> bool {
        self.first(kind).is_some()
    }

    /// A line is a docket row when it has a sending part, indictment, charge
    /// or purpose code.
    pub fn is_case_row(&self) -> bool {
        self.tokens.iter().any(|t| t.kind.marks_case_row())
    }

    /// End of the meaningful text: trailing whitespace and `(J)` markers
    /// are ignored.
    fn content_end(&self) -> usize {
        let mut end = self.line.trim_end().len();
        while let Some(marker) = self.tokens.iter().find(|t| {
            matches!(t.kind, RuleKind::Juvenile | RuleKind::Jury) && t.span.end == end
        }) {
            end = self.line[..marker.span.start].trim_end().len();
        }
        end
    }

    /// Name-like unclaimed words immediately before the indictment number.
    fn defendant(&self) -> String {
        let Some(indictment) = self.first(RuleKind::Indictment) else {
            return String::new();
        };

        let mut words = Vec::new();
        for span in word_spans(&self.line[..indictment.span.start]).into_iter().rev() {
            let word = &self.line[span.clone()];
            let bare = word.trim_end_matches(',');
            if self.is_claimed(&span)
                || !NAME_WORD_RE.is_match(word)
                || NOT_NAMES.contains(&bare)
                || PURPOSE_CODES.contains(&bare)
            {
                break;
            }
            words.push(word);
        }
        words.reverse();
        words.join(" ").trim_end_matches(',').to_string()
    }

    /// `ADA <NAME>`, else an all-caps run after the last claimed token on a
    /// line that carries an indictment.
    fn attorney(&self) -> String {
        if let Some(ada) = self.first(RuleKind::Attorney) {
            return ada.text.clone();
        }
        let Some(indictment) = self.first(RuleKind::Indictment) else {
            return String::new();
        };

        let last_end = self
            .tokens
            .iter()
            .filter(|t| !matches!(t.kind, RuleKind::Juvenile | RuleKind::Jury))
            .map(|t| t.span.end)
            .max()
            .unwrap_or(indictment.span.end);
        let end = self.content_end();
        if last_end >= end {
            return String::new();
        }

        TRAILING_NAME_RE
            .captures(&self.line[last_end..end])
            .map(|caps| collapse_whitespace(&caps[1]))
            .filter(|name| {
                name.split(' ')
                    .all(|w| !NOT_NAMES.contains(&w) && !PURPOSE_CODES.contains(&w))
            })
            .unwrap_or_default()
    }

    /// Build the docket row for this line.
    pub fn to_case(&self) -> Case {
        let text_of = |kind| {
            self.first(kind)
                .map(|t: &Token| t.text.clone())
                .unwrap_or_default()
        };

        let dates: Vec<&Token> = self.all(RuleKind::Date).collect();
        let transfer_date = dates.first().map(|t| t.value.clone()).unwrap_or_default();
        let estimated_final_date = match dates.last() {
            Some(last) if dates.len() >= 2 && last.span.end == self.content_end() => {
                last.text.clone()
            }
            _ => String::new(),
        };

        let status = self
            .all(RuleKind::Status)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        Case {
            sending_part: text_of(RuleKind::SendingPart),
            defendant: self.defendant(),
            purpose: text_of(RuleKind::Purpose),
            transfer_date,
            top_charge: text_of(RuleKind::Charge).to_ascii_uppercase(),
            status,
            calendar_date: String::new(),
            case_count: 0,
            attorney: self.attorney(),
            estimated_final_date,
            is_juvenile: self.has(RuleKind::Juvenile),
            indictment: text_of(RuleKind::Indictment),
            is_jury: self.has(RuleKind::Jury),
        }
    }
}

/// Scan `line` and build a docket row if it is one.
pub fn scan_case(line: &str) -> Option<Case> {
    let scan = LineScan::new(line);
    scan.is_case_row().then(|| scan.to_case())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte ranges of whitespace-separated words.
fn word_spans(s: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(st)) => {
                spans.push(st..i);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        spans.push(st..s.len());
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_docket_row() {
        let case = scan_case("PT 51 JS 11/02 JONES, ROBERT IND-1234/24 ROB 2 ADJ 12/05 ADA KIM")
            .expect("docket row");
        assert_eq!(case.sending_part, "PT 51");
        assert_eq!(case.purpose, "JS");
        assert_eq!(case.transfer_date, "11/02");
        assert_eq!(case.defendant, "JONES, ROBERT");
        assert_eq!(case.indictment, "IND-1234/24");
        assert_eq!(case.top_charge, "ROB 2");
        assert_eq!(case.status, "ADJ 12/05");
        assert_eq!(case.attorney, "ADA KIM");
        assert_eq!(case.estimated_final_date, "");
        assert!(!case.is_juvenile);
    }

    #[test]
    fn status_claims_js_suffix_before_purpose() {
        let case = scan_case("OWN JS-3 HRG DOE IND 5678-25").expect("docket row");
        assert_eq!(case.status, "JS-3");
        assert_eq!(case.purpose, "HRG");
        assert_eq!(case.sending_part, "OWN");
        assert_eq!(case.defendant, "DOE");
    }

    #[test]
    fn adjourn_date_is_not_a_transfer_date() {
        let case = scan_case("TAP A ADJ 12/05 MURDER 2").expect("docket row");
        assert_eq!(case.transfer_date, "");
        assert_eq!(case.status, "ADJ 12/05");
        assert_eq!(case.top_charge, "MURDER 2");
    }

    #[test]
    fn several_status_tokens_join_with_semicolons() {
        let case = scan_case("RTA-2 OPEN CALENDAR(3) CONT'D S&C").expect("docket row");
        assert_eq!(case.sending_part, "RTA-2");
        assert_eq!(case.status, "OPEN; CALENDAR(3); CONT'D; S&C");
    }

    #[test]
    fn juvenile_and_jury_markers() {
        let juvenile = scan_case("AP 4 SMITH IND-2222/25 ASSAULT 1 (J)*").unwrap();
        assert!(juvenile.is_juvenile);
        assert!(!juvenile.is_jury);

        let jury = scan_case("AP 4 SMITH IND-2222/25 ASSAULT 1 (J)").unwrap();
        assert!(!jury.is_juvenile);
        assert!(jury.is_jury);
    }

    #[test]
    fn trailing_date_is_estimated_final_date() {
        let case = scan_case("PT 62 SENT 10/14 LEE IND-3333/24 BURGLARY 2 01/15/26 (J)").unwrap();
        assert_eq!(case.transfer_date, "10/14");
        assert_eq!(case.estimated_final_date, "01/15/26");
        assert!(case.is_jury);
    }

    #[test]
    fn single_date_is_transfer_only() {
        let case = scan_case("PT 62 SENT 10/14").unwrap();
        assert_eq!(case.transfer_date, "10/14");
        assert_eq!(case.estimated_final_date, "");
    }

    #[test]
    fn trailing_caps_run_is_attorney() {
        let case = scan_case("PT 51 GARCIA IND-4444/25 CPW 2 LEGAL AID").unwrap();
        assert_eq!(case.top_charge, "CPW 2");
        assert_eq!(case.attorney, "LEGAL AID");
    }

    #[test]
    fn charge_keywords_are_case_insensitive() {
        let case = scan_case("att murder 2nd").unwrap();
        assert_eq!(case.top_charge, "ATT MURDER 2ND");
    }

    #[test]
    fn short_charge_codes_need_a_degree() {
        assert!(scan_case("ROB SMITH called").is_none());
        assert_eq!(scan_case("GL 4").unwrap().top_charge, "GL 4");
    }

    #[test]
    fn sending_part_must_lead_the_line() {
        let scan = LineScan::new("SMITH PT 51");
        assert!(!scan.has(RuleKind::SendingPart));
        assert!(!scan.is_case_row());
    }

    #[test]
    fn plain_text_is_not_a_case_row() {
        assert!(scan_case("Cal Mon OUT 11/24").is_none());
        assert!(scan_case("AVAILABLE").is_none());
    }

    #[test]
    fn defendant_stops_at_claimed_tokens() {
        let case = scan_case("PT 51 HRG IND-1234/24").unwrap();
        assert_eq!(case.defendant, "");
    }

    #[test]
    fn tokens_are_in_line_order() {
        let scan = LineScan::new("PT 51 JS 11/02 IND-1234/24");
        let kinds: Vec<RuleKind> = scan.tokens().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::SendingPart,
                RuleKind::Purpose,
                RuleKind::Date,
                RuleKind::Indictment
            ]
        );
    }

    #[test]
    fn word_spans_cover_words() {
        let s = "  AB  C ";
        let words: Vec<&str> = word_spans(s).into_iter().map(|r| &s[r]).collect();
        assert_eq!(words, vec!["AB", "C"]);
    }
}
