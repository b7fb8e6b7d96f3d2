//! Record types produced by the daily report parser.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only report layout this parser understands.
pub const REPORT_TYPE: &str = "AM PM REPORT";

pub const HIGH_CONFIDENCE: f32 = 0.85;
pub const LOW_CONFIDENCE: f32 = 0.7;

/// One docket row inside a court part.
///
/// Every field is best-effort: an empty string means the heuristics found
/// nothing for that column, not that the column is absent in the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub sending_part: String,
    pub defendant: String,
    pub purpose: String,
    /// `MM/DD` of the transfer into this part.
    pub transfer_date: String,
    pub top_charge: String,
    /// Status tokens joined with `"; "`.
    pub status: String,
    /// Never populated; kept so stored rows keep their shape.
    pub calendar_date: String,
    /// Never populated; kept so stored rows keep their shape.
    pub case_count: u32,
    pub attorney: String,
    pub estimated_final_date: String,
    pub is_juvenile: bool,
    #[serde(default)]
    pub indictment: String,
    #[serde(default)]
    pub is_jury: bool,
}

impl Case {
    /// Placeholder row for a part that lists no dockets.
    pub fn placeholder(status: String) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// True when the row carries the fields that raise part confidence.
    pub fn is_identified(&self) -> bool {
        !self.defendant.is_empty() || !self.top_charge.is_empty()
    }
}

/// One court part (room/judge unit) for the report day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPart {
    pub part: String,
    pub judge: String,
    pub calendar_day: Option<String>,
    pub out_dates: Vec<String>,
    pub confidence: f32,
    pub cases: Vec<Case>,
}

/// Payload of a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReport {
    /// ISO `YYYY-MM-DD`, or empty when the header was not found.
    pub report_date: String,
    /// e.g. `"111 Centre Street"`, or empty when the header was not found.
    pub building: String,
    pub report_type: String,
    pub entries: Vec<ExtractedPart>,
}

impl ExtractedReport {
    pub fn case_count(&self) -> usize {
        self.entries.iter().map(|e| e.cases.len()).sum()
    }
}

/// Tagged outcome handed to the review UI.
///
/// Serialises as `{"success": true, "extracted_data": {..}}` or
/// `{"success": false, "error": ".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawParseResult", try_from = "RawParseResult")]
pub enum ParseResult {
    Success(ExtractedReport),
    Failure(String),
}

impl ParseResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn report(&self) -> Option<&ExtractedReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(msg) => Some(msg),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawParseResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extracted_data: Option<ExtractedReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidParseResult(&'static str);

impl From<ParseResult> for RawParseResult {
    fn from(result: ParseResult) -> Self {
        match result {
            ParseResult::Success(report) => Self {
                success: true,
                extracted_data: Some(report),
                error: None,
            },
            ParseResult::Failure(msg) => Self {
                success: false,
                extracted_data: None,
                error: Some(msg),
            },
        }
    }
}

impl TryFrom<RawParseResult> for ParseResult {
    type Error = InvalidParseResult;

    fn try_from(raw: RawParseResult) -> Result<Self, Self::Error> {
        match (raw.success, raw.extracted_data, raw.error) {
            (true, Some(report), _) => Ok(Self::Success(report)),
            (true, None, _) => Err(InvalidParseResult("success without extracted_data")),
            (false, _, Some(msg)) => Ok(Self::Failure(msg)),
            (false, _, None) => Err(InvalidParseResult("failure without error message")),
        }
    }
}
