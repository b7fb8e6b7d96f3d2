//! End-to-end daily report pipeline.

use std::path::Path;

use courtsheet_core::{
    ExtractedReport, ParseResult, ParserConfig, REPORT_TYPE, extract_parts, parse_header,
};
use lopdf::Document;
use tracing::{info, warn};

use crate::error::ReportError;
use crate::layout::{self, PageText};

/// Parses AM/PM court reports.
///
/// Create one per application with the desired [`ParserConfig`]; it holds no
/// mutable state and can be cloned into tasks freely.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reconstruct the text lines of every page.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ReportError> {
        let doc = Document::load_mem(bytes)?;
        Ok(layout::extract_pages(&doc, &self.config))
    }

    /// Run the full pipeline over an in-memory PDF.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ExtractedReport, ReportError> {
        let pages = self.extract_pages(bytes)?;
        let text = pages
            .iter()
            .map(PageText::text)
            .collect::<Vec<_>>()
            .join("\n");
        info!(pages = pages.len(), chars = text.len(), "extracted report text");
        self.parse_text(&text)
    }

    /// Run the pipeline over already-reconstructed report text.
    pub fn parse_text(&self, text: &str) -> Result<ExtractedReport, ReportError> {
        let chars = text.trim().chars().count();
        if chars < self.config.min_text_chars {
            return Err(ReportError::InsufficientText { chars });
        }

        let header = parse_header(text);
        if header.is_empty() {
            warn!("report header not found; date and building left empty");
        }

        let entries = extract_parts(text);
        if entries.is_empty() {
            return Err(ReportError::NoParts);
        }

        info!(
            report_date = %header.report_date,
            building = %header.building,
            parts = entries.len(),
            "parsed daily report"
        );

        Ok(ExtractedReport {
            report_date: header.report_date,
            building: header.building,
            report_type: REPORT_TYPE.to_string(),
            entries,
        })
    }

    /// Read and parse a PDF from disk without blocking the async runtime.
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> Result<ExtractedReport, ReportError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let parser = self.clone();
        tokio::task::spawn_blocking(move || parser.parse_bytes(&bytes)).await?
    }

    /// [`parse_file`](Self::parse_file) folded into the tagged result the
    /// review UI consumes.
    pub async fn parse_file_result(&self, path: impl AsRef<Path>) -> ParseResult {
        into_parse_result(self.parse_file(path).await)
    }

    /// [`parse_bytes`](Self::parse_bytes) folded into the tagged result.
    pub fn parse_bytes_result(&self, bytes: &[u8]) -> ParseResult {
        into_parse_result(self.parse_bytes(bytes))
    }
}

pub fn into_parse_result(result: Result<ExtractedReport, ReportError>) -> ParseResult {
    match result {
        Ok(report) => ParseResult::Success(report),
        Err(e) => {
            warn!(error = %e, "daily report parse failed");
            e.into()
        }
    }
}
