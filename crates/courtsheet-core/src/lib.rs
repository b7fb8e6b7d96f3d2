pub mod blocks;
pub mod config;
pub mod header;
pub mod part;
pub mod report;
pub mod rules;

pub use blocks::split_blocks;
pub use config::ParserConfig;
pub use header::{ReportHeader, parse_header};
pub use part::{extract_parts, parse_block};
pub use report::{Case, ExtractedPart, ExtractedReport, ParseResult, REPORT_TYPE};
