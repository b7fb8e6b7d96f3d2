//! PDF side of the daily report parser: layout reconstruction and the
//! end-to-end pipeline.

mod error;
pub mod layout;
mod parser;

#[cfg(test)]
mod test_pdf;

pub use error::{GENERIC_FAILURE, ReportError};
pub use layout::{PageText, TextFragment};
pub use parser::{ReportParser, into_parse_result};
