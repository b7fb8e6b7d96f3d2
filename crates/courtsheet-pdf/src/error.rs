use thiserror::Error;

/// Fallback shown when a failure carries no message of its own.
pub const GENERIC_FAILURE: &str = "Failed to parse PDF";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to read report file: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Could not extract enough text from PDF ({chars} characters). The file may be image-based or corrupted."
    )]
    InsufficientText { chars: usize },

    #[error("No court parts could be extracted from the PDF. Please check the file format.")]
    NoParts,

    #[error("report parsing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ReportError {
    /// Message for the review UI, never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            msg
        }
    }
}

impl From<ReportError> for courtsheet_core::ParseResult {
    fn from(err: ReportError) -> Self {
        Self::Failure(err.user_message())
    }
}
