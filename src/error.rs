use thiserror::Error;

/// Result of notifying a single row and marking it as replied
///
/// Send always happens before the write-back, so `WriteFailed` means the
/// email already went out but the sheet still says the row is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Email sent and status cell updated
    Sent,

    /// The mail transport rejected the message; nothing was written
    SendFailed(String),

    /// Email sent, but writing the status cell failed
    WriteFailed(String),
}

impl RowOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, RowOutcome::Sent)
    }
}

impl std::fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowOutcome::Sent => write!(f, "sent"),
            RowOutcome::SendFailed(e) => write!(f, "send failed: {}", e),
            RowOutcome::WriteFailed(e) => write!(f, "email sent but write-back failed: {}", e),
        }
    }
}

/// Errors raised while serving the dashboard or running the automation
///
/// Validation errors are the caller's problem and are shown as-is.
/// Everything else is a backend failure and only a generic message leaves
/// the server.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("the spreadsheet has no data")]
    EmptySheet,

    #[error("required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("spreadsheet backend error: {0}")]
    Sheets(String),

    #[error("mail transport error: {0}")]
    Mail(String),

    #[error("row {row} aborted the run after {processed} processed: {outcome}")]
    RowAborted {
        row: usize,
        processed: usize,
        outcome: RowOutcome,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for errors caused by the sheet's contents rather than a backend
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptySheet | AppError::MissingColumns(_))
    }
}
