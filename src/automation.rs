#![cfg(feature = "web")]
use log::{error, info, warn};

use crate::column::{DEFAULT_SPAN_COLUMNS, a1_cell, a1_span};
use crate::error::{AppError, RowOutcome};
use crate::grid::{HeaderNames, RequiredColumns};
use crate::mailer::{Letter, Notifier, ReplyTemplate};
use crate::sheets::SheetBackend;
use crate::status::{ReplyStatus, classify};

/// Per-request settings shared by the automation and the dashboard
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Columns read from the left edge of the tab
    pub columns: usize,
    pub headers: HeaderNames,
    pub template: ReplyTemplate,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_SPAN_COLUMNS,
            headers: HeaderNames::default(),
            template: ReplyTemplate::default(),
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows mailed and marked as replied
    pub processed: usize,

    /// Rows skipped because their status was already set
    pub already_replied: usize,

    /// Pending rows skipped for lack of a name or email
    pub incomplete: usize,
}

/// Send `letter`, then mark `status_cell` as replied
///
/// The write-back is only attempted after a successful send.
pub async fn mark_and_notify<S: SheetBackend, N: Notifier>(
    sheets: &S,
    mailer: &N,
    letter: &Letter,
    status_cell: &str,
) -> RowOutcome {
    if let Err(e) = mailer.send(letter).await {
        return RowOutcome::SendFailed(e.to_string());
    }
    match sheets.write_cell(status_cell, ReplyStatus::MARKER).await {
        Ok(()) => RowOutcome::Sent,
        Err(e) => RowOutcome::WriteFailed(e.to_string()),
    }
}

/// Mail every pending row and mark it as replied
///
/// Rows are handled strictly one after another. The first row that does not
/// come back `Sent` stops the run; rows before it stay updated in the sheet.
///
/// # Errors
/// * `AppError::EmptySheet` / `AppError::MissingColumns` before anything is sent
/// * `AppError::Sheets` if the sheet cannot be read
/// * `AppError::RowAborted` for the first failed row
pub async fn run<S: SheetBackend, N: Notifier>(
    sheets: &S,
    mailer: &N,
    settings: &RunSettings,
) -> Result<RunSummary, AppError> {
    let title = sheets.sheet_title().await?;
    let grid = sheets.read_range(&a1_span(&title, settings.columns)).await?;

    let Some(headers) = grid.first() else {
        return Err(AppError::EmptySheet);
    };
    let columns = RequiredColumns::resolve(headers, &settings.headers)?;

    let mut summary = RunSummary::default();
    for contact in columns.contacts(&grid) {
        if classify(contact.status) == ReplyStatus::Replied {
            summary.already_replied += 1;
            continue;
        }
        if contact.name.is_empty() || contact.email.is_empty() {
            warn!("Row {} is pending but has no name or email, skipping", contact.source_row);
            summary.incomplete += 1;
            continue;
        }

        let letter = settings.template.letter_for(contact.name, contact.email);
        let status_cell = a1_cell(&title, columns.status, contact.source_row);

        match mark_and_notify(sheets, mailer, &letter, &status_cell).await {
            RowOutcome::Sent => {
                summary.processed += 1;
                info!("Row {}: replied to {}", contact.source_row, contact.email);
            }
            outcome => {
                error!(
                    "Row {} ({}): {}; {} rows already processed",
                    contact.source_row, contact.email, outcome, summary.processed
                );
                return Err(AppError::RowAborted {
                    row: contact.source_row,
                    processed: summary.processed,
                    outcome,
                });
            }
        }
    }

    Ok(summary)
}
