#![cfg(feature = "web")]
use crate::column::a1_span;
use crate::error::AppError;
use crate::grid::{Projection, project};
use crate::sheets::SheetBackend;

/// Fetch the sheet and project it for display
///
/// Read-only. An empty sheet yields an empty projection, not an error.
pub async fn preview<S: SheetBackend>(sheets: &S, columns: usize) -> Result<Projection, AppError> {
    let title = sheets.sheet_title().await?;
    let grid = sheets.read_range(&a1_span(&title, columns)).await?;
    Ok(project(&grid))
}
