#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use sheet_autoreply::error::AppError;
use sheet_autoreply::grid::SheetGrid;
use sheet_autoreply::mailer::{Letter, Notifier};
use sheet_autoreply::sheets::SheetBackend;

/// Build a grid from string literals
pub fn grid(rows: &[&[&str]]) -> SheetGrid {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// In-memory spreadsheet that records every range it is asked for
pub struct MemorySheet {
    pub title: String,
    pub grid: SheetGrid,
    pub fail_reads: bool,
    /// Ranges whose write should fail
    pub failing_writes: HashSet<String>,
    pub reads: Mutex<Vec<String>>,
    pub writes: Mutex<Vec<(String, String)>>,
}

impl MemorySheet {
    pub fn new(grid: SheetGrid) -> Self {
        MemorySheet {
            title: "Sheet1".to_string(),
            grid,
            fail_reads: false,
            failing_writes: HashSet::new(),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

impl SheetBackend for MemorySheet {
    async fn sheet_title(&self) -> Result<String, AppError> {
        if self.fail_reads {
            return Err(AppError::Sheets("backend unavailable".to_string()));
        }
        Ok(self.title.clone())
    }

    async fn read_range(&self, range: &str) -> Result<SheetGrid, AppError> {
        self.reads.lock().unwrap().push(range.to_string());
        if self.fail_reads {
            return Err(AppError::Sheets("backend unavailable".to_string()));
        }
        Ok(self.grid.clone())
    }

    async fn write_cell(&self, range: &str, value: &str) -> Result<(), AppError> {
        if self.failing_writes.contains(range) {
            return Err(AppError::Sheets(format!("quota exceeded writing {}", range)));
        }
        self.writes
            .lock()
            .unwrap()
            .push((range.to_string(), value.to_string()));
        Ok(())
    }
}

/// Mail transport that keeps every letter instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    /// Recipients whose delivery should fail
    pub rejected: HashSet<String>,
    pub sent: Mutex<Vec<Letter>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Letter> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingMailer {
    async fn send(&self, letter: &Letter) -> Result<(), AppError> {
        if self.rejected.contains(&letter.to) {
            return Err(AppError::Mail(format!("mailbox unavailable: {}", letter.to)));
        }
        self.sent.lock().unwrap().push(letter.clone());
        Ok(())
    }
}
