#![cfg(feature = "web")]
use serde::Deserialize;
use serde_json::{Value, json};
use std::future::Future;

use crate::config::Config;
use crate::error::AppError;
use crate::grid::SheetGrid;

/// Spreadsheet service addressed by A1 ranges
///
/// All ranges passed in are fully qualified (`'Tab'!A:Z`, `'Tab'!C5`).
pub trait SheetBackend: Send + Sync {
    /// Title of the tab rows are read from and written to
    fn sheet_title(&self) -> impl Future<Output = Result<String, AppError>> + Send;

    /// Read a range as rows of display strings; an empty range is an empty grid
    fn read_range(&self, range: &str) -> impl Future<Output = Result<SheetGrid, AppError>> + Send;

    /// Overwrite a single cell with a raw (unparsed) value
    fn write_cell(
        &self,
        range: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Google Sheets v4 REST client
pub struct GoogleSheets {
    client: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    sheet_name: Option<String>,
    access_token: String,
}

impl GoogleSheets {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(GoogleSheets {
            client,
            api_base: config.sheets_api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            sheet_name: config.sheet_name.clone(),
            access_token: config.google_access_token.clone(),
        })
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id)
        )
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/values/{}", self.spreadsheet_url(), urlencoding::encode(range))
    }

    async fn checked_text(response: reqwest::Response) -> Result<String, AppError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Sheets(e.to_string()))?;
        if !status.is_success() {
            return Err(AppError::Sheets(format!("HTTP {}: {}", status, text)));
        }
        Ok(text)
    }
}

impl SheetBackend for GoogleSheets {
    async fn sheet_title(&self) -> Result<String, AppError> {
        if let Some(name) = &self.sheet_name {
            return Ok(name.clone());
        }

        let response = self
            .client
            .get(self.spreadsheet_url())
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("metadata request failed: {}", e)))?;
        let text = Self::checked_text(response).await?;

        let meta: SpreadsheetMeta =
            serde_json::from_str(&text).map_err(|e| AppError::Sheets(e.to_string()))?;
        meta.sheets
            .into_iter()
            .next()
            .map(|sheet| sheet.properties.title)
            .ok_or_else(|| AppError::Sheets("spreadsheet has no tabs".to_string()))
    }

    async fn read_range(&self, range: &str) -> Result<SheetGrid, AppError> {
        let response = self
            .client
            .get(self.values_url(range))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("read of {} failed: {}", range, e)))?;
        let text = Self::checked_text(response).await?;

        let parsed: ValueRange =
            serde_json::from_str(&text).map_err(|e| AppError::Sheets(e.to_string()))?;
        Ok(parsed
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn write_cell(&self, range: &str, value: &str) -> Result<(), AppError> {
        let response = self
            .client
            .put(self.values_url(range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.access_token)
            .json(&json!({ "range": range, "values": [[value]] }))
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("write of {} failed: {}", range, e)))?;
        Self::checked_text(response).await?;
        Ok(())
    }
}
