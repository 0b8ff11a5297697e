#![cfg(feature = "web")]
use std::env;
use std::str::FromStr;

use crate::automation::RunSettings;
use crate::column::DEFAULT_SPAN_COLUMNS;
use crate::error::AppError;
use crate::grid::HeaderNames;
use crate::mailer::ReplyTemplate;

/// Server configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind, `HOST` (default `127.0.0.1`)
    pub host: String,

    /// Port to bind, `PORT` (default 3000)
    pub port: u16,

    /// Target spreadsheet, `SPREADSHEET_ID`
    pub spreadsheet_id: String,

    /// Tab to read, `SHEET_NAME`; the first tab when unset
    pub sheet_name: Option<String>,

    /// Number of columns fetched from the left edge, `SHEET_COLUMNS` (default 26, `A:Z`)
    pub sheet_columns: usize,

    /// Sheets REST endpoint, `SHEETS_API_BASE`
    pub sheets_api_base: String,

    /// OAuth bearer token for the Sheets API, `GOOGLE_ACCESS_TOKEN`
    pub google_access_token: String,

    pub smtp_host: String,
    pub smtp_port: u16,

    /// SMTP login and From address, `EMAIL_USER`
    pub email_user: String,

    /// SMTP password with whitespace stripped, `EMAIL_PASS`
    pub email_pass: String,

    pub headers: HeaderNames,
    pub template: ReplyTemplate,

    /// Directory served under `/static`, `STATIC_DIR`
    pub static_dir: String,
}

fn required(key: &str) -> Result<String, AppError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{} is not set", key))),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parsed<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    /// * `AppError::Config` if a required key is missing or a number does not parse
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = HeaderNames::default();
        let template = ReplyTemplate::default();

        let sheet_columns = parsed("SHEET_COLUMNS", DEFAULT_SPAN_COLUMNS)?;
        if sheet_columns == 0 {
            return Err(AppError::Config("SHEET_COLUMNS must be at least 1".to_string()));
        }

        Ok(Config {
            host: or_default("HOST", "127.0.0.1"),
            port: parsed("PORT", 3000)?,
            spreadsheet_id: required("SPREADSHEET_ID")?,
            sheet_name: optional("SHEET_NAME"),
            sheet_columns,
            sheets_api_base: or_default("SHEETS_API_BASE", "https://sheets.googleapis.com/v4"),
            google_access_token: required("GOOGLE_ACCESS_TOKEN")?,
            smtp_host: or_default("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: parsed("SMTP_PORT", 465)?,
            email_user: required("EMAIL_USER")?,
            // App passwords are displayed in groups separated by spaces
            email_pass: required("EMAIL_PASS")?
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
            headers: HeaderNames {
                name: optional("NAME_HEADER").unwrap_or(defaults.name),
                email: optional("EMAIL_HEADER").unwrap_or(defaults.email),
                status: optional("STATUS_HEADER").unwrap_or(defaults.status),
            },
            template: ReplyTemplate {
                subject: optional("MAIL_SUBJECT").unwrap_or(template.subject),
                signature: optional("MAIL_SIGNATURE").unwrap_or(template.signature),
            },
            static_dir: or_default("STATIC_DIR", "static"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The subset of settings the automation and dashboard need per request
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            columns: self.sheet_columns,
            headers: self.headers.clone(),
            template: self.template.clone(),
        }
    }
}
