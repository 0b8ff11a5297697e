use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::grid::{HeaderNames, Projection};
use crate::status::classify;

/// Header fragments that mark a column as holding dates
pub const DATE_KEYWORDS: [&str; 7] = ["日期", "Date", "Time", "時間", "建立", "Created", "Timestamp"];

lazy_static! {
    // Dash-separated digit groups, e.g. 2023-10-01 or 10-01
    static ref FALLBACK_DATE_REGEX: Regex = Regex::new(r"^\d+(-\d+)+$").unwrap();
}

// Year-first before month-first; chrono accepts unpadded months and days
const NAIVE_DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const NAIVE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y"];

// Dash-joined fallback keys, same field orders as above
const FALLBACK_KEY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m-%d-%Y"];

/// Pick the first header that looks like a date column
///
/// Matching is a case-insensitive substring test against [`DATE_KEYWORDS`].
pub fn detect_date_field(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .find(|header| {
            let lower = header.to_lowercase();
            DATE_KEYWORDS
                .iter()
                .any(|key| lower.contains(&key.to_lowercase()))
        })
        .map(String::as_str)
}

fn parse_strict(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Calendar-date bucket for a raw date cell
///
/// Strictly parsed values are bucketed by their UTC date as `YYYY-MM-DD`.
/// Anything else falls back to the text before the first space with `/` and
/// `.` turned into `-`. A fallback that reads as a date is normalized to
/// `YYYY-MM-DD`; one that does not is kept as-is only if it is dash-separated
/// digit groups.
///
/// # Examples
/// ```
/// use sheet_autoreply::dashboard::date_bucket;
///
/// assert_eq!(date_bucket("2023/10/01 12:00").as_deref(), Some("2023-10-01"));
/// assert_eq!(date_bucket("10/1/2023 12:00:00").as_deref(), Some("2023-10-01"));
/// assert_eq!(date_bucket("not-a-date"), None);
/// ```
pub fn date_bucket(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = parse_strict(raw) {
        return Some(date.format("%Y-%m-%d").to_string());
    }

    let head = raw.split(' ').next().unwrap_or("");
    let key = head.replace(['/', '.'], "-");
    if let Some(date) = FALLBACK_KEY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&key, format).ok())
    {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    if FALLBACK_DATE_REGEX.is_match(&key) {
        Some(key)
    } else {
        None
    }
}

/// Per-day counts, kept sorted by date key
#[derive(Debug, Clone, Default)]
pub struct TrendBuckets {
    counts: BTreeMap<String, usize>,
}

impl TrendBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one row under the bucket for `raw`, if it has one
    pub fn record(&mut self, raw: &str) {
        if let Some(key) = date_bucket(raw) {
            *self.counts.entry(key).or_insert(0) += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Buckets in chronological order
    pub fn finish(self) -> Vec<TrendPoint> {
        self.counts
            .into_iter()
            .map(|(date, count)| TrendPoint { date, count })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub count: usize,
}

/// Aggregates behind the dashboard counters and charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub replied: usize,
    pub pending: usize,
    pub date_field: Option<String>,
    pub trend: Vec<TrendPoint>,
}

/// Count replied/pending rows and bucket them by day
///
/// Uses the same classification as the automation, applied to the status
/// header. A row without a status column counts as pending.
pub fn summarize(projection: &Projection, headers: &HeaderNames) -> DashboardSummary {
    let date_field = detect_date_field(&projection.headers);
    let mut trend = TrendBuckets::new();
    let mut replied = 0;

    for row in &projection.rows {
        if !classify(row.get(&headers.status)).is_pending() {
            replied += 1;
        }
        if let Some(value) = date_field.and_then(|field| row.get(field)) {
            trend.record(value);
        }
    }

    let total = projection.rows.len();
    DashboardSummary {
        total,
        replied,
        pending: total - replied,
        date_field: date_field.map(str::to_string),
        trend: trend.finish(),
    }
}
