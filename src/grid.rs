use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

use crate::error::AppError;

/// Raw cells as returned by the spreadsheet backend, header row first
pub type SheetGrid = Vec<Vec<String>>;

/// One data row keyed by header name
///
/// Every header has an entry, blank when the source row was shorter than
/// the header row. Cells are kept in header order so duplicated header
/// names are not lost; lookups return the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    /// 1-based position in the sheet, header row included
    pub source_row: usize,

    /// `(header, value)` pairs in header order
    pub cells: Vec<(String, String)>,
}

impl ProjectedRow {
    /// Value under the first header named `header`
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }
}

/// JSON key carrying [`ProjectedRow::source_row`]; a header of the same name is not emitted
pub const ROW_INDEX_KEY: &str = "_rowIndex";

impl Serialize for ProjectedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seen = HashSet::from([ROW_INDEX_KEY]);
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(ROW_INDEX_KEY, &self.source_row)?;
        for (header, value) in &self.cells {
            if seen.insert(header.as_str()) {
                map.serialize_entry(header, value)?;
            }
        }
        map.end()
    }
}

/// Header list plus projected data rows
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Projection {
    pub headers: Vec<String>,
    #[serde(rename = "data")]
    pub rows: Vec<ProjectedRow>,
}

/// Project a raw grid into header-keyed rows
///
/// The first row is taken as the header list, as-is. Missing trailing cells
/// become empty strings and cells past the last header are dropped. The
/// first data row is numbered 2.
pub fn project(grid: &SheetGrid) -> Projection {
    let Some((headers, data)) = grid.split_first() else {
        return Projection::default();
    };

    let rows = data
        .iter()
        .enumerate()
        .map(|(offset, row)| ProjectedRow {
            source_row: offset + 2,
            cells: headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect(),
        })
        .collect();

    Projection {
        headers: headers.clone(),
        rows,
    }
}

/// Exact header strings the automation depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    pub name: String,
    pub email: String,
    pub status: String,
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self {
            name: "姓名".to_string(),
            email: "Email".to_string(),
            status: "是否自動回覆".to_string(),
        }
    }
}

/// Column positions of the required headers, resolved once per fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumns {
    pub name: usize,
    pub email: usize,
    pub status: usize,
}

impl RequiredColumns {
    /// Locate the required headers by exact match, first occurrence wins
    ///
    /// # Errors
    /// * `AppError::MissingColumns` naming every header that is absent
    pub fn resolve(headers: &[String], names: &HeaderNames) -> Result<Self, AppError> {
        let find = |wanted: &str| headers.iter().position(|h| h == wanted);

        match (find(&names.name), find(&names.email), find(&names.status)) {
            (Some(name), Some(email), Some(status)) => Ok(Self {
                name,
                email,
                status,
            }),
            (name, email, status) => {
                let missing = [(name, &names.name), (email, &names.email), (status, &names.status)]
                    .into_iter()
                    .filter(|(found, _)| found.is_none())
                    .map(|(_, header)| header.clone())
                    .collect();
                Err(AppError::MissingColumns(missing))
            }
        }
    }
}

/// A data row reduced to the three columns the automation reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow<'a> {
    pub source_row: usize,
    pub name: &'a str,
    pub email: &'a str,
    pub status: Option<&'a str>,
}

impl RequiredColumns {
    /// View the data rows of `grid` through the resolved columns
    ///
    /// A status cell past the end of a short row is reported as `None`.
    pub fn contacts<'a>(&self, grid: &'a SheetGrid) -> impl Iterator<Item = ContactRow<'a>> + 'a {
        let columns = *self;
        grid.iter().skip(1).enumerate().map(move |(offset, row)| {
            let cell = |i: usize| row.get(i).map(String::as_str);
            ContactRow {
                source_row: offset + 2,
                name: cell(columns.name).unwrap_or(""),
                email: cell(columns.email).unwrap_or(""),
                status: cell(columns.status),
            }
        })
    }
}
