use serde::Serialize;

/// Whether a row still needs the automatic reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Pending,
    Replied,
}

impl ReplyStatus {
    /// Value written to the status cell once a row has been handled
    pub const MARKER: &'static str = "Y";

    pub fn is_pending(self) -> bool {
        self == ReplyStatus::Pending
    }
}

/// Classify a raw status cell
///
/// The cell is trimmed and uppercased. Only an empty cell or `N` counts as
/// pending; any other value, recognised or not, is treated as replied so an
/// ambiguous row is never mailed twice.
///
/// # Examples
/// ```
/// use sheet_autoreply::status::{ReplyStatus, classify};
///
/// assert_eq!(classify(Some(" n ")), ReplyStatus::Pending);
/// assert_eq!(classify(Some("yes")), ReplyStatus::Replied);
/// assert_eq!(classify(None), ReplyStatus::Pending);
/// ```
pub fn classify(raw: Option<&str>) -> ReplyStatus {
    let normalized = raw.unwrap_or("").trim().to_uppercase();
    match normalized.as_str() {
        "" | "N" => ReplyStatus::Pending,
        _ => ReplyStatus::Replied,
    }
}
