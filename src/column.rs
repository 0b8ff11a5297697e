/// Convert a zero-based column index to its spreadsheet letter
///
/// Uses the bijective base-26 naming spreadsheets use for columns:
/// 0 is `A`, 25 is `Z`, 26 is `AA`, 701 is `ZZ`, 702 is `AAA`.
///
/// # Arguments
/// * `index` - Column index (0-based)
///
/// # Returns
/// * `String` - Column letter (A, B, ..., Z, AA, ...)
///
/// # Examples
/// ```
/// use sheet_autoreply::column::column_letter;
///
/// assert_eq!(column_letter(0), "A");
/// assert_eq!(column_letter(26), "AA");
/// assert_eq!(column_letter(702), "AAA");
/// ```
pub fn column_letter(index: usize) -> String {
    let mut n = index;
    let mut result = String::new();
    loop {
        result.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result.chars().rev().collect()
}

/// Convert a column letter back to its zero-based index
///
/// Accepts upper or lower case. Returns `None` for an empty string, any
/// character outside A-Z, or a name too long to fit in `usize`.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut acc: usize = 0;
    for c in letters.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return None;
        }
        acc = acc
            .checked_mul(26)?
            .checked_add((c as u8 - b'A') as usize + 1)?;
    }
    Some(acc - 1)
}

/// Columns read when no span is configured (`A:Z`)
pub const DEFAULT_SPAN_COLUMNS: usize = 26;

/// Quote a tab title for use in an A1 range (`My Sheet` -> `'My Sheet'`)
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Range covering the first `columns` columns of a tab, e.g. `'Sheet1'!A:Z`
///
/// A span of zero is treated as one column.
pub fn a1_span(title: &str, columns: usize) -> String {
    let last = column_letter(columns.max(1) - 1);
    format!("{}!A:{}", quote_sheet_title(title), last)
}

/// Single-cell range, e.g. `'Sheet1'!C5`
///
/// `row_number` is 1-based, header row included.
pub fn a1_cell(title: &str, column: usize, row_number: usize) -> String {
    format!(
        "{}!{}{}",
        quote_sheet_title(title),
        column_letter(column),
        row_number
    )
}
