//! Text normalization for cell values.
//!
//! Form cells are typed by hand and routinely carry stray spaces, line breaks
//! inside merged cells, or full-width spaces. Every value is compared and
//! stored in its stripped form.

use roster_model::CellValue;

/// True for characters removed by [`normalize`].
pub fn is_stripped(ch: char) -> bool {
    ch.is_whitespace() || ch.is_control()
}

/// Removes every whitespace and control character from `value`.
///
/// # Example
/// ```
/// use roster_core::text::normalize;
///
/// assert_eq!(normalize("专家 姓名\n"), "专家姓名");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(value: &str) -> String {
    value.chars().filter(|ch| !is_stripped(*ch)).collect()
}

/// Normalizes a raw cell; missing cells become the empty string.
pub fn normalize_cell(value: &CellValue) -> String {
    value.as_text().map(normalize).unwrap_or_default()
}
