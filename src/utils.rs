/// Width of section rules and the centered titles in the report.
pub const REPORT_WIDTH: usize = 80;

/// Maximum number of characters of a response body shown in the report.
pub const PREVIEW_CHARS: usize = 200;

/// First `max_chars` characters of `s` followed by an ellipsis.
///
/// Counts characters, not bytes, so multi-byte UTF-8 is never split. The
/// ellipsis is always appended, even when nothing was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let head: String = s.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Center `s` in a field of `width` characters.
pub fn center(s: &str, width: usize) -> String {
    format!("{s:^width$}")
}
