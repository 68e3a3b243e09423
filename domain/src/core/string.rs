//! String helpers for log previews and field normalization.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe).
///
/// Greek text and model replies are multi-byte heavy, so the cut point is
/// moved back to the nearest character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Single-line preview of a model reply for log lines.
pub fn preview(s: &str, max_len: usize) -> String {
    let flat: String = s
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    truncate(&flat, max_len)
}

/// Trimmed copy of `value`, or `fallback` when nothing but whitespace remains.
pub fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
