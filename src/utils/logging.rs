//! Logging utilities
//!
//! Helpers that keep prompts and upstream bodies short in log lines

/// Longest prompt excerpt written to debug logs
pub const PROMPT_PREVIEW_CHARS: usize = 80;

/// Truncate a string with a note about original length
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let total = s.chars().count();
            format!("{}... ({} chars truncated)", &s[..cut], total - max_chars)
        }
        None => s.to_string(),
    }
}

/// Short single-line preview of a prompt for debug logs
pub fn prompt_preview(prompt: &str) -> String {
    let flattened: String = prompt
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    truncate_content(&flattened, PROMPT_PREVIEW_CHARS)
}
