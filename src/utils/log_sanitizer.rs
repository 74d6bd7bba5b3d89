//! Log sanitization for client-supplied text.
//!
//! Titles and names come straight from request bodies, so they are masked
//! before they reach a log line and control characters are never written.

/// Replace control characters (newlines, escapes, ...) with `?` so a value
/// cannot forge or split log lines.
pub fn strip_control(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}

/// Mask free text for logging.
///
/// Shows only the first 3 characters followed by asterisks.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_text("Dune Messiah"), "Dun***");
/// assert_eq!(mask_text("Oz"), "Oz***");
/// ```
pub fn mask_text(text: &str) -> String {
    let visible: String = text.chars().take(3).collect();
    format!("{}***", strip_control(&visible))
}
