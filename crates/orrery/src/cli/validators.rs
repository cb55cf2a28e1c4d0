//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum length for a topic name given on the command line.
const MAX_NAME_LENGTH: usize = 200;

/// Validate a topic name argument.
///
/// Topic names are single-line display names, matched exactly against the
/// graph. Leading/trailing whitespace is trimmed before matching.
pub fn validate_topic_name(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Topic name cannot be empty".to_string());
    }

    if s.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "Topic name cannot exceed {} characters, got {} characters",
            MAX_NAME_LENGTH,
            s.len()
        ));
    }

    // Names are single-line (one syllabus line per topic)
    if s.contains('\n') || s.contains('\r') {
        return Err("Topic name cannot contain newline characters".to_string());
    }

    // Check for control characters (0x00-0x1F except tab, and 0x7F-0x9F)
    // These can cause display issues and are likely user errors
    if let Some(pos) = s.chars().position(|c| {
        let code = c as u32;
        // Control characters excluding tab (0x09)
        (code < 0x20 && code != 0x09) || (0x7F..=0x9F).contains(&code)
    }) {
        return Err(format!(
            "Topic name contains invalid control character at position {}",
            pos
        ));
    }

    Ok(s.to_string())
}

/// Validate note text.
///
/// Allows newlines but rejects control characters that could cause display
/// issues. Unlike names, multi-line text is acceptable for notes.
pub fn validate_note_text(s: &str) -> Result<String, String> {
    // Check for control characters (0x00-0x1F except tab and newlines, and 0x7F-0x9F)
    if let Some(pos) = s.chars().position(|c| {
        let code = c as u32;
        // Control characters excluding tab (0x09), LF (0x0A), and CR (0x0D)
        (code < 0x20 && code != 0x09 && code != 0x0A && code != 0x0D)
            || (0x7F..=0x9F).contains(&code)
    }) {
        return Err(format!(
            "Note text contains invalid control character at position {}",
            pos
        ));
    }

    Ok(s.to_string())
}

/// Validate a resource URL.
///
/// Expected format: `scheme://rest`, e.g. `https://example.com/guide`.
///
/// Note: We use explicit checks instead of a full URL parser to provide
/// specific, actionable error messages and avoid adding a URL crate as a
/// dependency. Resources are stored as-is; this only catches obvious typos.
pub fn validate_url(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err("URL cannot contain whitespace".to_string());
    }

    match s.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() && !rest.is_empty() => Ok(s.to_string()),
        _ => Err(format!(
            "Invalid URL: '{}'. Expected format: scheme://rest (e.g., https://example.com)",
            s
        )),
    }
}
