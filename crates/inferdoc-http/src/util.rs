//! Helpers shared by the client and the diagnostic checks

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****" to prevent exposure of short keys.
///
/// # Examples
/// ```
/// use inferdoc_http::util::mask_api_key;
/// assert_eq!(mask_api_key("tgp_1234567890abcdef"), "tgp_...cdef");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY || !key.is_ascii() {
        return "****".to_string();
    }
    format!(
        "{}...{}",
        &key[..KEY_MASK_VISIBLE_CHARS],
        &key[key.len() - KEY_MASK_VISIBLE_CHARS..]
    )
}

/// Truncate a string to at most `max_chars` characters without splitting a
/// UTF-8 code point.
#[must_use]
pub fn truncate_safe(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strip an optional `Bearer ` prefix from an Authorization header value.
#[must_use]
pub fn bearer_token(header_value: &str) -> &str {
    let trimmed = header_value.trim();
    trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))
        .unwrap_or(trimmed)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key_long() {
        let key = "tgp_v1_1234567890abcdefghij";
        let masked = mask_api_key(key);
        assert_eq!(masked, "tgp_...ghij");
        assert!(!masked.contains("567890"));
    }

    #[test]
    fn test_mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_truncate_safe() {
        assert_eq!(truncate_safe("hello world", 5), "hello");
        assert_eq!(truncate_safe("short", 50), "short");
        assert_eq!(truncate_safe("héllo", 2), "hé");
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc123"), "abc123");
        assert_eq!(bearer_token("abc123"), "abc123");
        assert_eq!(bearer_token("  Bearer  abc123 "), "abc123");
    }
}
