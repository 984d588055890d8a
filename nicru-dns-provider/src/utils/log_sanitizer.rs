//! Log sanitization utilities
//!
//! Keeps OAuth tokens, account logins and oversized XML bodies out of
//! debug/error logs.

/// Maximum number of bytes of a response body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters kept visible by [`mask`].
const MASK_VISIBLE: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the
/// first `TRUNCATE_LIMIT` bytes (on a char boundary) plus the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an identifier, keeping only its first few characters.
///
/// `"123456/NIC-D"` becomes `"1234***"`. Values no longer than the visible
/// prefix are fully masked.
pub fn mask(s: &str) -> String {
    match s.char_indices().nth(MASK_VISIBLE) {
        Some((idx, _)) => format!("{}***", &s[..idx]),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = "<response><status>success</status></response>";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        // Cyrillic zone comments are common in nic.ru listings
        let s = "зона".repeat(100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn mask_keeps_prefix() {
        assert_eq!(mask("123456/NIC-D"), "1234***");
        assert_eq!(mask("abcd"), "***");
        assert_eq!(mask(""), "***");
        assert_eq!(mask("пароль-1"), "паро***");
    }
}
