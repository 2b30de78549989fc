//! Keyword normalization for incoming search requests.

/// Resolves the keyword to search for.
///
/// Surrounding whitespace is trimmed. A missing or blank keyword falls back
/// to `default`.
///
/// # Examples
/// ```
/// use motohub_search::resolve_keyword;
///
/// assert_eq!(resolve_keyword(Some("  CB400 "), "Rebel 250"), "CB400");
/// assert_eq!(resolve_keyword(Some("   "), "Rebel 250"), "Rebel 250");
/// assert_eq!(resolve_keyword(None, "Rebel 250"), "Rebel 250");
/// ```
pub fn resolve_keyword(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(keyword) if !keyword.is_empty() => keyword.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_inner_whitespace() {
        assert_eq!(
            resolve_keyword(Some("\tRebel 250 S Edition\n"), "x"),
            "Rebel 250 S Edition"
        );
    }

    #[test]
    fn test_full_width_space_is_trimmed() {
        // U+3000 is whitespace in Rust's definition
        assert_eq!(resolve_keyword(Some("\u{3000}レブル\u{3000}"), "x"), "レブル");
        assert_eq!(resolve_keyword(Some("\u{3000}"), "Rebel 250"), "Rebel 250");
    }
}
