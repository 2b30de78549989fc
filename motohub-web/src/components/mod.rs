//! Reusable HTML components for the listing page
//!
//! Components are server-rendered HTML fragments. Styling uses Tailwind CSS
//! from the CDN, so fragments only carry class names.

pub mod layout;
pub mod listing;

// Re-export main component functions
pub use layout::{nav_bar, results_header, results_grid, search_hero};
pub use listing::{listing_card, source_badge};

/// Escapes text for use in HTML element content and quoted attributes.
///
/// # Examples
/// ```
/// use motohub_web::components::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Rebel 250"), "Rebel 250");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<script>'x'</script>"), "&lt;script&gt;&#39;x&#39;&lt;/script&gt;");
        assert_eq!(escape_html("レブル"), "レブル");
    }
}
