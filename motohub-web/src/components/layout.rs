//! Layout components - navigation, search hero, result grid

use super::escape_html;

/// Renders the top navigation bar with the MotoHub logo.
pub fn nav_bar() -> String {
    r#"<nav class="nav-header">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 w-full">
                <a href="/" class="logo-link">
                    <span class="logo-text">MOTOHUB</span>
                </a>
            </div>
        </nav>"#
        .to_string()
}

/// Renders the search section with the form pre-filled with `keyword`.
///
/// The form submits `keyword` back to `/` with GET.
pub fn search_hero(keyword: &str) -> String {
    let keyword = escape_html(keyword);

    format!(
        r#"<section class="hero-bg py-10 sm:py-16 px-4 border-b border-gray-100 text-center">
            <div class="max-w-3xl mx-auto">
                <h1 class="text-xl sm:text-3xl font-black text-black mb-3 tracking-tight">中古バイクをまとめて検索</h1>
                <p class="text-gray-400 text-[13px] sm:text-sm mb-5">有名中古バイク販売サイトをまとめて一括検索！</p>
                <form action="/" method="GET" class="max-w-2xl mx-auto">
                    <div class="search-container flex items-center bg-white rounded-xl p-1 shadow-sm">
                        <div class="flex-shrink-0 pl-3 text-gray-300">
                            <i data-lucide="search" class="w-5 h-5"></i>
                        </div>
                        <input type="text" name="keyword" placeholder="車種・キーワード" class="w-full px-3 py-2 text-base focus:outline-none bg-transparent" value="{keyword}">
                        <button type="submit" class="bg-gray-800 hover:bg-black text-white font-bold px-10 py-2.5 rounded-lg transition-all whitespace-nowrap flex-shrink-0">検索</button>
                    </div>
                </form>
            </div>
        </section>"#
    )
}

/// Renders the result count line.
pub fn results_header(count: usize) -> String {
    format!(
        r#"<div class="flex flex-col gap-4 mb-8">
            <div class="text-[11px] font-bold text-gray-400 uppercase tracking-widest">
                Search Results: <span class="text-black text-sm">{count} Items</span>
            </div>
        </div>"#
    )
}

/// Wraps rendered listing cards in the responsive result grid.
pub fn results_grid(cards: &str) -> String {
    format!(
        r#"<div id="results-grid" class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-x-6 gap-y-10">{cards}</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hero_escapes_keyword() {
        let html = search_hero(r#""><script>alert(1)</script>"#);

        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_results_header_count() {
        assert!(results_header(3).contains("3 Items"));
        assert!(results_header(0).contains("0 Items"));
    }
}
