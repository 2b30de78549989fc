//! Full page handlers using the component system
//!
//! Pages compose components into complete HTML responses sharing one base
//! layout with Tailwind CSS and Lucide icons.

pub mod listings;

use axum::response::Html;

pub use listings::listings_page;

use crate::components::{escape_html, nav_bar};

/// Wraps page content in the shared HTML document.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="ja">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>{} - MotoHub</title>
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/lucide@latest"></script>
            <style>
                .nav-header {{ border-bottom: 1px solid #f3f4f6; padding: 0.75rem 0; }}
                .logo-text {{ font-weight: 900; font-style: italic; letter-spacing: 0.05em; }}
                .hero-bg {{ background: linear-gradient(180deg, #f9fafb 0%, #ffffff 100%); }}
                .search-container {{ border: 1px solid #e5e7eb; }}
                .bike-card {{ transition: box-shadow 0.2s; }}
                .bike-card:hover {{ box-shadow: 0 10px 25px rgba(0, 0, 0, 0.08); }}
            </style>
        </head>
        <body class="min-h-screen flex flex-col">
            {}
            <main class="flex-grow">
                {}
            </main>
            <script>lucide.createIcons();</script>
        </body>
        </html>"#,
        escape_html(title),
        nav_bar(),
        content
    );

    Html(html)
}
