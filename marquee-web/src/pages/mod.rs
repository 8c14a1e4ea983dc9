//! Full page handlers
//!
//! Pages compose components into complete HTML documents sharing one base
//! layout with HTMX and Tailwind CSS.

pub mod home;

pub use home::home_page;

use axum::response::Html;

/// Wraps page content in the base document.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>{title} - Marquee</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <style>
        body {{ background: #030014; font-family: 'DM Sans', sans-serif; }}
        .text-gradient {{ background: linear-gradient(to right, #d6c7ff, #ab8bff);
                          -webkit-background-clip: text; background-clip: text; color: transparent; }}
        .fancy-text {{ -webkit-text-stroke: 5px rgba(206, 206, 251, 0.5); font-size: 190px;
                       font-weight: 800; color: #0f0d23; line-height: 1; }}
    </style>
</head>
<body class="min-h-screen text-white">
    <main class="max-w-7xl mx-auto px-5 py-12">
        {content}
    </main>
</body>
</html>"#
    ))
}
