//! HTML page template
//!
//! Wraps a rendered HTML fragment in a complete dark-themed document. The
//! title is escaped; the fragment is trusted pre-rendered HTML and is
//! embedded as-is.

/// Fixed style sheet for rendered pages
const PAGE_STYLE: &str = "\
body {
    background-color: #0d1117;
    color: #f0f6fc;
    font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", \"Noto Sans\",
        Helvetica, Arial, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\";
    display: flex;
    flex-direction: column;
    padding: 0.5rem;
}

h1,
h2 {
    border-bottom: 1px solid #3d444db3;
    padding-bottom: 0.3rem;
}";

/// Build a complete HTML document from a title and a pre-rendered fragment
pub fn render_page(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>{}</title>\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n\
         <style>\n{PAGE_STYLE}\n</style>\n\
         </head>\n\
         <body>\n{content}\n</body>\n\
         </html>\n",
        escape_html(title),
    )
}

/// Escape text for embedding in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
