use crate::api::models::ScanResult;
use crate::text::FoldedText;

pub const NO_MATCHES_MESSAGE: &str = "No matches found.";

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

/// Escapes `excerpt`, wrapping the first case-insensitive occurrence of
/// `keyword` in `<mark>`. The marked slice keeps the excerpt's own casing.
pub fn highlight_excerpt(excerpt: &str, keyword: &str) -> String {
    let needle = FoldedText::lowercase(keyword);
    let Some(hit) = FoldedText::lowercase(excerpt).find(needle.as_str()) else {
        return escape_html(excerpt);
    };

    format!(
        "{}<mark>{}</mark>{}",
        escape_html(&excerpt[..hit.start]),
        escape_html(&excerpt[hit.clone()]),
        escape_html(&excerpt[hit.end..]),
    )
}

pub fn match_count_header(count: usize) -> String {
    if count == 1 {
        "Found 1 match".to_string()
    } else {
        format!("Found {} matches", count)
    }
}

/// Markup for the results container after a successful scan.
pub fn render_results(results: &[ScanResult], keyword: &str) -> String {
    if results.is_empty() {
        return format!("<p class=\"no-results\">{}</p>", NO_MATCHES_MESSAGE);
    }

    let mut html = format!(
        "<h3 class=\"results-header\">{}</h3>\n",
        match_count_header(results.len())
    );
    for result in results {
        let url = escape_html(&result.document_url);
        html.push_str(&format!(
            "<div class=\"result-item\">\
             <a class=\"result-url\" href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{url}</a>\
             <p class=\"excerpt\">{}</p>\
             </div>\n",
            highlight_excerpt(&result.excerpt, keyword)
        ));
    }
    html
}

pub fn render_error(message: &str) -> String {
    format!("<div class=\"error\">{}</div>", escape_html(message))
}
