use reqwest::{Client, ClientBuilder, Url};
use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::error::{AppError, Result};
use crate::text::collapse_whitespace;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// Elements whose text never counts as document content
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to parse link selector")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Html,
}

impl DocumentKind {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if url.ends_with(".html") || url.ends_with(".htm") {
            Some(DocumentKind::Html)
        } else {
            None
        }
    }
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// Body decoded with the charset the response declares, UTF-8 otherwise.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// Links on the page pointing at PDF or HTML documents, resolved against
/// `base_url`, deduplicated in first-seen order.
pub fn find_document_links(base_url: &Url, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base_url.join(href).ok())
        .map(String::from)
        .filter(|url| DocumentKind::from_url(url).is_some())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Visible text of an HTML document, whitespace collapsed.
pub fn extract_text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::with_capacity(html.len() / 2);

    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            text.push_str(chunk);
        }
    }

    collapse_whitespace(&text)
}

/// Text of every page, one page per line. Pages without text are left out.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String> {
    let document = lopdf::Document::load_mem(bytes)?;
    let mut pages = Vec::new();

    for page_number in document.get_pages().keys() {
        let page_text = document.extract_text(&[*page_number])?;
        if !page_text.trim().is_empty() {
            pages.push(page_text);
        }
    }

    Ok(pages.join("\n"))
}
