use reqwest::{Client, Url};

use crate::api::models::{ScanRequest, ScanResult};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::excerpt::find_keyword_excerpt;
use crate::scraper::{
    DocumentKind, build_client, extract_text_from_html, extract_text_from_pdf, fetch_bytes,
    fetch_text, find_document_links,
};

/// Searches the documents linked from a page for a keyword.
pub struct Scanner {
    client: Client,
    max_documents: usize,
    context_chars: usize,
}

impl Scanner {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Scanner {
            client: build_client(config.fetch_timeout)?,
            max_documents: config.max_documents,
            context_chars: config.context_chars,
        })
    }

    pub async fn scan(&self, request: &ScanRequest) -> Result<Vec<ScanResult>> {
        let base_url = Url::parse(&request.url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| {
                AppError::InvalidRequest("Invalid URL scheme. Use http:// or https://".to_string())
            })?;

        let keyword = request.keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::InvalidRequest("URL and keyword are required".to_string()));
        }

        let mut links = self.document_links(&base_url).await;
        if links.is_empty() {
            tracing::info!("No document links found on {}", base_url);
            return Ok(Vec::new());
        }
        links.truncate(self.max_documents);
        tracing::info!("Searching {} documents from {} for {:?}", links.len(), base_url, keyword);

        let mut results = Vec::new();
        for doc_url in links {
            match self.search_document(&doc_url, keyword).await {
                Ok(Some(result)) => results.push(result),
                Ok(None) => tracing::debug!("No match in {}", doc_url),
                Err(e) => tracing::warn!("Error processing document {}: {}", doc_url, e),
            }
        }

        tracing::info!("Scan of {} found {} matches", base_url, results.len());
        Ok(results)
    }

    // An unreachable base page yields no documents rather than an error.
    async fn document_links(&self, base_url: &Url) -> Vec<String> {
        match fetch_text(&self.client, base_url.as_str()).await {
            Ok(html) => find_document_links(base_url, &html),
            Err(e) => {
                tracing::warn!("Error fetching base URL {}: {}", base_url, e);
                Vec::new()
            }
        }
    }

    async fn search_document(&self, url: &str, keyword: &str) -> Result<Option<ScanResult>> {
        let Some(kind) = DocumentKind::from_url(url) else {
            return Ok(None);
        };

        let text = match kind {
            DocumentKind::Html => extract_text_from_html(&fetch_text(&self.client, url).await?),
            DocumentKind::Pdf => {
                let bytes = fetch_bytes(&self.client, url).await?;
                tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
                    .await
                    .map_err(|e| AppError::ParseError(format!("PDF extraction aborted: {}", e)))??
            }
        };

        if text.is_empty() {
            return Ok(None);
        }

        Ok(find_keyword_excerpt(&text, keyword, self.context_chars).map(|excerpt| ScanResult {
            document_url: url.to_string(),
            keyword: keyword.to_string(),
            excerpt,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> Scanner {
        Scanner::new(&Config::default()).unwrap()
    }

    fn request(url: &str, keyword: &str) -> ScanRequest {
        ScanRequest {
            url: url.to_string(),
            keyword: keyword.to_string(),
        }
    }

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        for url in ["", "ftp://example.com", "not a url", "file:///etc/passwd"] {
            let err = scanner().scan(&request(url, "x")).await.unwrap_err();
            assert_eq!(err.detail(), "Invalid URL scheme. Use http:// or https://");
        }
    }

    #[tokio::test]
    async fn rejects_blank_keyword() {
        let err = scanner()
            .scan(&request("https://example.com", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(err.detail(), "URL and keyword are required");
    }

    #[tokio::test]
    async fn unreachable_base_page_yields_no_results() {
        // Port 9 on loopback is the discard port; nothing listens there in CI.
        let results = scanner()
            .scan(&request("http://127.0.0.1:9/", "anything"))
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
