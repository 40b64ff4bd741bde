use std::future::Future;

use reqwest::Client;

use crate::api::models::{ErrorDetail, ScanRequest, ScanResult};
use crate::scanner::Scanner;

pub const VALIDATION_MESSAGE: &str = "Please fill in both URL and keyword fields.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to scan documents. Please check the URL and try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("missing url or keyword")]
    Validation,

    #[error("scan service answered {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Service { status: u16, detail: Option<String> },

    #[error("scan service unreachable: {0}")]
    Transport(String),
}

impl ScanError {
    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> &str {
        match self {
            ScanError::Validation => VALIDATION_MESSAGE,
            ScanError::Service {
                detail: Some(detail),
                ..
            } => detail,
            ScanError::Service { detail: None, .. } | ScanError::Transport(_) => {
                GENERIC_FAILURE_MESSAGE
            }
        }
    }
}

/// Anything that honours the `/scan` request/response contract.
pub trait ScanService {
    fn scan(
        &self,
        request: &ScanRequest,
    ) -> impl Future<Output = Result<Vec<ScanResult>, ScanError>> + Send;
}

impl<S: ScanService + Sync + ?Sized> ScanService for &S {
    fn scan(
        &self,
        request: &ScanRequest,
    ) -> impl Future<Output = Result<Vec<ScanResult>, ScanError>> + Send {
        (**self).scan(request)
    }
}

/// Talks to a remote scan service over HTTP.
#[derive(Clone)]
pub struct HttpScanService {
    client: Client,
    scan_url: String,
}

impl HttpScanService {
    /// `endpoint` is the service base URL; `/scan` is appended.
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        HttpScanService {
            client,
            scan_url: format!("{}/scan", endpoint.trim_end_matches('/')),
        }
    }

    pub fn scan_url(&self) -> &str {
        &self.scan_url
    }
}

impl ScanService for HttpScanService {
    async fn scan(&self, request: &ScanRequest) -> Result<Vec<ScanResult>, ScanError> {
        let response = self
            .client
            .post(&self.scan_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ScanError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable, non-JSON or blank body simply means there is no detail.
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorDetail>(&body)
                .ok()
                .and_then(|body| body.detail)
                .filter(|detail| !detail.trim().is_empty());
            return Err(ScanError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<Vec<ScanResult>>()
            .await
            .map_err(|e| ScanError::Transport(e.to_string()))
    }
}

/// In-process service, used by the form route to skip the HTTP hop.
impl ScanService for Scanner {
    async fn scan(&self, request: &ScanRequest) -> Result<Vec<ScanResult>, ScanError> {
        Scanner::scan(self, request)
            .await
            .map_err(|e| ScanError::Service {
                status: e.status().as_u16(),
                detail: Some(e.detail()),
            })
    }
}
