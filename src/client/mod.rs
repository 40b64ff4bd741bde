//! Submission side of a scan: validates the form, calls the scan service
//! once, and renders the outcome into a results container.

use serde::Deserialize;

use crate::api::models::ScanRequest;

pub mod render;
pub mod transport;

pub use transport::{HttpScanService, ScanError, ScanService};

/// Raw values as typed into the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub keyword: String,
}

impl FormValues {
    pub fn new(url: impl Into<String>, keyword: impl Into<String>) -> Self {
        FormValues {
            url: url.into(),
            keyword: keyword.into(),
        }
    }

    /// Trimmed request, or `ScanError::Validation` when either field is blank.
    pub fn validate(&self) -> Result<ScanRequest, ScanError> {
        let url = self.url.trim();
        let keyword = self.keyword.trim();
        if url.is_empty() || keyword.is_empty() {
            return Err(ScanError::Validation);
        }
        Ok(ScanRequest {
            url: url.to_string(),
            keyword: keyword.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// The interactive surface a submission drives: the submit control, the
/// loading indicator, an alert slot and the results container.
#[derive(Debug, Clone)]
pub struct SubmissionSurface {
    submit_enabled: bool,
    loading: bool,
    alert: Option<String>,
    results_html: String,
}

impl Default for SubmissionSurface {
    fn default() -> Self {
        SubmissionSurface {
            submit_enabled: true,
            loading: false,
            alert: None,
            results_html: String::new(),
        }
    }
}

impl SubmissionSurface {
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn results_html(&self) -> &str {
        &self.results_html
    }

    fn set_busy(&mut self, busy: bool) {
        self.submit_enabled = !busy;
        self.loading = busy;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Rejected before any request was made.
    Invalid,
    Matches(usize),
    Failed(ScanError),
}

pub struct SearchSubmissionHandler<S> {
    service: S,
    surface: SubmissionSurface,
    state: SubmissionState,
}

impl<S: ScanService> SearchSubmissionHandler<S> {
    pub fn new(service: S) -> Self {
        SearchSubmissionHandler {
            service,
            surface: SubmissionSurface::default(),
            state: SubmissionState::Idle,
        }
    }

    pub fn surface(&self) -> &SubmissionSurface {
        &self.surface
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub async fn handle_submit(&mut self, form: &FormValues) -> SubmissionOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!("Submission rejected: {}", err);
                self.surface.alert = Some(err.user_message().to_string());
                return SubmissionOutcome::Invalid;
            }
        };

        self.surface.alert = None;
        self.state = SubmissionState::Submitting;
        self.surface.set_busy(true);
        self.surface.results_html.clear();

        tracing::info!("Submitting scan of {} for {:?}", request.url, request.keyword);
        let outcome = match self.service.scan(&request).await {
            Ok(results) => {
                self.surface.results_html = render::render_results(&results, &request.keyword);
                SubmissionOutcome::Matches(results.len())
            }
            Err(err) => {
                tracing::warn!("Scan failed: {}", err);
                self.surface.results_html = render::render_error(err.user_message());
                SubmissionOutcome::Failed(err)
            }
        };

        self.surface.set_busy(false);
        self.state = SubmissionState::Idle;
        outcome
    }
}
