use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State, rejection::JsonRejection},
    response::Html,
};
use tower_http::cors::{CorsLayer, Any};

use crate::error::{Result, AppError};
use crate::api::models::{ScanRequest, ScanResult};
use crate::api::page::render_page;
use crate::client::{FormValues, SearchSubmissionHandler};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/scan", post(scan_handler))
        .route("/search", post(search_form_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<String> {
    Html(render_page(&FormValues::default(), &Default::default()))
}

async fn scan_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<Vec<ScanResult>>> {
    // Malformed bodies get the same `detail` shape as every other failure.
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected scan body: {}", rejection.body_text());
        AppError::InvalidRequest(rejection.body_text())
    })?;
    tracing::info!("Processing scan request for URL: {}", req.url);
    let start_time = std::time::Instant::now();

    // Overall timeout for the entire scan
    let result = tokio::time::timeout(state.config.scan_timeout, state.scanner.scan(&req)).await;
    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(results)) => {
            tracing::info!("Scan of {} returned {} results in {:?}", req.url, results.len(), elapsed);
            Ok(Json(results))
        }
        Ok(Err(err)) => {
            tracing::warn!("Scan of {} failed after {:?}: {}", req.url, elapsed, err);
            Err(err)
        }
        Err(_) => {
            tracing::warn!("Scan of {} timed out after {:?}", req.url, elapsed);
            Err(AppError::Timeout)
        }
    }
}

/// Plain form submission: runs the submission cycle server side and answers
/// with the index page holding the rendered results.
async fn search_form_handler(
    State(state): State<AppState>,
    Form(form): Form<FormValues>,
) -> Html<String> {
    let mut handler = SearchSubmissionHandler::new(&*state.scanner);
    handler.handle_submit(&form).await;
    Html(render_page(&form, handler.surface()))
}
