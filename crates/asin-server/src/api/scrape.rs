use asin_scraper::{PageFetcher, ProductRecord, ScraperError};
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    asin_or_url: String,
}

/// Response envelope. Exactly one of `data` or `error` is present, and the
/// HTTP status is 200 either way.
#[derive(Debug, Serialize)]
pub(super) struct ScrapeEnvelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<ProductRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ScrapeEnvelope {
    fn ok(record: ProductRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub(super) async fn scrape_product<P, F>(
    State(state): State<AppState<P, F>>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Json<ScrapeEnvelope>
where
    P: PageFetcher + Send + Sync + 'static,
    F: PageFetcher + Send + Sync + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(request_id = %req_id.0, cause = %rejection, "malformed scrape request");
            return Json(ScrapeEnvelope::err(rejection.body_text()));
        }
    };

    match state.scraper.scrape(&request.asin_or_url).await {
        Ok(record) => {
            tracing::info!(request_id = %req_id.0, asin = %record.asin, "scrape succeeded");
            Json(ScrapeEnvelope::ok(record))
        }
        Err(e @ ScraperError::InvalidIdentifier { .. }) => {
            tracing::info!(request_id = %req_id.0, input = %request.asin_or_url, "rejected identifier");
            Json(ScrapeEnvelope::err(e.to_string()))
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "scrape failed");
            Json(ScrapeEnvelope::err(e.to_string()))
        }
    }
}
