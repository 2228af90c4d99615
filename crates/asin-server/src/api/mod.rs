mod scrape;

use std::sync::Arc;

use asin_scraper::{PageFetcher, ProductScraper};
use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

pub struct AppState<P, F> {
    pub scraper: Arc<ProductScraper<P, F>>,
}

impl<P, F> Clone for AppState<P, F> {
    fn clone(&self) -> Self {
        Self {
            scraper: Arc::clone(&self.scraper),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app<P, F>(state: AppState<P, F>) -> Router
where
    P: PageFetcher + Send + Sync + 'static,
    F: PageFetcher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/scrape", post(scrape::scrape_product::<P, F>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Liveness only; the scraper's upstreams are not checked.
async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}
