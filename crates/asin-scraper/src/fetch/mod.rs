//! Two-tier page retrieval: a plain HTTP request first, a rendered browser
//! session only when that yields nothing usable.

mod browser;
mod http;
mod scroll;

use std::future::Future;

use crate::error::ScraperError;
use crate::identifier::CanonicalUrl;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;
pub use scroll::{
    scroll_until_stable, Pause, ScrollReport, ScrollSettings, ScrollSurface, TokioPause,
};

/// Result of a single fetch tier. A tier never raises; it either hands back
/// the whole page or a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Content(String),
    Failed { cause: String },
}

impl From<Result<String, ScraperError>> for FetchOutcome {
    fn from(result: Result<String, ScraperError>) -> Self {
        match result {
            Ok(html) => Self::Content(html),
            Err(err) => Self::Failed {
                cause: err.to_string(),
            },
        }
    }
}

/// A source of raw page markup.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Which tier produced the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTier {
    Http,
    Browser,
}

impl std::fmt::Display for FetchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchTier::Http => write!(f, "http"),
            FetchTier::Browser => write!(f, "browser"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub tier: FetchTier,
}

/// Runs `primary`, and `fallback` only after `primary` has failed.
pub struct FetchStrategy<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FetchStrategy<P, F>
where
    P: PageFetcher + Sync,
    F: PageFetcher + Sync,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Fetches `url`, falling back to the second tier on any first-tier failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Fetch`] when both tiers fail. The individual
    /// causes are logged and not exposed.
    pub async fn fetch(&self, url: &CanonicalUrl) -> Result<FetchedPage, ScraperError> {
        let url = url.as_str();

        let cause = match self.primary.fetch(url).await {
            FetchOutcome::Content(html) => {
                return Ok(FetchedPage {
                    html,
                    tier: FetchTier::Http,
                });
            }
            FetchOutcome::Failed { cause } => cause,
        };
        tracing::warn!(url, cause = %cause, "static fetch failed; falling back to browser");

        match self.fallback.fetch(url).await {
            FetchOutcome::Content(html) => Ok(FetchedPage {
                html,
                tier: FetchTier::Browser,
            }),
            FetchOutcome::Failed { cause } => {
                tracing::warn!(url, cause = %cause, "full-page fetch failed");
                Err(ScraperError::Fetch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct Stub {
        outcome: FetchOutcome,
        calls: Arc<AtomicU32>,
    }

    impl Stub {
        fn new(outcome: FetchOutcome) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    outcome,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl PageFetcher for Stub {
        async fn fetch(&self, _url: &str) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn url() -> CanonicalUrl {
        let (url, _) = crate::identifier::normalize("B000000000").unwrap();
        url
    }

    fn failed(cause: &str) -> FetchOutcome {
        FetchOutcome::Failed {
            cause: cause.to_owned(),
        }
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let (primary, primary_calls) = Stub::new(FetchOutcome::Content("<html>fast</html>".into()));
        let (fallback, fallback_calls) = Stub::new(FetchOutcome::Content("<html>slow</html>".into()));
        let page = FetchStrategy::new(primary, fallback).fetch(&url()).await.unwrap();
        assert_eq!(page.html, "<html>fast</html>");
        assert_eq!(page.tier, FetchTier::Http);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn primary_failure_uses_fallback_content() {
        let (primary, _) = Stub::new(failed("connection reset"));
        let (fallback, fallback_calls) = Stub::new(FetchOutcome::Content("<html>slow</html>".into()));
        let page = FetchStrategy::new(primary, fallback).fetch(&url()).await.unwrap();
        assert_eq!(page.html, "<html>slow</html>");
        assert_eq!(page.tier, FetchTier::Browser);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn both_failures_surface_generic_fetch_error() {
        let (primary, _) = Stub::new(failed("timeout"));
        let (fallback, _) = Stub::new(failed("chrome not found"));
        let err = FetchStrategy::new(primary, fallback)
            .fetch(&url())
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::Fetch));
        let message = err.to_string();
        assert_eq!(message, "Failed to load page content.");
        assert!(!message.contains("timeout"));
        assert!(!message.contains("chrome"));
    }

    #[test]
    fn outcome_from_error_keeps_message_as_cause() {
        let outcome = FetchOutcome::from(Err(ScraperError::UnexpectedStatus {
            status: 503,
            url: "https://www.amazon.com/dp/B000000000".to_owned(),
        }));
        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                cause: "unexpected HTTP status 503 from https://www.amazon.com/dp/B000000000"
                    .to_owned()
            }
        );
    }
}
