//! Single-call facade over normalize, fetch, extract and assemble.

use asin_core::AppConfig;
use tracing::Instrument;

use crate::error::ScraperError;
use crate::extract::extract_fields;
use crate::fetch::{BrowserFetcher, FetchStrategy, HttpFetcher, PageFetcher, ScrollSettings};
use crate::identifier::normalize_with_base;
use crate::identity::IdentityPool;
use crate::record::{assemble, ProductRecord};

/// Scrapes one product page per call. Holds no per-call state, so one
/// instance can serve concurrent callers.
pub struct ProductScraper<P = HttpFetcher, F = BrowserFetcher> {
    base_url: String,
    strategy: FetchStrategy<P, F>,
}

impl ProductScraper {
    /// Builds the production pipeline: reqwest first, Chromium as fallback,
    /// both drawing from the same identity pools.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let pool = IdentityPool::from_config(config);
        let scroll = ScrollSettings {
            max_rounds: config.browser_max_scrolls,
            ..ScrollSettings::default()
        };
        Self::new(
            config.product_base_url.clone(),
            HttpFetcher::new(pool.clone(), config.request_timeout_secs),
            BrowserFetcher::new(pool, scroll, config.browser_timeout_secs),
        )
    }
}

impl<P, F> ProductScraper<P, F>
where
    P: PageFetcher + Sync,
    F: PageFetcher + Sync,
{
    pub fn new(base_url: impl Into<String>, primary: P, fallback: F) -> Self {
        Self {
            base_url: base_url.into(),
            strategy: FetchStrategy::new(primary, fallback),
        }
    }

    /// Scrapes the product identified by `asin_or_url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidIdentifier`]: no ASIN in the input; nothing is fetched.
    /// - [`ScraperError::Fetch`]: both fetch tiers failed.
    ///
    /// Missing page elements are never errors; they surface as empty fields.
    pub async fn scrape(&self, asin_or_url: &str) -> Result<ProductRecord, ScraperError> {
        let (url, asin) = normalize_with_base(asin_or_url, &self.base_url)?;
        let span = tracing::info_span!("scrape", asin = %asin, url = %url);

        async {
            let page = self.strategy.fetch(&url).await?;

            let fields = extract_fields(&page.html);
            tracing::info!(
                tier = %page.tier,
                has_title = fields.title.is_some(),
                features = fields.features.len(),
                gallery = fields.images.gallery.len(),
                "product page extracted"
            );

            Ok::<_, ScraperError>(assemble(fields, &asin, &url))
        }
        .instrument(span)
        .await
    }
}
