//! ASIN extraction and canonical product URL construction.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ScraperError;

/// Storefront used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.amazon.com";

static BARE_ASIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{10}$").expect("valid bare ASIN regex"));

/// Path patterns tried in order; the first capture wins.
static PATH_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"/dp/([A-Z0-9]{10})").expect("valid dp regex"),
        Regex::new(r"/gp/product/([A-Z0-9]{10})").expect("valid gp regex"),
        Regex::new(r"/product-reviews/([A-Z0-9]{10})").expect("valid reviews regex"),
        Regex::new(r"/([A-Z0-9]{10})(?:[/?]|$)").expect("valid trailing regex"),
    ]
});

/// A validated 10-character product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Asin(String);

impl Asin {
    /// Accepts exactly 10 uppercase ASCII alphanumerics.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        BARE_ASIN_RE.is_match(raw).then(|| Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Asin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fetch URL derived from an [`Asin`]: `{base}/dp/{asin}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    #[must_use]
    pub fn new(base_url: &str, asin: &Asin) -> Self {
        Self(format!("{}/dp/{asin}", base_url.trim_end_matches('/')))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finds the ASIN in a bare code or a product/review URL.
///
/// Returns `None` when nothing in `input` looks like an ASIN.
#[must_use]
pub fn extract_asin(input: &str) -> Option<Asin> {
    let input = input.trim();
    if let Some(asin) = Asin::parse(input) {
        return Some(asin);
    }
    PATH_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| Asin(m.as_str().to_owned()))
}

/// Normalizes `input` against the default storefront.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidIdentifier`] when no ASIN can be found.
pub fn normalize(input: &str) -> Result<(CanonicalUrl, Asin), ScraperError> {
    normalize_with_base(input, DEFAULT_BASE_URL)
}

/// Normalizes `input` and builds the canonical URL on `base_url`.
///
/// Nothing from the input other than the ASIN survives: query strings,
/// slugs and foreign hosts are dropped.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidIdentifier`] when no ASIN can be found.
pub fn normalize_with_base(
    input: &str,
    base_url: &str,
) -> Result<(CanonicalUrl, Asin), ScraperError> {
    let asin = extract_asin(input).ok_or_else(|| ScraperError::InvalidIdentifier {
        input: input.to_owned(),
    })?;
    Ok((CanonicalUrl::new(base_url, &asin), asin))
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
