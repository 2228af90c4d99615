//! Independent field extractors over a parsed product page.
//!
//! Every extractor takes the same [`Html`] and returns its own typed slice of
//! the result. None of them can fail: a missing or malformed element yields
//! that field's empty value and leaves the other fields untouched.

mod features;
mod images;
mod listing;
mod price;
mod rating;
mod review;

use scraper::{ElementRef, Html, Selector};

pub use features::extract_features;
pub use images::{extract_images, Images};
pub use listing::{extract_brand, extract_title};
pub use price::{extract_price, parse_price, Price};
pub use rating::{extract_rating, extract_review_count, parse_rating, parse_review_count};
pub use review::{extract_top_review, TopReview};

/// Union of every extractor's output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub price: Price,
    pub rating: Option<f64>,
    pub review_count: u64,
    pub images: Images,
    pub features: Vec<String>,
    pub top_review: Option<TopReview>,
}

/// Parses `html` and runs every extractor over it.
///
/// The parsed document is dropped before this returns.
#[must_use]
pub fn extract_fields(html: &str) -> FieldSet {
    let document = Html::parse_document(html);
    extract_from_document(&document)
}

#[must_use]
pub fn extract_from_document(document: &Html) -> FieldSet {
    FieldSet {
        title: extract_title(document),
        brand: extract_brand(document),
        price: extract_price(document),
        rating: extract_rating(document),
        review_count: extract_review_count(document),
        images: extract_images(document),
        features: extract_features(document),
        top_review: extract_top_review(document),
    }
}

/// Parses a selector that is known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// All descendant text of `element`, whitespace-collapsed. Empty text is `None`.
pub(crate) fn element_text(element: ElementRef<'_>) -> Option<String> {
    let joined = element.text().collect::<String>();
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Text of the first element matching `selector` under `document`.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(element_text)
}

/// Text of the first element matching `selector` under `element`.
pub(crate) fn first_text_within(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().and_then(element_text)
}
