//! The fixed output schema handed to downstream consumers.
//!
//! Every key is serialised on every record; absent values appear as `null`,
//! `0`, or `[]`, never as a missing key.

use serde::Serialize;

use crate::extract::{FieldSet, TopReview};
use crate::identifier::{Asin, CanonicalUrl};

pub use crate::extract::{Images, Price};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub asin: Asin,
    pub url: CanonicalUrl,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub price: Price,
    pub rating: Option<f64>,
    pub review_count: u64,
    pub images: Images,
    pub features: Vec<String>,
    /// Borrowed from the top review's body; the page description is not scraped.
    pub description: Option<String>,
    pub review_summary: ReviewSummary,
}

/// Always an object. All members are `null` when the page had no review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub title: Option<String>,
    pub rating: Option<String>,
    pub content: Option<String>,
}

impl From<Option<TopReview>> for ReviewSummary {
    fn from(review: Option<TopReview>) -> Self {
        review.map_or_else(Self::default, |r| Self {
            title: r.title,
            rating: r.rating,
            content: r.content,
        })
    }
}

/// Maps extractor output onto the record schema.
///
/// Missing title and brand stay `None`; no sentinel strings are substituted.
#[must_use]
pub fn assemble(fields: FieldSet, asin: &Asin, url: &CanonicalUrl) -> ProductRecord {
    let review_summary = ReviewSummary::from(fields.top_review);
    ProductRecord {
        asin: asin.clone(),
        url: url.clone(),
        title: fields.title,
        brand: fields.brand,
        price: fields.price,
        rating: fields.rating,
        review_count: fields.review_count,
        images: fields.images,
        features: fields.features,
        description: review_summary.content.clone(),
        review_summary,
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
