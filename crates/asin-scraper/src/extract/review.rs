use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use super::{first_text_within, selector};

static REVIEW: LazyLock<Selector> = LazyLock::new(|| selector("div[data-hook='review']"));
static REVIEW_TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector("a[data-hook='review-title'] span"));
static REVIEW_RATING: LazyLock<Selector> =
    LazyLock::new(|| selector("i[data-hook='review-star-rating'] span"));
static REVIEW_BODY: LazyLock<Selector> =
    LazyLock::new(|| selector("span[data-hook='review-body'] span"));

/// The first review shown on the page. The rating is kept as display
/// text (`"5.0 out of 5 stars"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopReview {
    pub title: Option<String>,
    pub rating: Option<String>,
    pub content: Option<String>,
}

/// `None` when the page has no review container at all; otherwise each
/// member is looked up on its own.
#[must_use]
pub fn extract_top_review(document: &Html) -> Option<TopReview> {
    let review = document.select(&REVIEW).next()?;
    Some(TopReview {
        title: first_text_within(review, &REVIEW_TITLE),
        rating: first_text_within(review, &REVIEW_RATING),
        content: first_text_within(review, &REVIEW_BODY),
    })
}
