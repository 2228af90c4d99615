use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{first_text, selector};

static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| selector("i.a-icon-star span.a-icon-alt"));
static REVIEW_COUNT: LazyLock<Selector> = LazyLock::new(|| selector("#acrCustomerReviewText"));

#[must_use]
pub fn extract_rating(document: &Html) -> Option<f64> {
    first_text(document, &STAR_RATING).and_then(|text| parse_rating(&text))
}

/// Absence means "no reviews", so this defaults to zero rather than `None`.
#[must_use]
pub fn extract_review_count(document: &Html) -> u64 {
    first_text(document, &REVIEW_COUNT).map_or(0, |text| parse_review_count(&text))
}

/// Leading numeric token: `"4.5 out of 5 stars"` → `4.5`.
#[must_use]
pub fn parse_rating(text: &str) -> Option<f64> {
    text.split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Leading integer token with commas stripped: `"2,048 ratings"` → `2048`.
#[must_use]
pub fn parse_review_count(text: &str) -> u64 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.replace(',', "").parse::<u64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_reads_leading_number() {
        assert_eq!(parse_rating("4.5 out of 5 stars"), Some(4.5));
        assert_eq!(parse_rating("5 out of 5"), Some(5.0));
    }

    #[test]
    fn rating_rejects_non_numeric_text() {
        assert_eq!(parse_rating("Previous page"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("NaN stars"), None);
    }

    #[test]
    fn absent_rating_is_none() {
        let doc = Html::parse_document("<div></div>");
        assert_eq!(extract_rating(&doc), None);
    }

    #[test]
    fn rating_requires_star_icon_container() {
        let doc = Html::parse_document(r#"<span class="a-icon-alt">4.1 out of 5 stars</span>"#);
        assert_eq!(extract_rating(&doc), None);
    }

    #[test]
    fn review_count_strips_commas() {
        assert_eq!(parse_review_count("2,048 ratings"), 2048);
        assert_eq!(parse_review_count("1 rating"), 1);
    }

    #[test]
    fn review_count_defaults_to_zero() {
        assert_eq!(parse_review_count("No ratings yet"), 0);
        let doc = Html::parse_document("<div></div>");
        assert_eq!(extract_review_count(&doc), 0);
    }

    #[test]
    fn review_count_from_document() {
        let doc = Html::parse_document(
            r#"<span id="acrCustomerReviewText" class="a-size-base">12,345 ratings</span>"#,
        );
        assert_eq!(extract_review_count(&doc), 12_345);
    }
}
