use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{first_text, selector};

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("#productTitle"));
static BYLINE: LazyLock<Selector> = LazyLock::new(|| selector("#bylineInfo"));

#[must_use]
pub fn extract_title(document: &Html) -> Option<String> {
    first_text(document, &TITLE)
}

/// The byline text as shown, e.g. `"Visit the Acme Store"` or `"Brand: Acme"`.
#[must_use]
pub fn extract_brand(document: &Html) -> Option<String> {
    first_text(document, &BYLINE)
}
