use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::selector;

static LANDING_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("#landingImage"));
static GALLERY_IMAGES: LazyLock<Selector> = LazyLock::new(|| selector("#altImages img"));

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Images {
    pub thumbnail: Option<String>,
    pub gallery: Vec<String>,
}

#[must_use]
pub fn extract_images(document: &Html) -> Images {
    let thumbnail = document
        .select(&LANDING_IMAGE)
        .next()
        .and_then(image_source);
    let gallery = document
        .select(&GALLERY_IMAGES)
        .filter_map(image_source)
        .collect();
    Images { thumbnail, gallery }
}

/// `src`, or the lazy-load `data-src` when `src` is missing or blank.
fn image_source(element: ElementRef<'_>) -> Option<String> {
    let attrs = element.value();
    ["src", "data-src"]
        .into_iter()
        .filter_map(|name| attrs.attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
