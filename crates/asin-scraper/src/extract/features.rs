use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{element_text, selector};

static FEATURE_BULLETS: LazyLock<Selector> = LazyLock::new(|| selector("#feature-bullets li"));

/// Bullet texts in document order, blanks dropped.
#[must_use]
pub fn extract_features(document: &Html) -> Vec<String> {
    document
        .select(&FEATURE_BULLETS)
        .filter_map(element_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_are_trimmed_and_blanks_dropped() {
        let doc = Html::parse_document(
            r#"<div id="feature-bullets"><ul>
                 <li><span class="a-list-item">  Water resistant  </span></li>
                 <li><span class="a-list-item"></span></li>
                 <li><span class="a-list-item">2-year warranty</span></li>
               </ul></div>"#,
        );
        assert_eq!(
            extract_features(&doc),
            vec!["Water resistant", "2-year warranty"]
        );
    }

    #[test]
    fn list_items_outside_container_are_ignored() {
        let doc = Html::parse_document("<ul><li>Footer link</li></ul>");
        assert!(extract_features(&doc).is_empty());
    }
}
