use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

use super::{first_text, selector};

/// Checked in order; the first element with non-empty text supplies the price.
const PRICE_SELECTORS: [&str; 6] = [
    ".a-price .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    "#priceblock_saleprice",
    "#priceblock_businessprice",
    "#priceblock_pospromoprice",
];

static PRICE_SELECTOR_LIST: LazyLock<Vec<Selector>> =
    LazyLock::new(|| PRICE_SELECTORS.iter().copied().map(selector).collect());

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([$£₹€])\s*([\d,]+\.?\d*)").expect("valid price regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Price {
    pub value: Option<f64>,
    pub currency: Option<String>,
}

#[must_use]
pub fn extract_price(document: &Html) -> Price {
    PRICE_SELECTOR_LIST
        .iter()
        .find_map(|sel| first_text(document, sel))
        .map(|text| parse_price(&text))
        .unwrap_or_default()
}

/// Parses `"$1,234.56"`-style text into amount and symbol.
///
/// Both members are `None` unless the text starts with a known currency
/// symbol followed by a parsable amount.
#[must_use]
pub fn parse_price(text: &str) -> Price {
    let Some(caps) = PRICE_RE.captures(text.trim()) else {
        return Price::default();
    };
    let amount = caps[2].replace(',', "");
    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() => Price {
            value: Some(value),
            currency: Some(caps[1].to_owned()),
        },
        _ => Price::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thousands_separator_and_decimals() {
        let price = parse_price("$1,234.56");
        assert_eq!(price.value, Some(1234.56));
        assert_eq!(price.currency.as_deref(), Some("$"));
    }

    #[test]
    fn parses_other_symbols_with_space() {
        assert_eq!(
            parse_price("€ 19.99"),
            Price {
                value: Some(19.99),
                currency: Some("€".to_owned())
            }
        );
        assert_eq!(parse_price("₹2,499").value, Some(2499.0));
        assert_eq!(parse_price("£5").currency.as_deref(), Some("£"));
    }

    #[test]
    fn unknown_symbol_or_garbage_yields_nulls() {
        assert_eq!(parse_price("USD 12.00"), Price::default());
        assert_eq!(parse_price("Currently unavailable."), Price::default());
        assert_eq!(parse_price("$,"), Price::default());
        assert_eq!(parse_price(""), Price::default());
    }

    #[test]
    fn absent_price_element_yields_nulls() {
        let doc = Html::parse_document("<div>no price</div>");
        assert_eq!(extract_price(&doc), Price::default());
    }

    #[test]
    fn falls_through_empty_selectors_in_priority_order() {
        let doc = Html::parse_document(
            r#"<div class="a-price"><span class="a-offscreen"> </span></div>
               <span id="priceblock_dealprice">$9.99</span>
               <span id="priceblock_ourprice">$12.99</span>"#,
        );
        // `#priceblock_ourprice` outranks `#priceblock_dealprice` regardless of position.
        assert_eq!(extract_price(&doc).value, Some(12.99));
    }

    #[test]
    fn offscreen_price_takes_priority() {
        let doc = Html::parse_document(
            r#"<span id="priceblock_ourprice">$12.99</span>
               <span class="a-price"><span class="a-offscreen">$10.49</span></span>"#,
        );
        assert_eq!(extract_price(&doc).value, Some(10.49));
    }
}
