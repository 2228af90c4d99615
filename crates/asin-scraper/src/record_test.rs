use serde_json::json;

use super::*;
use crate::identifier::normalize;

fn ids() -> (CanonicalUrl, Asin) {
    normalize("B000000000").unwrap()
}

#[test]
fn empty_field_set_serialises_every_key() {
    let (url, asin) = ids();
    let record = assemble(FieldSet::default(), &asin, &url);
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "asin": "B000000000",
            "url": "https://www.amazon.com/dp/B000000000",
            "title": null,
            "brand": null,
            "price": {"value": null, "currency": null},
            "rating": null,
            "review_count": 0,
            "images": {"thumbnail": null, "gallery": []},
            "features": [],
            "description": null,
            "review_summary": {"title": null, "rating": null, "content": null}
        })
    );
}

#[test]
fn description_comes_from_top_review_content() {
    let (url, asin) = ids();
    let fields = FieldSet {
        top_review: Some(TopReview {
            title: Some("Solid".to_owned()),
            rating: Some("4.0 out of 5 stars".to_owned()),
            content: Some("Does the job.".to_owned()),
        }),
        ..FieldSet::default()
    };
    let record = assemble(fields, &asin, &url);
    assert_eq!(record.description.as_deref(), Some("Does the job."));
    assert_eq!(record.review_summary.title.as_deref(), Some("Solid"));
    assert_eq!(
        record.review_summary.rating.as_deref(),
        Some("4.0 out of 5 stars")
    );
}

#[test]
fn review_without_body_leaves_description_null() {
    let (url, asin) = ids();
    let fields = FieldSet {
        top_review: Some(TopReview {
            title: Some("Short".to_owned()),
            ..TopReview::default()
        }),
        ..FieldSet::default()
    };
    let record = assemble(fields, &asin, &url);
    assert!(record.description.is_none());
    assert_eq!(record.review_summary.title.as_deref(), Some("Short"));
}

#[test]
fn populated_fields_pass_through() {
    let (url, asin) = ids();
    let fields = FieldSet {
        title: Some("Widget".to_owned()),
        brand: Some("Acme".to_owned()),
        price: Price {
            value: Some(9.5),
            currency: Some("$".to_owned()),
        },
        rating: Some(4.2),
        review_count: 17,
        images: Images {
            thumbnail: Some("https://img.example/t.jpg".to_owned()),
            gallery: vec!["https://img.example/g.jpg".to_owned()],
        },
        features: vec!["Small".to_owned()],
        top_review: None,
    };
    let record = assemble(fields, &asin, &url);
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["title"], "Widget");
    assert_eq!(value["brand"], "Acme");
    assert_eq!(value["price"]["value"], 9.5);
    assert_eq!(value["rating"], 4.2);
    assert_eq!(value["review_count"], 17);
    assert_eq!(value["images"]["gallery"][0], "https://img.example/g.jpg");
    assert_eq!(value["features"], json!(["Small"]));
}
