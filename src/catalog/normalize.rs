//! Raw detail responses → flat per-locale records.
//!
//! The relevance endpoint wraps the product inside
//! `data.placements[0].recommendedProducts[0]`. A response without that
//! entry, or one carrying the known filler placeholder, is simply not a
//! product (`Ok(None)`); a response that has the entry but is missing a
//! required sub-object is malformed and surfaces as
//! `SyncError::Extraction`.
//!
//! Category profile: full mode only — `category_{lang}` is a list of
//! `{name, level}` pairs. The lightweight single-identifier profile is not
//! implemented.

use serde_json::{json, Map, Value};

use crate::catalog::{value_as_i64, Locale, LocaleRecord};
use crate::error::SyncError;

/// Product ID the upstream uses as a filler entry in recommendation slots.
const PLACEHOLDER_ID: i64 = 512_348;

/// Marker in image URLs identifying the 200x200 rendition.
const THUMBNAIL_MARKER: &str = "_200Wx200H";

pub fn normalize(raw: &Value, locale: Locale) -> Result<Option<LocaleRecord>, SyncError> {
    let Some(product) = raw.pointer("/data/placements/0/recommendedProducts/0") else {
        return Ok(None);
    };

    let id = product
        .get("id")
        .and_then(value_as_i64)
        .ok_or_else(|| extraction(locale, "product entry without a numeric id"))?;
    if id == PLACEHOLDER_ID {
        return Ok(None);
    }

    let links = product
        .get("links")
        .ok_or_else(|| extraction(locale, "missing links object"))?;
    let images = links
        .get("images")
        .and_then(Value::as_array)
        .ok_or_else(|| extraction(locale, "missing links.images array"))?;
    let thumbnail = images
        .iter()
        .filter_map(|img| img.get("href").and_then(Value::as_str))
        .find(|href| href.contains(THUMBNAIL_MARKER))
        .map(str::to_string);

    // Required sub-objects: their absence is a malformed response, not an
    // absent product.
    let availability = product
        .pointer("/availability/isAvailable")
        .and_then(Value::as_bool)
        .ok_or_else(|| extraction(locale, "missing availability.isAvailable"))?;
    let price = product
        .pointer("/price/price")
        .and_then(Value::as_f64)
        .ok_or_else(|| extraction(locale, "missing price.price"))?;
    let stock_status = product
        .pointer("/stock/stockLevelStatus")
        .and_then(Value::as_str)
        .ok_or_else(|| extraction(locale, "missing stock.stockLevelStatus"))?;
    let product_url = links
        .pointer("/productUrl/href")
        .and_then(Value::as_str)
        .ok_or_else(|| extraction(locale, "missing links.productUrl.href"))?;

    let categories = product
        .get("category")
        .and_then(Value::as_array)
        .ok_or_else(|| extraction(locale, "missing category array"))?
        .iter()
        .map(|cat| {
            let mut pair = Map::new();
            insert_opt(&mut pair, "name", cat.get("name").cloned());
            insert_opt(&mut pair, "level", cat.get("level").cloned());
            Value::Object(pair)
        })
        .collect::<Vec<_>>();

    let mut record = Map::new();
    record.insert("id".into(), json!(id));
    insert_opt(&mut record, "ean", product.get("ean").cloned());
    record.insert(
        format!("category_{}", locale.code()),
        Value::Array(categories),
    );
    insert_opt(
        &mut record,
        &format!("name_{}", locale.code()),
        product.get("name").cloned(),
    );
    insert_opt(&mut record, "brand", product.pointer("/brand/name").cloned());
    insert_opt(&mut record, "supplier", product.get("supplier").cloned());
    record.insert("availability".into(), json!(availability));
    record.insert("price".into(), json!(price));
    insert_opt(
        &mut record,
        "discount",
        product.pointer("/price/discount/price").cloned(),
    );
    record.insert("stockLevelStatus".into(), json!(stock_status));
    record.insert("productUrl".into(), json!(product_url));

    let mut photos = Map::new();
    if let Some(t) = thumbnail {
        photos.insert("thumbnail".into(), json!(t));
    }
    insert_opt(&mut photos, "defaultImages", links.get("defaultImages").cloned());
    record.insert("productPhotos".into(), Value::Object(photos));

    Ok(Some(record))
}

/// Inserts `value` only when it is present and non-null. Absent upstream
/// fields stay absent in the record; they are never stored as JSON null.
fn insert_opt(record: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        if !v.is_null() {
            record.insert(key.to_string(), v);
        }
    }
}

fn extraction(locale: Locale, reason: &str) -> SyncError {
    SyncError::Extraction {
        locale,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(product: Value) -> Value {
        json!({
            "data": {
                "placements": [
                    { "recommendedProducts": [product] }
                ]
            }
        })
    }

    fn milk(id: i64) -> Value {
        json!({
            "id": id,
            "ean": "6223000800355",
            "name": "Milk 1L",
            "brand": { "name": "Juhayna" },
            "supplier": null,
            "availability": { "isAvailable": true },
            "price": { "price": 45.5, "discount": { "price": 39.9 } },
            "stock": { "stockLevelStatus": "inStock" },
            "category": [
                { "name": "Dairy", "level": 1 },
                { "name": "Milk", "level": 2 }
            ],
            "links": {
                "productUrl": { "href": "/p/500168" },
                "images": [
                    { "href": "https://cdn/img_480Wx480H.jpg" },
                    { "href": "https://cdn/img_200Wx200H.jpg" }
                ],
                "defaultImages": ["https://cdn/img_480Wx480H.jpg"]
            }
        })
    }

    #[test]
    fn extracts_all_fields_for_a_full_product() {
        let rec = normalize(&wrap(milk(500168)), Locale::En)
            .unwrap()
            .unwrap();

        assert_eq!(rec["id"], json!(500168));
        assert_eq!(rec["ean"], json!("6223000800355"));
        assert_eq!(rec["name_en"], json!("Milk 1L"));
        assert_eq!(rec["brand"], json!("Juhayna"));
        assert_eq!(rec["availability"], json!(true));
        assert_eq!(rec["price"], json!(45.5));
        assert_eq!(rec["discount"], json!(39.9));
        assert_eq!(rec["stockLevelStatus"], json!("inStock"));
        assert_eq!(rec["productUrl"], json!("/p/500168"));
        assert_eq!(
            rec["category_en"],
            json!([
                { "name": "Dairy", "level": 1 },
                { "name": "Milk", "level": 2 }
            ])
        );
        assert_eq!(
            rec["productPhotos"],
            json!({
                "thumbnail": "https://cdn/img_200Wx200H.jpg",
                "defaultImages": ["https://cdn/img_480Wx480H.jpg"]
            })
        );
        // Null supplier is dropped, not stored as null.
        assert!(!rec.contains_key("supplier"));
        assert!(rec.values().all(|v| !v.is_null()));
    }

    #[test]
    fn locale_suffix_follows_the_requested_locale() {
        let rec = normalize(&wrap(milk(500168)), Locale::Ar)
            .unwrap()
            .unwrap();
        assert!(rec.contains_key("name_ar"));
        assert!(rec.contains_key("category_ar"));
        assert!(!rec.contains_key("name_en"));
    }

    #[test]
    fn missing_recommended_product_is_absent() {
        let raw = json!({ "data": { "placements": [] } });
        assert!(normalize(&raw, Locale::En).unwrap().is_none());
    }

    #[test]
    fn placeholder_id_is_absent() {
        assert!(normalize(&wrap(milk(512348)), Locale::En)
            .unwrap()
            .is_none());
    }

    #[test]
    fn string_placeholder_id_is_absent() {
        let mut product = milk(0);
        product["id"] = json!("512348");
        assert!(normalize(&wrap(product), Locale::En).unwrap().is_none());
    }

    #[test]
    fn missing_availability_is_an_extraction_error() {
        let mut product = milk(500168);
        product.as_object_mut().unwrap().remove("availability");
        let err = normalize(&wrap(product), Locale::En).unwrap_err();
        assert!(matches!(err, SyncError::Extraction { .. }));
    }

    #[test]
    fn missing_discount_is_omitted_not_zero_filled() {
        let mut product = milk(500168);
        product["price"] = json!({ "price": 45.5 });
        let rec = normalize(&wrap(product), Locale::En).unwrap().unwrap();
        assert!(!rec.contains_key("discount"));
        assert_eq!(rec["price"], json!(45.5));
    }

    #[test]
    fn thumbnail_omitted_when_no_image_matches_the_marker() {
        let mut product = milk(500168);
        product["links"]["images"] = json!([{ "href": "https://cdn/img_480Wx480H.jpg" }]);
        let rec = normalize(&wrap(product), Locale::En).unwrap().unwrap();
        assert!(!rec["productPhotos"]
            .as_object()
            .unwrap()
            .contains_key("thumbnail"));
    }
}
