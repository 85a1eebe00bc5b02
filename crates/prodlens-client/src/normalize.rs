//! Conversion of raw provider records into view models.
//!
//! Nothing here fails: missing text becomes [`NOT_AVAILABLE`], missing images
//! become a placeholder keyed by name, missing lists stay empty, and numeric
//! fields are clamped to their documented scales.

use std::collections::HashSet;

use prodlens_core::{
    placeholder_image_url, ComparisonMetric, ComparisonResult, Product, ProductDetail,
    ProductUpdate, UpdateType, NOT_AVAILABLE,
};
use serde_json::Value;

use crate::types::{RawComparison, RawMetric, RawProduct, RawProductDetail, RawUpdate};

const MAX_RATING: f64 = 5.0;
const MAX_SCORE: f64 = 10.0;

fn text_or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// The canonical list unless it is empty.
fn prefer_list(canonical: Vec<String>, alternate: Vec<String>) -> Vec<String> {
    if canonical.is_empty() {
        alternate
    } else {
        canonical
    }
}

fn image_or_placeholder(image_url: Option<String>, name: &str) -> String {
    image_url.unwrap_or_else(|| placeholder_image_url(name))
}

/// Converts a list of raw records into products with unique ids.
///
/// Records that are not JSON objects are dropped. A missing id is replaced
/// by the record's 1-based position; a repeated id gets a `-N` suffix.
#[must_use]
pub fn normalize_products(records: Vec<Value>) -> Vec<Product> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|record| serde_json::from_value::<RawProduct>(record).ok())
        .enumerate()
        .map(|(idx, raw)| {
            let mut product = normalize_product(raw, idx);
            product.id = unique_id(&mut seen, product.id);
            product
        })
        .collect()
}

/// Converts one raw product; `position` is its 0-based index in the response.
#[must_use]
pub fn normalize_product(raw: RawProduct, position: usize) -> Product {
    let name = text_or_na(raw.name);
    let image_url = image_or_placeholder(raw.image_url.or(raw.image_url_snake), &name);

    Product {
        id: raw.id.unwrap_or_else(|| (position + 1).to_string()),
        description: text_or_na(raw.description),
        price: text_or_na(raw.price),
        features: prefer_list(raw.features, raw.key_features),
        category: text_or_na(raw.category),
        brand: text_or_na(raw.brand),
        rating: raw.rating.map(|r| r.clamp(0.0, MAX_RATING)),
        release_date: text_or_na(raw.release_date.or(raw.release_date_snake)),
        image_url,
        name,
    }
}

/// Converts a comparison answer.
///
/// `requested` holds the two names the user typed; they stand in for names
/// the provider omitted.
#[must_use]
pub fn normalize_comparison(value: Value, requested: (&str, &str)) -> ComparisonResult {
    let raw = if value.is_object() {
        serde_json::from_value::<RawComparison>(value).unwrap_or_default()
    } else {
        RawComparison::default()
    };

    let comparison_metrics = raw
        .comparison_metrics
        .into_iter()
        .filter_map(normalize_metric)
        .collect();

    ComparisonResult {
        product1: normalize_detail(raw.product1, requested.0),
        product2: normalize_detail(raw.product2, requested.1),
        comparison_metrics,
    }
}

#[must_use]
pub fn normalize_detail(raw: Option<RawProductDetail>, fallback_name: &str) -> ProductDetail {
    let raw = raw.unwrap_or_default();
    let name = raw.name.unwrap_or_else(|| {
        let trimmed = fallback_name.trim();
        if trimmed.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            trimmed.to_string()
        }
    });
    let image_url = image_or_placeholder(raw.image_url, &name);

    ProductDetail {
        price: text_or_na(raw.price),
        rating: raw.rating.map(|r| r.clamp(0.0, MAX_RATING)),
        key_features: prefer_list(raw.key_features, raw.features),
        pros: raw.pros,
        cons: raw.cons,
        ideal_for: text_or_na(raw.ideal_for),
        image_url,
        name,
    }
}

/// Metrics with neither a name nor any score carry no information and are dropped.
fn normalize_metric(raw: RawMetric) -> Option<ComparisonMetric> {
    if raw.name.is_none() && raw.product1_score.is_none() && raw.product2_score.is_none() {
        return None;
    }
    let score = |s: Option<f64>| s.unwrap_or(0.0).clamp(0.0, MAX_SCORE);
    Some(ComparisonMetric {
        name: text_or_na(raw.name),
        product1_score: score(raw.product1_score),
        product2_score: score(raw.product2_score),
    })
}

/// Converts a list of raw update records.
///
/// `category` is the category that was requested; it fills records that do
/// not name their own.
#[must_use]
pub fn normalize_updates(records: Vec<Value>, category: &str) -> Vec<ProductUpdate> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|record| serde_json::from_value::<RawUpdate>(record).ok())
        .enumerate()
        .map(|(idx, raw)| {
            let mut update = normalize_update(raw, idx, category);
            update.id = unique_id(&mut seen, update.id);
            update
        })
        .collect()
}

#[must_use]
pub fn normalize_update(raw: RawUpdate, position: usize, category: &str) -> ProductUpdate {
    let product_name = text_or_na(raw.product_name.or(raw.title));
    let image_url = image_or_placeholder(raw.image_url, &product_name);
    let category = raw.category.unwrap_or_else(|| {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            trimmed.to_string()
        }
    });

    ProductUpdate {
        id: raw.id.unwrap_or_else(|| format!("update{}", position + 1)),
        update_type: raw.update_type.or(raw.kind).as_deref().map_or_else(
            || UpdateType::Other(NOT_AVAILABLE.to_string()),
            UpdateType::parse,
        ),
        date: text_or_na(raw.date),
        description: text_or_na(raw.description),
        highlights: raw.highlights,
        source: raw.source,
        url: raw.url,
        product_name,
        category,
        image_url,
    }
}

fn unique_id(seen: &mut HashSet<String>, id: String) -> String {
    if seen.insert(id.clone()) {
        return id;
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{id}-{n}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
