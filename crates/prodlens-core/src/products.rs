use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Display text substituted for any missing provider field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Template prefix for generated placeholder images; the URL-encoded product
/// name is appended as the `text` query value.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/300x300/e6f2ff/0284c7?text=";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the fallback image URL for a product without one.
///
/// Encoding matches `encodeURIComponent`, so `"Smartphone X"` becomes
/// `...?text=Smartphone%20X`.
#[must_use]
pub fn placeholder_image_url(name: &str) -> String {
    format!(
        "{PLACEHOLDER_IMAGE_BASE}{}",
        utf8_percent_encode(name, URI_COMPONENT)
    )
}

/// A product returned by a finder search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within one result set.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free text, e.g. `"$249-$299"` or `"$1200"`. See [`crate::parse_price`].
    pub price: String,
    /// Provider order is preserved.
    pub features: Vec<String>,
    pub category: String,
    pub brand: String,
    /// 0–5 scale, when the provider supplied one.
    pub rating: Option<f64>,
    pub release_date: String,
    pub image_url: String,
}

/// One side of a head-to-head comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub name: String,
    pub price: String,
    pub rating: Option<f64>,
    pub key_features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub ideal_for: String,
    pub image_url: String,
}

/// A scored comparison dimension; each score is 0–10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetric {
    pub name: String,
    pub product1_score: f64,
    pub product2_score: f64,
}

impl ComparisonMetric {
    /// Returns `Some(1)` or `Some(2)` for the higher-scoring side, `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<u8> {
        match self.product1_score.total_cmp(&self.product2_score) {
            std::cmp::Ordering::Greater => Some(1),
            std::cmp::Ordering::Less => Some(2),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub product1: ProductDetail,
    pub product2: ProductDetail,
    pub comparison_metrics: Vec<ComparisonMetric>,
}

impl ComparisonResult {
    #[must_use]
    pub fn has_metrics(&self) -> bool {
        !self.comparison_metrics.is_empty()
    }
}

/// Kind of product news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UpdateType {
    NewRelease,
    MajorUpdate,
    PriceChange,
    Other(String),
}

impl UpdateType {
    /// Parses a provider tag case-insensitively; unknown tags are kept verbatim.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let normalized: String = tag
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "newrelease" | "release" | "launch" => UpdateType::NewRelease,
            "majorupdate" => UpdateType::MajorUpdate,
            "pricechange" | "pricedrop" => UpdateType::PriceChange,
            _ => UpdateType::Other(tag.trim().to_string()),
        }
    }
}

impl From<String> for UpdateType {
    fn from(value: String) -> Self {
        UpdateType::parse(&value)
    }
}

impl From<UpdateType> for String {
    fn from(value: UpdateType) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for UpdateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateType::NewRelease => write!(f, "New Release"),
            UpdateType::MajorUpdate => write!(f, "Major Update"),
            UpdateType::PriceChange => write!(f, "Price Change"),
            UpdateType::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// A product news item for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: String,
    pub product_name: String,
    pub update_type: UpdateType,
    pub date: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub category: String,
    pub image_url: String,
    /// Publisher of the news item, when the provider names one.
    pub source: Option<String>,
    /// Link to the original announcement.
    pub url: Option<String>,
}
