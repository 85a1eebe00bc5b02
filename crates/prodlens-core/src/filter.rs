//! Client-side filtering and sorting of finder results.

use crate::pricing::{parse_price, sort_price};
use crate::products::Product;
use crate::CoreError;

/// Inclusive integer price bounds selected in the finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    /// Upper bound of the finder's price slider.
    pub const SLIDER_MAX: u64 = 2000;

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriceRange`] if `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Keeps a product when its parsed price interval overlaps this range.
    /// Prices that cannot be parsed always pass.
    #[must_use]
    pub fn admits(&self, price: &str) -> bool {
        match parse_price(price) {
            Some(span) => span.max >= self.min && span.min <= self.max,
            None => true,
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: Self::SLIDER_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Provider order.
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortKey {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Relevance => "Relevance",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Customer Rating",
        }
    }

    /// Stable sort in place; equal keys keep their input order.
    pub fn sort(self, products: &mut [Product]) {
        match self {
            SortKey::Relevance => {}
            SortKey::PriceLow => products.sort_by_key(|p| sort_price(&p.price)),
            SortKey::PriceHigh => {
                products.sort_by(|a, b| sort_price(&b.price).cmp(&sort_price(&a.price)));
            }
            SortKey::Rating => products.sort_by(|a, b| {
                let ra = a.rating.unwrap_or(0.0);
                let rb = b.rating.unwrap_or(0.0);
                rb.total_cmp(&ra)
            }),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevance" => Ok(SortKey::Relevance),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Finder filter selections.
///
/// Empty `categories` or `brands` mean "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub price_range: PriceRange,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub sort: SortKey,
}

impl ProductFilters {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && self.price_range.admits(&product.price)
    }

    /// Applies the category, brand and price filters, then the sort.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let before = products.len();
        let mut kept: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        self.sort.sort(&mut kept);
        tracing::debug!(
            before,
            after = kept.len(),
            sort = %self.sort,
            "applied finder filters"
        );
        kept
    }

    pub fn toggle_category(&mut self, category: &str) -> bool {
        toggle_selection(&mut self.categories, category)
    }

    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        toggle_selection(&mut self.brands, brand)
    }
}

/// Adds `value` to `selection` if absent, removes it if present.
///
/// Returns `true` when the value is selected after the call. Insertion order
/// is preserved.
pub fn toggle_selection(selection: &mut Vec<String>, value: &str) -> bool {
    if let Some(pos) = selection.iter().position(|s| s == value) {
        selection.remove(pos);
        false
    } else {
        selection.push(value.to_string());
        true
    }
}

/// Builds the criteria string sent to the provider: the free-text query
/// followed by human-readable filter clauses.
///
/// `"headphones with price range $0-$500 in categories: Audio"`
#[must_use]
pub fn build_criteria(query: &str, filters: &ProductFilters) -> String {
    let mut criteria = format!(
        "{} with price range ${}-${}",
        query.trim(),
        filters.price_range.min(),
        filters.price_range.max()
    );
    if !filters.categories.is_empty() {
        criteria.push_str(" in categories: ");
        criteria.push_str(&filters.categories.join(", "));
    }
    if !filters.brands.is_empty() {
        criteria.push_str(" from brands: ");
        criteria.push_str(&filters.brands.join(", "));
    }
    criteria
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
