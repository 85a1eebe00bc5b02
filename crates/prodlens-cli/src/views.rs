//! Plain-text renderers for the comparison, finder and updates screens.
//!
//! Renderers are pure: they take view models and return the text to print,
//! including the empty-state messages each screen shows.

use chrono::{DateTime, NaiveDate};
use prodlens_core::{
    Catalog, ComparisonMetric, ComparisonResult, Product, ProductDetail, ProductFilters,
    ProductUpdate, Settings, NOT_AVAILABLE,
};

const BAR_WIDTH: usize = 20;
const CARD_FEATURES: usize = 2;

pub(crate) const NO_METRICS: &str = "No comparison metrics available";
pub(crate) const NO_PRODUCTS: &str = "No products found";
pub(crate) const NO_UPDATES: &str = "No updates found";

/// Formats a score or rating without a trailing `.0`.
fn format_score(score: f64) -> String {
    if score.fract().abs() < f64::EPSILON {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

/// Fills `score / max` of a fixed-width bar.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(score: f64, max: f64) -> String {
    let filled = ((score / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Renders `2025-04-01` as `Apr 1, 2025`. Unrecognised dates are shown as given.
pub(crate) fn format_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

fn push_list(lines: &mut Vec<String>, title: &str, items: &[String], empty: &str) {
    lines.push(format!("  {title}:"));
    if items.is_empty() {
        lines.push(format!("    {empty}"));
    } else {
        lines.extend(items.iter().map(|item| format!("    - {item}")));
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

fn detail_panel(detail: &ProductDetail) -> Vec<String> {
    let rating = detail
        .rating
        .map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("{}/5", format_score(r)));

    let mut lines = vec![
        detail.name.clone(),
        format!("  Price: {}", detail.price),
        format!("  Rating: {rating}"),
        format!("  Image: {}", detail.image_url),
    ];
    push_list(&mut lines, "Features", &detail.key_features, "No features listed");
    push_list(&mut lines, "Pros", &detail.pros, "No pros listed");
    push_list(&mut lines, "Cons", &detail.cons, "No cons listed");
    lines.push(format!("  Ideal for: {}", detail.ideal_for));
    lines
}

/// One metric as two bars, the leader marked with `*`.
pub(crate) fn metric_bar(metric: &ComparisonMetric) -> String {
    let (mark1, mark2) = match metric.leader() {
        Some(1) => ("*", " "),
        Some(2) => (" ", "*"),
        _ => (" ", " "),
    };
    format!(
        "  {:<18} {mark1}{} {:>4} | {:<4} {}{mark2}",
        metric.name,
        bar(metric.product1_score, 10.0),
        format_score(metric.product1_score),
        format_score(metric.product2_score),
        bar(metric.product2_score, 10.0),
    )
}

pub(crate) fn render_comparison(result: &ComparisonResult) -> String {
    let mut lines = vec!["Comparison Results".to_string(), String::new()];
    lines.extend(detail_panel(&result.product1));
    lines.push(String::new());
    lines.extend(detail_panel(&result.product2));
    lines.push(String::new());

    lines.push("Performance Comparison".to_string());
    if result.has_metrics() {
        lines.push(format!(
            "  {:<18} {} vs {}",
            "", result.product1.name, result.product2.name
        ));
        lines.extend(result.comparison_metrics.iter().map(metric_bar));
    } else {
        lines.push(format!("  {NO_METRICS}"));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Finder
// ---------------------------------------------------------------------------

pub(crate) fn product_card(product: &Product) -> String {
    let rating = product
        .rating
        .map(|r| format!("  ★ {r:.1}"))
        .unwrap_or_default();

    let mut lines = vec![
        format!("[{}] {}{rating}", product.id, product.name),
        format!("    {}", product.description),
        format!(
            "    {} | {} | {}",
            product.price, product.category, product.brand
        ),
    ];
    let highlights: Vec<&str> = product
        .features
        .iter()
        .take(CARD_FEATURES)
        .map(String::as_str)
        .collect();
    if !highlights.is_empty() {
        lines.push(format!("    {}", highlights.join(" · ")));
    }
    lines.join("\n")
}

pub(crate) fn render_products(products: &[Product], filters: &ProductFilters) -> String {
    if products.is_empty() {
        return format!("{NO_PRODUCTS}\nTry adjusting your search or filters");
    }

    let noun = if products.len() == 1 {
        "product"
    } else {
        "products"
    };
    let mut lines = vec![format!(
        "{} {noun} (sorted by {})",
        products.len(),
        filters.sort.display_name()
    )];
    for product in products {
        lines.push(String::new());
        lines.push(product_card(product));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

fn update_entry(update: &ProductUpdate) -> Vec<String> {
    let mut lines = vec![
        format!("{} | {}", update.update_type, format_date(&update.date)),
        format!("  {}", update.product_name),
        format!("  {}", update.description),
    ];
    if !update.highlights.is_empty() {
        lines.push("  Highlights:".to_string());
        lines.extend(update.highlights.iter().map(|h| format!("    - {h}")));
    }
    match (&update.source, &update.url) {
        (Some(source), Some(url)) => lines.push(format!("  Source: {source} ({url})")),
        (Some(source), None) => lines.push(format!("  Source: {source}")),
        (None, Some(url)) => lines.push(format!("  Link: {url}")),
        (None, None) => {}
    }
    lines
}

pub(crate) fn render_updates(category: &str, updates: &[ProductUpdate]) -> String {
    if updates.is_empty() {
        return format!(
            "{NO_UPDATES}\nThere are no recent updates for the {category} category"
        );
    }

    let mut lines = vec![format!("Product Updates: {category}")];
    for update in updates {
        lines.push(String::new());
        lines.extend(update_entry(update));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub(crate) fn render_catalog(catalog: &Catalog, settings: &Settings) -> String {
    let mut lines = vec![
        format!("Categories: {}", catalog.categories.join(", ")),
        format!("Brands: {}", catalog.brands.join(", ")),
        "Update categories:".to_string(),
    ];
    lines.extend(catalog.update_categories.iter().map(|category| {
        let mark = if settings.is_subscribed(category) {
            "[x]"
        } else {
            "[ ]"
        };
        format!("  {mark} {category}")
    }));
    lines.join("\n")
}

pub(crate) fn render_subscriptions(settings: &Settings) -> String {
    if settings.subscribed_categories.is_empty() {
        return "Not subscribed to any categories".to_string();
    }
    settings
        .subscribed_categories
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
