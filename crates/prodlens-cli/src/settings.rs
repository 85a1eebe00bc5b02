//! Handlers for commands that only touch the local settings store.

use prodlens_core::{Catalog, LocalStore, Settings, SubscriptionChange};

use crate::views;

/// Matches `input` case-insensitively against `candidates`, returning the
/// canonical spelling.
fn canonical<'a>(input: &str, candidates: impl IntoIterator<Item = &'a String>) -> Option<String> {
    let input = input.trim();
    candidates
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(input))
        .cloned()
}

pub(crate) fn run_subscribe(
    store: &mut LocalStore,
    settings: &mut Settings,
    catalog: &Catalog,
    category: &str,
) -> anyhow::Result<()> {
    let Some(category) = canonical(category, &catalog.update_categories) else {
        anyhow::bail!(
            "unknown category '{}'; choose one of: {}",
            category.trim(),
            catalog.update_categories.join(", ")
        );
    };

    match settings.subscribe(store, &category)? {
        SubscriptionChange::Subscribed => println!("Subscribed to {category} updates"),
        _ => println!("Already subscribed to {category} updates"),
    }
    Ok(())
}

pub(crate) fn run_unsubscribe(
    store: &mut LocalStore,
    settings: &mut Settings,
    category: &str,
) -> anyhow::Result<()> {
    let resolved = canonical(category, &settings.subscribed_categories);
    let Some(category) = resolved else {
        println!("Not subscribed to {} updates", category.trim());
        return Ok(());
    };

    match settings.unsubscribe(store, &category)? {
        SubscriptionChange::Unsubscribed => println!("Unsubscribed from {category} updates"),
        _ => println!("Not subscribed to {category} updates"),
    }
    Ok(())
}

pub(crate) fn run_subscriptions(settings: &Settings) {
    println!("{}", views::render_subscriptions(settings));
}

pub(crate) fn run_set_key(
    store: &mut LocalStore,
    settings: &mut Settings,
    key: &str,
) -> anyhow::Result<()> {
    if !settings.set_api_key(store, key)? {
        anyhow::bail!("API key must not be empty");
    }
    tracing::info!(path = %store.path().display(), "saved perplexity api key");
    println!("API Key Saved");
    Ok(())
}

pub(crate) fn run_catalog(catalog: &Catalog, settings: &Settings) {
    println!("{}", views::render_catalog(catalog, settings));
}
