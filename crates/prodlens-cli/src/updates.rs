//! `updates` command handler.

use prodlens_client::{Operation, ProductClient};
use prodlens_core::{Catalog, ProductUpdate, RequestSlot, Settings, Settled};

use crate::views;

/// Picks the category to show: the explicit argument, else the first
/// subscription, else the first catalog category.
pub(crate) fn resolve_category(
    requested: Option<&str>,
    settings: &Settings,
    catalog: &Catalog,
) -> Option<String> {
    requested
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .or_else(|| settings.subscribed_categories.first().cloned())
        .or_else(|| catalog.update_categories.first().cloned())
}

/// Prints the update feed for one category.
///
/// # Errors
///
/// Returns the user-facing notification text if the feed cannot be loaded.
pub(crate) async fn run_updates(
    client: &ProductClient,
    requested: Option<&str>,
    settings: &Settings,
    catalog: &Catalog,
) -> anyhow::Result<()> {
    let Some(category) = resolve_category(requested, settings, catalog) else {
        anyhow::bail!("Please select a category");
    };

    let mut slot: RequestSlot<Vec<ProductUpdate>> = RequestSlot::new();
    let ticket = slot.begin();
    eprintln!("Loading {category} updates...");

    let outcome = client.get_updates(&category).await;
    match slot.settle(ticket, outcome) {
        Settled::Applied => {
            let updates = slot.take().unwrap_or_default();
            println!("{}", views::render_updates(&category, &updates));
            if settings.is_subscribed(&category) {
                println!("\nSubscribed to {category} updates");
            }
            Ok(())
        }
        Settled::Failed(err) => {
            tracing::debug!(error = %err, kind = ?err.kind(), "updates failed");
            anyhow::bail!(err.notification(Operation::Updates))
        }
        Settled::Stale => Ok(()),
    }
}
