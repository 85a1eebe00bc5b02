//! `find` command handler.

use prodlens_client::{Operation, ProductClient};
use prodlens_core::{build_criteria, Product, ProductFilters, RequestSlot, Settled};

use crate::views;

/// Searches for products, then applies the local facet filters and sort.
///
/// The filter selections are also folded into the criteria text so the
/// provider can narrow its own answer; the local pass guarantees the result.
///
/// # Errors
///
/// Returns the user-facing notification text if the search fails.
pub(crate) async fn run_find(
    client: &ProductClient,
    query: &str,
    filters: &ProductFilters,
) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("Please enter a search query");
    }

    let criteria = build_criteria(query.trim(), filters);
    tracing::debug!(%criteria, "built finder criteria");

    let mut slot: RequestSlot<Vec<Product>> = RequestSlot::new();
    let ticket = slot.begin();
    eprintln!("Searching for products...");

    let outcome = client
        .find(&criteria)
        .await
        .map(|products| filters.apply(products));
    match slot.settle(ticket, outcome) {
        Settled::Applied => {
            let products = slot.take().unwrap_or_default();
            println!("{}", views::render_products(&products, filters));
            Ok(())
        }
        Settled::Failed(err) => {
            tracing::debug!(error = %err, kind = ?err.kind(), "find failed");
            anyhow::bail!(err.notification(Operation::Find))
        }
        Settled::Stale => Ok(()),
    }
}
