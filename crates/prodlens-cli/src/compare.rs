//! `compare` command handler.

use prodlens_client::{Operation, ProductClient};
use prodlens_core::{ComparisonResult, RequestSlot, Settled};

use crate::views;

/// Compares two products and prints both panels plus the metric chart.
///
/// # Errors
///
/// Returns the user-facing notification text if the comparison fails.
pub(crate) async fn run_compare(
    client: &ProductClient,
    product1: &str,
    product2: &str,
) -> anyhow::Result<()> {
    let mut slot: RequestSlot<ComparisonResult> = RequestSlot::new();
    let ticket = slot.begin();
    eprintln!("Comparing Products...");

    let outcome = client.compare(product1, product2).await;
    match slot.settle(ticket, outcome) {
        Settled::Applied => {
            if let Some(result) = slot.current() {
                println!("{}", views::render_comparison(result));
            }
            Ok(())
        }
        Settled::Failed(err) => {
            tracing::debug!(error = %err, kind = ?err.kind(), "compare failed");
            anyhow::bail!(err.notification(Operation::Compare))
        }
        Settled::Stale => Ok(()),
    }
}
