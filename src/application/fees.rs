//! Withdrawal-fee compliance pass.

use tracing::{debug, warn};

use crate::domain::{audit_fees, CurrencyCompliance};
use crate::error::Result;
use crate::port::outbound::venue::{SourceVenue, TargetVenue};

/// Audit every target currency against the source venue's networks.
///
/// Results follow target-venue currency order.
///
/// # Errors
///
/// Returns an error if either venue's currency listing cannot be fetched.
pub async fn run_fee_pass(
    source: &dyn SourceVenue,
    target: &dyn TargetVenue,
) -> Result<Vec<CurrencyCompliance>> {
    let (targets, sources) = tokio::try_join!(target.currencies(), source.currencies())?;
    debug!(
        target = targets.len(),
        source = sources.len(),
        "Fetched currencies"
    );

    let results = audit_fees(&targets, &sources);
    for result in &results {
        match result {
            CurrencyCompliance::AbsentAtSource { code } => {
                warn!(currency = %code, venue = source.venue_name(), "Currency missing at source");
            }
            CurrencyCompliance::Checked { code, reports } => {
                let failing = reports.iter().filter(|r| !r.is_compliant()).count();
                if failing > 0 {
                    warn!(currency = %code, failing, "Withdrawal settings below source");
                }
            }
        }
    }
    Ok(results)
}
