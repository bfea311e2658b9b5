//! Ownership percentage calculator
//!
//! Converts a contribution list into percentage shares. Zero total capital
//! short-circuits to all-zero shares; no division is attempted. Shareholder
//! percentages are rounded to 10 decimal places, the subsidiary's own share
//! additionally carries a 2-place display form (see
//! [`crate::model::OwnershipShare::display_percent`]).

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::model::{Contribution, OwnershipShare};

/// Decimal places kept on computed shareholder percentages.
pub const SHARE_PERCENT_SCALE: u32 = 10;

/// Decimal places used when the subsidiary's own share is displayed.
pub const DISPLAY_PERCENT_SCALE: u32 = 2;

/// Compute ownership shares for a contribution list.
///
/// For a positive total, the rounded percentages sum to 100 within 1e-6;
/// rounding error accumulates only at the last digit. Negative amounts are an
/// upstream input constraint and are not re-validated here.
pub fn compute_shares(contributions: &[Contribution]) -> Vec<OwnershipShare> {
    let total: Decimal = contributions.iter().map(|c| c.amount).sum();

    let shares: Vec<OwnershipShare> = contributions
        .iter()
        .map(|c| {
            let ownership_percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                ((c.amount / total) * Decimal::ONE_HUNDRED).round_dp_with_strategy(
                    SHARE_PERCENT_SCALE,
                    RoundingStrategy::MidpointAwayFromZero,
                )
            };
            OwnershipShare {
                contributor: c.contributor.clone(),
                capital_amount: c.amount,
                ownership_percent,
                is_main_parent: false,
            }
        })
        .collect();

    if !total.is_zero() {
        let sum = percent_sum(&shares);
        let drift = (sum - Decimal::ONE_HUNDRED).abs();
        if drift > Decimal::new(1, 6) {
            warn!(%sum, %drift, "ownership percentages drifted from 100");
        }
    }

    shares
}

/// Sum of the rounded percentages of a share list.
pub fn percent_sum(shares: &[OwnershipShare]) -> Decimal {
    shares.iter().map(|s| s.ownership_percent).sum()
}
