//! Main-parent determination
//!
//! Selects the controlling owner of a subsidiary from its computed shares.
//! Decision order: explicit override on a shareholder record, then the
//! self-controlled rule (own capital exceeds all external capital), then the
//! highest percentage with first-occurrence tie-break.

use rust_decimal::Decimal;
use tracing::debug;

use crate::model::{ContributorId, OwnershipShare, ParentDecision, ShareholderEntry, ShareholderKind};

/// Determine the main parent for a subsidiary.
///
/// `shares` must be the output of [`crate::ownership::compute_shares`] over
/// the normalized contribution list, so it is in insertion order with the
/// subsidiary's own share first. `shareholders` is the original record list,
/// consulted for the override flag.
pub fn determine_parent(
    shares: &[OwnershipShare],
    shareholders: &[ShareholderEntry],
) -> ParentDecision {
    // Explicit override wins unconditionally.
    if let Some(entry) = shareholders.iter().find(|e| e.is_main_parent) {
        let parent_id = match &entry.kind {
            ShareholderKind::Company { company_id } => Some(company_id.clone()),
            ShareholderKind::Individual { .. } => None,
        };
        debug!(shareholder = %entry.name, "main parent set by explicit override");
        return ParentDecision {
            parent_id,
            winner: Some(entry.contributor_id()),
            overridden: true,
        };
    }

    let mut self_capital = Decimal::ZERO;
    let mut shareholder_capital = Decimal::ZERO;
    for share in shares {
        if share.contributor == ContributorId::Subsidiary {
            self_capital += share.capital_amount;
        } else {
            shareholder_capital += share.capital_amount;
        }
    }

    // Own capital exceeds all external capital: no single external owner,
    // the subsidiary is self-controlled for hierarchy purposes.
    if shareholder_capital > Decimal::ZERO && self_capital > shareholder_capital {
        debug!(%self_capital, %shareholder_capital, "subsidiary is self-controlled");
        return ParentDecision::none();
    }

    // Highest percentage wins; a strictly-greater comparison keeps the first
    // occurrence on ties.
    let mut winner: Option<&OwnershipShare> = None;
    for share in shares {
        if share.contributor == ContributorId::Subsidiary {
            continue;
        }
        let beats_current = match winner {
            Some(best) => share.ownership_percent > best.ownership_percent,
            None => true,
        };
        if beats_current {
            winner = Some(share);
        }
    }

    match winner {
        Some(share) => ParentDecision {
            parent_id: share.contributor.as_company().map(String::from),
            winner: Some(share.contributor.clone()),
            overridden: false,
        },
        None => ParentDecision::none(),
    }
}

/// Echo the decision winner onto the share list's `is_main_parent` flags.
/// Display-only: persisted shares are not mutated retroactively.
pub fn apply_main_parent(shares: &mut [OwnershipShare], decision: &ParentDecision) {
    for share in shares.iter_mut() {
        share.is_main_parent = decision.winner.as_ref() == Some(&share.contributor);
    }
}
