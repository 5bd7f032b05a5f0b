//! The filtering, pagination, and prioritization engine.
//!
//! Every function here is a pure computation over the alert list it is
//! handed: no I/O, no shared state, safe to re-run on every state change.
//! Callers own the working set and its mutation; they pass a snapshot in and
//! render what comes out.

use crate::format::category_label;
use crate::model::{DismissedAlerts, FilterCriteria};
use pulseproof_common::alert::VulnerabilityAlert;
use pulseproof_common::model::{Paginated, PaginatedResults};
use std::collections::BTreeMap;

/// Return the subset of `alerts` where every set criterion matches.
///
/// Criteria combine with AND, list-valued criteria with OR internally. Empty
/// criteria return the input unchanged, in input order.
pub fn filter_alerts(
    alerts: &[VulnerabilityAlert],
    criteria: &FilterCriteria,
) -> Vec<VulnerabilityAlert> {
    alerts
        .iter()
        .filter(|alert| criteria.matches(alert))
        .cloned()
        .collect()
}

/// Slice one page out of `alerts` and recompute the pagination totals.
///
/// A page past the end of the list yields empty results, not an error; the
/// returned totals always reflect the full input.
pub fn paginate(
    alerts: &[VulnerabilityAlert],
    paginated: Paginated,
) -> PaginatedResults<VulnerabilityAlert> {
    let number_of_items = alerts.len() as u64;

    let start = usize::try_from(paginated.offset())
        .unwrap_or(usize::MAX)
        .min(alerts.len());
    let page_size = usize::try_from(paginated.page_size.get()).unwrap_or(usize::MAX);
    let end = start.saturating_add(page_size).min(alerts.len());

    PaginatedResults::new(paginated, number_of_items, alerts[start..end].to_vec())
}

/// Extract the alerts needing immediate attention.
///
/// Only maximum-severity alerts not dismissed in this session qualify. Input
/// order is preserved.
pub fn select_critical(
    alerts: &[VulnerabilityAlert],
    dismissed: &DismissedAlerts,
) -> Vec<VulnerabilityAlert> {
    alerts
        .iter()
        .filter(|alert| alert.is_critical() && !dismissed.is_dismissed(&alert.id))
        .cloned()
        .collect()
}

/// Count alerts per category, keyed by the display label.
pub fn category_breakdown(alerts: &[VulnerabilityAlert]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for alert in alerts {
        *counts.entry(category_label(alert.category)).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod test;
