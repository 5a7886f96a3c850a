//! Selection reconciliation between a cached report list and a profile

use crate::report::{Report, ReportId};

/// Find the cached report a profile has selected
///
/// Scans in cache order and returns the index of the first report whose id
/// equals `selected`; GUID-shaped ids ignore case (see [`ReportId`]).
/// Returns `None` when nothing is selected, when the id is unset, or when
/// the report is no longer in the cache.
#[must_use]
pub fn reconcile(reports: &[Report], selected: Option<&ReportId>) -> Option<usize> {
    let selected = selected.filter(|id| !id.is_unset())?;
    reports.iter().position(|r| &r.id == selected)
}
