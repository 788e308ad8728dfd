//! Status consolidation: raw call outcomes into showed-up / no-show.

use crate::models::{CallStage, OutcomeCategory};

/// Consolidate a raw outcome label against a no-show literal set.
///
/// Membership is case-sensitive. Missing and empty labels are undefined (`None`).
pub fn consolidate(raw_label: Option<&str>, no_show_literals: &[&str]) -> Option<OutcomeCategory> {
    let label = raw_label.filter(|s| !s.is_empty())?;
    if no_show_literals.contains(&label) {
        Some(OutcomeCategory::NoShowConsolidated)
    } else {
        Some(OutcomeCategory::ShowedUp)
    }
}

/// Consolidate using the literal set of `stage`.
pub fn consolidate_stage(raw_label: Option<&str>, stage: CallStage) -> Option<OutcomeCategory> {
    consolidate(raw_label, stage.no_show_literals())
}
