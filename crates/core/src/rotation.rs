//! Fallback rotation: least-recently-assigned worker goes next.

use crate::entities::Worker;
use crate::error::{CoreError, CoreResult};

/// Pick the worker who has waited longest since their last duty.
///
/// Never-assigned workers come first (`None` sorts before any date). Ties
/// on the date fall back to creation time, then id, so the same roster
/// always yields the same pick regardless of input order.
pub fn select_next(workers: &[Worker]) -> CoreResult<&Worker> {
    workers
        .iter()
        .min_by_key(|w| (w.last_assigned_date, w.created_at, w.id))
        .ok_or(CoreError::NoWorkersAvailable)
}
