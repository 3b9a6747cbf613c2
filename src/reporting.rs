//! Aggregate reporting.
//!
//! Simple folds over the record store for the presentation layer:
//! workforce status counts and job volume per calendar month. The
//! core computes these; what consumes them (and over what transport)
//! is the embedder's business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::WorkerStatus;
use crate::store::RecordStore;

/// Active/inactive worker counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceCounts {
    /// Workers with status `Active`.
    pub active: usize,
    /// Workers with status `Inactive`.
    pub inactive: usize,
}

/// Job count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyJobCount {
    /// Month label, `YYYY-MM` of the jobs' start times.
    pub month: String,
    /// Number of jobs starting in that month.
    pub count: usize,
}

/// Counts active and inactive workers.
///
/// Workers with a `Custom` status are counted in neither bucket.
pub fn workforce_counts(store: &impl RecordStore) -> WorkforceCounts {
    WorkforceCounts {
        active: store.count_workers_by_status(&WorkerStatus::Active),
        inactive: store.count_workers_by_status(&WorkerStatus::Inactive),
    }
}

/// Groups jobs by the calendar month of their start time.
///
/// Months with no jobs are omitted; the result is ordered ascending
/// by month (the `YYYY-MM` label sorts chronologically).
pub fn jobs_per_month(store: &impl RecordStore) -> Vec<MonthlyJobCount> {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for job in store.jobs() {
        let label = job.interval.start.format("%Y-%m").to_string();
        *by_month.entry(label).or_insert(0) += 1;
    }
    by_month
        .into_iter()
        .map(|(month, count)| MonthlyJobCount { month, count })
        .collect()
}
