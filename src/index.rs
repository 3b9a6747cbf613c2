//! Job interval index.
//!
//! Answers "which existing jobs overlap interval [a, b)?" for the
//! conflict detector. The index is a snapshot of the job set, sorted
//! by job id, so traversal order — and therefore which conflict gets
//! reported first — is stable across runs.
//!
//! # Complexity
//! Linear scan per query: O(n) over indexed jobs. Adequate for the
//! domain's scale (tens to low thousands of concurrent jobs). At
//! larger volumes, swap the scan for a sorted-interval structure
//! behind the same contract.

use crate::models::{Job, JobId, TimeInterval};

/// An ordered snapshot of jobs, queryable by interval overlap.
#[derive(Debug, Clone)]
pub struct JobIntervalIndex {
    jobs: Vec<Job>,
}

impl JobIntervalIndex {
    /// Builds an index over the given jobs.
    ///
    /// Jobs are ordered ascending by id regardless of input order.
    pub fn new(mut jobs: Vec<Job>) -> Self {
        jobs.sort_by_key(|j| j.id);
        Self { jobs }
    }

    /// Number of indexed jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the index holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs whose interval overlaps `interval`, ascending by id.
    ///
    /// `exclude` removes one job id from the result — an update must
    /// not conflict with the job's own stored state. Pass `None` for
    /// a brand-new job, which has no prior self to exclude.
    pub fn overlapping(
        &self,
        interval: &TimeInterval,
        exclude: Option<JobId>,
    ) -> impl Iterator<Item = &Job> {
        let interval = *interval;
        self.jobs
            .iter()
            .filter(move |j| Some(j.id) != exclude && j.interval.overlaps(&interval))
    }
}
