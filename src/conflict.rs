//! Conflict detector.
//!
//! The system's central correctness property: no worker or vehicle
//! may be committed to two distinct jobs whose intervals overlap.
//! [`check`] guards every write path that could violate it.
//!
//! # Ordering
//! Detection is deterministic. Overlapping jobs are visited ascending
//! by id, resource sets in their natural (sorted) order, and the full
//! vehicle pass runs before the worker pass. Repeated runs against
//! the same data report the same first conflict, and when a candidate
//! has both a vehicle and a worker conflict, the vehicle one wins.

use crate::error::{ConflictError, ResourceId};
use crate::index::JobIntervalIndex;
use crate::models::{Job, JobId};

/// Checks a candidate job against existing allocations.
///
/// `exclude` is the candidate's own stored id during an update
/// (`None` for a create). Returns the first conflict found, or `Ok`
/// if every requested resource is free for the candidate's interval.
pub fn check(
    index: &JobIntervalIndex,
    candidate: &Job,
    exclude: Option<JobId>,
) -> Result<(), ConflictError> {
    // Vehicle pass.
    for other in index.overlapping(&candidate.interval, exclude) {
        for plate in &candidate.vehicles {
            if other.uses_vehicle(plate) {
                return Err(conflict(ResourceId::Vehicle(plate.clone()), other));
            }
        }
    }

    // Worker pass.
    for other in index.overlapping(&candidate.interval, exclude) {
        for &worker_id in &candidate.workers {
            if other.uses_worker(worker_id) {
                return Err(conflict(ResourceId::Worker(worker_id), other));
            }
        }
    }

    Ok(())
}

fn conflict(resource: ResourceId, with: &Job) -> ConflictError {
    ConflictError {
        resource,
        with_job: with.id,
        with_job_client: with.client_name.clone(),
    }
}
