//! Error taxonomy for allocation operations.
//!
//! Every failure an allocation operation can surface is one of the
//! variants here. Storage failures are translated at the service
//! boundary; raw store errors never reach callers.
//!
//! All variants are recoverable: the caller fixes the input (or
//! resolves the dependency) and retries. None are fatal.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{JobId, WorkerId};

/// A worker or vehicle reference, as reported in conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    /// Worker, by surrogate id.
    Worker(WorkerId),
    /// Vehicle, by licence plate.
    Vehicle(String),
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Worker(id) => write!(f, "worker {id}"),
            ResourceId::Vehicle(plate) => write!(f, "vehicle {plate}"),
        }
    }
}

/// A double-booking: the requested resource is already committed to
/// another job whose interval overlaps the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{resource} is already allocated to job {with_job} ({with_job_client}) in the requested period")]
pub struct ConflictError {
    /// The double-booked resource.
    pub resource: ResourceId,
    /// The job that already holds the resource.
    pub with_job: JobId,
    /// That job's client name, for human-readable resolution.
    pub with_job_client: String,
}

/// Errors surfaced by allocation operations.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// A requested resource is double-booked.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Referenced job does not exist.
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    /// Referenced worker does not exist.
    #[error("worker not found: {0}")]
    WorkerNotFound(WorkerId),

    /// Referenced vehicle does not exist.
    #[error("vehicle not found: {0}")]
    VehicleNotFound(String),

    /// The store refused a delete because dependent records still
    /// reference the entity.
    #[error("cannot delete {entity}: dependent records still reference it")]
    DependencyConflict {
        /// Description of the entity that could not be deleted.
        entity: String,
    },

    /// Job interval is empty or inverted.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },
}
