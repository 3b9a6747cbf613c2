//! Record store boundary.
//!
//! The core does not persist anything itself; it consumes a
//! [`RecordStore`] that provides durable CRUD for workers, vehicles,
//! and jobs, plus the two aggregate capabilities the scheduler needs
//! (status counts and interval-overlap queries). Default
//! implementations derive both aggregates from `list`-style scans,
//! so a minimal store only implements the CRUD surface.
//!
//! Implementations are expected to enforce referential integrity on
//! delete: removing a worker or vehicle still referenced by a job
//! must fail with [`StoreError::DependencyViolation`] rather than
//! leave dangling references.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::models::{Job, JobId, TimeInterval, Vehicle, Worker, WorkerId, WorkerStatus};

/// Errors reported by a record store.
///
/// The single failure mode the core handles: everything else an
/// implementation might hit (I/O, serialization) must be mapped into
/// this type by the implementation, not leaked upward.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A delete was refused because dependent records still
    /// reference the entity.
    #[error("dependent records still reference {entity}")]
    DependencyViolation {
        /// Description of the referenced entity.
        entity: String,
    },
}

/// Durable CRUD plus aggregate queries over the three entity kinds.
pub trait RecordStore {
    /// Looks up a worker by id.
    fn worker(&self, id: WorkerId) -> Option<Worker>;
    /// All workers.
    fn workers(&self) -> Vec<Worker>;
    /// Inserts or replaces a worker.
    fn save_worker(&mut self, worker: Worker);
    /// Deletes a worker.
    fn delete_worker(&mut self, id: WorkerId) -> Result<(), StoreError>;
    /// Allocates a fresh worker id.
    fn next_worker_id(&mut self) -> WorkerId;

    /// Looks up a vehicle by plate.
    fn vehicle(&self, plate: &str) -> Option<Vehicle>;
    /// All vehicles.
    fn vehicles(&self) -> Vec<Vehicle>;
    /// Inserts or replaces a vehicle.
    fn save_vehicle(&mut self, vehicle: Vehicle);
    /// Deletes a vehicle.
    fn delete_vehicle(&mut self, plate: &str) -> Result<(), StoreError>;

    /// Looks up a job by id.
    fn job(&self, id: JobId) -> Option<Job>;
    /// All jobs.
    fn jobs(&self) -> Vec<Job>;
    /// Inserts or replaces a job.
    fn save_job(&mut self, job: Job);
    /// Deletes a job.
    fn delete_job(&mut self, id: JobId) -> Result<(), StoreError>;
    /// Allocates a fresh job id.
    fn next_job_id(&mut self) -> JobId;

    /// Counts workers with the given status.
    ///
    /// Default: fold over [`workers`](Self::workers). Stores with
    /// aggregate queries should override.
    fn count_workers_by_status(&self, status: &WorkerStatus) -> usize {
        self.workers()
            .iter()
            .filter(|w| w.status == *status)
            .count()
    }

    /// All jobs whose interval overlaps `interval` (half-open).
    ///
    /// Default: filter over [`jobs`](Self::jobs). Stores that can
    /// filter by interval should override.
    fn jobs_overlapping(&self, interval: &TimeInterval) -> Vec<Job> {
        self.jobs()
            .into_iter()
            .filter(|j| j.interval.overlaps(interval))
            .collect()
    }
}
