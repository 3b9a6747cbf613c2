//! In-memory record store.
//!
//! Reference implementation of [`RecordStore`] backed by `BTreeMap`s,
//! so enumeration order is deterministic (ascending by key). Suitable
//! for tests and for embedding the core without external storage.
//!
//! Referential integrity: deleting a worker or vehicle that any job
//! still references fails with [`StoreError::DependencyViolation`],
//! matching what a relational store's foreign-key constraints would
//! do. The allocation service is expected to detach the resource from
//! all jobs before deleting it.

use std::collections::BTreeMap;

use super::{RecordStore, StoreError};
use crate::models::{Job, JobId, Vehicle, Worker, WorkerId};

/// BTreeMap-backed record store with deterministic enumeration order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    workers: BTreeMap<WorkerId, Worker>,
    vehicles: BTreeMap<String, Vehicle>,
    jobs: BTreeMap<JobId, Job>,
    next_worker_id: WorkerId,
    next_job_id: JobId,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn worker_is_referenced(&self, id: WorkerId) -> bool {
        self.jobs.values().any(|j| j.uses_worker(id))
    }

    fn vehicle_is_referenced(&self, plate: &str) -> bool {
        self.jobs.values().any(|j| j.uses_vehicle(plate))
    }
}

impl RecordStore for MemoryStore {
    fn worker(&self, id: WorkerId) -> Option<Worker> {
        self.workers.get(&id).cloned()
    }

    fn workers(&self) -> Vec<Worker> {
        self.workers.values().cloned().collect()
    }

    fn save_worker(&mut self, worker: Worker) {
        self.workers.insert(worker.id, worker);
    }

    fn delete_worker(&mut self, id: WorkerId) -> Result<(), StoreError> {
        if self.worker_is_referenced(id) {
            return Err(StoreError::DependencyViolation {
                entity: format!("worker {id}"),
            });
        }
        self.workers.remove(&id);
        Ok(())
    }

    fn next_worker_id(&mut self) -> WorkerId {
        self.next_worker_id += 1;
        self.next_worker_id
    }

    fn vehicle(&self, plate: &str) -> Option<Vehicle> {
        self.vehicles.get(plate).cloned()
    }

    fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.values().cloned().collect()
    }

    fn save_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.plate.clone(), vehicle);
    }

    fn delete_vehicle(&mut self, plate: &str) -> Result<(), StoreError> {
        if self.vehicle_is_referenced(plate) {
            return Err(StoreError::DependencyViolation {
                entity: format!("vehicle {plate}"),
            });
        }
        self.vehicles.remove(plate);
        Ok(())
    }

    fn job(&self, id: JobId) -> Option<Job> {
        self.jobs.get(&id).cloned()
    }

    fn jobs(&self) -> Vec<Job> {
        self.jobs.values().cloned().collect()
    }

    fn save_job(&mut self, job: Job) {
        self.jobs.insert(job.id, job);
    }

    fn delete_job(&mut self, id: JobId) -> Result<(), StoreError> {
        self.jobs.remove(&id);
        Ok(())
    }

    fn next_job_id(&mut self) -> JobId {
        self.next_job_id += 1;
        self.next_job_id
    }
}
