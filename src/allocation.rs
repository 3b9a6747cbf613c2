//! Allocation service.
//!
//! Orchestrates every write path over the record store and gates the
//! ones that could double-book a resource through the conflict
//! detector. This is the only module that mutates jobs, workers, or
//! vehicles; read paths are thin delegations to the store.
//!
//! # Atomicity
//! Every mutating operation takes `&mut self` and the service owns
//! its store, so a conflict check and the persist that follows it
//! cannot interleave with another allocation on the same service.
//! Embedders sharing a service across threads wrap it in their own
//! `Mutex`; stores shared across processes need their own
//! transaction boundary around each call.

use chrono::{DateTime, Months, Utc};
use tracing::{debug, info, warn};

use crate::conflict;
use crate::error::AllocationError;
use crate::index::JobIntervalIndex;
use crate::models::{Job, JobId, TimeInterval, Vehicle, Worker, WorkerId};
use crate::reporting::{self, MonthlyJobCount, WorkforceCounts};
use crate::store::{RecordStore, StoreError};

/// Operation result.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Coordinates job, worker, and vehicle lifecycles over a record store.
#[derive(Debug)]
pub struct AllocationService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> AllocationService<S> {
    /// Creates a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consumes the service, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // --- jobs ---

    /// Looks up a job.
    pub fn job(&self, id: JobId) -> Result<Job> {
        self.store.job(id).ok_or(AllocationError::JobNotFound(id))
    }

    /// All jobs, ascending by id.
    pub fn jobs(&self) -> Vec<Job> {
        self.store.jobs()
    }

    /// Jobs starting within one month before to five months after
    /// `reference`. The planning-board read path.
    pub fn jobs_around(&self, reference: DateTime<Utc>) -> Vec<Job> {
        let from = reference - Months::new(1);
        let to = reference + Months::new(5);
        self.store
            .jobs()
            .into_iter()
            .filter(|j| j.interval.start >= from && j.interval.start <= to)
            .collect()
    }

    /// Creates a job.
    ///
    /// Any id on the draft is discarded; the store assigns a fresh
    /// one. Fails with [`AllocationError::Conflict`] if a requested
    /// worker or vehicle is already committed to an overlapping job.
    pub fn create_job(&mut self, draft: Job) -> Result<Job> {
        self.validate_interval(&draft.interval)?;
        self.check_conflicts(&draft, None)?;

        let mut job = draft;
        job.id = self.store.next_job_id();
        self.store.save_job(job.clone());
        info!(job = %job.id, client = %job.client_name, "job created");
        Ok(job)
    }

    /// Updates a job in place.
    ///
    /// Full replacement of every mutable field — partial input is
    /// not merged. The job's own stored state is excluded from the
    /// conflict check so an update never conflicts with itself.
    pub fn update_job(&mut self, job: Job) -> Result<Job> {
        self.job(job.id)?;
        self.validate_interval(&job.interval)?;
        self.check_conflicts(&job, Some(job.id))?;

        self.store.save_job(job.clone());
        info!(job = %job.id, "job updated");
        Ok(job)
    }

    /// Deletes a job.
    pub fn delete_job(&mut self, id: JobId) -> Result<()> {
        self.job(id)?;
        self.store
            .delete_job(id)
            .map_err(dependency_conflict)?;
        info!(job = %id, "job deleted");
        Ok(())
    }

    /// Adds a worker to a job's resource set.
    ///
    /// Runs the same conflict check as create/update before adding.
    /// Adding a worker the job already holds is a no-op.
    pub fn add_worker_to_job(&mut self, job_id: JobId, worker_id: WorkerId) -> Result<Job> {
        self.worker(worker_id)?;
        let job = self.job(job_id)?;
        if job.uses_worker(worker_id) {
            debug!(job = %job_id, worker = %worker_id, "worker already on job");
            return Ok(job);
        }

        let mut updated = job;
        updated.workers.insert(worker_id);
        self.check_conflicts(&updated, Some(job_id))?;

        self.store.save_job(updated.clone());
        info!(job = %job_id, worker = %worker_id, "worker added to job");
        Ok(updated)
    }

    /// Adds a vehicle to a job's resource set.
    ///
    /// Runs the same conflict check as create/update before adding.
    /// Adding a vehicle the job already holds is a no-op.
    pub fn add_vehicle_to_job(&mut self, job_id: JobId, plate: &str) -> Result<Job> {
        self.vehicle(plate)?;
        let job = self.job(job_id)?;
        if job.uses_vehicle(plate) {
            debug!(job = %job_id, vehicle = %plate, "vehicle already on job");
            return Ok(job);
        }

        let mut updated = job;
        updated.vehicles.insert(plate.to_owned());
        self.check_conflicts(&updated, Some(job_id))?;

        self.store.save_job(updated.clone());
        info!(job = %job_id, vehicle = %plate, "vehicle added to job");
        Ok(updated)
    }

    // --- workers ---

    /// Looks up a worker.
    pub fn worker(&self, id: WorkerId) -> Result<Worker> {
        self.store
            .worker(id)
            .ok_or(AllocationError::WorkerNotFound(id))
    }

    /// All workers, ascending by id.
    pub fn workers(&self) -> Vec<Worker> {
        self.store.workers()
    }

    /// Creates a worker. Any id on the draft is discarded.
    pub fn create_worker(&mut self, draft: Worker) -> Worker {
        let mut worker = draft;
        worker.id = self.store.next_worker_id();
        self.store.save_worker(worker.clone());
        info!(worker = %worker.id, "worker created");
        worker
    }

    /// Updates a worker in place (full field replacement).
    pub fn update_worker(&mut self, worker: Worker) -> Result<Worker> {
        self.worker(worker.id)?;
        self.store.save_worker(worker.clone());
        info!(worker = %worker.id, "worker updated");
        Ok(worker)
    }

    /// Deletes a worker, first detaching it from every job that
    /// references it.
    pub fn delete_worker(&mut self, id: WorkerId) -> Result<()> {
        self.worker(id)?;

        for mut job in self.store.jobs() {
            if job.workers.remove(&id) {
                debug!(job = %job.id, worker = %id, "detached worker from job");
                self.store.save_job(job);
            }
        }

        self.store
            .delete_worker(id)
            .map_err(dependency_conflict)?;
        info!(worker = %id, "worker deleted");
        Ok(())
    }

    // --- vehicles ---

    /// Looks up a vehicle by plate.
    pub fn vehicle(&self, plate: &str) -> Result<Vehicle> {
        self.store
            .vehicle(plate)
            .ok_or_else(|| AllocationError::VehicleNotFound(plate.to_owned()))
    }

    /// All vehicles, ascending by plate.
    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.store.vehicles()
    }

    /// Creates (or replaces) a vehicle. The plate is the identity.
    pub fn create_vehicle(&mut self, vehicle: Vehicle) -> Vehicle {
        self.store.save_vehicle(vehicle.clone());
        info!(vehicle = %vehicle.plate, "vehicle created");
        vehicle
    }

    /// Updates a vehicle in place (full field replacement).
    pub fn update_vehicle(&mut self, vehicle: Vehicle) -> Result<Vehicle> {
        self.vehicle(&vehicle.plate)?;
        self.store.save_vehicle(vehicle.clone());
        info!(vehicle = %vehicle.plate, "vehicle updated");
        Ok(vehicle)
    }

    /// Deletes a vehicle, first detaching it from every job that
    /// references it.
    pub fn delete_vehicle(&mut self, plate: &str) -> Result<()> {
        self.vehicle(plate)?;

        for mut job in self.store.jobs() {
            if job.vehicles.remove(plate) {
                debug!(job = %job.id, vehicle = %plate, "detached vehicle from job");
                self.store.save_job(job);
            }
        }

        self.store
            .delete_vehicle(plate)
            .map_err(dependency_conflict)?;
        info!(vehicle = %plate, "vehicle deleted");
        Ok(())
    }

    // --- reporting ---

    /// Active/inactive worker counts.
    pub fn active_inactive_counts(&self) -> WorkforceCounts {
        reporting::workforce_counts(&self.store)
    }

    /// Job counts per calendar month, ascending by month.
    pub fn jobs_per_month(&self) -> Vec<MonthlyJobCount> {
        reporting::jobs_per_month(&self.store)
    }

    // --- internals ---

    fn validate_interval(&self, interval: &TimeInterval) -> Result<()> {
        if !interval.is_valid() {
            return Err(AllocationError::InvalidInterval {
                start: interval.start,
                end: interval.end,
            });
        }
        Ok(())
    }

    fn check_conflicts(&self, candidate: &Job, exclude: Option<JobId>) -> Result<()> {
        let index = JobIntervalIndex::new(self.store.jobs_overlapping(&candidate.interval));
        conflict::check(&index, candidate, exclude).map_err(|err| {
            warn!(%err, "allocation rejected");
            err.into()
        })
    }
}

fn dependency_conflict(err: StoreError) -> AllocationError {
    let StoreError::DependencyViolation { entity } = err;
    AllocationError::DependencyConflict { entity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceId;
    use crate::models::WorkerStatus;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn jan(from_day: u32, to_day: u32) -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2024, 1, from_day, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, to_day, 0, 0, 0).unwrap(),
        )
    }

    fn service() -> AllocationService<MemoryStore> {
        AllocationService::new(MemoryStore::new())
    }

    #[test]
    fn test_create_assigns_fresh_id_and_persists() {
        let mut svc = service();
        // Client-supplied id is discarded.
        let draft = Job::new(999, jan(1, 5)).with_client("Acme");
        let created = svc.create_job(draft.clone()).unwrap();
        assert_ne!(created.id, 999);

        let fetched = svc.job(created.id).unwrap();
        assert_eq!(fetched, created);

        // Equal to the draft except for the assigned id.
        let mut expected = draft;
        expected.id = created.id;
        assert_eq!(fetched, expected);
    }

    #[test]
    fn test_create_rejects_invalid_interval() {
        let mut svc = service();
        let err = svc.create_job(Job::new(0, jan(5, 5))).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidInterval { .. }));
    }

    #[test]
    fn test_create_rejects_double_booked_vehicle() {
        let mut svc = service();
        svc.create_job(Job::new(0, jan(1, 10)).with_vehicle("V1")).unwrap();

        let err = svc
            .create_job(Job::new(0, jan(5, 15)).with_vehicle("V1"))
            .unwrap_err();
        match err {
            AllocationError::Conflict(c) => {
                assert_eq!(c.resource, ResourceId::Vehicle("V1".into()));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(svc.jobs().len(), 1);
    }

    #[test]
    fn test_back_to_back_jobs_share_resources() {
        let mut svc = service();
        svc.create_job(Job::new(0, jan(1, 10)).with_vehicle("V1").with_worker(1))
            .unwrap();
        svc.create_job(Job::new(0, jan(10, 20)).with_vehicle("V1").with_worker(1))
            .unwrap();
        assert_eq!(svc.jobs().len(), 2);
    }

    #[test]
    fn test_update_requires_existing_job() {
        let mut svc = service();
        let err = svc.update_job(Job::new(7, jan(1, 2))).unwrap_err();
        assert!(matches!(err, AllocationError::JobNotFound(7)));
    }

    #[test]
    fn test_update_excludes_own_stored_state() {
        let mut svc = service();
        let j1 = svc
            .create_job(Job::new(0, jan(1, 10)).with_vehicle("V1"))
            .unwrap();

        // Shift by a day while keeping V1: overlaps the old interval,
        // but must not conflict with itself.
        let mut moved = j1.clone();
        moved.interval = jan(2, 11);
        let updated = svc.update_job(moved).unwrap();
        assert_eq!(updated.interval, jan(2, 11));
        assert_eq!(svc.job(j1.id).unwrap().interval, jan(2, 11));
    }

    #[test]
    fn test_update_is_full_replacement() {
        let mut svc = service();
        let j1 = svc
            .create_job(Job::new(0, jan(1, 10)).with_client("Acme").with_region("north"))
            .unwrap();

        let mut replacement = Job::new(j1.id, jan(1, 10)).with_client("Beta");
        replacement = replacement.with_worker(3);
        svc.update_job(replacement.clone()).unwrap();

        let stored = svc.job(j1.id).unwrap();
        assert_eq!(stored, replacement);
        assert_eq!(stored.region, ""); // not merged from the old record
    }

    #[test]
    fn test_update_still_detects_real_conflicts() {
        let mut svc = service();
        svc.create_job(Job::new(0, jan(1, 10)).with_vehicle("V1")).unwrap();
        let j2 = svc
            .create_job(Job::new(0, jan(15, 20)).with_vehicle("V1"))
            .unwrap();

        let mut moved = j2.clone();
        moved.interval = jan(5, 20);
        let err = svc.update_job(moved).unwrap_err();
        assert!(matches!(err, AllocationError::Conflict(_)));
    }

    #[test]
    fn test_deterministic_first_conflict() {
        // J1=[1,10) holds V1, J2=[15,20) holds V2; a job spanning both
        // must report V1 against J1.
        let mut svc = service();
        let j1 = svc
            .create_job(Job::new(0, jan(1, 10)).with_vehicle("V1"))
            .unwrap();
        svc.create_job(Job::new(0, jan(15, 20)).with_vehicle("V2"))
            .unwrap();

        let err = svc
            .create_job(Job::new(0, jan(5, 17)).with_vehicle("V1").with_vehicle("V2"))
            .unwrap_err();
        match err {
            AllocationError::Conflict(c) => {
                assert_eq!(c.resource, ResourceId::Vehicle("V1".into()));
                assert_eq!(c.with_job, j1.id);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_add_worker_checks_conflicts() {
        let mut svc = service();
        svc.create_worker(Worker::new(0, "Ana"));
        let j1 = svc
            .create_job(Job::new(0, jan(1, 10)).with_worker(1))
            .unwrap();
        let j2 = svc.create_job(Job::new(0, jan(5, 15))).unwrap();

        // Worker 1 is on J1 which overlaps J2.
        let err = svc.add_worker_to_job(j2.id, 1).unwrap_err();
        assert!(matches!(err, AllocationError::Conflict(_)));
        assert!(!svc.job(j2.id).unwrap().uses_worker(1));

        // Re-adding to the job that already holds it is a no-op.
        let unchanged = svc.add_worker_to_job(j1.id, 1).unwrap();
        assert_eq!(unchanged.workers.len(), 1);
    }

    #[test]
    fn test_add_vehicle_checks_conflicts_and_existence() {
        let mut svc = service();
        let j1 = svc.create_job(Job::new(0, jan(1, 10))).unwrap();

        let err = svc.add_vehicle_to_job(j1.id, "GHOST").unwrap_err();
        assert!(matches!(err, AllocationError::VehicleNotFound(_)));

        svc.create_vehicle(Vehicle::new("V1"));
        svc.add_vehicle_to_job(j1.id, "V1").unwrap();
        assert!(svc.job(j1.id).unwrap().uses_vehicle("V1"));

        let j2 = svc.create_job(Job::new(0, jan(5, 15))).unwrap();
        let err = svc.add_vehicle_to_job(j2.id, "V1").unwrap_err();
        assert!(matches!(err, AllocationError::Conflict(_)));
    }

    #[test]
    fn test_delete_vehicle_cascades_detachment() {
        let mut svc = service();
        svc.create_vehicle(Vehicle::new("V1"));
        let j1 = svc
            .create_job(Job::new(0, jan(1, 10)).with_vehicle("V1"))
            .unwrap();
        let j4 = svc
            .create_job(Job::new(0, jan(20, 25)).with_vehicle("V1"))
            .unwrap();

        svc.delete_vehicle("V1").unwrap();

        assert!(!svc.job(j1.id).unwrap().uses_vehicle("V1"));
        assert!(!svc.job(j4.id).unwrap().uses_vehicle("V1"));
        assert!(matches!(
            svc.vehicle("V1").unwrap_err(),
            AllocationError::VehicleNotFound(_)
        ));
    }

    #[test]
    fn test_delete_worker_cascades_detachment() {
        let mut svc = service();
        let w = svc.create_worker(Worker::new(0, "Ana"));
        let j1 = svc
            .create_job(Job::new(0, jan(1, 10)).with_worker(w.id))
            .unwrap();

        svc.delete_worker(w.id).unwrap();
        assert!(!svc.job(j1.id).unwrap().uses_worker(w.id));
        assert!(matches!(
            svc.worker(w.id).unwrap_err(),
            AllocationError::WorkerNotFound(_)
        ));
    }

    #[test]
    fn test_invariant_holds_after_mixed_operations() {
        let mut svc = service();
        let drafts = vec![
            Job::new(0, jan(1, 10)).with_vehicle("V1").with_worker(1),
            Job::new(0, jan(5, 15)).with_vehicle("V1"),  // rejected
            Job::new(0, jan(10, 20)).with_vehicle("V1"), // touching, ok
            Job::new(0, jan(3, 8)).with_worker(1),       // rejected
            Job::new(0, jan(12, 18)).with_worker(1),     // ok
        ];
        for draft in drafts {
            let _ = svc.create_job(draft);
        }

        let jobs = svc.jobs();
        assert_eq!(jobs.len(), 3);
        for a in &jobs {
            for b in &jobs {
                if a.id < b.id && a.interval.overlaps(&b.interval) {
                    assert!(a.workers.is_disjoint(&b.workers));
                    assert!(a.vehicles.is_disjoint(&b.vehicles));
                }
            }
        }
    }

    #[test]
    fn test_worker_crud() {
        let mut svc = service();
        let w = svc.create_worker(Worker::new(42, "Ana").with_role("driver"));
        assert_ne!(w.id, 42); // draft id discarded

        let mut renamed = w.clone();
        renamed.name = "Ana Souza".into();
        svc.update_worker(renamed.clone()).unwrap();
        assert_eq!(svc.worker(w.id).unwrap(), renamed);

        let err = svc.update_worker(Worker::new(999, "ghost")).unwrap_err();
        assert!(matches!(err, AllocationError::WorkerNotFound(999)));
    }

    #[test]
    fn test_reporting_delegates() {
        let mut svc = service();
        svc.create_worker(Worker::new(0, "A"));
        svc.create_worker(Worker::new(0, "B").with_status(WorkerStatus::Inactive));
        svc.create_job(Job::new(0, jan(1, 5))).unwrap();
        svc.create_job(Job::new(0, jan(10, 15))).unwrap();

        let counts = svc.active_inactive_counts();
        assert_eq!((counts.active, counts.inactive), (1, 1));

        let months = svc.jobs_per_month();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, "2024-01");
        assert_eq!(months[0].count, 2);
    }

    #[test]
    fn test_jobs_around_window() {
        let mut svc = service();
        let j = |m: u32| {
            Job::new(
                0,
                TimeInterval::new(
                    Utc.with_ymd_and_hms(2024, m, 10, 0, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2024, m, 12, 0, 0, 0).unwrap(),
                ),
            )
        };
        for m in [1, 3, 5, 9, 11] {
            svc.create_job(j(m)).unwrap();
        }

        // Window around Apr 1: [Mar 1, Sep 1].
        let reference = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let months: Vec<u32> = svc
            .jobs_around(reference)
            .iter()
            .map(|job| job.interval.start.format("%m").to_string().parse().unwrap())
            .collect();
        assert_eq!(months, vec![3, 5]);
    }

    #[test]
    fn test_dependency_conflict_surfaced_on_refused_delete() {
        // A store with an unremovable constraint: delete_worker always
        // refuses, even after the cascade detached everything.
        struct ConstrainedStore {
            inner: MemoryStore,
        }

        impl RecordStore for ConstrainedStore {
            fn worker(&self, id: WorkerId) -> Option<Worker> {
                self.inner.worker(id)
            }
            fn workers(&self) -> Vec<Worker> {
                self.inner.workers()
            }
            fn save_worker(&mut self, worker: Worker) {
                self.inner.save_worker(worker)
            }
            fn delete_worker(&mut self, id: WorkerId) -> std::result::Result<(), StoreError> {
                Err(StoreError::DependencyViolation {
                    entity: format!("worker {id}"),
                })
            }
            fn next_worker_id(&mut self) -> WorkerId {
                self.inner.next_worker_id()
            }
            fn vehicle(&self, plate: &str) -> Option<Vehicle> {
                self.inner.vehicle(plate)
            }
            fn vehicles(&self) -> Vec<Vehicle> {
                self.inner.vehicles()
            }
            fn save_vehicle(&mut self, vehicle: Vehicle) {
                self.inner.save_vehicle(vehicle)
            }
            fn delete_vehicle(&mut self, plate: &str) -> std::result::Result<(), StoreError> {
                self.inner.delete_vehicle(plate)
            }
            fn job(&self, id: JobId) -> Option<Job> {
                self.inner.job(id)
            }
            fn jobs(&self) -> Vec<Job> {
                self.inner.jobs()
            }
            fn save_job(&mut self, job: Job) {
                self.inner.save_job(job)
            }
            fn delete_job(&mut self, id: JobId) -> std::result::Result<(), StoreError> {
                self.inner.delete_job(id)
            }
            fn next_job_id(&mut self) -> JobId {
                self.inner.next_job_id()
            }
        }

        let mut svc = AllocationService::new(ConstrainedStore {
            inner: MemoryStore::new(),
        });
        let w = svc.create_worker(Worker::new(0, "Ana"));

        let err = svc.delete_worker(w.id).unwrap_err();
        assert!(matches!(err, AllocationError::DependencyConflict { .. }));
    }
}
