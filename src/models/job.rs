//! Job model.
//!
//! A job is a time-bounded unit of work (a haul, a move, a delivery
//! run) that consumes a set of workers and a set of vehicles for its
//! whole interval. Jobs reference resources by identifier; they do
//! not own worker or vehicle lifecycles.
//!
//! Resource references are `BTreeSet`s: membership is a set property
//! (no duplicates) and iteration order is deterministic, which the
//! conflict detector relies on for stable conflict reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{TimeInterval, WorkerId};

/// Surrogate job identifier, assigned by the record store on create.
pub type JobId = u64;

/// A time-bounded unit of work consuming workers and vehicles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    /// Unique job identifier. Ignored on create (the store assigns one).
    pub id: JobId,
    /// Client the job is performed for.
    pub client_name: String,
    /// Pickup address.
    pub origin_address: String,
    /// Drop-off address.
    pub delivery_address: String,
    /// Occupied interval [start, end).
    pub interval: TimeInterval,
    /// Agreed price.
    pub price: f64,
    /// Operating region.
    pub region: String,
    /// Free-form description.
    pub description: String,
    /// Workers allocated to this job.
    pub workers: BTreeSet<WorkerId>,
    /// Vehicles allocated to this job, by plate.
    pub vehicles: BTreeSet<String>,
}

impl Job {
    /// Creates a new job with the given id and interval.
    pub fn new(id: JobId, interval: TimeInterval) -> Self {
        Self {
            id,
            client_name: String::new(),
            origin_address: String::new(),
            delivery_address: String::new(),
            interval,
            price: 0.0,
            region: String::new(),
            description: String::new(),
            workers: BTreeSet::new(),
            vehicles: BTreeSet::new(),
        }
    }

    /// Sets the client name.
    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    /// Sets the pickup address.
    pub fn with_origin(mut self, address: impl Into<String>) -> Self {
        self.origin_address = address.into();
        self
    }

    /// Sets the drop-off address.
    pub fn with_delivery(mut self, address: impl Into<String>) -> Self {
        self.delivery_address = address.into();
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the operating region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a worker reference.
    pub fn with_worker(mut self, worker_id: WorkerId) -> Self {
        self.workers.insert(worker_id);
        self
    }

    /// Adds a vehicle reference.
    pub fn with_vehicle(mut self, plate: impl Into<String>) -> Self {
        self.vehicles.insert(plate.into());
        self
    }

    /// Whether this job references the given worker.
    #[inline]
    pub fn uses_worker(&self, worker_id: WorkerId) -> bool {
        self.workers.contains(&worker_id)
    }

    /// Whether this job references the given vehicle.
    #[inline]
    pub fn uses_vehicle(&self, plate: &str) -> bool {
        self.vehicles.contains(plate)
    }
}
