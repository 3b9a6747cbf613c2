//! Allocation domain models.
//!
//! Core data types for the logistics operation: jobs (time-bounded
//! units of work), the workers and vehicles they consume, and the
//! half-open time intervals they occupy.
//!
//! Jobs reference resources by identifier only. Resolving a
//! `WorkerId` or plate back to its record goes through the store;
//! there is no object graph between jobs and resources.

mod interval;
mod job;
mod vehicle;
mod worker;

pub use interval::TimeInterval;
pub use job::{Job, JobId};
pub use vehicle::{Vehicle, VehicleStatus};
pub use worker::{Worker, WorkerId, WorkerStatus};
