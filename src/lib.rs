//! Resource-allocation core for logistics operations.
//!
//! Manages workers, vehicles, and time-bounded jobs that each consume
//! a subset of both for a contiguous interval. The crate's job is the
//! allocation logic: deciding whether a requested worker or vehicle is
//! already committed to an overlapping job, and rejecting the request
//! with enough detail to resolve the double-booking.
//!
//! Persistence, transport, and UI are out of scope: the core consumes
//! a [`store::RecordStore`] (an in-memory implementation ships for
//! tests and embedding) and emits plain aggregate types for whatever
//! presentation layer sits above it.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `Worker`, `Vehicle`, `TimeInterval`
//! - **`store`**: Record store boundary and the in-memory reference store
//! - **`index`**: Interval-overlap queries over the job set
//! - **`conflict`**: The double-booking detector
//! - **`allocation`**: Orchestration — CRUD, checked adds, cascade detach
//! - **`reporting`**: Workforce counts and per-month job volume
//! - **`error`**: The caller-facing error taxonomy
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use fleetsched::allocation::AllocationService;
//! use fleetsched::models::{Job, TimeInterval, Vehicle};
//! use fleetsched::store::MemoryStore;
//!
//! let mut service = AllocationService::new(MemoryStore::new());
//! service.create_vehicle(Vehicle::new("ABC-1234"));
//!
//! let interval = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap(),
//! );
//! let job = service
//!     .create_job(Job::new(0, interval).with_client("Acme").with_vehicle("ABC-1234"))
//!     .unwrap();
//!
//! // Same vehicle, overlapping interval: rejected.
//! let overlapping = TimeInterval::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap(),
//! );
//! assert!(service
//!     .create_job(Job::new(0, overlapping).with_vehicle("ABC-1234"))
//!     .is_err());
//! assert_eq!(service.job(job.id).unwrap().client_name, "Acme");
//! ```

pub mod allocation;
pub mod conflict;
pub mod error;
pub mod index;
pub mod models;
pub mod reporting;
pub mod store;

pub use allocation::AllocationService;
pub use error::{AllocationError, ConflictError, ResourceId};
pub use index::JobIntervalIndex;
pub use models::{Job, JobId, TimeInterval, Vehicle, Worker, WorkerId};
pub use store::{MemoryStore, RecordStore};
