//! Worker model.
//!
//! Workers are the human resources jobs draw on: drivers, loaders,
//! crew leads. Each worker has a surrogate id, an employment status,
//! and administrative fields the scheduler passes through untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Surrogate worker identifier, assigned by the record store.
pub type WorkerId = u64;

/// A worker that can be allocated to jobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: WorkerId,
    /// Full name.
    pub name: String,
    /// National identity number.
    pub national_id: String,
    /// Role within the operation (e.g. "driver", "loader").
    pub role: String,
    /// Driving-licence class, if any.
    pub license_class: String,
    /// Date of hire.
    pub hired_at: Option<NaiveDate>,
    /// Employment status.
    pub status: WorkerStatus,
    /// Free-form notes.
    pub notes: String,
}

/// Worker employment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorkerStatus {
    /// Available for allocation.
    #[default]
    Active,
    /// Not currently available (leave, suspension, termination).
    Inactive,
    /// Domain-specific status.
    Custom(String),
}

impl Worker {
    /// Creates a new active worker.
    pub fn new(id: WorkerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            national_id: String::new(),
            role: String::new(),
            license_class: String::new(),
            hired_at: None,
            status: WorkerStatus::Active,
            notes: String::new(),
        }
    }

    /// Sets the national identity number.
    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = national_id.into();
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the driving-licence class.
    pub fn with_license_class(mut self, class: impl Into<String>) -> Self {
        self.license_class = class.into();
        self
    }

    /// Sets the hire date.
    pub fn with_hired_at(mut self, date: NaiveDate) -> Self {
        self.hired_at = Some(date);
        self
    }

    /// Sets the employment status.
    pub fn with_status(mut self, status: WorkerStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
