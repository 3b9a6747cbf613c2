//! Vehicle model.
//!
//! Vehicles are identified by their licence plate — a natural key,
//! not a surrogate id. The plate is how jobs reference them.

use serde::{Deserialize, Serialize};

/// A vehicle that can be allocated to jobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    /// Licence plate (natural key).
    pub plate: String,
    /// Vehicle model (e.g. "Volvo FH 540").
    pub model: String,
    /// Classification (e.g. "truck", "van").
    pub vehicle_type: String,
    /// Operational status.
    pub status: VehicleStatus,
    /// Free-form notes.
    pub notes: String,
}

/// Vehicle operational status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VehicleStatus {
    /// Ready for allocation.
    #[default]
    Available,
    /// Out of service (maintenance, sold, impounded).
    Unavailable,
    /// Domain-specific status.
    Custom(String),
}

impl Vehicle {
    /// Creates a new available vehicle.
    pub fn new(plate: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            model: String::new(),
            vehicle_type: String::new(),
            status: VehicleStatus::Available,
            notes: String::new(),
        }
    }

    /// Sets the vehicle model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the classification.
    pub fn with_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = vehicle_type.into();
        self
    }

    /// Sets the operational status.
    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
