//! # Outbound Ports
//!
//! Contracts for the collaborators the core talks to but does not implement.
//!
//! ## Rules
//! 1. Everything here is a trait or a plain value crossing the boundary.
//! 2. Implementations live in `parkr-plugins` or in the embedding application.
//! 3. Every call may fail; the core decides how a failure degrades.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parkr_common::parking::assignment::{Assignment, Receipt};
use serde::{Deserialize, Serialize};

/// Inputs to a confidence predictor, in their fixed wire order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub distance_km: f64,
    /// Occupied fraction of the lot, 0 to 1.
    pub occupancy_rate: f64,
    pub price_per_hour: f64,
    /// Traffic level encoded 1 (very low) to 5 (very high).
    pub traffic_numeric: f64,
    pub rating: f64,
    pub duration_minutes: f64,
}

impl FeatureVector {
    pub const LEN: usize = 6;

    /// `[distance_km, occupancy_rate, price_per_hour, traffic_numeric, rating, duration_minutes]`
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.distance_km,
            self.occupancy_rate,
            self.price_per_hour,
            self.traffic_numeric,
            self.rating,
            self.duration_minutes,
        ]
    }
}

/// Scores how likely an assignment is to succeed.
#[async_trait]
pub trait ConfidencePredictor: Send + Sync {
    /// Probability of the positive class, expected within `[0, 1]`.
    async fn predict(&self, features: &FeatureVector) -> anyhow::Result<f64>;
}

/// Tells the driver about their slot.
pub trait Notifier: Send + Sync {
    fn notify_assigned(&self, plate: &str, assignment: &Assignment) -> anyhow::Result<()>;
    fn notify_released(&self, plate: &str, receipt: &Receipt) -> anyhow::Result<()>;
}

/// Produces the physical (or virtual) parking ticket and exit receipt.
pub trait TicketPrinter: Send + Sync {
    fn print_ticket(&self, plate: &str, assignment: &Assignment) -> anyhow::Result<()>;
    fn print_receipt(&self, plate: &str, receipt: &Receipt) -> anyhow::Result<()>;
}

/// Something that happened to a booking, as handed to persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingEvent {
    Assigned {
        plate: String,
        assignment: Assignment,
        at: DateTime<Utc>,
    },
    Released {
        plate: String,
        assignment: Assignment,
        receipt: Receipt,
        at: DateTime<Utc>,
    },
}

impl BookingEvent {
    pub fn plate(&self) -> &str {
        match self {
            BookingEvent::Assigned { plate, .. } | BookingEvent::Released { plate, .. } => plate,
        }
    }

    pub fn assignment(&self) -> &Assignment {
        match self {
            BookingEvent::Assigned { assignment, .. }
            | BookingEvent::Released { assignment, .. } => assignment,
        }
    }
}

/// Booking history persistence.
pub trait AssignmentStore: Send + Sync {
    fn record(&self, event: BookingEvent) -> anyhow::Result<()>;
}
