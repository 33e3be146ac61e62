use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lot::LotId;
use crate::utils::round_to;

/// An active reservation of one slot for one plate.
///
/// Lives from a successful `assign` until the matching `release`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub lot_id: LotId,
    pub lot_name: String,
    /// Human readable slot label, e.g. `1-C5`.
    pub assigned_slot: String,
    pub distance_km: f64,
    /// Hourly rate of the lot when the slot was reserved.
    pub price_per_hour: f64,
    pub estimated_cost: f64,
    /// Planned stay.
    pub duration_minutes: u32,
    /// Reported quality of the assignment, 0 to 100.
    pub confidence_score: f64,
    pub token: String,
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    /// Duration as `"2h 15m"`, or `"45m"` below one hour.
    pub fn duration_label(&self) -> String {
        minutes_label(self.duration_minutes)
    }
}

/// Bill for a finished stay, priced on the time actually spent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub token: String,
    pub lot_id: LotId,
    pub lot_name: String,
    pub assigned_slot: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    /// Actual stay, rounded to the nearest minute.
    pub duration_minutes: u32,
    pub amount_paid: f64,
}

impl Receipt {
    /// Closes `assignment` at `exit`. An exit before entry bills nothing.
    pub fn settle(assignment: &Assignment, exit: DateTime<Utc>) -> Self {
        let seconds = (exit - assignment.assigned_at).num_seconds().max(0) as f64;
        Self {
            token: assignment.token.clone(),
            lot_id: assignment.lot_id,
            lot_name: assignment.lot_name.clone(),
            assigned_slot: assignment.assigned_slot.clone(),
            entry_time: assignment.assigned_at,
            exit_time: exit,
            duration_minutes: (seconds / 60.0).round() as u32,
            amount_paid: round_to(assignment.price_per_hour * seconds / 3600.0, 2),
        }
    }

    pub fn duration_label(&self) -> String {
        minutes_label(self.duration_minutes)
    }
}

fn minutes_label(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
