use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use super::lot::{Lot, LotId, TrafficLevel};

/// Read-only view of a lot handed to the ranker for a single call.
///
/// `availability_probability` comes from outside (a predictor, a feed, or
/// the plain free-slot ratio) and is used as the availability score as is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSpot {
    pub id: LotId,
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinates,
    pub availability_probability: f64,
    pub traffic_level: TrafficLevel,
    pub price_per_hour: f64,
    pub total_slots: u32,
    pub available_slots: u32,
}

impl From<&Lot> for CandidateSpot {
    /// Falls back to the free-slot ratio as availability probability.
    fn from(lot: &Lot) -> Self {
        let availability_probability = if lot.total_slots == 0 {
            0.0
        } else {
            lot.available_slots as f64 / lot.total_slots as f64
        };
        Self {
            id: lot.id,
            name: lot.name.clone(),
            location: lot.location,
            availability_probability,
            traffic_level: lot.traffic_level,
            price_per_hour: lot.price_per_hour,
            total_slots: lot.total_slots,
            available_slots: lot.available_slots,
        }
    }
}

/// Per-component scores of a ranked spot, each rounded to 3 decimals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub availability: f64,
    pub distance: f64,
    pub traffic: f64,
    pub price: f64,
    #[serde(rename = "final")]
    pub final_score: f64,
}

/// One entry of a ranking, carrying the raw metrics next to the scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub spot_id: LotId,
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinates,
    pub availability_probability: f64,
    pub distance_km: f64,
    pub traffic_level: TrafficLevel,
    pub price_per_hour: f64,
    pub available_slots: u32,
    pub total_slots: u32,
    /// Availability probability as a percentage.
    pub confidence: f64,
    pub scores: ScoreBreakdown,
}
