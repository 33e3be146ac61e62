use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::utils::round_to;

pub type LotId = u32;

/// Ordered estimate of the congestion around a lot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrafficLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    /// A category the feed sent that we do not recognise.
    Unknown,
}

impl TrafficLevel {
    /// Numeric encoding fed to confidence predictors, `1` (very low) to `5` (very high).
    pub fn numeric(&self) -> u8 {
        match self {
            TrafficLevel::VeryLow => 1,
            TrafficLevel::Low => 2,
            TrafficLevel::Medium => 3,
            TrafficLevel::High => 4,
            TrafficLevel::VeryHigh => 5,
            TrafficLevel::Unknown => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLevel::VeryLow => "Very Low",
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
            TrafficLevel::VeryHigh => "Very High",
            TrafficLevel::Unknown => "Unknown",
        }
    }
}

impl FromStr for TrafficLevel {
    type Err = std::convert::Infallible;

    /// Case-insensitive; spaces, dashes and underscores are ignored, so
    /// "Very Low", "very_low" and "VeryLow" all parse the same.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        Ok(match key.as_str() {
            "verylow" => TrafficLevel::VeryLow,
            "low" => TrafficLevel::Low,
            "medium" => TrafficLevel::Medium,
            "high" => TrafficLevel::High,
            "veryhigh" => TrafficLevel::VeryHigh,
            _ => TrafficLevel::Unknown,
        })
    }
}

impl From<String> for TrafficLevel {
    fn from(s: String) -> Self {
        match s.parse::<TrafficLevel>() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }
}

impl From<TrafficLevel> for String {
    fn from(level: TrafficLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parking facility and its live occupancy.
///
/// `available_slots <= total_slots` is a standing invariant. Once registered,
/// a lot is owned by the engine's registry and only changes through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinates,
    pub available_slots: u32,
    pub total_slots: u32,
    pub price_per_hour: f64,
    pub traffic_level: TrafficLevel,
    /// User rating, 0 to 5.
    pub rating: f64,
}

impl Lot {
    pub fn occupied_slots(&self) -> u32 {
        self.total_slots.saturating_sub(self.available_slots)
    }

    pub fn has_capacity(&self) -> bool {
        self.available_slots > 0
    }

    /// Fraction of occupied slots, `0` for a lot without capacity.
    pub fn occupancy_fraction(&self) -> f64 {
        if self.total_slots == 0 {
            return 0.0;
        }
        self.occupied_slots() as f64 / self.total_slots as f64
    }

    /// Takes one slot. Returns `false` when the lot is already full.
    pub fn reserve_slot(&mut self) -> bool {
        if self.available_slots == 0 {
            return false;
        }
        self.available_slots -= 1;
        true
    }

    /// Gives one slot back. Returns `false` when the lot is already empty.
    pub fn release_slot(&mut self) -> bool {
        if self.available_slots >= self.total_slots {
            return false;
        }
        self.available_slots += 1;
        true
    }

    pub fn status(&self) -> LotStatus {
        LotStatus {
            lot_id: self.id,
            name: self.name.clone(),
            available_slots: self.available_slots,
            total_slots: self.total_slots,
            occupancy_rate: round_to(self.occupancy_fraction() * 100.0, 1),
            price_per_hour: self.price_per_hour,
            traffic_level: self.traffic_level,
            rating: self.rating,
        }
    }
}

/// Point-in-time view of a lot, with occupancy as a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LotStatus {
    pub lot_id: LotId,
    pub name: String,
    pub available_slots: u32,
    pub total_slots: u32,
    pub occupancy_rate: f64,
    pub price_per_hour: f64,
    pub traffic_level: TrafficLevel,
    pub rating: f64,
}
