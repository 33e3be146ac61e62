//! # Scoring Model
//!
//! Pure functions turning lot properties into normalized `[0, 1]` scores and a
//! weighted composite.
//!
//! The assignment engine and the recommendation ranker share the shape of the
//! model but not every table: traffic and price are scored differently for
//! each, so both variants live here side by side.

use parkr_common::config::Weights;
use parkr_common::parking::lot::{Lot, TrafficLevel};
use parkr_common::utils::clamp_unit;

/// Score for a category missing from a traffic table.
pub const UNKNOWN_TRAFFIC_SCORE: f64 = 0.5;

/// Score when the candidate price range is empty or flat.
pub const NEUTRAL_PRICE_SCORE: f64 = 0.5;

/// The four normalized inputs to a composite score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentScores {
    pub availability: f64,
    pub distance: f64,
    pub traffic: f64,
    pub price: f64,
}

impl ComponentScores {
    /// Clamps every component into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            availability: clamp_unit(self.availability),
            distance: clamp_unit(self.distance),
            traffic: clamp_unit(self.traffic),
            price: clamp_unit(self.price),
        }
    }

    /// Weighted sum of the clamped components.
    pub fn composite(&self, weights: &Weights) -> f64 {
        let s = self.clamped();
        weights.availability * s.availability
            + weights.distance * s.distance
            + weights.traffic * s.traffic
            + weights.price * s.price
    }
}

/// Free slots over total slots, `0` for a lot with no slots at all.
pub fn availability_score(lot: &Lot) -> f64 {
    if lot.total_slots == 0 {
        return 0.0;
    }
    clamp_unit(lot.available_slots as f64 / lot.total_slots as f64)
}

/// `1` at the doorstep, falling linearly to `0` at `max_distance_km`.
pub fn distance_score(distance_km: f64, max_distance_km: f64) -> f64 {
    if max_distance_km <= 0.0 {
        return 0.0;
    }
    clamp_unit(1.0 - distance_km / max_distance_km)
}

/// Traffic table used when assigning vehicles.
pub fn assignment_traffic_score(level: TrafficLevel) -> f64 {
    match level {
        TrafficLevel::VeryLow => 1.0,
        TrafficLevel::Low => 0.9,
        TrafficLevel::Medium => 0.6,
        TrafficLevel::High => 0.3,
        TrafficLevel::VeryHigh => 0.1,
        TrafficLevel::Unknown => UNKNOWN_TRAFFIC_SCORE,
    }
}

/// Traffic table used when ranking recommendations. Only three levels are known.
pub fn recommendation_traffic_score(level: TrafficLevel) -> f64 {
    match level {
        TrafficLevel::Low => 1.0,
        TrafficLevel::Medium => 0.6,
        TrafficLevel::High => 0.2,
        _ => UNKNOWN_TRAFFIC_SCORE,
    }
}

/// Price against a fixed hourly reference: free is `1`, `reference` or more is `0`.
pub fn reference_price_score(price_per_hour: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        return 0.0;
    }
    clamp_unit(1.0 - price_per_hour / reference)
}

/// Min/max of the prices in one candidate set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Range over the positive, finite prices. `None` when there are none.
    pub fn from_prices<I>(prices: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        prices
            .into_iter()
            .filter(|p| p.is_finite() && *p > 0.0)
            .fold(None, |range: Option<PriceRange>, p| {
                Some(match range {
                    None => PriceRange { min: p, max: p },
                    Some(r) => PriceRange {
                        min: r.min.min(p),
                        max: r.max.max(p),
                    },
                })
            })
    }

    /// Cheapest in the range scores `1`, most expensive `0`.
    pub fn score(&self, price_per_hour: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return NEUTRAL_PRICE_SCORE;
        }
        1.0 - clamp_unit((price_per_hour - self.min) / span)
    }
}

/// Relative price score, neutral when no range could be built.
pub fn relative_price_score(price_per_hour: f64, range: Option<&PriceRange>) -> f64 {
    range.map_or(NEUTRAL_PRICE_SCORE, |r| r.score(price_per_hour))
}
