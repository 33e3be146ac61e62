//! # Recommendation Ranker
//!
//! Ranks a snapshot of candidate spots for a user location. Nothing is
//! reserved or mutated; recommendations are advisory and may be slightly stale.
//!
//! Ordering: final score descending, then distance ascending, then spot id
//! ascending. Scores are compared after rounding, so the order always agrees
//! with the numbers a user sees.

use std::cmp::Ordering;

use parkr_common::config::{ConfigError, RankerConfig};
use parkr_common::geo::Coordinates;
use parkr_common::parking::spot::{CandidateSpot, Recommendation, ScoreBreakdown};
use parkr_common::utils::{clamp_unit, round_to};
use rayon::prelude::*;
use tracing::debug;

use crate::registry::LotRegistry;
use crate::scoring::{self, ComponentScores, PriceRange};

pub struct RecommendationRanker {
    config: RankerConfig,
}

impl RecommendationRanker {
    pub fn new(config: RankerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Scores every spot within reach of `user` and returns them best first.
    ///
    /// The price range is taken over the whole candidate set, including spots
    /// that end up excluded for distance.
    pub fn rank(&self, spots: &[CandidateSpot], user: Coordinates) -> Vec<Recommendation> {
        let price_range = PriceRange::from_prices(spots.iter().map(|s| s.price_per_hour));

        let mut recommendations: Vec<Recommendation> = spots
            .par_iter()
            .filter_map(|spot| self.score_spot(spot, user, price_range.as_ref()))
            .collect();

        recommendations.sort_by(compare_recommendations);
        debug!(
            "Ranked {} of {} candidate spots",
            recommendations.len(),
            spots.len()
        );
        recommendations
    }

    /// Ranks the current contents of a registry.
    ///
    /// Without an external prediction, the free-slot ratio stands in for the
    /// availability probability.
    pub fn rank_registry(&self, registry: &LotRegistry, user: Coordinates) -> Vec<Recommendation> {
        let spots: Vec<CandidateSpot> = registry.snapshot().iter().map(CandidateSpot::from).collect();
        self.rank(&spots, user)
    }

    fn score_spot(
        &self,
        spot: &CandidateSpot,
        user: Coordinates,
        price_range: Option<&PriceRange>,
    ) -> Option<Recommendation> {
        let distance = user.distance_km(&spot.location);
        if distance > self.config.max_distance_km {
            return None;
        }

        let components = ComponentScores {
            availability: clamp_unit(spot.availability_probability),
            distance: scoring::distance_score(distance, self.config.max_distance_km),
            traffic: scoring::recommendation_traffic_score(spot.traffic_level),
            price: scoring::relative_price_score(spot.price_per_hour, price_range),
        };
        let final_score = components.composite(&self.config.weights);

        Some(Recommendation {
            spot_id: spot.id,
            name: spot.name.clone(),
            location: spot.location,
            availability_probability: spot.availability_probability,
            distance_km: round_to(distance, 2),
            traffic_level: spot.traffic_level,
            price_per_hour: spot.price_per_hour,
            available_slots: spot.available_slots,
            total_slots: spot.total_slots,
            confidence: round_to(spot.availability_probability * 100.0, 1),
            scores: ScoreBreakdown {
                availability: round_to(components.availability, 3),
                distance: round_to(components.distance, 3),
                traffic: round_to(components.traffic, 3),
                price: round_to(components.price, 3),
                final_score: round_to(final_score, 3),
            },
        })
    }
}

fn compare_recommendations(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.scores
        .final_score
        .total_cmp(&a.scores.final_score)
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.spot_id.cmp(&b.spot_id))
}
