//! # Assignment Engine
//!
//! Picks the best lot for an arriving vehicle and reserves a slot in it.
//!
//! **Locking:** the assignment map and the lot registry are always taken in
//! that order. Selecting a lot and decrementing its free slots happen under
//! both guards, so two callers can never win the same last slot. `release`
//! follows the same order. The confidence predictor is only consulted after
//! the reservation, outside any lock, and bounded by a timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, Utc};
use parking_lot::Mutex;
use parkr_common::config::{ConfigError, EngineConfig};
use parkr_common::parking::assignment::Assignment;
use parkr_common::parking::lot::{Lot, LotId, LotStatus, TrafficLevel};
use parkr_common::parking::vehicle::{Vehicle, normalize_plate};
use parkr_common::utils::{clamp_unit, round_to};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::{ConfidencePredictor, FeatureVector};
use crate::registry::LotRegistry;
use crate::scoring::{self, ComponentScores};

mod labels;

pub use labels::{TOKEN_PREFIX, slot_label, token};

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("plate '{0}' contains no usable characters")]
    InvalidPlate(String),
    #[error("plate {plate} already holds slot {slot} (token {token})")]
    AlreadyAssigned {
        plate: String,
        slot: String,
        token: String,
    },
}

/// Result of the locked part of `assign`.
struct Reservation {
    id: u64,
    assignment: Assignment,
    base_score: f64,
    features: FeatureVector,
}

/// An assignment plus the id of the reservation that created it.
///
/// Tokens can repeat once their holder is gone; reservation ids never do.
struct Active {
    reservation: u64,
    assignment: Assignment,
}

pub struct AssignmentEngine {
    config: EngineConfig,
    registry: LotRegistry,
    assignments: Mutex<HashMap<String, Active>>,
    next_reservation: AtomicU64,
    predictor: Option<Arc<dyn ConfidencePredictor>>,
}

impl AssignmentEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: LotRegistry::new(),
            assignments: Mutex::new(HashMap::new()),
            next_reservation: AtomicU64::new(1),
            predictor: None,
        })
    }

    /// Attaches a confidence predictor used by `assign` when asked to.
    pub fn with_predictor(mut self, predictor: Arc<dyn ConfidencePredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &LotRegistry {
        &self.registry
    }

    pub fn register_lot(&self, lot: Lot) {
        self.registry.register(lot);
    }

    pub fn update_availability(&self, lot_id: LotId, available: u32, total: u32) {
        self.registry.update_availability(lot_id, available, total);
    }

    pub fn update_traffic(&self, lot_id: LotId, level: TrafficLevel) {
        self.registry.update_traffic(lot_id, level);
    }

    /// Composite score of `lot` for `vehicle`, in `[0, 1]`.
    pub fn score_lot(&self, lot: &Lot, vehicle: &Vehicle) -> f64 {
        let distance = vehicle.location.distance_km(&lot.location);
        ComponentScores {
            availability: scoring::availability_score(lot),
            distance: scoring::distance_score(distance, self.config.max_distance_km),
            traffic: scoring::assignment_traffic_score(lot.traffic_level),
            price: scoring::reference_price_score(lot.price_per_hour, self.config.reference_price),
        }
        .composite(&self.config.weights)
    }

    /// The `n` best lots with free capacity, best first.
    pub fn top_candidates(&self, vehicle: &Vehicle, n: usize) -> Vec<(Lot, f64)> {
        let lots = self.registry.snapshot();
        self.rank_lots(lots.iter(), vehicle, n)
            .into_iter()
            .map(|(lot, score)| (lot.clone(), score))
            .collect()
    }

    /// Assigns `plate` to the best-scoring lot and reserves one slot in it.
    ///
    /// `Ok(None)` means no lot has free capacity. A plate that already holds
    /// an assignment is rejected; release it first.
    pub async fn assign(
        &self,
        plate: &str,
        vehicle: &Vehicle,
        duration_minutes: u32,
        use_confidence: bool,
    ) -> Result<Option<Assignment>, EngineError> {
        let normalized = normalize_plate(plate);
        if normalized.is_empty() {
            return Err(EngineError::InvalidPlate(plate.to_string()));
        }

        let Some(reservation) = self.reserve(&normalized, vehicle, duration_minutes)? else {
            warn!("No available parking lots for vehicle {normalized}");
            return Ok(None);
        };

        let mut assignment = reservation.assignment;
        if use_confidence {
            if let Some(predictor) = &self.predictor {
                let confidence = self
                    .predict_confidence(predictor.as_ref(), &reservation.features, reservation.base_score)
                    .await;
                assignment.confidence_score = confidence;
                self.update_confidence(&normalized, reservation.id, confidence);
            }
        }

        info!(
            "Assigned {normalized} to {}, Slot: {}, Token: {}",
            assignment.lot_name, assignment.assigned_slot, assignment.token
        );
        Ok(Some(assignment))
    }

    /// Releases the assignment held by `plate`. `false` if there is none.
    pub fn release(&self, plate: &str) -> bool {
        self.release_assignment(plate).is_some()
    }

    /// Like [`release`](Self::release), but hands back the finished assignment.
    pub fn release_assignment(&self, plate: &str) -> Option<Assignment> {
        let plate = normalize_plate(plate);
        let mut assignments = self.assignments.lock();
        let Some(Active { assignment, .. }) = assignments.remove(&plate) else {
            warn!("No assignment found for {plate}");
            return None;
        };

        let mut lots = self.registry.write();
        match lots.get_mut(&assignment.lot_id) {
            Some(lot) => {
                if !lot.release_slot() {
                    warn!("Lot {} was already completely free on release", lot.id);
                }
                info!("Released parking for {plate} from lot {}", assignment.lot_name);
            }
            None => warn!(
                "Lot {} of released assignment {} is no longer registered",
                assignment.lot_id, assignment.token
            ),
        }
        Some(assignment)
    }

    pub fn get_assignment(&self, plate: &str) -> Option<Assignment> {
        self.assignments
            .lock()
            .get(&normalize_plate(plate))
            .map(|active| active.assignment.clone())
    }

    pub fn get_lot_status(&self, lot_id: LotId) -> Option<LotStatus> {
        self.registry.status(lot_id)
    }

    /// Copy of every active assignment, keyed by normalized plate.
    pub fn list_assignments(&self) -> HashMap<String, Assignment> {
        self.assignments
            .lock()
            .iter()
            .map(|(plate, active)| (plate.clone(), active.assignment.clone()))
            .collect()
    }

    /// Snapshot of every lot, ordered by id.
    pub fn lots(&self) -> Vec<Lot> {
        self.registry.snapshot()
    }

    pub fn lot_count(&self) -> usize {
        self.registry.len()
    }

    fn rank_lots<'a, I>(&self, lots: I, vehicle: &Vehicle, n: usize) -> Vec<(&'a Lot, f64)>
    where
        I: Iterator<Item = &'a Lot>,
    {
        let mut ranked: Vec<(&Lot, f64)> = lots
            .filter(|lot| lot.has_capacity())
            .map(|lot| (lot, self.score_lot(lot, vehicle)))
            .collect();
        ranked.sort_by(|(a, sa), (b, sb)| sb.total_cmp(sa).then_with(|| a.id.cmp(&b.id)));
        ranked.truncate(n);
        ranked
    }

    /// The critical section: select, label, decrement and record, all under lock.
    fn reserve(
        &self,
        plate: &str,
        vehicle: &Vehicle,
        duration_minutes: u32,
    ) -> Result<Option<Reservation>, EngineError> {
        let mut assignments = self.assignments.lock();
        if let Some(Active { assignment: existing, .. }) = assignments.get(plate) {
            return Err(EngineError::AlreadyAssigned {
                plate: plate.to_string(),
                slot: existing.assigned_slot.clone(),
                token: existing.token.clone(),
            });
        }

        let mut lots = self.registry.write();
        let best = self
            .rank_lots(lots.values(), vehicle, self.config.top_n)
            .first()
            .map(|(lot, score)| (lot.id, *score));
        let Some((lot_id, base_score)) = best else {
            return Ok(None);
        };
        let Some(lot) = lots.get_mut(&lot_id) else {
            return Ok(None);
        };
        debug!("Selected lot {lot_id} for {plate} with score {base_score:.3}");

        let distance = vehicle.location.distance_km(&lot.location);
        let features = FeatureVector {
            distance_km: distance,
            occupancy_rate: lot.occupancy_fraction(),
            price_per_hour: lot.price_per_hour,
            traffic_numeric: f64::from(lot.traffic_level.numeric()),
            rating: lot.rating,
            duration_minutes: f64::from(duration_minutes),
        };
        let assigned_at = Utc::now();
        let assigned_slot = labels::slot_label(lot);
        let token = labels::dedupe_token(
            labels::token(lot.id, plate, assigned_at.with_timezone(&Local).naive_local()),
            |candidate| assignments.values().any(|a| a.assignment.token == candidate),
        );

        if !lot.reserve_slot() {
            return Ok(None);
        }

        let assignment = Assignment {
            lot_id: lot.id,
            lot_name: lot.name.clone(),
            assigned_slot,
            distance_km: round_to(distance, 2),
            price_per_hour: lot.price_per_hour,
            estimated_cost: round_to(lot.price_per_hour * f64::from(duration_minutes) / 60.0, 2),
            duration_minutes,
            confidence_score: round_to(base_score * 100.0, 1),
            token,
            assigned_at,
        };
        let id = self.next_reservation.fetch_add(1, Ordering::Relaxed);
        assignments.insert(
            plate.to_string(),
            Active {
                reservation: id,
                assignment: assignment.clone(),
            },
        );

        Ok(Some(Reservation {
            id,
            assignment,
            base_score,
            features,
        }))
    }

    /// Predictor probability as a percentage, or the base score on failure.
    async fn predict_confidence(
        &self,
        predictor: &dyn ConfidencePredictor,
        features: &FeatureVector,
        base_score: f64,
    ) -> f64 {
        let fallback = round_to(base_score * 100.0, 1);
        let limit = self.config.predictor_timeout;

        match tokio::time::timeout(limit, predictor.predict(features)).await {
            Ok(Ok(probability)) if probability.is_finite() => {
                round_to(clamp_unit(probability) * 100.0, 1)
            }
            Ok(Ok(probability)) => {
                warn!("ML prediction returned {probability}, using base score");
                fallback
            }
            Ok(Err(e)) => {
                warn!("ML prediction failed, using base score: {e:#}");
                fallback
            }
            Err(_) => {
                warn!("ML prediction timed out after {limit:?}, using base score");
                fallback
            }
        }
    }

    fn update_confidence(&self, plate: &str, reservation: u64, confidence: f64) {
        let mut assignments = self.assignments.lock();
        match assignments.get_mut(plate) {
            Some(active) if active.reservation == reservation => {
                active.assignment.confidence_score = confidence
            }
            _ => debug!("Reservation {reservation} for {plate} ended before its confidence was scored"),
        }
    }
}
