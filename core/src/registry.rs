//! # Lot Registry
//!
//! Owns the live state of every registered lot.
//!
//! Readers get cloned snapshots and never hold the lock for longer than the
//! copy. Writers that must read and mutate in one step (the engine's
//! select-and-reserve) take the write guard through [`LotRegistry::write`].

use std::collections::BTreeMap;

use parking_lot::{RwLock, RwLockWriteGuard};
use parkr_common::parking::lot::{Lot, LotId, LotStatus, TrafficLevel};
use tracing::{debug, info, warn};

pub type LotMap = BTreeMap<LotId, Lot>;

#[derive(Default)]
pub struct LotRegistry {
    lots: RwLock<LotMap>,
}

impl LotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `lot`, replacing any lot with the same id.
    pub fn register(&self, mut lot: Lot) {
        if lot.available_slots > lot.total_slots {
            warn!(
                "Lot {} reports {} free of {} slots, capping",
                lot.id, lot.available_slots, lot.total_slots
            );
            lot.available_slots = lot.total_slots;
        }
        info!("Registered parking lot: {} (ID: {})", lot.name, lot.id);
        self.lots.write().insert(lot.id, lot);
    }

    /// Overwrites the slot counts of a known lot. Unknown ids are ignored.
    ///
    /// Returns whether a lot was updated.
    pub fn update_availability(&self, lot_id: LotId, available: u32, total: u32) -> bool {
        let mut lots = self.lots.write();
        let Some(lot) = lots.get_mut(&lot_id) else {
            debug!("Ignoring availability update for unknown lot {lot_id}");
            return false;
        };
        if available > total {
            warn!("Lot {lot_id} update reports {available} free of {total} slots, capping");
        }
        lot.total_slots = total;
        lot.available_slots = available.min(total);
        true
    }

    /// Refreshes the traffic estimate of a known lot. Unknown ids are ignored.
    pub fn update_traffic(&self, lot_id: LotId, level: TrafficLevel) -> bool {
        match self.lots.write().get_mut(&lot_id) {
            Some(lot) => {
                lot.traffic_level = level;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, lot_id: LotId) -> Option<Lot> {
        self.lots.read().get(&lot_id).cloned()
    }

    pub fn status(&self, lot_id: LotId) -> Option<LotStatus> {
        self.lots.read().get(&lot_id).map(Lot::status)
    }

    /// Consistent copy of every lot, ordered by id.
    pub fn snapshot(&self) -> Vec<Lot> {
        self.lots.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.read().is_empty()
    }

    /// Exclusive access for read-modify-write sequences.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, LotMap> {
        self.lots.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkr_common::geo::Coordinates;

    fn lot(id: LotId, available: u32, total: u32) -> Lot {
        Lot {
            id,
            name: format!("Lot {id}"),
            location: Coordinates::new(40.7128, -74.0060),
            available_slots: available,
            total_slots: total,
            price_per_hour: 4.0,
            traffic_level: TrafficLevel::Medium,
            rating: 4.0,
        }
    }

    #[test]
    fn test_register_overwrites_by_id() {
        let registry = LotRegistry::new();
        registry.register(lot(1, 5, 10));
        registry.register(lot(1, 7, 20));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(1).unwrap().total_slots, 20);
    }

    #[test]
    fn test_register_caps_available() {
        let registry = LotRegistry::new();
        registry.register(lot(1, 50, 10));
        assert_eq!(registry.get(1).unwrap().available_slots, 10);
    }

    #[test]
    fn test_update_availability_ignores_unknown_lot() {
        let registry = LotRegistry::new();
        registry.register(lot(1, 5, 10));
        assert!(!registry.update_availability(99, 1, 1));
        assert!(registry.get(99).is_none());
        assert_eq!(registry.snapshot(), vec![lot(1, 5, 10)]);
    }

    #[test]
    fn test_update_availability_and_traffic() {
        let registry = LotRegistry::new();
        registry.register(lot(1, 5, 10));
        assert!(registry.update_availability(1, 2, 12));
        assert!(registry.update_traffic(1, TrafficLevel::VeryHigh));
        let updated = registry.get(1).unwrap();
        assert_eq!((updated.available_slots, updated.total_slots), (2, 12));
        assert_eq!(updated.traffic_level, TrafficLevel::VeryHigh);
        assert!(!registry.update_traffic(2, TrafficLevel::Low));
    }

    #[test]
    fn test_snapshot_is_ordered_and_detached() {
        let registry = LotRegistry::new();
        registry.register(lot(3, 1, 1));
        registry.register(lot(1, 1, 1));
        let snap = registry.snapshot();
        assert_eq!(snap.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 3]);

        registry.update_availability(1, 0, 1);
        assert_eq!(snap[0].available_slots, 1);
    }
}
