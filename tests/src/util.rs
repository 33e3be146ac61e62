#![cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parkr_common::config::EngineConfig;
use parkr_common::geo::Coordinates;
use parkr_common::parking::assignment::{Assignment, Receipt};
use parkr_common::parking::lot::{Lot, LotId, TrafficLevel};
use parkr_common::parking::vehicle::Vehicle;
use parkr_core::engine::AssignmentEngine;
use parkr_core::ports::{AssignmentStore, BookingEvent, Notifier, TicketPrinter};

pub const DOWNTOWN: Coordinates = Coordinates::new(40.7128, -74.0060);

pub fn lot(id: LotId, name: &str, lat: f64, lon: f64, available: u32, total: u32) -> Lot {
    Lot {
        id,
        name: name.into(),
        location: Coordinates::new(lat, lon),
        available_slots: available,
        total_slots: total,
        price_per_hour: 5.5,
        traffic_level: TrafficLevel::Low,
        rating: 4.5,
    }
}

/// The three Manhattan lots used across the suite.
pub fn city_lots() -> Vec<Lot> {
    let mut central = lot(1, "Central Garage", 40.7128, -74.0060, 45, 200);
    central.price_per_hour = 5.5;
    let mut downtown = lot(2, "Downtown Lot", 40.7158, -74.0035, 12, 85);
    downtown.price_per_hour = 3.0;
    downtown.traffic_level = TrafficLevel::Medium;
    downtown.rating = 4.1;
    let mut riverside = lot(3, "Riverside Parking", 40.7200, -74.0100, 156, 400);
    riverside.price_per_hour = 4.0;
    riverside.traffic_level = TrafficLevel::High;
    riverside.rating = 3.8;
    vec![central, downtown, riverside]
}

pub fn engine_with(lots: Vec<Lot>) -> Arc<AssignmentEngine> {
    let engine = AssignmentEngine::new(EngineConfig::default()).unwrap();
    for lot in lots {
        engine.register_lot(lot);
    }
    Arc::new(engine)
}

pub fn vehicle(plate: &str) -> Vehicle {
    Vehicle::new(plate, DOWNTOWN.latitude, DOWNTOWN.longitude)
}

pub fn total_available(engine: &AssignmentEngine) -> u32 {
    engine.lots().iter().map(|l| l.available_slots).sum()
}

/// Counts calls, optionally failing each one. Keeps the last stored event.
#[derive(Clone, Default)]
pub struct Recorder {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
    pub last_event: Arc<Mutex<Option<BookingEvent>>>,
}

impl Recorder {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_event(&self) -> Option<BookingEvent> {
        self.last_event.lock().unwrap().clone()
    }

    fn hit(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("collaborator offline");
        }
        Ok(())
    }
}

impl Notifier for Recorder {
    fn notify_assigned(&self, _plate: &str, _assignment: &Assignment) -> anyhow::Result<()> {
        self.hit()
    }

    fn notify_released(&self, _plate: &str, _receipt: &Receipt) -> anyhow::Result<()> {
        self.hit()
    }
}

impl TicketPrinter for Recorder {
    fn print_ticket(&self, _plate: &str, _assignment: &Assignment) -> anyhow::Result<()> {
        self.hit()
    }

    fn print_receipt(&self, _plate: &str, _receipt: &Receipt) -> anyhow::Result<()> {
        self.hit()
    }
}

impl AssignmentStore for Recorder {
    fn record(&self, event: BookingEvent) -> anyhow::Result<()> {
        *self.last_event.lock().unwrap() = Some(event);
        self.hit()
    }
}
