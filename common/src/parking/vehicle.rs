use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

pub const DEFAULT_VEHICLE_CLASS: &str = "car";

/// A vehicle asking for a slot. Built per request and never stored by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub plate: String,
    pub location: Coordinates,
    pub class: String,
}

impl Vehicle {
    /// Creates a car at the given position. The plate is normalized.
    pub fn new(plate: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            plate: normalize_plate(plate),
            location: Coordinates::new(latitude, longitude),
            class: DEFAULT_VEHICLE_CLASS.to_string(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }
}

/// Canonical form of a licence plate: ASCII alphanumerics only, uppercased.
///
/// Plate readers and people type plates with spaces, dashes and mixed case;
/// "dl-01 ab 1234" and "DL01AB1234" must refer to the same vehicle.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
