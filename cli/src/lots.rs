use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use parkr_common::parking::lot::Lot;
use tracing::{info, warn};

/// Reads a JSON array of lots from `path`.
pub fn load(path: &Path) -> anyhow::Result<Vec<Lot>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading lot file {}", path.display()))?;
    let lots = parse(&raw).with_context(|| format!("parsing lot file {}", path.display()))?;
    info!("Loaded {} lots from {}", lots.len(), path.display());
    Ok(lots)
}

fn parse(raw: &str) -> anyhow::Result<Vec<Lot>> {
    let lots: Vec<Lot> = serde_json::from_str(raw)?;
    let mut seen = BTreeSet::new();
    for lot in &lots {
        if !seen.insert(lot.id) {
            warn!("Lot id {} appears more than once, the last entry wins", lot.id);
        }
    }
    Ok(lots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lots() {
        let raw = r#"[
            {"id": 1, "name": "Central Garage", "latitude": 40.7128, "longitude": -74.0060,
             "available_slots": 45, "total_slots": 200, "price_per_hour": 5.5,
             "traffic_level": "low", "rating": 4.5}
        ]"#;
        let lots = parse(raw).unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].name, "Central Garage");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("{not json").is_err());
    }
}
