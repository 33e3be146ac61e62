use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::ensure;
use colored::*;
use parkr_common::geo::Coordinates;
use parkr_common::parking::vehicle::Vehicle;
use parkr_core::engine::AssignmentEngine;
use parkr_core::service::ParkingService;
use parkr_plugins::notifier::LogNotifier;
use parkr_plugins::store::MemoryStore;
use parkr_plugins::ticket::TextTicketPrinter;
use tracing::{error, info};

use crate::terminal::{colors, format, print};

/// Half the side of the square, in degrees, vehicles spawn in.
const SPREAD_DEG: f64 = 0.01;

pub async fn simulate(engine: Arc<AssignmentEngine>, vehicles: usize) -> anyhow::Result<()> {
    let lots = engine.lots();
    if lots.is_empty() {
        print::no_results("no lots loaded");
        return Ok(());
    }
    let capacity_before: u64 = lots.iter().map(|l| u64::from(l.available_slots)).sum();
    let centre = centroid(&lots.iter().map(|l| l.location).collect::<Vec<_>>());

    let service = Arc::new(ParkingService::new(
        engine.clone(),
        Box::new(LogNotifier::new()),
        Box::new(TextTicketPrinter::new(io::sink())),
        Box::new(MemoryStore::new()),
    ));

    info!("Simulating {vehicles} arrivals around ({:.4}, {:.4})", centre.latitude, centre.longitude);
    let start_time = Instant::now();

    let handles: Vec<_> = (0..vehicles)
        .map(|i| {
            let service = service.clone();
            let vehicle = Vehicle::new(
                &format!("SIM{i:05}"),
                centre.latitude + rand::random_range(-SPREAD_DEG..SPREAD_DEG),
                centre.longitude + rand::random_range(-SPREAD_DEG..SPREAD_DEG),
            );
            let duration = rand::random_range(30..=240);
            tokio::spawn(async move { service.check_in(&vehicle, duration, true).await })
        })
        .collect();

    let mut assigned: u64 = 0;
    let mut turned_away: u64 = 0;
    for handle in handles {
        match handle.await? {
            Ok(Some(_)) => assigned += 1,
            Ok(None) => turned_away += 1,
            Err(e) => error!("{e:#}"),
        }
    }
    let elapsed = start_time.elapsed();

    let active = engine.list_assignments().len() as u64;
    ensure!(
        active == assigned && assigned <= capacity_before,
        "overbooked: {assigned} assignments for {capacity_before} free slots"
    );

    print::header("final occupancy");
    for lot in engine.lots() {
        let status = lot.status();
        print::tree_head(status.lot_id as usize, &status.name);
        print::as_tree_one_level(format::lot_status_details(&status));
    }
    print::fat_separator();
    let summary = format!(
        "{} assigned, {} turned away in {}",
        assigned.to_string().bold().green(),
        turned_away.to_string().bold().red(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow()
    );
    print::centerln(&summary.color(colors::TEXT_DEFAULT).to_string());
    Ok(())
}

fn centroid(points: &[Coordinates]) -> Coordinates {
    let n = points.len().max(1) as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.latitude, lon + p.longitude));
    Coordinates::new(lat / n, lon / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid() {
        let c = centroid(&[Coordinates::new(40.0, -74.0), Coordinates::new(42.0, -72.0)]);
        assert_eq!(c, Coordinates::new(41.0, -73.0));
        assert_eq!(centroid(&[]), Coordinates::new(0.0, 0.0));
    }
}
