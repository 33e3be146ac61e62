use std::io;
use std::sync::Arc;

use parkr_common::parking::vehicle::Vehicle;
use parkr_core::engine::AssignmentEngine;
use parkr_core::service::ParkingService;
use parkr_plugins::notifier::{LogNotifier, assignment_message};
use parkr_plugins::store::MemoryStore;
use parkr_plugins::ticket::TextTicketPrinter;

use crate::terminal::{format, print};

pub async fn assign(
    engine: Arc<AssignmentEngine>,
    vehicle: Vehicle,
    duration_minutes: u32,
    use_confidence: bool,
) -> anyhow::Result<()> {
    let service = ParkingService::new(
        engine,
        Box::new(LogNotifier::new()),
        Box::new(TextTicketPrinter::new(io::stdout())),
        Box::new(MemoryStore::new()),
    );

    print::header("vehicle");
    print::aligned_line("Plate", vehicle.plate.as_str());
    print::aligned_line("Class", vehicle.class.as_str());

    let engine = service.engine();
    let candidates = engine.top_candidates(&vehicle, engine.config().top_n);
    if !candidates.is_empty() {
        print::header("candidates");
        for (lot, score) in &candidates {
            print::aligned_line(&lot.name, format!("{score:.3}"));
        }
    }

    print::header("assignment");
    let Some(assignment) = service.check_in(&vehicle, duration_minutes, use_confidence).await? else {
        print::no_results(&format!("no free slot for {}", vehicle.plate));
        return Ok(());
    };

    print::tree_head(assignment.lot_id as usize, &assignment.lot_name);
    print::as_tree_one_level(format::assignment_details(&assignment));
    print::fat_separator();
    for line in assignment_message(&vehicle.plate, &assignment).lines() {
        print::print_status(line);
    }
    Ok(())
}
