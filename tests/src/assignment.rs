#![cfg(test)]
use parkr_core::engine::EngineError;

use crate::util::{city_lots, engine_with, lot, total_available, vehicle};

#[tokio::test]
async fn assign_picks_best_lot_and_reserves() {
    let engine = engine_with(city_lots());
    let before = total_available(&engine);
    let best = engine.top_candidates(&vehicle("DL01AB1234"), 1);

    let a = engine
        .assign("DL01AB1234", &vehicle("DL01AB1234"), 120, false)
        .await
        .unwrap()
        .expect("a lot has capacity");

    assert_eq!(a.lot_id, best[0].0.id);
    assert_eq!(total_available(&engine), before - 1);
    assert!(a.confidence_score > 0.0 && a.confidence_score <= 100.0);
    assert!(a.token.starts_with(&format!("PKG{}1234", a.lot_id)));
    assert!(a.assigned_slot.starts_with(&format!("{}-", a.lot_id)));
}

#[tokio::test]
async fn release_restores_capacity() {
    let engine = engine_with(city_lots());
    let before = total_available(&engine);

    engine.assign("AB12CD", &vehicle("AB12CD"), 60, false).await.unwrap();
    assert!(engine.release("ab 12 cd"));
    assert_eq!(total_available(&engine), before);
    assert!(engine.list_assignments().is_empty());
}

#[tokio::test]
async fn release_unknown_plate_changes_nothing() {
    let engine = engine_with(city_lots());
    let before = total_available(&engine);
    assert!(!engine.release("NEVERSEEN"));
    assert_eq!(total_available(&engine), before);
}

#[tokio::test]
async fn no_lots_or_all_full_yields_none() {
    let empty = engine_with(Vec::new());
    assert_eq!(empty.assign("A1", &vehicle("A1"), 60, false).await, Ok(None));

    let full = engine_with(vec![lot(1, "Full", 40.7128, -74.0060, 0, 50)]);
    assert_eq!(full.assign("A1", &vehicle("A1"), 60, false).await, Ok(None));
    assert_eq!(full.get_lot_status(1).unwrap().available_slots, 0);
}

#[tokio::test]
async fn last_slot_goes_to_one_plate_only() {
    let engine = engine_with(vec![lot(1, "Tiny", 40.7128, -74.0060, 1, 1)]);
    assert!(engine.assign("FIRST", &vehicle("FIRST"), 60, false).await.unwrap().is_some());
    assert!(engine.assign("SECOND", &vehicle("SECOND"), 60, false).await.unwrap().is_none());

    engine.release("FIRST");
    assert!(engine.assign("SECOND", &vehicle("SECOND"), 60, false).await.unwrap().is_some());
}

#[tokio::test]
async fn duplicate_plate_is_rejected() {
    let engine = engine_with(city_lots());
    engine.assign("XY99", &vehicle("XY99"), 60, false).await.unwrap();
    let before = total_available(&engine);

    let again = engine.assign("XY99", &vehicle("XY99"), 60, false).await;
    assert!(matches!(again, Err(EngineError::AlreadyAssigned { .. })));
    assert_eq!(total_available(&engine), before);
}

#[tokio::test]
async fn availability_update_is_capped_at_total() {
    let engine = engine_with(vec![lot(1, "Capped", 40.7128, -74.0060, 5, 10)]);
    engine.update_availability(1, 25, 10);
    let status = engine.get_lot_status(1).unwrap();
    assert_eq!(status.available_slots, 10);
    assert_eq!(status.occupancy_rate, 0.0);
}
