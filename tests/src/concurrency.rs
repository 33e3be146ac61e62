#![cfg(test)]
use std::sync::Arc;

use crate::util::{engine_with, lot, vehicle};

const CAPACITY: u32 = 25;
const ARRIVALS: usize = 200;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_arrivals_never_overbook() {
    let engine = engine_with(vec![
        lot(1, "North", 40.7150, -74.0060, 10, 10),
        lot(2, "South", 40.7100, -74.0060, CAPACITY - 10, 40),
    ]);

    let handles: Vec<_> = (0..ARRIVALS)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                let plate = format!("CAR{i:04}");
                engine.assign(&plate, &vehicle(&plate), 60, false).await
            })
        })
        .collect();

    let mut assigned = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            assigned += 1;
        }
    }

    assert_eq!(assigned, CAPACITY as usize);
    assert_eq!(engine.list_assignments().len(), CAPACITY as usize);
    for l in engine.lots() {
        assert_eq!(l.available_slots, 0, "lot {} still has free slots", l.id);
    }

    let mut tokens: Vec<String> = engine.list_assignments().into_values().map(|a| a.token).collect();
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), CAPACITY as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn interleaved_assign_and_release_stay_consistent() {
    let engine = engine_with(vec![lot(1, "Busy", 40.7128, -74.0060, 5, 5)]);

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                let plate = format!("LOOP{}", i % 16);
                if engine.assign(&plate, &vehicle(&plate), 30, false).await.is_ok() {
                    tokio::task::yield_now().await;
                    engine.release(&plate);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let status = engine.get_lot_status(1).unwrap();
    assert_eq!(status.available_slots, 5 - engine.list_assignments().len() as u32);
    assert!(status.available_slots <= status.total_slots);
}
