#![cfg(test)]
use std::sync::Arc;

use chrono::Duration;
use parkr_common::config::EngineConfig;
use parkr_core::engine::AssignmentEngine;
use parkr_core::ports::BookingEvent;
use parkr_core::service::ParkingService;
use parkr_plugins::predictor::LogisticPredictor;

use crate::util::{Recorder, city_lots, engine_with, lot, total_available, vehicle};

fn service(engine: Arc<AssignmentEngine>, notifier: &Recorder, printer: &Recorder, store: &Recorder) -> ParkingService {
    ParkingService::new(
        engine,
        Box::new(notifier.clone()),
        Box::new(printer.clone()),
        Box::new(store.clone()),
    )
}

#[tokio::test]
async fn check_in_drives_every_collaborator_once() {
    let (notifier, printer, store) = (Recorder::default(), Recorder::default(), Recorder::default());
    let svc = service(engine_with(city_lots()), &notifier, &printer, &store);

    let a = svc.check_in(&vehicle("KA05MN4321"), 90, false).await.unwrap();
    assert!(a.is_some());
    assert_eq!((notifier.count(), printer.count(), store.count()), (1, 1, 1));
}

#[tokio::test]
async fn failing_collaborators_do_not_undo_assignment() {
    let (notifier, printer, store) = (Recorder::failing(), Recorder::failing(), Recorder::failing());
    let engine = engine_with(city_lots());
    let before = total_available(&engine);
    let svc = service(engine.clone(), &notifier, &printer, &store);

    let a = svc.check_in(&vehicle("KA05MN4321"), 90, false).await.unwrap().unwrap();
    assert_eq!(total_available(&engine), before - 1);
    assert_eq!(engine.get_assignment("KA05MN4321"), Some(a));
}

#[tokio::test]
async fn full_lots_skip_collaborators() {
    let (notifier, printer, store) = (Recorder::default(), Recorder::default(), Recorder::default());
    let engine = engine_with(vec![lot(1, "Full", 40.7128, -74.0060, 0, 10)]);
    let svc = service(engine, &notifier, &printer, &store);

    assert!(svc.check_in(&vehicle("AB1"), 60, false).await.unwrap().is_none());
    assert_eq!((notifier.count(), printer.count(), store.count()), (0, 0, 0));
}

#[tokio::test]
async fn check_out_sends_receipt_and_frees_slot() {
    let (notifier, printer, store) = (Recorder::default(), Recorder::default(), Recorder::default());
    let engine = engine_with(city_lots());
    let before = total_available(&engine);
    let svc = service(engine.clone(), &notifier, &printer, &store);

    svc.check_in(&vehicle("AB1"), 60, false).await.unwrap();
    assert!(svc.check_out("ab1").is_some());
    assert!(svc.check_out("ab1").is_none());
    assert_eq!(total_available(&engine), before);
    assert_eq!(notifier.count(), 2);
    assert_eq!(printer.count(), 2);
    assert_eq!(store.count(), 2);
}

#[tokio::test]
async fn check_out_bills_time_actually_parked() {
    let (notifier, printer, store) = (Recorder::default(), Recorder::default(), Recorder::default());
    let engine = engine_with(vec![lot(1, "Only", 40.7128, -74.0060, 5, 10)]);
    let svc = service(engine, &notifier, &printer, &store);

    // Planned for four hours at $5.50/h, leaves after 45 minutes.
    let a = svc.check_in(&vehicle("AB1"), 240, false).await.unwrap().unwrap();
    assert_eq!(a.estimated_cost, 22.0);
    let receipt = svc
        .check_out_at("AB1", a.assigned_at + Duration::minutes(45))
        .unwrap();

    assert_eq!(receipt.duration_minutes, 45);
    assert_eq!(receipt.amount_paid, 4.13);
    assert_eq!(receipt.entry_time, a.assigned_at);

    match store.last_event() {
        Some(BookingEvent::Released { receipt: stored, assignment, .. }) => {
            assert_eq!(stored, receipt);
            assert_eq!(assignment.token, a.token);
        }
        other => panic!("expected a release event, got {other:?}"),
    }
}

#[tokio::test]
async fn immediate_check_out_is_not_billed_the_plan() {
    let recorder = Recorder::default();
    let engine = engine_with(vec![lot(1, "Only", 40.7128, -74.0060, 5, 10)]);
    let svc = service(engine, &recorder, &recorder, &recorder);

    let a = svc.check_in(&vehicle("AB1"), 240, false).await.unwrap().unwrap();
    let receipt = svc.check_out_at("AB1", a.assigned_at).unwrap();
    assert_eq!(receipt.duration_minutes, 0);
    assert_eq!(receipt.amount_paid, 0.0);
}

#[tokio::test]
async fn logistic_model_sets_confidence() {
    let engine = AssignmentEngine::new(EngineConfig::default())
        .unwrap()
        .with_predictor(Arc::new(LogisticPredictor::default()));
    for l in city_lots() {
        engine.register_lot(l);
    }
    let recorder = Recorder::default();
    let svc = service(Arc::new(engine), &recorder, &recorder, &recorder);

    let a = svc.check_in(&vehicle("ML1"), 120, true).await.unwrap().unwrap();
    assert!((0.0..=100.0).contains(&a.confidence_score));
    assert_eq!(recorder.count(), 3);
}
