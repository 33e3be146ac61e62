//! # Parking Service
//!
//! Implements the "vehicle arrives" and "vehicle leaves" use cases.
//!
//! The engine owns the decision. Everything downstream (ticket, message,
//! history) only consumes the result: a collaborator that fails is logged and
//! skipped, it never takes a slot back.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use parkr_common::parking::assignment::{Assignment, Receipt};
use parkr_common::parking::vehicle::{Vehicle, normalize_plate};
use tracing::{error, info};

use crate::engine::AssignmentEngine;
use crate::ports::{AssignmentStore, BookingEvent, Notifier, TicketPrinter};

/// Application service around an [`AssignmentEngine`].
///
/// Orchestrates a check-in by:
/// 1. asking the engine for an assignment,
/// 2. printing the ticket,
/// 3. notifying the driver,
/// 4. recording the booking.
pub struct ParkingService {
    engine: Arc<AssignmentEngine>,
    notifier: Box<dyn Notifier>,
    printer: Box<dyn TicketPrinter>,
    store: Box<dyn AssignmentStore>,
}

impl ParkingService {
    pub fn new(
        engine: Arc<AssignmentEngine>,
        notifier: Box<dyn Notifier>,
        printer: Box<dyn TicketPrinter>,
        store: Box<dyn AssignmentStore>,
    ) -> Self {
        Self {
            engine,
            notifier,
            printer,
            store,
        }
    }

    pub fn engine(&self) -> &Arc<AssignmentEngine> {
        &self.engine
    }

    /// Assigns `vehicle` a slot. `Ok(None)` when every lot is full.
    pub async fn check_in(
        &self,
        vehicle: &Vehicle,
        duration_minutes: u32,
        use_confidence: bool,
    ) -> anyhow::Result<Option<Assignment>> {
        let assignment = self
            .engine
            .assign(&vehicle.plate, vehicle, duration_minutes, use_confidence)
            .await
            .with_context(|| format!("assigning a slot to {}", vehicle.plate))?;

        let Some(assignment) = assignment else {
            return Ok(None);
        };
        let plate = normalize_plate(&vehicle.plate);

        if let Err(e) = self.printer.print_ticket(&plate, &assignment) {
            error!("Failed to print ticket {}: {e:#}", assignment.token);
        }
        if let Err(e) = self.notifier.notify_assigned(&plate, &assignment) {
            error!("Failed to notify {plate} about {}: {e:#}", assignment.token);
        }
        self.record(BookingEvent::Assigned {
            plate,
            assignment: assignment.clone(),
            at: Utc::now(),
        });

        Ok(Some(assignment))
    }

    /// Frees the slot held by `plate` and bills the stay up to now.
    /// `None` when the plate holds nothing.
    pub fn check_out(&self, plate: &str) -> Option<Receipt> {
        self.check_out_at(plate, Utc::now())
    }

    /// Like [`check_out`](Self::check_out), with an explicit exit time.
    pub fn check_out_at(&self, plate: &str, exit: DateTime<Utc>) -> Option<Receipt> {
        let assignment = self.engine.release_assignment(plate)?;
        let plate = normalize_plate(plate);
        let receipt = Receipt::settle(&assignment, exit);
        info!(
            "Checked out {plate} after {}, billed ${:.2}",
            receipt.duration_label(),
            receipt.amount_paid
        );

        if let Err(e) = self.printer.print_receipt(&plate, &receipt) {
            error!("Failed to print receipt {}: {e:#}", receipt.token);
        }
        if let Err(e) = self.notifier.notify_released(&plate, &receipt) {
            error!("Failed to send receipt to {plate}: {e:#}");
        }
        self.record(BookingEvent::Released {
            plate,
            assignment,
            receipt: receipt.clone(),
            at: exit,
        });

        Some(receipt)
    }

    fn record(&self, event: BookingEvent) {
        if let Err(e) = self.store.record(event) {
            error!("Failed to persist booking event: {e:#}");
        }
    }
}
