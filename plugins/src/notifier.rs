//! # Log Notifier
//!
//! Renders the driver-facing messages and emits them through `tracing`
//! instead of a real SMS gateway. Every message is kept so operators can
//! inspect what would have been sent.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use parkr_common::parking::assignment::{Assignment, Receipt};
use parkr_core::ports::Notifier;
use tracing::debug;

const SUPPORT_LINE: &str = "For support: +1-XXX-PARKING";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKind {
    Assignment,
    Receipt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SentMessage {
    pub kind: MessageKind,
    pub plate: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageStats {
    pub total: usize,
    pub by_kind: BTreeMap<MessageKind, usize>,
}

#[derive(Default)]
pub struct LogNotifier {
    log: Mutex<Vec<SentMessage>>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `limit` most recent messages, oldest first.
    pub fn message_log(&self, limit: usize) -> Vec<SentMessage> {
        let log = self.log.lock();
        let start = log.len().saturating_sub(limit);
        log[start..].to_vec()
    }

    pub fn stats(&self) -> MessageStats {
        let log = self.log.lock();
        let mut by_kind = BTreeMap::new();
        for msg in log.iter() {
            *by_kind.entry(msg.kind).or_insert(0) += 1;
        }
        MessageStats {
            total: log.len(),
            by_kind,
        }
    }

    fn send(&self, kind: MessageKind, plate: &str, body: String) {
        debug!(target: "parkr::notify", "{kind:?} message for {plate}:\n{body}");
        self.log.lock().push(SentMessage {
            kind,
            plate: plate.to_string(),
            body,
        });
    }
}

impl Notifier for LogNotifier {
    fn notify_assigned(&self, plate: &str, assignment: &Assignment) -> anyhow::Result<()> {
        self.send(MessageKind::Assignment, plate, assignment_message(plate, assignment));
        Ok(())
    }

    fn notify_released(&self, plate: &str, receipt: &Receipt) -> anyhow::Result<()> {
        self.send(MessageKind::Receipt, plate, receipt_message(receipt));
        Ok(())
    }
}

pub fn assignment_message(plate: &str, a: &Assignment) -> String {
    format!(
        "PARKING ASSIGNED\n\n\
         Vehicle: {plate}\n\
         Lot: {}\n\
         Slot: {}\n\
         Distance: {} km\n\
         Estimated Cost: ${:.2}\n\n\
         TOKEN: {}\n\n\
         Please proceed to your assigned slot.\n\
         {SUPPORT_LINE}",
        a.lot_name, a.assigned_slot, a.distance_km, a.estimated_cost, a.token
    )
}

pub fn receipt_message(r: &Receipt) -> String {
    format!(
        "PARKING RECEIPT\n\n\
         Token: {}\n\
         Lot: {}\n\
         Duration: {}\n\
         Amount: ${:.2}\n\n\
         Thank you for parking with us!",
        r.token,
        r.lot_name,
        r.duration_label(),
        r.amount_paid
    )
}
