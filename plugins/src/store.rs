use parking_lot::RwLock;
use parkr_core::ports::{AssignmentStore, BookingEvent};
use tracing::debug;

/// Keeps the booking history in memory, oldest first.
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<Vec<BookingEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BookingEvent> {
        self.events.read().clone()
    }

    /// Every event recorded for `plate`, oldest first.
    pub fn history(&self, plate: &str) -> Vec<BookingEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.plate() == plate)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl AssignmentStore for MemoryStore {
    fn record(&self, event: BookingEvent) -> anyhow::Result<()> {
        debug!("Recording booking event for {}", event.plate());
        self.events.write().push(event);
        Ok(())
    }
}
