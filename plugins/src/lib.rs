//! Concrete adapters for the `parkr-core` outbound ports.

pub mod notifier;
pub mod predictor;
pub mod store;
pub mod ticket;
