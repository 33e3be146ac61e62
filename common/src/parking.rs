//! # Parking Domain Models
//!
//! Plain data shared by the engine, the ranker and every collaborator.
//! Nothing in here owns state across requests; the engine does.

pub mod assignment;
pub mod lot;
pub mod spot;
pub mod vehicle;
