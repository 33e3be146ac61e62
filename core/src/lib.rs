//! # Parkr Core
//!
//! The allocation core of `parkr`: it ranks parking lots for users and assigns
//! arriving vehicles to slots without ever overbooking a lot.
//!
//! ## Layout
//! * **[`scoring`]**: Pure component scores and the weighted composite.
//! * **[`registry`]**: Lock-guarded store of live lot state.
//! * **[`ranker`]**: Read-only recommendation ranking over a candidate snapshot.
//! * **[`engine`]**: Atomic select-and-reserve, tokens, slot labels, release.
//! * **[`ports`]**: Traits for the outside world (predictor, notifier, printer, store).
//! * **[`service`]**: Check-in / check-out use cases wiring the engine to the ports.

pub mod engine;
pub mod ports;
pub mod ranker;
pub mod registry;
pub mod scoring;
pub mod service;
