pub mod config;
pub mod geo;
pub mod parking;
pub mod utils;
