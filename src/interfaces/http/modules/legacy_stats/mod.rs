//! Legacy `/servlet/fuel-stats` endpoint
//!
//! Older clients pass the car id as a raw `carId` query string, so it is
//! parsed by hand here instead of through a typed extractor.

pub mod handlers;

pub use handlers::*;
