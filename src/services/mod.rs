//! Measurement API suppliers.

pub mod airkorea;

pub use airkorea::{AirKoreaClient, MeasurementApi, Sido};
