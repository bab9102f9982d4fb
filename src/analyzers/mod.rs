//! Air-quality grading and projection.
//!
//! Raw station records are normalized into typed readings, each reading is
//! graded against per-pollutant bands, and the graded batch is projected
//! into table rows, grade counts and time series for display.

pub mod grade;
pub mod normalize;
pub mod project;
pub mod types;
pub mod utility;
