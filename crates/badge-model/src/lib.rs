//! Shared data model for the name badge maker.
//!
//! - [`AttendeeRecord`]: one person after row splitting
//! - [`GridSpec`] / [`GridPosition`]: where a badge lands on the printed sheet
//! - [`units`]: centimetres, points and colours in the units the document
//!   format expects

pub mod attendee;
pub mod error;
pub mod grid;
pub mod units;

pub use attendee::AttendeeRecord;
pub use error::{ModelError, Result};
pub use grid::{GridPosition, GridSpec};
pub use units::{Centimeters, Points, Rgb};
