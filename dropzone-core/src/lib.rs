//! Parachute drop planning.
//!
//! Given a flight path, a target and a drop radius,
//! finds the earliest point along the flight path inside the drop circle
//! at which the terrain is classified as land.

mod classify;
pub use classify::*;

mod scan;
pub use scan::*;

mod plan;
pub use plan::*;

mod config;
pub use config::*;

mod error;
pub use error::Error;

pub mod maps;
pub mod mask;
