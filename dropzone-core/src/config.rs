use serde::{Deserialize, Serialize};

use crate::Error;
use crate::maps::{DEFAULT_RADIUS_M, DEFAULT_WORLD_EXTENT, MapId};
use crate::mask::{DEFAULT_ALPHA_THRESHOLD, WaterThresholds};
use crate::scan::ScanParams;


/// Tunable parameters of the planner.
///
/// Every field falls back to its default when omitted from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Side of the square world space, in world units.
    pub world_extent:         f64,
    pub scan:                 ScanParams,
    /// Mask pixels with alpha above this value are land.
    pub mask_alpha_threshold: u8,
    /// Colours treated as water when generating a mask from a map image.
    pub water:                WaterThresholds,
    pub default_map:          MapId,
    /// Drop radius used when none is requested, in meters.
    pub default_radius_m:     f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            world_extent:         DEFAULT_WORLD_EXTENT,
            scan:                 ScanParams::default(),
            mask_alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            water:                WaterThresholds::default(),
            default_map:          MapId::Erangel,
            default_radius_m:     DEFAULT_RADIUS_M,
        }
    }
}

impl PlannerConfig {
    /// Checks that every value is usable by the planner.
    ///
    /// # Errors
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.world_extent.is_finite() && self.world_extent > 0.) {
            return Err(Error::InvalidWorldExtent(self.world_extent));
        }
        if !(self.scan.step.is_finite() && self.scan.step > 0.) {
            return Err(Error::InvalidScanStep(self.scan.step));
        }
        validate_radius(self.default_radius_m)?;
        self.water.validate()
    }
}

/// Checks that a drop radius in meters is non-negative and finite.
///
/// A zero radius is accepted; it only reaches a flight path that passes through the target.
///
/// # Errors
/// Returns [`Error::InvalidRadius`] otherwise.
pub fn validate_radius(radius_m: f64) -> Result<(), Error> {
    if radius_m.is_finite() && radius_m >= 0. {
        Ok(())
    } else {
        Err(Error::InvalidRadius(radius_m))
    }
}
