//! Ties the flight path, the drop circle and a classifier together.

use bevy::log;
use bevy_math::DVec2;
use math::{Circle, Length, Position, Segment, SegmentPoint};

use crate::maps::MapId;
use crate::mask::{LandMask, MaskClassifier};
use crate::{Classify, Error, PlannerConfig, ScanParams, earliest_land, validate_radius};

#[cfg(test)]
mod tests;

/// A fully specified drop query in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropRequest {
    /// Where the aircraft starts flying.
    pub start:  Position<DVec2>,
    /// Where the aircraft stops flying.
    pub end:    Position<DVec2>,
    /// Where the player wants to land.
    pub target: Position<DVec2>,
    /// Maximum glide distance from the jump point to the target.
    pub radius: Length<f64>,
}

impl DropRequest {
    /// Assembles a request from points that may not have been placed yet.
    ///
    /// Returns `None` unless all three points are present.
    #[must_use]
    pub fn from_parts(
        start: Option<Position<DVec2>>,
        end: Option<Position<DVec2>>,
        target: Option<Position<DVec2>>,
        radius: Length<f64>,
    ) -> Option<Self> {
        Some(Self { start: start?, end: end?, target: target?, radius })
    }

    #[must_use]
    pub fn flight_path(&self) -> Segment { Segment::new(self.start, self.end) }

    #[must_use]
    pub fn drop_circle(&self) -> Circle { Circle::new(self.target, self.radius) }
}

/// The recommended jump point for a [`DropRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPoint {
    /// Where to jump, with its parameter along the flight path.
    pub landing: SegmentPoint,
    pub target:  Position<DVec2>,
}

impl DropPoint {
    #[must_use]
    pub fn position(&self) -> Position<DVec2> { self.landing.position }

    /// Parameter of the jump point along the flight path.
    #[must_use]
    pub fn t(&self) -> f64 { self.landing.t }

    /// Displacement from the jump point to the target.
    #[must_use]
    pub fn glide_vector(&self) -> Length<DVec2> { self.target - self.landing.position }

    #[must_use]
    pub fn glide_distance(&self) -> Length<f64> { self.glide_vector().magnitude_exact() }
}

/// Finds the earliest jump point along the flight path
/// that is within the drop circle and over land.
pub fn plan_drop<C>(request: &DropRequest, classifier: &C, params: &ScanParams) -> Option<DropPoint>
where
    C: Classify + ?Sized,
{
    let landing = earliest_land(request.flight_path(), request.drop_circle(), classifier, params)?;
    Some(DropPoint { landing, target: request.target })
}

/// Plans drops on a specific map, optionally constrained by a land mask.
#[derive(Clone, Copy)]
pub struct Planner<'a> {
    config: &'a PlannerConfig,
    map:    MapId,
    mask:   Option<&'a LandMask>,
}

impl<'a> Planner<'a> {
    #[must_use]
    pub const fn new(config: &'a PlannerConfig, map: MapId) -> Self {
        Self { config, map, mask: None }
    }

    #[must_use]
    pub const fn with_mask(mut self, mask: Option<&'a LandMask>) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub const fn map(&self) -> MapId { self.map }

    /// Builds a request with the drop radius given in meters.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRadius`] if `radius_m` is negative or not finite.
    pub fn request(
        &self,
        start: Position<DVec2>,
        end: Position<DVec2>,
        target: Position<DVec2>,
        radius_m: f64,
    ) -> Result<DropRequest, Error> {
        validate_radius(radius_m)?;
        let radius = self.map.meters_to_world(radius_m, self.config.world_extent);
        Ok(DropRequest { start, end, target, radius })
    }

    /// Plans a drop, classifying with the mask if one is set.
    #[must_use]
    pub fn plan(&self, request: &DropRequest) -> Option<DropPoint> {
        let drop = plan_drop(request, &MaskClassifier::new(self.mask), &self.config.scan);
        match &drop {
            Some(drop) => log::info!(
                "jump at {} (t = {:.4}) on {}, gliding {:.0} m to {}",
                drop.position(),
                drop.t(),
                self.map,
                self.glide_distance_m(drop),
                drop.target,
            ),
            None => log::info!("no land to jump onto within {:?} on {}", request.radius, self.map),
        }
        drop
    }

    /// Glide distance of `drop` converted to meters on this map.
    #[must_use]
    pub fn glide_distance_m(&self, drop: &DropPoint) -> f64 {
        self.map.world_to_meters(drop.glide_distance(), self.config.world_extent)
    }
}
