//! Locates the earliest land along the part of a segment inside a circle.
//!
//! The classifier is opaque, so the boundary between water and land
//! is bracketed by sampling at a fixed spatial step
//! and then narrowed by bisection.

use bevy::log;
use math::{Circle, Length, Segment, SegmentPoint, range_steps};
use serde::{Deserialize, Serialize};

use crate::Classify;


/// Default spacing between coarse samples, in world units.
pub const DEFAULT_SCAN_STEP: f64 = 2.;

/// Default number of bisection rounds after a transition is bracketed.
pub const DEFAULT_BISECT_ITERATIONS: u32 = 14;

/// Resolution of the earliest-land search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Spacing between coarse samples along the segment, in world units.
    ///
    /// The step is fixed in world space and does not adapt to the circle radius.
    pub step:              f64,
    /// Number of bisection rounds between the last water sample and the first land sample.
    pub bisect_iterations: u32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self { step: DEFAULT_SCAN_STEP, bisect_iterations: DEFAULT_BISECT_ITERATIONS }
    }
}

/// Finds the point closest to `segment.start` that is inside `circle` and classified as land.
///
/// If the segment enters the circle over land, the entry point is returned exactly.
/// Otherwise the first water-to-land transition inside the circle is refined by bisection,
/// and the land side of the final bracket is returned.
///
/// Returns `None` if the segment does not touch the circle
/// or no land is found inside the circle.
///
/// # Panics
/// Panics if `params.step` is not a positive value.
pub fn earliest_land<C>(
    segment: Segment,
    circle: Circle,
    classifier: &C,
    params: &ScanParams,
) -> Option<SegmentPoint>
where
    C: Classify + ?Sized,
{
    let interval = segment.interval_inside(circle)?.normalized();
    log::trace!("flight path {segment:?} is inside {circle:?} over {interval:?}");

    let entry = segment.sample(interval.t_in);
    if classifier.is_land(entry.position) {
        log::trace!("entry point {} is land", entry.position);
        return Some(entry);
    }

    let dt = sample_spacing(segment.length(), params.step);

    let mut water_t = interval.t_in;
    let mut samples = 0usize;

    // the entry point is already known to be water
    for t in range_steps(interval.t_in, interval.t_out, dt).skip(1) {
        samples += 1;
        if classifier.is_land(segment.point_at(t)) {
            let landing = bisect(segment, classifier, water_t, t, params.bisect_iterations);
            debug_assert!(interval.contains(landing.t), "{landing:?} outside {interval:?}");
            log::debug!(
                "land found at {} (t = {}) after {samples} samples",
                landing.position,
                landing.t,
            );
            return Some(landing);
        }
        water_t = t;
    }

    log::debug!("no land within {interval:?} after {samples} samples");
    None
}

/// Parameter distance between coarse samples along a segment of `length`.
///
/// Never below [`f64::EPSILON`], which still advances every `t` within `0..1`.
fn sample_spacing(length: Length<f64>, step: f64) -> f64 {
    // a zero-length segment has a single point, any finite step covers it
    let length = if length.is_positive() { length.0 } else { 1. };
    (step / length).max(f64::EPSILON)
}

/// Narrows `water_t..land_t` towards the water/land boundary
/// and returns the land side of the final bracket.
fn bisect<C>(
    segment: Segment,
    classifier: &C,
    mut water_t: f64,
    mut land_t: f64,
    iterations: u32,
) -> SegmentPoint
where
    C: Classify + ?Sized,
{
    for _ in 0..iterations {
        let mid = water_t.midpoint(land_t);
        if classifier.is_land(segment.point_at(mid)) {
            land_t = mid;
        } else {
            water_t = mid;
        }
    }

    segment.sample(land_t)
}
