//! Segment and circle primitives used to locate the part of a flight path
//! that lies inside a drop circle.

use bevy_math::DVec2;
use smallvec::SmallVec;

use crate::{Between, Length, Position};


/// Crossings whose segment parameters differ by no more than this are the same tangent point.
/// Also the half-width of the interval reported for a tangent graze.
pub const TANGENT_EPSILON: f64 = 1e-6;

/// Slack added to the squared radius when testing whether a point is inside a circle.
pub const INSIDE_SLACK_SQ: f64 = 1e-3;

/// A directed line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Position<DVec2>,
    pub end:   Position<DVec2>,
}

/// A circle with a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Position<DVec2>,
    pub radius: Length<f64>,
}

/// A point on a segment together with its parameter along the segment.
///
/// `t = 0` is the segment start and `t = 1` is the segment end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPoint {
    pub position: Position<DVec2>,
    pub t:        f64,
}

/// Boundary crossings of a segment with a circle, ascending by `t`.
pub type Crossings = SmallVec<[SegmentPoint; 2]>;

/// A range `t_in..=t_out` of segment parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub t_in:  f64,
    pub t_out: f64,
}

impl Segment {
    #[must_use]
    pub const fn new(start: Position<DVec2>, end: Position<DVec2>) -> Self { Self { start, end } }

    /// Displacement from `start` to `end`.
    #[must_use]
    pub fn dir(self) -> Length<DVec2> { self.end - self.start }

    #[must_use]
    pub fn length(self) -> Length<f64> { self.dir().magnitude_exact() }

    /// Returns `start + (end - start) * t`.
    #[must_use]
    pub fn point_at(self, t: f64) -> Position<DVec2> { self.start + self.dir() * t }

    #[must_use]
    pub fn sample(self, t: f64) -> SegmentPoint { SegmentPoint { position: self.point_at(t), t } }

    /// Finds the parameters in `0..=1` at which the segment crosses the boundary of `circle`.
    ///
    /// A zero-length segment never crosses anything.
    /// A tangent line touches the boundary once and yields a single crossing.
    #[must_use]
    pub fn circle_crossings(self, circle: Circle) -> Crossings {
        let line_dir = self.dir();
        let center_to_start = self.start - circle.center;

        // Quadratic form of center_to_start + t * line_dir
        // in terms of a * t^2 + b * t + c = 0
        let a = line_dir.magnitude_squared();
        let b = line_dir.dot(center_to_start) * 2.;
        let c = center_to_start.magnitude_squared() - circle.radius.squared();

        if a == 0. {
            return Crossings::new();
        }

        let discrim = b * b - a * c * 4.;
        if discrim < 0. {
            return Crossings::new();
        }

        // The textbook formula loses precision when |b| is close to sqrt(discrim).
        // The error is far below the scan resolution, so it is not compensated.
        let low = (-b - discrim.sqrt()) / a / 2.;
        let high = (-b + discrim.sqrt()) / a / 2.;

        let mut crossings: Crossings = [low, high]
            .into_iter()
            .filter(|&t| t.between_inclusive(&0., &1.))
            .map(|t| self.sample(t))
            .collect();

        let tangent = matches!(
            &crossings[..],
            [first, second] if second.t - first.t <= TANGENT_EPSILON
        );
        if tangent {
            crossings.truncate(1);
        }

        crossings
    }

    /// Returns the range of segment parameters for which the segment is inside `circle`,
    /// boundary inclusive.
    ///
    /// Returns `None` if no part of the segment is inside the circle.
    /// The result is not necessarily within `0..=1`; see [`Interval::normalized`].
    #[must_use]
    pub fn interval_inside(self, circle: Circle) -> Option<Interval> {
        let start_inside = circle.contains(self.start);
        let end_inside = circle.contains(self.end);

        match (&self.circle_crossings(circle)[..], start_inside, end_inside) {
            // chord
            ([first, .., last], _, _) => Some(Interval { t_in: first.t, t_out: last.t }),
            // exits the circle
            ([only], true, false) => Some(Interval { t_in: 0., t_out: only.t }),
            // enters the circle
            ([only], false, true) => Some(Interval { t_in: only.t, t_out: 1. }),
            // an endpoint grazes the boundary from inside
            ([_], true, true) => Some(Interval::FULL),
            // tangent touch with both endpoints outside
            ([only], false, false) => Some(Interval {
                t_in:  only.t - TANGENT_EPSILON,
                t_out: only.t + TANGENT_EPSILON,
            }),
            ([], true, true) => Some(Interval::FULL),
            ([], _, _) => None,
        }
    }
}

impl Circle {
    #[must_use]
    pub const fn new(center: Position<DVec2>, radius: Length<f64>) -> Self {
        Self { center, radius }
    }

    /// Whether `point` is inside or on the circle,
    /// allowing [`INSIDE_SLACK_SQ`] on the squared distance.
    #[must_use]
    pub fn contains(self, point: Position<DVec2>) -> bool {
        self.center.distance_squared(point) <= self.radius.squared() + INSIDE_SLACK_SQ
    }
}

impl Interval {
    /// The whole segment.
    pub const FULL: Self = Self { t_in: 0., t_out: 1. };

    /// Clamps both ends into `0..=1` and orders them so that `t_in <= t_out`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let t_in = self.t_in.clamp(0., 1.);
        let t_out = self.t_out.clamp(0., 1.);
        if t_out < t_in { Self { t_in: t_out, t_out: t_in } } else { Self { t_in, t_out } }
    }

    #[must_use]
    pub fn contains(self, t: f64) -> bool { t.between_inclusive(&self.t_in, &self.t_out) }
}
