//! World-space quantities.
//!
//! Positions and distances all live in one unit-agnostic linear coordinate system.
//! Conversion to real-world meters is the responsibility of the map catalog.

use std::{fmt, ops};

use bevy_math::DVec2;

mod position;
pub use position::Position;


/// A linear world-space quantity.
///
/// `Length<f64>` is a scalar distance, `Length<DVec2>` is a displacement.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Length<T>(pub T);

impl<T> Length<T> {
    pub const fn new(value: T) -> Self { Self(value) }
}

impl Length<f64> {
    pub const ZERO: Self = Self(0.);

    /// Square of the distance, in squared world units.
    #[must_use]
    pub fn squared(self) -> f64 { self.0 * self.0 }

    #[must_use]
    pub fn is_positive(self) -> bool { self.0 > 0. }

}

impl Length<DVec2> {
    pub const ZERO: Self = Self(DVec2::ZERO);

    #[must_use]
    pub fn from_xy(x: f64, y: f64) -> Self { Self(DVec2 { x, y }) }

    #[must_use]
    pub fn x(self) -> Length<f64> { Length(self.0.x) }

    #[must_use]
    pub fn y(self) -> Length<f64> { Length(self.0.y) }

    /// Dot product of two displacements, in squared world units.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 { self.0.dot(other.0) }

    /// Squared norm of the displacement, in squared world units.
    #[must_use]
    pub fn magnitude_squared(self) -> f64 { self.0.length_squared() }

    #[must_use]
    pub fn magnitude_exact(self) -> Length<f64> { Length(self.0.length()) }
}

impl fmt::Debug for Length<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Length").field(&self.0).finish()
    }
}

impl fmt::Debug for Length<DVec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length").field("x", &self.0.x).field("y", &self.0.y).finish()
    }
}

impl<T: ops::Add<Output = T>> ops::Add for Length<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self { Self(self.0 + other.0) }
}

impl<T: ops::AddAssign> ops::AddAssign for Length<T> {
    fn add_assign(&mut self, other: Self) { self.0 += other.0; }
}

impl<T: ops::Sub<Output = T>> ops::Sub for Length<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self { Self(self.0 - other.0) }
}

impl<T: ops::SubAssign> ops::SubAssign for Length<T> {
    fn sub_assign(&mut self, other: Self) { self.0 -= other.0; }
}

impl<T: ops::Mul<f64, Output = T>> ops::Mul<f64> for Length<T> {
    type Output = Self;

    fn mul(self, other: f64) -> Self { Self(self.0 * other) }
}

impl<T: ops::Div<f64, Output = T>> ops::Div<f64> for Length<T> {
    type Output = Self;

    fn div(self, other: f64) -> Self { Self(self.0 / other) }
}
