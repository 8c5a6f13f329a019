use std::{fmt, ops};

use bevy_math::DVec2;

use super::Length;

/// A point in world space.
#[derive(Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Position<T>(pub Length<T>);

impl<T> Position<T> {
    pub const fn new(value: T) -> Self { Position(Length::new(value)) }

    pub fn get(self) -> T { self.0.0 }
}

impl Position<DVec2> {
    pub const ORIGIN: Self = Self(Length::new(DVec2::ZERO));

    #[must_use]
    pub fn from_origin(x: f64, y: f64) -> Self { Position(Length::new(DVec2 { x, y })) }

    #[must_use]
    pub fn x(self) -> f64 { self.get().x }

    #[must_use]
    pub fn y(self) -> f64 { self.get().y }

    /// Squared distance to `other`, in squared world units.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 { (self - other).magnitude_squared() }

    #[must_use]
    pub fn distance_exact(self, other: Self) -> Length<f64> { (self - other).magnitude_exact() }
}

impl fmt::Debug for Position<DVec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position").field("x", &self.x()).field("y", &self.y()).finish()
    }
}

impl fmt::Display for Position<DVec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x(), self.y())
    }
}

impl<T: ops::AddAssign> ops::Add<Length<T>> for Position<T> {
    type Output = Self;

    fn add(mut self, rhs: Length<T>) -> Self::Output {
        self.0 += rhs;
        self
    }
}

impl<T: ops::AddAssign> ops::AddAssign<Length<T>> for Position<T> {
    fn add_assign(&mut self, rhs: Length<T>) { self.0 += rhs; }
}

impl<T: ops::SubAssign> ops::Sub<Length<T>> for Position<T> {
    type Output = Self;

    fn sub(mut self, rhs: Length<T>) -> Self::Output {
        self.0 -= rhs;
        self
    }
}

impl<T: ops::SubAssign> ops::SubAssign<Length<T>> for Position<T> {
    fn sub_assign(&mut self, rhs: Length<T>) { self.0 -= rhs; }
}

impl<T: ops::Sub<Output = T>> ops::Sub for Position<T> {
    type Output = Length<T>;

    fn sub(self, rhs: Self) -> Length<T> { self.0 - rhs.0 }
}
