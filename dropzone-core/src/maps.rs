//! Catalog of playable maps and their real-world scale.
//!
//! Every map is drawn into the same square world space of `world_extent` units,
//! so the number of meters per unit depends on the map.

use std::str::FromStr;

use math::{Length, range_steps};
use serde::{Deserialize, Serialize};

use crate::Error;


/// Side of the square world space, in world units.
pub const DEFAULT_WORLD_EXTENT: f64 = 900.;

/// Drop radius selected when none is given, in meters.
pub const DEFAULT_RADIUS_M: f64 = 700.;

/// Granularity of the selectable drop radii, in meters.
pub const RADIUS_STEP_M: f64 = 50.;

/// Largest selectable drop radius, in meters.
pub const MAX_RADIUS_M: f64 = 1250.;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MapId {
    Erangel,
    Miramar,
    Taego,
    Deston,
    Vikendi,
    Rondo,
    Sanhok,
    Paramo,
    Karakin,
}

impl MapId {
    /// Parses a map identifier such as `"erangel"`.
    pub fn parse(id: &str) -> Result<Self, Error> {
        Self::from_str(id).map_err(|_| Error::UnknownMap(id.to_owned()))
    }

    /// Human-readable map name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Erangel => "Erangel",
            Self::Miramar => "Miramar",
            Self::Taego => "Taego",
            Self::Deston => "Deston",
            Self::Vikendi => "Vikendi",
            Self::Rondo => "Rondo",
            Self::Sanhok => "Sanhok",
            Self::Paramo => "Paramo",
            Self::Karakin => "Karakin",
        }
    }

    /// Side length of the square map, in kilometers.
    #[must_use]
    pub fn size_km(self) -> f64 {
        match self {
            Self::Erangel
            | Self::Miramar
            | Self::Taego
            | Self::Deston
            | Self::Vikendi
            | Self::Rondo => 8.,
            Self::Sanhok => 4.,
            Self::Paramo => 3.,
            Self::Karakin => 2.,
        }
    }

    #[must_use]
    pub fn meters_per_unit(self, world_extent: f64) -> f64 {
        self.size_km() * 1000. / world_extent
    }

    /// Converts a distance in meters on this map into world units.
    #[must_use]
    pub fn meters_to_world(self, meters: f64, world_extent: f64) -> Length<f64> {
        Length::new(meters / self.meters_per_unit(world_extent))
    }

    /// Converts a world-space distance on this map into meters.
    #[must_use]
    pub fn world_to_meters(self, distance: Length<f64>, world_extent: f64) -> f64 {
        distance.0 * self.meters_per_unit(world_extent)
    }
}

/// Selectable drop radii in meters, ascending from [`RADIUS_STEP_M`] to [`MAX_RADIUS_M`].
pub fn radius_options_m() -> impl Iterator<Item = f64> + Clone {
    range_steps(RADIUS_STEP_M, MAX_RADIUS_M, RADIUS_STEP_M)
}
