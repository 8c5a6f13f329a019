//! Land/water classification backed by an alpha raster.
//!
//! A mask is an RGBA image covering the square world space,
//! where opaque pixels mark land and transparent pixels mark water.
//! Decoding and storing the image is left to the caller.

use bevy::log;
use bevy_math::DVec2;
use image::{Rgb, Rgba, RgbaImage};
use math::Position;
use serde::{Deserialize, Serialize};

use crate::{Classify, Error};


/// Pixels with alpha above this value are land.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 10;

/// An alpha raster stretched over the world space `0..world_extent` in both axes.
#[derive(Clone)]
pub struct LandMask {
    image:           RgbaImage,
    world_extent:    f64,
    alpha_threshold: u8,
}

impl LandMask {
    /// Wraps a decoded mask image.
    ///
    /// # Errors
    /// Returns an error if the image has no pixels
    /// or `world_extent` is not a positive finite value.
    pub fn new(image: RgbaImage, world_extent: f64) -> Result<Self, Error> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::EmptyMask);
        }
        if !(world_extent.is_finite() && world_extent > 0.) {
            return Err(Error::InvalidWorldExtent(world_extent));
        }

        Ok(Self { image, world_extent, alpha_threshold: DEFAULT_ALPHA_THRESHOLD })
    }

    #[must_use]
    pub fn with_alpha_threshold(mut self, alpha_threshold: u8) -> Self {
        self.alpha_threshold = alpha_threshold;
        self
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage { &self.image }

    #[must_use]
    pub fn world_extent(&self) -> f64 { self.world_extent }

    /// Returns the pixel nearest to `position`.
    ///
    /// Positions outside the map are clamped onto the raster edge.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "pixel is clamped into the raster"
    )]
    pub fn pixel_of(&self, position: Position<DVec2>) -> [u32; 2] {
        let size = DVec2::new(f64::from(self.image.width()), f64::from(self.image.height()));
        let scaled = position.get() * size / self.world_extent;
        let pixel = scaled.clamp(DVec2::ZERO, size - DVec2::ONE).round();
        [pixel.x as u32, pixel.y as u32]
    }

    /// Fraction of pixels that are land.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "pixel counts fit in the f64 mantissa")]
    pub fn land_fraction(&self) -> f64 {
        let land = self.image.pixels().filter(|pixel| self.is_land_pixel(**pixel)).count();
        land as f64 / (f64::from(self.image.width()) * f64::from(self.image.height()))
    }

    fn is_land_pixel(&self, Rgba([_, _, _, alpha]): Rgba<u8>) -> bool {
        alpha > self.alpha_threshold
    }
}

impl Classify for LandMask {
    fn is_land(&self, position: Position<DVec2>) -> bool {
        let [x, y] = self.pixel_of(position);
        self.is_land_pixel(*self.image.get_pixel(x, y))
    }
}

/// Classifies with a mask if one is loaded, and reports land everywhere otherwise.
#[derive(Clone, Copy, Default)]
pub struct MaskClassifier<'a> {
    mask: Option<&'a LandMask>,
}

impl<'a> MaskClassifier<'a> {
    #[must_use]
    pub const fn new(mask: Option<&'a LandMask>) -> Self { Self { mask } }
}

impl Classify for MaskClassifier<'_> {
    fn is_land(&self, position: Position<DVec2>) -> bool {
        self.mask.is_none_or(|mask| mask.is_land(position))
    }
}

/// Colour range classified as water when generating a mask from a map image.
///
/// Hue is measured in turns, i.e. `0..1` covers the whole colour wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterThresholds {
    pub hue_min:        f32,
    pub hue_max:        f32,
    pub saturation_min: f32,
    pub value_min:      f32,
}

impl Default for WaterThresholds {
    fn default() -> Self {
        Self { hue_min: 0.45, hue_max: 0.72, saturation_min: 0.22, value_min: 0.12 }
    }
}

impl WaterThresholds {
    /// Checks that every threshold is within `0..=1` and the hue range is not empty.
    ///
    /// # Errors
    /// Returns the first offending threshold.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("hue_min", self.hue_min),
            ("hue_max", self.hue_max),
            ("saturation_min", self.saturation_min),
            ("value_min", self.value_min),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidThreshold { name, value });
            }
        }
        if self.hue_min > self.hue_max {
            return Err(Error::EmptyHueRange { min: self.hue_min, max: self.hue_max });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_water(&self, color: Rgb<u8>) -> bool {
        let Hsv { hue, saturation, value } = Hsv::from_rgb(color);
        (self.hue_min..=self.hue_max).contains(&hue)
            && saturation >= self.saturation_min
            && value >= self.value_min
    }
}

/// A colour in hue/saturation/value form, each component within `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in turns, within `0..1`.
    pub hue:        f32,
    pub saturation: f32,
    pub value:      f32,
}

impl Hsv {
    #[must_use]
    pub fn from_rgb(Rgb(channels): Rgb<u8>) -> Self {
        let [r, g, b] = channels.map(|channel| f32::from(channel) / 255.);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let mut hue = if delta == 0. {
            0.
        } else if max == r {
            ((g - b) / delta) % 6.
        } else if max == g {
            (b - r) / delta + 2.
        } else {
            (r - g) / delta + 4.
        };
        hue /= 6.;
        if hue < 0. {
            hue += 1.;
        }

        let saturation = if max == 0. { 0. } else { delta / max };
        Self { hue, saturation, value: max }
    }
}

/// Generates a land mask from a map image by treating blue-ish pixels as water.
///
/// Water pixels become fully transparent and every other pixel opaque white.
/// The alpha channel of `map` is ignored.
///
/// # Errors
/// Returns an error if `map` has no pixels or `world_extent` is invalid.
pub fn auto_mask(
    map: &RgbaImage,
    thresholds: &WaterThresholds,
    world_extent: f64,
) -> Result<LandMask, Error> {
    let mut image = RgbaImage::new(map.width(), map.height());
    for (source, target) in map.pixels().zip(image.pixels_mut()) {
        let Rgba([r, g, b, _]) = *source;
        let alpha = if thresholds.is_water(Rgb([r, g, b])) { 0 } else { u8::MAX };
        *target = Rgba([u8::MAX, u8::MAX, u8::MAX, alpha]);
    }

    let mask = LandMask::new(image, world_extent)?;
    log::debug!(
        "generated {}x{} mask with {:.1}% land",
        map.width(),
        map.height(),
        mask.land_fraction() * 100.
    );
    Ok(mask)
}
