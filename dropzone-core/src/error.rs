#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("world extent must be positive and finite, got {0}")]
    InvalidWorldExtent(f64),
    #[error("scan step must be positive and finite, got {0}")]
    InvalidScanStep(f64),
    #[error("drop radius must be non-negative and finite, got {0} m")]
    InvalidRadius(f64),
    #[error("{name} threshold must be within 0..=1, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    #[error("hue range {min}..={max} is empty")]
    EmptyHueRange { min: f32, max: f32 },
    #[error("land mask raster has no pixels")]
    EmptyMask,
    #[error("unknown map {0:?}")]
    UnknownMap(String),
}
