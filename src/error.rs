//! Error taxonomy for the star-map pipeline.
//!
//! Invalid observer input fails fast rather than being clamped: a clamped
//! latitude would compute a plausible but wrong sky. An empty visible set is
//! *not* an error — a magnitude limit below the catalog minimum, or an
//! instant with nothing above the horizon, is a valid result.

use thiserror::Error;

/// Errors produced by scene construction and the raster export path.
#[derive(Debug, Error)]
pub enum StarMapError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or a
    /// non-finite coordinate.
    #[error("invalid observer position: latitude {latitude}°, longitude {longitude}°")]
    InvalidObserverPosition { latitude: f64, longitude: f64 },

    /// The raster target surface cannot be drawn into (zero-sized).
    /// Not retried automatically; the caller must re-acquire a surface.
    #[error("render surface unavailable: {width}x{height} pixels")]
    RenderSurfaceUnavailable { width: u32, height: u32 },

    /// PNG encoding of a rendered surface failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] image::ImageError),
}
