//! Visible-star calculation and disc projection.
//!
//! For a validated observer context and magnitude limit:
//! 1. Compute Julian Day and Local Sidereal Time once.
//! 2. For each catalog star, in catalog order: hour angle = LST − RA, then
//!    altitude/azimuth via the spherical transform.
//! 3. Keep stars with `mag <= limit` *and* altitude strictly above 0.
//! 4. Project survivors onto the output disc with a stereographic-style
//!    mapping: zenith at the center, horizon at the rim.
//!
//! Filtered stars are dropped from the output, never replaced by
//! placeholders; constellation figures are resolved by name downstream, so
//! dropping entries cannot misalign them.

use nalgebra::Point2;
use tracing::debug;

use crate::astro::{equatorial_to_horizontal, ObserverContext};
use crate::catalog;

/// Side length of the output frame in canvas units.
pub const FRAME_SIZE: f64 = 600.0;
/// Center of the projection disc.
pub const DISC_CENTER: (f64, f64) = (300.0, 300.0);
/// Radius of the projection disc; the horizon maps to this circle.
pub const DISC_RADIUS: f64 = 280.0;

/// A star mapped onto the canvas disc.
///
/// Background filler stars use the same shape with `name: None` and
/// magnitudes in [3, 6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    /// Canvas-space position within the 600×600 frame.
    pub position: Point2<f64>,
    pub magnitude: f64,
    /// Catalog name for foreground stars; `None` for background filler.
    pub name: Option<&'static str>,
}

/// Map horizontal coordinates onto the disc.
///
/// `r = DISC_RADIUS * (90 - alt) / 90`, with azimuth 180° (due south)
/// pointing toward the bottom of the frame. Altitude 90° lands on the disc
/// center; altitude 0° lands exactly on the rim.
pub fn project_horizontal(altitude_deg: f64, azimuth_deg: f64) -> Point2<f64> {
    let r = DISC_RADIUS * (90.0 - altitude_deg) / 90.0;
    let theta = (azimuth_deg - 180.0).to_radians();
    Point2::new(
        DISC_CENTER.0 + r * theta.sin(),
        DISC_CENTER.1 - r * theta.cos(),
    )
}

/// Compute the visible foreground stars for an observer and magnitude limit.
///
/// Output preserves catalog order among the stars that survive both
/// filters. An empty result is a valid outcome, not an error: a limit below
/// the catalog minimum (-1.46) always yields an empty list, as does an
/// instant when no candidate is above the horizon.
pub fn visible_stars(observer: &ObserverContext, magnitude_limit: f64) -> Vec<ProjectedStar> {
    let lst = observer.local_sidereal_time();
    let latitude = observer.latitude_deg();

    let mut visible = Vec::new();
    for star in catalog::stars() {
        if star.mag > magnitude_limit {
            continue;
        }
        let hour_angle = lst - star.ra_deg;
        let horizontal = equatorial_to_horizontal(star.dec_deg, hour_angle, latitude);
        if horizontal.altitude_deg <= 0.0 {
            continue;
        }
        visible.push(ProjectedStar {
            position: project_horizontal(horizontal.altitude_deg, horizontal.azimuth_deg),
            magnitude: star.mag,
            name: Some(star.name),
        });
    }

    debug!(
        "visible stars: {} of {} (limit {magnitude_limit}, LST {lst:.3}°)",
        visible.len(),
        catalog::stars().len()
    );
    visible
}
