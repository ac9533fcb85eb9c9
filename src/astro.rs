//! Time and coordinate conversions for observer-local sky geometry.
//!
//! The chain used by the rest of the crate:
//! 1. Civil UTC instant → Julian Day (Gregorian calendar formula with the
//!    civil-time day fraction).
//! 2. Julian Day + longitude → Local Sidereal Time via the GMST polynomial.
//! 3. Equatorial (RA/Dec) + hour angle + latitude → horizontal (alt/az).
//!
//! This is fixed-epoch math: no precession, nutation, refraction, or proper
//! motion. It positions a static catalog, not an ephemeris.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::error::StarMapError;

pub const J2000_JD: f64 = 2451545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const GMST_BASE_DEG: f64 = 280.46061837;
pub const GMST_ROTATION_PER_DAY: f64 = 360.98564736629;
pub const GMST_CORRECTION: f64 = 0.000387933;

/// Keeps `sin(alt)` strictly inside (-1, 1) so the azimuth denominator
/// `cos(alt)` never reaches zero at the zenith or nadir.
const SIN_ALT_LIMIT: f64 = 1.0 - 1e-9;

/// An observation site and instant. Immutable per render.
///
/// Construct through [`ObserverContext::new`], which validates coordinate
/// ranges and fails fast instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverContext {
    latitude_deg: f64,
    longitude_deg: f64,
    instant: DateTime<Utc>,
}

impl ObserverContext {
    /// Validate and build an observer context.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]; both
    /// must be finite. Out-of-range input returns
    /// [`StarMapError::InvalidObserverPosition`].
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        instant: DateTime<Utc>,
    ) -> Result<Self, StarMapError> {
        let lat_ok = latitude_deg.is_finite() && (-90.0..=90.0).contains(&latitude_deg);
        let lng_ok = longitude_deg.is_finite() && (-180.0..=180.0).contains(&longitude_deg);
        if !lat_ok || !lng_ok {
            return Err(StarMapError::InvalidObserverPosition {
                latitude: latitude_deg,
                longitude: longitude_deg,
            });
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            instant,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Julian Day of this observer's instant.
    pub fn julian_day(&self) -> f64 {
        julian_day(self.instant)
    }

    /// Local Sidereal Time at this observer's longitude, degrees in [0, 360).
    pub fn local_sidereal_time(&self) -> f64 {
        local_sidereal_time(self.julian_day(), self.longitude_deg)
    }
}

/// Horizontal coordinates relative to a specific observer and instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    /// Degrees above the horizon; negative below.
    pub altitude_deg: f64,
    /// Degrees east of north, in [0, 360).
    pub azimuth_deg: f64,
}

/// Convert a civil UTC instant to a Julian Day count.
///
/// Gregorian calendar day-number formula plus the civil-time fraction
/// `(h + m/60 + s/3600) / 24`. The integer part is the midnight-anchored
/// day number; [`local_sidereal_time`] is calibrated against the same
/// convention, so the pair must be used together.
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    let year = instant.year() as i64;
    let month = instant.month() as i64;
    let day = instant.day() as i64;

    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    let day_number =
        day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;

    let day_fraction = (instant.hour() as f64
        + instant.minute() as f64 / 60.0
        + instant.second() as f64 / 3600.0)
        / 24.0;

    day_number as f64 + day_fraction
}

/// Greenwich Mean Sidereal Time polynomial evaluated at `jd`, shifted to the
/// observer's longitude. Returns degrees normalized into [0, 360).
pub fn local_sidereal_time(jd: f64, longitude_deg: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = d / DAYS_PER_JULIAN_CENTURY;
    let gmst = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * d
        + t * t * (GMST_CORRECTION - t / 38710000.0);
    (gmst + longitude_deg).rem_euclid(360.0)
}

/// Transform equatorial coordinates to horizontal coordinates.
///
/// All arguments and results are in degrees. `hour_angle_deg` is
/// `LST - RA` for the star in question; right ascension itself only enters
/// through the hour angle.
///
/// `sin(alt)` is clamped just inside ±1 before the azimuth denominators are
/// formed, so azimuth stays finite through the zenith and nadir. The clamp
/// perturbs altitude by well under a milliarcsecond and is never surfaced
/// as an error.
pub fn equatorial_to_horizontal(
    dec_deg: f64,
    hour_angle_deg: f64,
    latitude_deg: f64,
) -> Horizontal {
    let dec = dec_deg.to_radians();
    let ha = hour_angle_deg.to_radians();
    let lat = latitude_deg.to_radians();

    let sin_alt = (dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos())
        .clamp(-SIN_ALT_LIMIT, SIN_ALT_LIMIT);
    let altitude = sin_alt.asin();
    let cos_alt = altitude.cos();

    let sin_az = -ha.sin() * dec.cos() / cos_alt;
    let cos_az = (dec.sin() - lat.sin() * sin_alt) / (lat.cos() * cos_alt);
    let azimuth_deg = sin_az.atan2(cos_az).to_degrees().rem_euclid(360.0);

    Horizontal {
        altitude_deg: altitude.to_degrees(),
        azimuth_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn julian_day_j2000_reference() {
        // Midnight-anchored day number: J2000 noon lands on 2451545.5.
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(instant) - 2451545.5).abs() < 1e-9);
    }

    #[test]
    fn julian_day_civil_fraction() {
        let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let six_am = Utc.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap();
        assert!((julian_day(six_am) - julian_day(midnight) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn lst_normalized_and_longitude_shifted() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let jd = julian_day(instant);
        for lng in [-180.0, -74.006, 0.0, 139.69] {
            let lst = local_sidereal_time(jd, lng);
            assert!((0.0..360.0).contains(&lst), "LST {lst} out of range");
        }
        // Longitude enters additively (mod 360).
        let l0 = local_sidereal_time(jd, 0.0);
        let l90 = local_sidereal_time(jd, 90.0);
        assert!(((l90 - l0).rem_euclid(360.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn horizontal_transform_zenith_is_finite() {
        // A star on the local meridian with dec == lat passes through the
        // zenith; azimuth must stay finite under the clamp.
        let h = equatorial_to_horizontal(45.0, 0.0, 45.0);
        assert!((h.altitude_deg - 90.0).abs() < 0.01);
        assert!(h.altitude_deg <= 90.0);
        assert!(h.azimuth_deg.is_finite());
        assert!((0.0..360.0).contains(&h.azimuth_deg));
    }

    #[test]
    fn horizontal_transform_celestial_pole() {
        // From mid-northern latitude, the north celestial pole sits at
        // altitude == latitude, azimuth == 0 (due north), for any hour angle.
        for ha in [0.0, 90.0, 200.0] {
            let h = equatorial_to_horizontal(90.0, ha, 40.0);
            assert!((h.altitude_deg - 40.0).abs() < 1e-6);
        }
    }

    #[test]
    fn observer_context_rejects_bad_coordinates() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(ObserverContext::new(91.0, 0.0, instant).is_err());
        assert!(ObserverContext::new(-90.5, 0.0, instant).is_err());
        assert!(ObserverContext::new(0.0, 180.1, instant).is_err());
        assert!(ObserverContext::new(f64::NAN, 0.0, instant).is_err());
        assert!(ObserverContext::new(40.7128, -74.006, instant).is_ok());
    }
}
