//! Deterministic synthetic background star field.
//!
//! The field is purely decorative filler behind the catalog stars. It is a
//! function of location and instant with two deliberate properties:
//!
//! - **Location seeds, time rotates.** The generator seed derives from
//!   latitude/longitude only, so a given place always produces the same
//!   multiset of (radius, base-angle, magnitude) draws in the same order.
//!   The instant enters solely as a rigid rotation of every angle by the
//!   Local Sidereal Time, mimicking the sky turning overhead.
//! - **Always dimmer than the foreground.** Magnitudes are drawn from
//!   [3, 6), below any realistic foreground limit, so filler never outshines
//!   a real catalog star.
//!
//! Draws per point, in order: radius in [0, 280), base angle in [0, 2π),
//! magnitude in [3, 6).

use std::f64::consts::TAU;

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::astro::ObserverContext;
use crate::position::{ProjectedStar, DISC_CENTER, DISC_RADIUS};

/// Derive the 64-bit generator seed from an observer location.
///
/// The documented derivation is `|lat·1000 + lng·1000| mod 10000`; the
/// fractional part is kept (via the bit pattern) so nearby locations with
/// sub-millidegree differences still get distinct fields. `StdRng`'s
/// SplitMix-style seed expansion does the mixing, replacing the sine-based
/// toy recurrence this scheme descends from.
pub fn location_seed(latitude_deg: f64, longitude_deg: f64) -> u64 {
    let raw = (latitude_deg * 1000.0 + longitude_deg * 1000.0).abs() % 10000.0;
    raw.to_bits()
}

/// Generate `count` background stars for the observer.
///
/// Calling twice with identical arguments returns identical sequences.
/// Calling with the same location and a different instant returns the same
/// radii and magnitudes with every angle shifted by the LST delta.
pub fn background_field(count: usize, observer: &ObserverContext) -> Vec<ProjectedStar> {
    let seed = location_seed(observer.latitude_deg(), observer.longitude_deg());
    let mut rng = StdRng::seed_from_u64(seed);

    let sky_rotation = observer.local_sidereal_time().to_radians();

    (0..count)
        .map(|_| {
            let r = rng.random::<f64>() * DISC_RADIUS;
            let theta = rng.random::<f64>() * TAU + sky_rotation;
            let magnitude = 3.0 + rng.random::<f64>() * 3.0;
            ProjectedStar {
                position: Point2::new(
                    DISC_CENTER.0 + r * theta.cos(),
                    DISC_CENTER.1 + r * theta.sin(),
                ),
                magnitude,
                name: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn observer_at(lat: f64, lng: f64, hour: u32) -> ObserverContext {
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, hour, 0, 0).unwrap();
        ObserverContext::new(lat, lng, instant).unwrap()
    }

    #[test]
    fn identical_arguments_give_identical_sequences() {
        let obs = observer_at(40.7128, -74.006, 0);
        let a = background_field(200, &obs);
        let b = background_field(200, &obs);
        assert_eq!(a, b);
    }

    #[test]
    fn different_locations_give_different_fields() {
        let a = background_field(50, &observer_at(40.7128, -74.006, 0));
        let b = background_field(50, &observer_at(51.5074, -0.1278, 0));
        assert_ne!(a, b);
    }

    #[test]
    fn magnitudes_stay_in_the_dim_band() {
        let obs = observer_at(-33.87, 151.21, 12);
        for star in background_field(500, &obs) {
            assert!((3.0..6.0).contains(&star.magnitude));
        }
    }

    #[test]
    fn time_change_is_a_pure_rotation() {
        let obs1 = observer_at(40.7128, -74.006, 0);
        let obs2 = observer_at(40.7128, -74.006, 6);
        let f1 = background_field(100, &obs1);
        let f2 = background_field(100, &obs2);

        let expected_delta = (obs2.local_sidereal_time() - obs1.local_sidereal_time())
            .to_radians()
            .rem_euclid(TAU);

        for (s1, s2) in f1.iter().zip(&f2) {
            let r1 = (s1.position - Point2::new(DISC_CENTER.0, DISC_CENTER.1)).norm();
            let r2 = (s2.position - Point2::new(DISC_CENTER.0, DISC_CENTER.1)).norm();
            assert!((r1 - r2).abs() < 1e-9, "radius changed: {r1} vs {r2}");
            assert!((s1.magnitude - s2.magnitude).abs() < 1e-12);

            if r1 > 1e-6 {
                let a1 = (s1.position.y - DISC_CENTER.1).atan2(s1.position.x - DISC_CENTER.0);
                let a2 = (s2.position.y - DISC_CENTER.1).atan2(s2.position.x - DISC_CENTER.0);
                let delta = (a2 - a1).rem_euclid(TAU);
                let diff = (delta - expected_delta).abs();
                assert!(
                    diff < 1e-6 || (TAU - diff) < 1e-6,
                    "angle delta {delta} != LST delta {expected_delta}"
                );
            }
        }
    }
}
