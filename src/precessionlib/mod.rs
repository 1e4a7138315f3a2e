//! Precession of equatorial and ecliptic coordinates
//!
//! Rigorous rotation between arbitrary epochs using the IAU 1976 polynomial
//! angles as given by Meeus (chapter 21): ζ, z, θ for equatorial positions
//! and η, Π, p for ecliptic positions. Both take a starting and final epoch
//! as Julian ephemeris dates; neither is restricted to J2000 as one of the
//! endpoints.

use crate::angles::{Angle, SphericalPosition, SphericalPosition3};
use crate::constants::{ASEC2RAD, J2000, JULIAN_CENTURY};

/// Declinations closer than this to a celestial pole switch to the
/// cosine-based formula; asin of a near-unit argument loses precision there.
const POLE_LIMIT: f64 = ASEC2RAD;

/// Equatorial precession angles ζ, z, θ in radians.
fn equatorial_angles(jde_from: f64, jde_to: f64) -> (f64, f64, f64) {
    let big_t = (jde_from - J2000) / JULIAN_CENTURY;
    let t = (jde_to - jde_from) / JULIAN_CENTURY;

    let zeta = (2_306.2181 + big_t * (1.396_56 - big_t * 0.000_139)) * t
        + (0.301_88 - 0.000_344 * big_t) * t * t
        + 0.017_998 * t * t * t;
    let z = (2_306.2181 + big_t * (1.396_56 - big_t * 0.000_139)) * t
        + (1.094_68 + 0.000_066 * big_t) * t * t
        + 0.018_203 * t * t * t;
    let theta = (2_004.3109 - big_t * (0.853_30 + big_t * 0.000_217)) * t
        - (0.426_65 + 0.000_217 * big_t) * t * t
        - 0.041_833 * t * t * t;

    (zeta * ASEC2RAD, z * ASEC2RAD, theta * ASEC2RAD)
}

/// Ecliptic precession angles η, Π, p in radians.
fn ecliptic_angles(jde_from: f64, jde_to: f64) -> (f64, f64, f64) {
    let big_t = (jde_from - J2000) / JULIAN_CENTURY;
    let t = (jde_to - jde_from) / JULIAN_CENTURY;

    let eta = (47.0029 + big_t * (-0.066_03 + big_t * 0.000_598)) * t
        + (-0.033_02 + 0.000_598 * big_t) * t * t
        + 0.000_060 * t * t * t;
    let pi = 174.876_384 * 3_600.0 + big_t * (3_289.4789 + big_t * 0.606_22)
        - (869.8089 + 0.504_91 * big_t) * t
        + 0.035_36 * t * t;
    let p = (5_029.0966 + big_t * (2.222_26 - big_t * 0.000_042)) * t
        + (1.111_13 - 0.000_042 * big_t) * t * t
        - 0.000_006 * t * t * t;

    (eta * ASEC2RAD, pi * ASEC2RAD, p * ASEC2RAD)
}

/// Precess right ascension and declination from one epoch to another.
pub fn precess_equatorial(
    position: &SphericalPosition,
    jde_from: f64,
    jde_to: f64,
) -> SphericalPosition {
    if jde_from == jde_to {
        return *position;
    }
    let (zeta, z, theta) = equatorial_angles(jde_from, jde_to);

    let ra_zeta = position.longitude + Angle::new(zeta, position.longitude.mode());
    let dec = position.latitude;
    let (sin_th, cos_th) = theta.sin_cos();

    let a = dec.cos() * ra_zeta.sin();
    let b = cos_th * dec.cos() * ra_zeta.cos() - sin_th * dec.sin();
    let c = sin_th * dec.cos() * ra_zeta.cos() + cos_th * dec.sin();

    let ra = a.atan2(b) + z;
    let dec_out = if (dec.radians().abs() - std::f64::consts::FRAC_PI_2).abs() < POLE_LIMIT {
        // Near either pole c is ~±1; recover the codeclination from a,b instead
        a.hypot(b).clamp(-1.0, 1.0).acos().copysign(c)
    } else {
        c.clamp(-1.0, 1.0).asin()
    };

    SphericalPosition::new(ra, dec_out)
}

/// Precess ecliptic longitude and latitude from one epoch to another.
pub fn precess_ecliptic(
    position: &SphericalPosition,
    jde_from: f64,
    jde_to: f64,
) -> SphericalPosition {
    if jde_from == jde_to {
        return *position;
    }
    let (eta, pi, p) = ecliptic_angles(jde_from, jde_to);

    let lon = position.longitude;
    let lat = position.latitude;
    let (sin_eta, cos_eta) = eta.sin_cos();
    let pi_lon = Angle::from_radians(pi - lon.radians());

    let a = cos_eta * lat.cos() * pi_lon.sin() - sin_eta * lat.sin();
    let b = lat.cos() * pi_lon.cos();
    let c = cos_eta * lat.sin() + sin_eta * lat.cos() * pi_lon.sin();

    let lon_out = p + pi - a.atan2(b);
    let lat_out = if (lat.radians().abs() - std::f64::consts::FRAC_PI_2).abs() < POLE_LIMIT {
        a.hypot(b).clamp(-1.0, 1.0).acos().copysign(c)
    } else {
        c.clamp(-1.0, 1.0).asin()
    };

    SphericalPosition::new(lon_out, lat_out)
}

/// Radius-preserving variant of [`precess_equatorial`].
pub fn precess_equatorial3(
    position: &SphericalPosition3,
    jde_from: f64,
    jde_to: f64,
) -> SphericalPosition3 {
    let p = precess_equatorial(&position.to_2d(), jde_from, jde_to);
    SphericalPosition3::new(p.longitude.radians(), p.latitude.radians(), position.radius)
}

/// Radius-preserving variant of [`precess_ecliptic`].
pub fn precess_ecliptic3(
    position: &SphericalPosition3,
    jde_from: f64,
    jde_to: f64,
) -> SphericalPosition3 {
    let p = precess_ecliptic(&position.to_2d(), jde_from, jde_to);
    SphericalPosition3::new(p.longitude.radians(), p.latitude.radians(), position.radius)
}

/// Annual general precession in ecliptic longitude at an epoch, radians
/// per Julian year. Used by low-precision element updates.
pub fn general_precession_rate(jde: f64) -> f64 {
    let t = (jde - J2000) / JULIAN_CENTURY;
    (50.290_966 + 0.022_2226 * t) * ASEC2RAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_theta_persei_meeus_example() {
        // Meeus example 21.b: theta Persei from J2000 to 2028 Nov 13.19 TD,
        // proper motion already applied to the starting place
        let start = SphericalPosition::from_degrees(41.054_063, 49.227_750);
        let end = precess_equatorial(&start, J2000, 2_462_088.69);
        assert_relative_eq!(end.longitude.degrees(), 41.547_214, epsilon = 1e-5);
        assert_relative_eq!(end.latitude.degrees(), 49.348_483, epsilon = 1e-5);
    }

    #[test]
    fn test_venus_ecliptic_meeus_example() {
        // Meeus example 21.c: Venus from J2000 back to -214 June 30
        let start = SphericalPosition::from_degrees(149.481_94, 1.765_49);
        let end = precess_ecliptic(&start, J2000, 1_643_074.5);
        assert_relative_eq!(end.longitude.degrees(), 118.704, epsilon = 1e-3);
        assert_relative_eq!(end.latitude.degrees(), 1.615, epsilon = 1e-3);
    }

    #[test]
    fn test_equatorial_round_trip() {
        let epochs = [1_000_000.0, 1_750_000.0, 2_451_545.0, 3_000_000.0];
        let pos = SphericalPosition::from_degrees(201.25, -11.375);
        for &a in &epochs {
            for &b in &epochs {
                let out = precess_equatorial(&precess_equatorial(&pos, a, b), b, a);
                assert_relative_eq!(
                    out.longitude.radians(),
                    pos.longitude.radians(),
                    epsilon = 1e-8
                );
                assert_relative_eq!(
                    out.latitude.radians(),
                    pos.latitude.radians(),
                    epsilon = 1e-8
                );
            }
        }
    }

    #[test]
    fn test_ecliptic_round_trip() {
        let pos = SphericalPosition::from_degrees(310.0, 5.2);
        let out = precess_ecliptic(&precess_ecliptic(&pos, J2000, 2_200_000.0), 2_200_000.0, J2000);
        assert_relative_eq!(out.longitude.radians(), pos.longitude.radians(), epsilon = 1e-8);
        assert_relative_eq!(out.latitude.radians(), pos.latitude.radians(), epsilon = 1e-8);
    }

    #[test]
    fn test_same_epoch_is_identity() {
        let pos = SphericalPosition::from_degrees(123.0, 45.0);
        let out = precess_equatorial(&pos, 2_455_000.0, 2_455_000.0);
        assert_eq!(out, pos);
    }

    #[test]
    fn test_near_pole_stays_finite() {
        // Half an arcsecond from the north celestial pole
        let dec = 90.0 - 0.5 / 3_600.0;
        let pos = SphericalPosition::from_degrees(10.0, dec);
        let out = precess_equatorial(&pos, J2000, J2000 + 50.0 * 365.25);
        assert!(out.longitude.radians().is_finite());
        assert!(out.latitude.radians().is_finite());
        assert!(out.latitude.degrees() > 89.0);
    }

    #[test]
    fn test_radius_preserved_in_3d() {
        let pos = SphericalPosition3::new(1.0, 0.5, 3.75);
        let out = precess_equatorial3(&pos, J2000, 2_460_000.0);
        assert_relative_eq!(out.radius, 3.75, epsilon = 1e-15);
    }

    #[test]
    fn test_general_precession_rate_magnitude() {
        // About 50.29 arcseconds per year at J2000
        let rate = general_precession_rate(J2000);
        assert_relative_eq!(rate / ASEC2RAD, 50.290_966, epsilon = 1e-6);
    }
}
