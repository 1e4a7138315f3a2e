//! Obliquity, nutation, and ecliptic ↔ equatorial conversion
//!
//! Nutation follows the IAU 1980 series as tabulated by Meeus (chapter 22):
//! 63 periodic terms over the five fundamental lunisolar arguments, giving
//! nutation in longitude and in obliquity. The mean obliquity uses the
//! polynomial of Meeus eq. (22.2).
//!
//! The [`Ecliptic`] converter holds a single most-recently-used cache entry
//! keyed on (JDE, mode), so the common pattern of converting many positions
//! at one instant evaluates the series once.

mod nutation_data;

use std::cell::Cell;

use crate::angles::{Angle, SphericalPosition, SphericalPosition3};
use crate::constants::{ASEC2RAD, J2000};
use crate::timelib::julian_centuries;

use nutation_data::{ARG_MULTIPLIERS, LONGITUDE_COEFFS, OBLIQUITY_COEFFS};

/// Mean obliquity of the ecliptic at J2000.0 in arcseconds
const MEAN_OBLIQUITY_J2000_ASEC: f64 = 84_381.448;

/// How nutation enters a coordinate conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObliquityMode {
    /// True obliquity and nutation in longitude applied (apparent place)
    #[default]
    TrueObliquity,
    /// Mean obliquity of date, no nutation
    MeanObliquity,
    /// Mean obliquity fixed at J2000.0, no nutation
    J2000,
    /// Nutation applied with reversed sign, to strip it from a position
    /// that already includes it
    AntiNutation,
}

/// Nutation components and the obliquity to use for one (JDE, mode) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude (zero for the mean and J2000 modes)
    pub longitude: Angle,
    /// Nutation in obliquity (zero for the mean and J2000 modes)
    pub obliquity: Angle,
    /// Obliquity of the ecliptic to rotate by
    pub ecliptic_obliquity: Angle,
}

/// Mean obliquity of the ecliptic at a Julian ephemeris date.
pub fn mean_obliquity(time_jde: f64) -> Angle {
    let t = julian_centuries(time_jde);
    let asec = MEAN_OBLIQUITY_J2000_ASEC + t * (-46.815 + t * (-0.000_59 + t * 0.001_813));
    Angle::from_arcseconds(asec)
}

/// Raw IAU 1980 nutation in longitude and obliquity, both as angles.
fn nutation_series(time_jde: f64) -> (Angle, Angle) {
    let t = julian_centuries(time_jde);

    // Fundamental arguments, Meeus ch. 22, degrees
    let d = 297.850_36 + t * (445_267.111_480 + t * (-0.001_9142 + t / 189_474.0));
    let m = 357.527_72 + t * (35_999.050_340 + t * (-0.000_1603 - t / 300_000.0));
    let mp = 134.962_98 + t * (477_198.867_398 + t * (0.008_6972 + t / 56_250.0));
    let f = 93.271_91 + t * (483_202.017_538 + t * (-0.003_6825 + t / 327_270.0));
    let om = 125.044_52 + t * (-1_934.136_261 + t * (0.002_0708 + t / 450_000.0));

    let args = [
        Angle::from_degrees(d),
        Angle::from_degrees(m),
        Angle::from_degrees(mp),
        Angle::from_degrees(f),
        Angle::from_degrees(om),
    ];

    let mut d_psi = 0.0;
    let mut d_eps = 0.0;
    for (i, mult) in ARG_MULTIPLIERS.iter().enumerate() {
        let mut arg = 0.0;
        for (k, &m) in mult.iter().enumerate() {
            if m != 0 {
                arg += m as f64 * args[k].radians();
            }
        }
        let [s0, s1] = LONGITUDE_COEFFS[i];
        let [c0, c1] = OBLIQUITY_COEFFS[i];
        d_psi += (s0 + s1 * t) * arg.sin();
        d_eps += (c0 + c1 * t) * arg.cos();
    }

    // Coefficients are in units of 0.0001 arcsecond
    (
        Angle::from_radians_signed(d_psi * 1.0e-4 * ASEC2RAD),
        Angle::from_radians_signed(d_eps * 1.0e-4 * ASEC2RAD),
    )
}

/// Stateful converter between ecliptic and equatorial coordinates.
///
/// Not `Sync`; each thread of computation owns its converter, matching the
/// per-instance caching used throughout the crate.
#[derive(Debug, Default)]
pub struct Ecliptic {
    cache: Cell<Option<(f64, ObliquityMode, Nutation)>>,
}

impl Ecliptic {
    pub fn new() -> Self {
        Ecliptic::default()
    }

    /// Nutation and obliquity for a (JDE, mode) pair, cached for repeats.
    pub fn nutation_at(&self, time_jde: f64, mode: ObliquityMode) -> Nutation {
        if let Some((jde, m, n)) = self.cache.get() {
            if jde == time_jde && m == mode {
                return n;
            }
        }

        let n = match mode {
            ObliquityMode::MeanObliquity => Nutation {
                longitude: Angle::ZERO,
                obliquity: Angle::ZERO,
                ecliptic_obliquity: mean_obliquity(time_jde),
            },
            ObliquityMode::J2000 => Nutation {
                longitude: Angle::ZERO,
                obliquity: Angle::ZERO,
                ecliptic_obliquity: mean_obliquity(J2000),
            },
            ObliquityMode::TrueObliquity | ObliquityMode::AntiNutation => {
                let (mut d_psi, mut d_eps) = nutation_series(time_jde);
                if mode == ObliquityMode::AntiNutation {
                    d_psi = -d_psi;
                    d_eps = -d_eps;
                }
                Nutation {
                    longitude: d_psi,
                    obliquity: d_eps,
                    ecliptic_obliquity: mean_obliquity(time_jde) + d_eps,
                }
            }
        };

        self.cache.set(Some((time_jde, mode, n)));
        n
    }

    /// Convert ecliptic longitude/latitude of date to right ascension and
    /// declination. Nutation in longitude is added first when the mode
    /// carries it.
    pub fn to_equatorial(
        &self,
        ecliptic: &SphericalPosition,
        time_jde: f64,
        mode: ObliquityMode,
    ) -> SphericalPosition {
        let n = self.nutation_at(time_jde, mode);
        let lon = ecliptic.longitude + n.longitude;
        let lat = ecliptic.latitude;
        let eps = n.ecliptic_obliquity;

        let ra = f64::atan2(lon.sin() * eps.cos() - lat.tan() * eps.sin(), lon.cos());
        let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();

        SphericalPosition::new(ra, dec)
    }

    /// Convert right ascension/declination to ecliptic longitude/latitude of
    /// date. Nutation in longitude is removed when the mode carries it.
    pub fn to_ecliptic(
        &self,
        equatorial: &SphericalPosition,
        time_jde: f64,
        mode: ObliquityMode,
    ) -> SphericalPosition {
        let n = self.nutation_at(time_jde, mode);
        let ra = equatorial.longitude;
        let dec = equatorial.latitude;
        let eps = n.ecliptic_obliquity;

        let lon = f64::atan2(ra.sin() * eps.cos() + dec.tan() * eps.sin(), ra.cos());
        let lat = (dec.sin() * eps.cos() - dec.cos() * eps.sin() * ra.sin()).asin();

        SphericalPosition::new(lon - n.longitude.radians(), lat)
    }

    /// Radius-preserving variant of [`Ecliptic::to_equatorial`].
    pub fn to_equatorial3(
        &self,
        ecliptic: &SphericalPosition3,
        time_jde: f64,
        mode: ObliquityMode,
    ) -> SphericalPosition3 {
        let angles = self.to_equatorial(&ecliptic.to_2d(), time_jde, mode);
        SphericalPosition3::new(
            angles.longitude.radians(),
            angles.latitude.radians(),
            ecliptic.radius,
        )
    }

    /// Radius-preserving variant of [`Ecliptic::to_ecliptic`].
    pub fn to_ecliptic3(
        &self,
        equatorial: &SphericalPosition3,
        time_jde: f64,
        mode: ObliquityMode,
    ) -> SphericalPosition3 {
        let angles = self.to_ecliptic(&equatorial.to_2d(), time_jde, mode);
        SphericalPosition3::new(
            angles.longitude.radians(),
            angles.latitude.radians(),
            equatorial.radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_obliquity_j2000() {
        // 23 deg 26' 21.448"
        let eps = mean_obliquity(J2000);
        assert_relative_eq!(eps.degrees(), 23.439_291_1, epsilon = 1e-6);
    }

    #[test]
    fn test_nutation_meeus_example() {
        // Meeus example 22.a: 1987 April 10.0 TD = JDE 2446895.5
        let (d_psi, d_eps) = nutation_series(2_446_895.5);
        assert_relative_eq!(d_psi.arcseconds(), -3.788, epsilon = 0.01);
        assert_relative_eq!(d_eps.arcseconds(), 9.443, epsilon = 0.01);
    }

    #[test]
    fn test_true_obliquity_meeus_example() {
        // Meeus example 22.a: true obliquity 23 deg 26' 36.850"
        let ecl = Ecliptic::new();
        let n = ecl.nutation_at(2_446_895.5, ObliquityMode::TrueObliquity);
        assert_relative_eq!(n.ecliptic_obliquity.degrees(), 23.443_569, epsilon = 1e-5);
    }

    #[test]
    fn test_nutation_magnitude_bounded() {
        // Both components stay under ~20 arcseconds at any epoch
        for &jde in &[2_400_000.5, J2000, 2_470_000.0] {
            let (d_psi, d_eps) = nutation_series(jde);
            assert!(d_psi.arcseconds().abs() < 20.0);
            assert!(d_eps.arcseconds().abs() < 20.0);
        }
    }

    #[test]
    fn test_anti_nutation_negates() {
        let ecl = Ecliptic::new();
        let fwd = ecl.nutation_at(J2000, ObliquityMode::TrueObliquity);
        let rev = ecl.nutation_at(J2000, ObliquityMode::AntiNutation);
        assert_relative_eq!(
            fwd.longitude.radians(),
            -rev.longitude.radians(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            fwd.obliquity.radians(),
            -rev.obliquity.radians(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_conversion_round_trip() {
        let ecl = Ecliptic::new();
        let pos = SphericalPosition::from_degrees(123.456, 12.345);
        for mode in [
            ObliquityMode::TrueObliquity,
            ObliquityMode::MeanObliquity,
            ObliquityMode::J2000,
        ] {
            let equ = ecl.to_equatorial(&pos, 2_455_000.0, mode);
            let back = ecl.to_ecliptic(&equ, 2_455_000.0, mode);
            assert_relative_eq!(
                back.longitude.degrees(),
                pos.longitude.degrees(),
                epsilon = 1e-9
            );
            assert_relative_eq!(
                back.latitude.degrees(),
                pos.latitude.degrees(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_zero_latitude_on_ecliptic() {
        // A point on the ecliptic stays at declination eps*sin(lon) roughly;
        // at lon = 90 deg the declination equals the obliquity exactly
        let ecl = Ecliptic::new();
        let pos = SphericalPosition::from_degrees(90.0, 0.0);
        let equ = ecl.to_equatorial(&pos, J2000, ObliquityMode::MeanObliquity);
        assert_relative_eq!(equ.latitude.degrees(), 23.439_291_1, epsilon = 1e-6);
    }

    #[test]
    fn test_cache_hit_same_instant() {
        let ecl = Ecliptic::new();
        let a = ecl.nutation_at(2_455_000.0, ObliquityMode::TrueObliquity);
        let b = ecl.nutation_at(2_455_000.0, ObliquityMode::TrueObliquity);
        assert_eq!(a, b);
        // Switching mode invalidates, switching back recomputes consistently
        let _ = ecl.nutation_at(2_455_000.0, ObliquityMode::MeanObliquity);
        let c = ecl.nutation_at(2_455_000.0, ObliquityMode::TrueObliquity);
        assert_eq!(a, c);
    }
}
