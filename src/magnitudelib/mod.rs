//! Apparent-magnitude models
//!
//! Empirical polynomials in phase angle and distance, Astronomical Almanac
//! 1984 coefficients as collected by Meeus chapter 41. Saturn carries extra
//! ring terms, the Moon uses Allen's phase law, and minor bodies use the
//! IAU H,G system for asteroids and the g,k law for comets.
//!
//! Bodies without a model report [`UNKNOWN_MAGNITUDE`] instead of failing.

use crate::angles::Angle;
use crate::constants::UNKNOWN_MAGNITUDE;
use crate::planetlib::Planet;

/// Mean geocentric lunar distance in AU, zero point of the lunar model
const MOON_MEAN_DISTANCE_AU: f64 = 0.002_569_6;

/// Phase-polynomial coefficients per planet: [c0, c1, c2, c3] over the
/// phase angle in degrees. Uranus and Neptune show no usable phase term.
const PLANET_TERMS: [[f64; 4]; 8] = [
    [-0.42, 0.038_0, -0.000_273, 0.000_002],
    [-4.40, 0.000_9, 0.000_239, -0.000_000_65],
    [0.0, 0.0, 0.0, 0.0], // Earth, no model
    [-1.52, 0.016, 0.0, 0.0],
    [-9.40, 0.005, 0.0, 0.0],
    [-8.88, 0.0, 0.0, 0.0],
    [-7.19, 0.0, 0.0, 0.0],
    [-6.87, 0.0, 0.0, 0.0],
];

/// Shared distance term: 5 log10(r * delta).
fn distance_term(r_au: f64, delta_au: f64) -> f64 {
    5.0 * (r_au * delta_au).log10()
}

/// Apparent magnitude of the Sun at a geocentric distance in AU.
pub fn sun_magnitude(delta_au: f64) -> f64 {
    -26.74 + 5.0 * delta_au.log10()
}

/// Apparent magnitude of a major planet.
///
/// `phase_angle` is the Sun-body-Earth angle, `r_au` the heliocentric and
/// `delta_au` the geocentric distance. Saturn is returned without ring
/// terms; [`saturn_magnitude`] adds them. Earth has no defined magnitude
/// and reports the sentinel.
pub fn planet_magnitude(planet: Planet, phase_angle: Angle, r_au: f64, delta_au: f64) -> f64 {
    if planet == Planet::Earth {
        return UNKNOWN_MAGNITUDE;
    }
    let i = phase_angle.degrees().abs();
    let c = &PLANET_TERMS[planet.index()];
    c[0] + i * (c[1] + i * (c[2] + i * c[3])) + distance_term(r_au, delta_au)
}

/// Apparent magnitude of Saturn including the ring contribution.
///
/// `ring_tilt` is the Saturnicentric latitude B of the observer; the rings
/// brighten the planet by up to about 2.6 magnitudes when wide open.
pub fn saturn_magnitude(phase_angle: Angle, r_au: f64, delta_au: f64, ring_tilt: Angle) -> f64 {
    let sin_b = ring_tilt.sin().abs();
    planet_magnitude(Planet::Saturn, phase_angle, r_au, delta_au) - 2.60 * sin_b
        + 1.25 * sin_b * sin_b
}

/// Apparent magnitude of Pluto.
pub fn pluto_magnitude(r_au: f64, delta_au: f64) -> f64 {
    -1.00 + distance_term(r_au, delta_au)
}

/// Apparent magnitude of the Moon from Allen's phase law.
pub fn moon_magnitude(phase_angle: Angle, delta_au: f64) -> f64 {
    let i = phase_angle.degrees().abs();
    -12.73 + 0.026 * i + 4.0e-9 * i.powi(4) + 5.0 * (delta_au / MOON_MEAN_DISTANCE_AU).log10()
}

/// Apparent magnitude of an asteroid from the IAU H,G phase system.
pub fn asteroid_magnitude(h: f64, g: f64, phase_angle: Angle, r_au: f64, delta_au: f64) -> f64 {
    let half_tan = (phase_angle.radians().abs() / 2.0).tan();
    let phi1 = (-3.33 * half_tan.powf(0.63)).exp();
    let phi2 = (-1.87 * half_tan.powf(1.22)).exp();
    let blend = ((1.0 - g) * phi1 + g * phi2).max(1.0e-12);
    h + distance_term(r_au, delta_au) - 2.5 * blend.log10()
}

/// Apparent magnitude of a comet from its absolute magnitude `g_abs` and
/// activity slope `k`.
pub fn comet_magnitude(g_abs: f64, k: f64, r_au: f64, delta_au: f64) -> f64 {
    g_abs + 5.0 * delta_au.log10() + 2.5 * k * r_au.log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_venus_meeus_example() {
        // Geometry of Meeus example 41.c: i = 72.96 deg, r = 0.724604,
        // delta = 0.910947. The 1984 Almanac coefficients give -4.22
        // (Muller's older formula, which Meeus also quotes, gives -3.8)
        let m = planet_magnitude(
            Planet::Venus,
            Angle::from_degrees(72.96),
            0.724_604,
            0.910_947,
        );
        assert_relative_eq!(m, -4.22, epsilon = 0.05);
    }

    #[test]
    fn test_saturn_rings_brighten() {
        let phase = Angle::from_degrees(3.0);
        let edge_on = saturn_magnitude(phase, 9.5, 8.5, Angle::from_degrees(0.0));
        let open = saturn_magnitude(phase, 9.5, 8.5, Angle::from_degrees(26.0));
        assert!(open < edge_on, "open rings must be brighter: {open} vs {edge_on}");
        assert_relative_eq!(
            edge_on,
            planet_magnitude(Planet::Saturn, phase, 9.5, 8.5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_earth_has_no_model() {
        let m = planet_magnitude(Planet::Earth, Angle::from_degrees(10.0), 1.0, 1.0);
        assert_eq!(m, UNKNOWN_MAGNITUDE);
    }

    #[test]
    fn test_sun_at_one_au() {
        assert_relative_eq!(sun_magnitude(1.0), -26.74, epsilon = 1e-12);
    }

    #[test]
    fn test_full_moon_at_mean_distance() {
        let m = moon_magnitude(Angle::from_degrees(0.0), MOON_MEAN_DISTANCE_AU);
        assert_relative_eq!(m, -12.73, epsilon = 1e-10);
    }

    #[test]
    fn test_moon_fades_with_phase() {
        let full = moon_magnitude(Angle::from_degrees(2.0), MOON_MEAN_DISTANCE_AU);
        let quarter = moon_magnitude(Angle::from_degrees(90.0), MOON_MEAN_DISTANCE_AU);
        assert!(quarter > full + 2.0, "{quarter} vs {full}");
    }

    #[test]
    fn test_asteroid_ceres_opposition() {
        // Ceres: H = 3.34, G = 0.12; near opposition at r = 2.77, delta = 1.77
        let m = asteroid_magnitude(3.34, 0.12, Angle::from_degrees(1.0), 2.77, 1.77);
        assert!((6.5..7.5).contains(&m), "m = {m}");
    }

    #[test]
    fn test_asteroid_phase_dims() {
        let near = asteroid_magnitude(3.34, 0.12, Angle::from_degrees(1.0), 2.77, 1.77);
        let far = asteroid_magnitude(3.34, 0.12, Angle::from_degrees(25.0), 2.77, 1.77);
        assert!(far > near);
    }

    #[test]
    fn test_comet_law_matches_hand_calculation() {
        // m = g + 5 log10(delta) + 2.5 k log10(r)
        let m = comet_magnitude(6.0, 4.0, 2.0, 1.0);
        assert_relative_eq!(m, 6.0 + 10.0 * 2.0_f64.log10(), epsilon = 1e-12);
    }
}
