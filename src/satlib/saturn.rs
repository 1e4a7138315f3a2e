//! The eight classical satellites of Saturn
//!
//! A mean-element model: every moon orbits in the ring plane of Meeus
//! chapter 45, the four inner moons on circular orbits and the four outer
//! ones with a fixed eccentricity and one elliptical Kepler pass. The
//! ring-plane orientation toward the observer is the pole pseudo-satellite,
//! resolved once per instant and reused for all eight moons, Iapetus
//! inward.
//!
//! Accuracy is a few hundredths of a Saturn radius for the inner moons,
//! which is enough for disc-relation event timing to the minute. Iapetus
//! really orbits about 15 degrees out of the ring plane, so its predicted
//! disc crossings are indicative only.

use crate::angles::{Angle, SphericalPosition3};
use crate::constants::{LIGHT_DAYS_PER_AU, SATURN_FLATTENING, SATURN_RADIUS_KM};
use crate::keplerlib::eccentric_anomaly;
use crate::planetlib::{Planet, PlanetaryTheory, Vsop87Theory};
use crate::timelib::{julian_centuries, ut_to_tdb};

use super::{perspective_scale, MoonInfo, Perspective, SatelliteTheory};

const NAMES: [&str; 8] = [
    "Mimas", "Enceladus", "Tethys", "Dione", "Rhea", "Titan", "Hyperion", "Iapetus",
];

/// Peak angular rate per moon in Saturn radii per minute
const MAX_RATES: [f64; 8] = [
    0.014_3, 0.012_6, 0.011_3, 0.010_0, 0.008_5, 0.005_6, 0.005_2, 0.003_3,
];

/// Mean orbit of one moon in the ring plane.
///
/// Longitudes are measured from the ring plane's ascending node on the
/// ecliptic; the epoch is J2000.0.
struct MeanOrbit {
    /// Semi-major axis in Saturn equatorial radii
    a: f64,
    /// Sidereal period in days
    period: f64,
    eccentricity: f64,
    /// Mean longitude at epoch, degrees
    epoch_longitude: f64,
    /// Longitude of pericenter, degrees
    pericenter: f64,
}

const ORBITS: [MeanOrbit; 8] = [
    MeanOrbit {
        a: 3.0786,
        period: 0.942_421_8,
        eccentricity: 0.0,
        epoch_longitude: 125.59,
        pericenter: 0.0,
    },
    MeanOrbit {
        a: 3.9494,
        period: 1.370_220_9,
        eccentricity: 0.0,
        epoch_longitude: 85.61,
        pericenter: 0.0,
    },
    MeanOrbit {
        a: 4.8894,
        period: 1.887_802_6,
        eccentricity: 0.0,
        epoch_longitude: 9.84,
        pericenter: 0.0,
    },
    MeanOrbit {
        a: 6.2622,
        period: 2.736_915_0,
        eccentricity: 0.0,
        epoch_longitude: 175.73,
        pericenter: 0.0,
    },
    MeanOrbit {
        a: 8.7450,
        period: 4.517_500_0,
        eccentricity: 0.001,
        epoch_longitude: 152.53,
        pericenter: 345.0,
    },
    MeanOrbit {
        a: 20.2737,
        period: 15.945_421_0,
        eccentricity: 0.028_8,
        epoch_longitude: 15.23,
        pericenter: 185.7,
    },
    MeanOrbit {
        a: 24.9000,
        period: 21.276_600_0,
        eccentricity: 0.027_4,
        epoch_longitude: 295.87,
        pericenter: 324.2,
    },
    MeanOrbit {
        a: 59.0800,
        period: 79.330_200_0,
        eccentricity: 0.028_3,
        epoch_longitude: 356.02,
        pericenter: 275.9,
    },
];

/// Inclination and ascending node of Saturn's ring plane on the ecliptic
/// of date (Meeus 45.1).
pub fn ring_orientation(time_jde: f64) -> (Angle, Angle) {
    let t = julian_centuries(time_jde);
    let inclination = 28.075_216 + t * (-0.012_998 + t * 0.000_004);
    let node = 169.508_470 + t * (1.394_681 + t * 0.000_412);
    (
        Angle::from_degrees(inclination),
        Angle::from_degrees(node),
    )
}

/// Ring-plane orientation toward one observer at one instant.
struct PoleView {
    /// Days from J2000, light-time corrected to Saturn
    d_corrected: f64,
    /// Tilt of the ring plane toward the observer, B
    tilt: Angle,
    /// In-plane longitude of the sub-observer point from the node
    sub_longitude: Angle,
    /// Saturn's distance from the vantage point, AU
    distance_au: f64,
}

fn pole_view(time_jde: f64, perspective: Perspective) -> PoleView {
    let theory = Vsop87Theory;
    let saturn = theory.heliocentric(Planet::Saturn, time_jde);

    // Saturn's place as seen from the chosen vantage point
    let seen = match perspective {
        Perspective::Earth => {
            let earth = theory.heliocentric(Planet::Earth, time_jde);
            let geocentric = saturn.to_rectangular() - earth.to_rectangular();
            SphericalPosition3::from_rectangular(&geocentric)
        }
        Perspective::Sun => saturn,
    };

    let (inclination, node) = ring_orientation(time_jde);
    let rel = seen.longitude - node;
    let beta = seen.latitude;

    let tilt = (inclination.sin() * beta.cos() * rel.sin() - inclination.cos() * beta.sin())
        .clamp(-1.0, 1.0)
        .asin();
    let sub_longitude = f64::atan2(
        inclination.sin() * beta.sin() + inclination.cos() * beta.cos() * rel.sin(),
        beta.cos() * rel.cos(),
    );

    PoleView {
        d_corrected: time_jde - 2_451_545.0 - seen.radius * LIGHT_DAYS_PER_AU,
        tilt: Angle::from_radians_signed(tilt),
        sub_longitude: Angle::from_radians(sub_longitude),
        distance_au: seen.radius,
    }
}

/// In-plane position angle from the sub-observer point and radius in
/// Saturn radii.
fn moon_orbit(orbit: &MeanOrbit, pole: &PoleView) -> (Angle, f64) {
    let n = 360.0 / orbit.period;
    let mean_longitude = Angle::from_degrees(orbit.epoch_longitude + n * pole.d_corrected);

    let (in_plane, radius) = if orbit.eccentricity == 0.0 {
        (mean_longitude, orbit.a)
    } else {
        let e = orbit.eccentricity;
        let pericenter = Angle::from_degrees(orbit.pericenter);
        let mean_anomaly = (mean_longitude - pericenter).with_mode(crate::angles::AngleMode::Signed);
        let big_e = eccentric_anomaly(e, mean_anomaly.radians());
        let true_anomaly =
            2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (big_e / 2.0).tan()).atan();
        (
            pericenter + Angle::from_radians_signed(true_anomaly),
            orbit.a * (1.0 - e * big_e.cos()),
        )
    };

    (in_plane - pole.sub_longitude, radius)
}

/// The classical Saturnian moons, Mimas through Iapetus.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaturnMoons;

impl SatelliteTheory for SaturnMoons {
    fn satellite_count(&self) -> usize {
        8
    }

    fn satellite_names(&self) -> &'static [&'static str] {
        &NAMES
    }

    fn flattening(&self) -> f64 {
        SATURN_FLATTENING
    }

    fn positions(&self, time_jdu: f64, perspective: Perspective) -> Vec<MoonInfo> {
        let jde = ut_to_tdb(time_jdu);
        let pole = pole_view(jde, perspective);

        // Iapetus first, matching the outward-in processing order
        let mut moons: Vec<MoonInfo> = (0..8)
            .rev()
            .map(|i| {
                let (u, r) = moon_orbit(&ORBITS[i], &pole);
                let x = r * u.sin();
                let y = -r * u.cos() * pole.tilt.sin();
                let z = r * u.cos() * pole.tilt.cos();
                let w = perspective_scale(pole.distance_au, z, SATURN_RADIUS_KM);
                MoonInfo::classify(i, x * w, y * w, z, SATURN_FLATTENING)
            })
            .collect();
        moons.reverse();
        moons
    }

    fn max_radii_per_minute(&self) -> Option<&'static [f64]> {
        Some(&MAX_RATES)
    }
}
