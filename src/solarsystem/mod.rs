//! Unified solar-system query facade
//!
//! One entry point over every position provider in the crate: body
//! identifiers select the provider, bit-flags select precision and the
//! correction pipeline, and the time base is explicit at every call (JDU
//! for observation-facing queries, JDE for physics-facing ones).
//!
//! Geocentric queries layer light-time and aberration on top of the
//! heliocentric providers by iterating the body's position at
//! `T - lightDays * distance` up to three times (once for the Moon). The
//! `ASTROMETRIC`, `ABERRATION`, `TRUE_DISTANCE`, and `DELAYED_TIME` flags
//! pick which combination of delayed position and distance comes back.
//!
//! Failures follow the crate-wide sentinel policy: an unavailable
//! subsystem, an unknown body, or a date outside a provider's validity
//! window yields `None` (or [`UNKNOWN_MAGNITUDE`]), never a panic.

use nalgebra::Vector3;

use crate::angles::{Angle, SphericalPosition, SphericalPosition3};
use crate::constants::{AU_KM, J2000, LIGHT_DAYS_PER_AU, UNKNOWN_MAGNITUDE};
use crate::eclipselib::EclipseInfo;
use crate::ecliptic::{Ecliptic, ObliquityMode};
use crate::keplerlib::OrbitalElements;
use crate::magnitudelib;
use crate::minorlib::{ElementRecord, MinorBodies, MinorBodyError};
use crate::moonlib::Moon;
use crate::observerlib::{refraction, Observer};
use crate::planetlib::{
    quick_heliocentric, quick_sun_geocentric, Planet, PlanetaryTheory, Vsop87Theory,
};
use crate::plutolib;
use crate::satlib::jupiter::JupiterMoons;
use crate::satlib::saturn::{ring_orientation, SaturnMoons};
use crate::satlib::{MoonInfo, Perspective, SatelliteTheory};
use crate::timelib::ut_to_tdb;

/// Body identifiers on the query surface.
pub const SUN: u32 = 0;
pub const MERCURY: u32 = 1;
pub const VENUS: u32 = 2;
pub const EARTH: u32 = 3;
pub const MARS: u32 = 4;
pub const JUPITER: u32 = 5;
pub const SATURN: u32 = 6;
pub const URANUS: u32 = 7;
pub const NEPTUNE: u32 = 8;
pub const PLUTO: u32 = 9;
pub const MOON: u32 = 10;
/// First Jovian satellite identifier (Io)
pub const JOVIAN_BASE: u32 = 5_000;
/// First Saturnian satellite identifier (Mimas)
pub const SATURNIAN_BASE: u32 = 6_000;
/// First asteroid identifier
pub const ASTEROID_BASE: u32 = 20_000;
/// First comet identifier
pub const COMET_BASE: u32 = 30_000;

/// Query option bit-flags.
pub mod flags {
    /// Prefer the cheap polynomial models everywhere
    pub const LOW_PRECISION: u32 = 1 << 0;
    /// Prefer the full analytic series (the default)
    pub const HIGH_PRECISION: u32 = 1 << 1;
    /// Apply nutation to frame conversions
    pub const NUTATION: u32 = 1 << 2;
    /// Apply diurnal parallax for the observer's site
    pub const TOPOCENTRIC: u32 = 1 << 3;
    /// Apply atmospheric refraction to altitudes
    pub const REFRACTION: u32 = 1 << 4;
    /// Low-precision closed-form Sun
    pub const QUICK_SUN: u32 = 1 << 5;
    /// Mean-element planets instead of the full series
    pub const QUICK_PLANET: u32 = 1 << 6;
    /// Light-time iteration; current-epoch position at delayed distance
    pub const ABERRATION: u32 = 1 << 7;
    /// Light-time iteration; delayed position and delayed distance
    pub const ASTROMETRIC: u32 = 1 << 8;
    /// Light-time iteration; delayed position, true distance
    pub const TRUE_DISTANCE: u32 = 1 << 9;
    /// Light-time iteration; delayed position, radius slot holds the
    /// delay in days
    pub const DELAYED_TIME: u32 = 1 << 10;
    /// Hour angles folded into [-pi, pi)
    pub const SIGNED_HOUR_ANGLE: u32 = 1 << 11;
    /// Refer equatorial results to J2000 instead of the equinox of date
    pub const NO_PRECESSION: u32 = 1 << 12;
}

/// Any flag that requests the light-time iteration.
const DELAY_FLAGS: u32 =
    flags::ABERRATION | flags::ASTROMETRIC | flags::TRUE_DISTANCE | flags::DELAYED_TIME;

/// What a heliocentric query resolves: a body on the identifier surface or
/// an already-built element set (minor-body interpolation hands these out).
#[derive(Debug, Clone)]
pub enum Target {
    ById(u32),
    Resolved(OrbitalElements),
}

impl From<u32> for Target {
    fn from(body_id: u32) -> Target {
        Target::ById(body_id)
    }
}

impl Target {
    fn body_id(&self) -> Option<u32> {
        match self {
            Target::ById(id) => Some(*id),
            Target::Resolved(_) => None,
        }
    }
}

/// True for Mercury through Neptune, the bodies every planet-only code
/// path accepts.
pub fn is_true_planet(body_id: u32) -> bool {
    (MERCURY..=NEPTUNE).contains(&body_id)
}

/// Great Red Spot longitude table: dated System II longitude samples plus
/// drift rates for extrapolation before, inside, and after the table.
#[derive(Debug, Clone, PartialEq)]
pub struct GrsTable {
    /// Degrees per day applied before the first, between (fallback when a
    /// gap has no second sample), and after the last sample
    pub drift_rates: [f64; 3],
    /// (JDU, System II longitude in degrees), sorted by date
    pub samples: Vec<(f64, f64)>,
}

/// Saturn ring-plane opening geometry at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Inclination of the ring plane to the ecliptic of date
    pub inclination: Angle,
    /// Ascending node of the ring plane on the ecliptic of date
    pub node: Angle,
    /// Saturnicentric latitude of the Earth, the apparent ring opening
    pub earth_tilt: Angle,
    /// Saturnicentric latitude of the Sun, the lit side selector
    pub sun_tilt: Angle,
}

/// The facade over every provider.
///
/// Owns one instance of each per-instance cache (nutation, lunar memo,
/// minor-body convergence memo); independent engines never share state.
#[derive(Debug, Default)]
pub struct SolarSystem {
    theory: Vsop87Theory,
    ecliptic: Ecliptic,
    moon: Moon,
    minor: MinorBodies,
    jupiter_moons: JupiterMoons,
    saturn_moons: SaturnMoons,
    grs: Option<GrsTable>,
}

impl SolarSystem {
    pub fn new() -> Self {
        SolarSystem::default()
    }

    /// Load the minor-body element table; queries for asteroid/comet ids
    /// stay unavailable until this succeeds.
    pub fn initialize_minor_bodies(
        &mut self,
        records: Vec<ElementRecord>,
    ) -> Result<(), MinorBodyError> {
        self.minor.initialize(records)
    }

    /// Load the Great Red Spot longitude table.
    pub fn initialize_grs(&mut self, mut table: GrsTable) {
        table
            .samples
            .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        self.grs = Some(table);
    }

    pub fn minor_bodies(&self) -> &MinorBodies {
        &self.minor
    }

    /// System II longitude of the Great Red Spot at a UT instant.
    ///
    /// `None` until a table with at least one sample has been loaded.
    pub fn grs_longitude(&self, time_jdu: f64) -> Option<Angle> {
        let table = self.grs.as_ref()?;
        let samples = &table.samples;
        let first = samples.first()?;
        let last = samples[samples.len() - 1];

        let degrees = if time_jdu <= first.0 {
            first.1 + table.drift_rates[0] * (time_jdu - first.0)
        } else if time_jdu >= last.0 {
            last.1 + table.drift_rates[2] * (time_jdu - last.0)
        } else {
            let upper = samples.partition_point(|s| s.0 <= time_jdu);
            let (t0, l0) = samples[upper - 1];
            let (t1, l1) = samples[upper];
            if t1 > t0 {
                l0 + (l1 - l0) * (time_jdu - t0) / (t1 - t0)
            } else {
                l0 + table.drift_rates[1] * (time_jdu - t0)
            }
        };
        Some(Angle::from_degrees(degrees))
    }

    fn planet_helio(&self, planet: Planet, time_jde: f64, option_flags: u32) -> SphericalPosition3 {
        if option_flags & (flags::LOW_PRECISION | flags::QUICK_PLANET) != 0 {
            quick_heliocentric(planet, time_jde)
        } else {
            self.theory.heliocentric(planet, time_jde)
        }
    }

    /// Heliocentric ecliptic position of a target at a Julian ephemeris
    /// date.
    ///
    /// Satellites resolve to their primary. `None` for bodies whose
    /// provider has no answer: Pluto outside its fit window, minor bodies
    /// before the table loads or past both solver regimes.
    pub fn heliocentric(
        &self,
        target: &Target,
        time_jde: f64,
        option_flags: u32,
    ) -> Option<SphericalPosition3> {
        let body_id = match target {
            Target::Resolved(elements) => {
                let dt = time_jde - elements.perihelion_time;
                return crate::keplerlib::heliocentric_position(elements, dt, false).ok();
            }
            Target::ById(id) => *id,
        };

        match body_id {
            SUN => Some(SphericalPosition3::new(0.0, 0.0, 0.0)),
            MERCURY..=NEPTUNE => {
                let planet = Planet::from_index((body_id - 1) as usize)?;
                Some(self.planet_helio(planet, time_jde, option_flags))
            }
            PLUTO => plutolib::heliocentric_position(time_jde),
            MOON => {
                let earth = self.planet_helio(Planet::Earth, time_jde, option_flags);
                let v = earth.to_rectangular()
                    + self.moon.geocentric_position(time_jde).to_rectangular();
                Some(SphericalPosition3::from_rectangular(&v))
            }
            id if (JOVIAN_BASE..SATURNIAN_BASE).contains(&id) => {
                Some(self.planet_helio(Planet::Jupiter, time_jde, option_flags))
            }
            id if (SATURNIAN_BASE..ASTEROID_BASE).contains(&id) => {
                Some(self.planet_helio(Planet::Saturn, time_jde, option_flags))
            }
            id if id >= ASTEROID_BASE => self.minor.heliocentric_position(id, time_jde).ok(),
            _ => None,
        }
    }

    /// Geocentric ecliptic place of a target at one instant, no delay.
    fn geocentric_at(
        &self,
        target: &Target,
        time_jde: f64,
        option_flags: u32,
        earth: &Vector3<f64>,
    ) -> Option<SphericalPosition3> {
        match target.body_id() {
            Some(MOON) => Some(self.moon.geocentric_position(time_jde)),
            Some(SUN) if option_flags & (flags::LOW_PRECISION | flags::QUICK_SUN) != 0 => {
                Some(quick_sun_geocentric(time_jde))
            }
            _ => {
                let helio = self.heliocentric(target, time_jde, option_flags)?;
                let v = helio.to_rectangular() - earth;
                Some(SphericalPosition3::from_rectangular(&v))
            }
        }
    }

    /// Geocentric ecliptic position at a UT instant.
    ///
    /// Without any of the delay flags the geometric position comes back.
    /// With them, the light-time iteration runs and the flag picks the
    /// combination of delayed position and distance (see the flag docs).
    pub fn ecliptic_position(
        &self,
        target: &Target,
        time_jdu: f64,
        option_flags: u32,
    ) -> Option<SphericalPosition3> {
        let jde = ut_to_tdb(time_jdu);
        let earth = self
            .planet_helio(Planet::Earth, jde, option_flags)
            .to_rectangular();
        let geometric = self.geocentric_at(target, jde, option_flags, &earth)?;

        if option_flags & DELAY_FLAGS == 0 {
            return Some(geometric);
        }

        let iterations = if target.body_id() == Some(MOON) { 1 } else { 3 };
        let mut delay = geometric.radius * LIGHT_DAYS_PER_AU;
        let mut delayed = geometric;
        for _ in 0..iterations {
            delayed = self.geocentric_at(target, jde - delay, option_flags, &earth)?;
            delay = delayed.radius * LIGHT_DAYS_PER_AU;
        }

        let result = if option_flags & flags::ASTROMETRIC != 0 {
            delayed
        } else if option_flags & flags::TRUE_DISTANCE != 0 {
            SphericalPosition3 {
                radius: geometric.radius,
                ..delayed
            }
        } else if option_flags & flags::DELAYED_TIME != 0 {
            SphericalPosition3 {
                radius: delay,
                ..delayed
            }
        } else {
            SphericalPosition3 {
                radius: delayed.radius,
                ..geometric
            }
        };
        Some(result)
    }

    /// Geocentric equatorial position at a UT instant.
    ///
    /// Nutation enters when the `NUTATION` flag is set; `NO_PRECESSION`
    /// refers the result to J2000 instead of the equinox of date.
    pub fn equatorial_position(
        &self,
        target: &Target,
        time_jdu: f64,
        option_flags: u32,
    ) -> Option<SphericalPosition3> {
        let ecl = self.ecliptic_position(target, time_jdu, option_flags)?;
        let jde = ut_to_tdb(time_jdu);
        let mode = if option_flags & flags::NUTATION != 0 {
            ObliquityMode::TrueObliquity
        } else {
            ObliquityMode::MeanObliquity
        };
        let eq = self.ecliptic.to_equatorial3(&ecl, jde, mode);
        if option_flags & flags::NO_PRECESSION != 0 {
            Some(crate::precessionlib::precess_equatorial3(&eq, jde, J2000))
        } else {
            Some(eq)
        }
    }

    /// Horizontal (azimuth/altitude) position for an observer at a UT
    /// instant. `TOPOCENTRIC` applies diurnal parallax first and
    /// `REFRACTION` lifts the altitude afterward.
    pub fn horizontal_position<O: Observer + ?Sized>(
        &self,
        target: &Target,
        time_jdu: f64,
        observer: &O,
        option_flags: u32,
    ) -> Option<SphericalPosition3> {
        let eq = self.equatorial_position(target, time_jdu, option_flags)?;
        let place = if option_flags & flags::TOPOCENTRIC != 0 {
            observer.topocentric(time_jdu, &eq)
        } else {
            eq
        };
        let horiz = observer.equatorial_to_horizontal(time_jdu, &place.to_2d());
        let altitude = if option_flags & flags::REFRACTION != 0 {
            horiz.altitude().radians() + refraction(horiz.altitude()).radians()
        } else {
            horiz.altitude().radians()
        };
        Some(SphericalPosition3::new(
            horiz.azimuth().radians(),
            altitude,
            place.radius,
        ))
    }

    /// Local hour angle of a target for an observer at a UT instant.
    pub fn hour_angle<O: Observer + ?Sized>(
        &self,
        target: &Target,
        time_jdu: f64,
        observer: &O,
        option_flags: u32,
    ) -> Option<Angle> {
        let eq = self.equatorial_position(target, time_jdu, option_flags)?;
        Some(observer.local_hour_angle(
            time_jdu,
            eq.longitude,
            option_flags & flags::SIGNED_HOUR_ANGLE != 0,
        ))
    }

    /// Sun-body-Earth phase angle at a UT instant.
    pub fn phase_angle(&self, target: &Target, time_jdu: f64, option_flags: u32) -> Option<Angle> {
        let jde = ut_to_tdb(time_jdu);
        let geo = self.ecliptic_position(target, time_jdu, option_flags)?;
        let r = match target.body_id() {
            Some(MOON) => {
                // Moon: heliocentric distance through Earth's
                let helio = self.heliocentric(&Target::ById(MOON), jde, option_flags)?;
                helio.radius
            }
            Some(SUN) => return Some(Angle::ZERO),
            _ => self.heliocentric(target, jde, option_flags)?.radius,
        };
        let big_r = self.planet_helio(Planet::Earth, jde, option_flags).radius;
        let delta = geo.radius;

        let cos_phase = (r * r + delta * delta - big_r * big_r) / (2.0 * r * delta);
        Some(Angle::from_radians(cos_phase.clamp(-1.0, 1.0).acos()))
    }

    /// Fraction of the disc illuminated, in [0, 1].
    pub fn illuminated_fraction(
        &self,
        target: &Target,
        time_jdu: f64,
        option_flags: u32,
    ) -> Option<f64> {
        let phase = self.phase_angle(target, time_jdu, option_flags)?;
        Some((1.0 + phase.cos()) / 2.0)
    }

    /// Angular distance from the Sun as seen from Earth.
    pub fn elongation(&self, target: &Target, time_jdu: f64, option_flags: u32) -> Option<Angle> {
        let body = self.ecliptic_position(target, time_jdu, option_flags)?;
        let sun = self.ecliptic_position(&Target::ById(SUN), time_jdu, option_flags)?;
        Some(body.distance_from(&sun))
    }

    /// Apparent magnitude of a body, [`UNKNOWN_MAGNITUDE`] when no model
    /// exists for it.
    pub fn magnitude(&self, target: &Target, time_jdu: f64, option_flags: u32) -> f64 {
        let Some(geo) = self.ecliptic_position(target, time_jdu, option_flags) else {
            return UNKNOWN_MAGNITUDE;
        };
        let delta = geo.radius;
        let Some(body_id) = target.body_id() else {
            return UNKNOWN_MAGNITUDE;
        };

        match body_id {
            SUN => magnitudelib::sun_magnitude(delta),
            MOON => match self.phase_angle(target, time_jdu, option_flags) {
                Some(phase) => magnitudelib::moon_magnitude(phase, delta),
                None => UNKNOWN_MAGNITUDE,
            },
            MERCURY..=NEPTUNE if body_id != EARTH => {
                let jde = ut_to_tdb(time_jdu);
                let Some(planet) = Planet::from_index((body_id - 1) as usize) else {
                    return UNKNOWN_MAGNITUDE;
                };
                let Some(phase) = self.phase_angle(target, time_jdu, option_flags) else {
                    return UNKNOWN_MAGNITUDE;
                };
                let r = self.planet_helio(planet, jde, option_flags).radius;
                if planet == Planet::Saturn {
                    let rings = self.saturn_rings(time_jdu, option_flags);
                    magnitudelib::saturn_magnitude(phase, r, delta, rings.earth_tilt)
                } else {
                    magnitudelib::planet_magnitude(planet, phase, r, delta)
                }
            }
            PLUTO => {
                let jde = ut_to_tdb(time_jdu);
                match plutolib::heliocentric_position(jde) {
                    Some(helio) => magnitudelib::pluto_magnitude(helio.radius, delta),
                    None => UNKNOWN_MAGNITUDE,
                }
            }
            id if id >= ASTEROID_BASE => {
                let jde = ut_to_tdb(time_jdu);
                let Some(helio) = self.heliocentric(target, jde, option_flags) else {
                    return UNKNOWN_MAGNITUDE;
                };
                let Some((m1, m2)) = self.minor.magnitude_params(id) else {
                    return UNKNOWN_MAGNITUDE;
                };
                if id >= COMET_BASE {
                    magnitudelib::comet_magnitude(m1, m2, helio.radius, delta)
                } else {
                    match self.phase_angle(target, time_jdu, option_flags) {
                        Some(phase) => {
                            magnitudelib::asteroid_magnitude(m1, m2, phase, helio.radius, delta)
                        }
                        None => UNKNOWN_MAGNITUDE,
                    }
                }
            }
            _ => UNKNOWN_MAGNITUDE,
        }
    }

    /// Saturn ring opening toward Earth and Sun at a UT instant.
    pub fn saturn_rings(&self, time_jdu: f64, option_flags: u32) -> RingGeometry {
        let jde = ut_to_tdb(time_jdu);
        let (inclination, node) = ring_orientation(jde);

        let tilt = |pos: &SphericalPosition3| {
            let rel = pos.longitude - node;
            Angle::from_radians_signed(
                (inclination.sin() * pos.latitude.cos() * rel.sin()
                    - inclination.cos() * pos.latitude.sin())
                .clamp(-1.0, 1.0)
                .asin(),
            )
        };

        let helio = self.planet_helio(Planet::Saturn, jde, option_flags);
        let earth_tilt = match self.ecliptic_position(&Target::ById(SATURN), time_jdu, option_flags)
        {
            Some(geo) => tilt(&geo),
            None => tilt(&helio),
        };

        RingGeometry {
            inclination,
            node,
            earth_tilt,
            sun_tilt: tilt(&helio),
        }
    }

    /// Shadow geometry of Earth at the Moon, classified, at a UT instant.
    pub fn lunar_eclipse(&self, time_jdu: f64, option_flags: u32) -> Option<EclipseInfo> {
        let sun = self.ecliptic_position(&Target::ById(SUN), time_jdu, option_flags)?;
        let moon = self.ecliptic_position(&Target::ById(MOON), time_jdu, option_flags)?;

        let shadow_center = SphericalPosition::new(
            sun.longitude.radians() + std::f64::consts::PI,
            -sun.latitude.radians(),
        );
        let separation = moon.to_2d().distance_from(&shadow_center);
        Some(EclipseInfo::lunar(
            sun.radius * AU_KM,
            moon.radius * AU_KM,
            separation,
        ))
    }

    /// Sun/Moon disc geometry classified as a solar eclipse, at a UT
    /// instant.
    pub fn solar_eclipse(&self, time_jdu: f64, option_flags: u32) -> Option<EclipseInfo> {
        let sun = self.ecliptic_position(&Target::ById(SUN), time_jdu, option_flags)?;
        let moon = self.ecliptic_position(&Target::ById(MOON), time_jdu, option_flags)?;
        let separation = moon.distance_from(&sun);
        Some(EclipseInfo::solar(
            sun.radius * AU_KM,
            moon.radius * AU_KM,
            separation,
            None,
        ))
    }

    /// The satellite theory serving a body identifier: the primary planet
    /// or any of its satellite ids.
    pub fn satellite_theory(&self, body_id: u32) -> Option<&dyn SatelliteTheory> {
        match body_id {
            JUPITER => Some(&self.jupiter_moons),
            SATURN => Some(&self.saturn_moons),
            id if (JOVIAN_BASE..SATURNIAN_BASE).contains(&id) => Some(&self.jupiter_moons),
            id if (SATURNIAN_BASE..ASTEROID_BASE).contains(&id) => Some(&self.saturn_moons),
            _ => None,
        }
    }

    /// Satellite offsets for a primary (or satellite id) at a UT instant.
    pub fn satellite_positions(
        &self,
        body_id: u32,
        time_jdu: f64,
        perspective: Perspective,
    ) -> Option<Vec<MoonInfo>> {
        Some(self.satellite_theory(body_id)?.positions(time_jdu, perspective))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::constants::TAU;

    /// 2010 June 22.0 UT, an arbitrary modern instant
    const T: f64 = 2_455_369.5;

    #[test]
    fn test_sun_opposite_earth() {
        let ss = SolarSystem::new();
        let jde = ut_to_tdb(T);
        let earth = ss.planet_helio(Planet::Earth, jde, 0);
        let sun = ss.ecliptic_position(&Target::ById(SUN), T, 0).unwrap();
        let diff = (sun.longitude.radians() - earth.longitude.radians() - std::f64::consts::PI)
            .rem_euclid(TAU);
        assert!(diff < 1e-9 || diff > TAU - 1e-9);
        assert_relative_eq!(sun.radius, earth.radius, epsilon = 1e-12);
    }

    #[test]
    fn test_moon_position_delegates_to_lunar_theory() {
        let ss = SolarSystem::new();
        let jde = ut_to_tdb(T);
        let direct = ss.moon.geocentric_position(jde);
        let via_facade = ss.ecliptic_position(&Target::ById(MOON), T, 0).unwrap();
        assert_eq!(direct, via_facade);
    }

    #[test]
    fn test_astrometric_shifts_jupiter() {
        // Light time to Jupiter is ~40 minutes; the delayed longitude must
        // differ from the geometric one by a small but nonzero angle
        let ss = SolarSystem::new();
        let geometric = ss.ecliptic_position(&Target::ById(JUPITER), T, 0).unwrap();
        let astrometric = ss
            .ecliptic_position(&Target::ById(JUPITER), T, flags::ASTROMETRIC)
            .unwrap();
        let shift = geometric.distance_from(&astrometric);
        assert!(shift.arcseconds() > 1.0, "{}", shift.arcseconds());
        assert!(shift.degrees() < 0.1, "{}", shift.degrees());
    }

    #[test]
    fn test_delayed_time_is_light_days() {
        let ss = SolarSystem::new();
        let geometric = ss.ecliptic_position(&Target::ById(JUPITER), T, 0).unwrap();
        let delayed = ss
            .ecliptic_position(&Target::ById(JUPITER), T, flags::DELAYED_TIME)
            .unwrap();
        assert_relative_eq!(
            delayed.radius,
            geometric.radius * LIGHT_DAYS_PER_AU,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_true_distance_keeps_geometric_radius() {
        let ss = SolarSystem::new();
        let geometric = ss.ecliptic_position(&Target::ById(MARS), T, 0).unwrap();
        let td = ss
            .ecliptic_position(&Target::ById(MARS), T, flags::TRUE_DISTANCE)
            .unwrap();
        assert_relative_eq!(td.radius, geometric.radius, epsilon = 1e-15);
    }

    #[test]
    fn test_is_true_planet_range() {
        assert!(!is_true_planet(SUN));
        assert!(is_true_planet(MERCURY));
        assert!(is_true_planet(NEPTUNE));
        assert!(!is_true_planet(PLUTO));
        assert!(!is_true_planet(MOON));
        assert!(!is_true_planet(ASTEROID_BASE));
    }

    #[test]
    fn test_minor_body_unavailable_before_initialize() {
        let ss = SolarSystem::new();
        assert!(ss
            .heliocentric(&Target::ById(ASTEROID_BASE + 1), ut_to_tdb(T), 0)
            .is_none());
        assert_eq!(ss.magnitude(&Target::ById(ASTEROID_BASE + 1), T, 0), UNKNOWN_MAGNITUDE);
    }

    #[test]
    fn test_unknown_body_is_none() {
        let ss = SolarSystem::new();
        assert!(ss.ecliptic_position(&Target::ById(999), T, 0).is_none());
        assert_eq!(ss.magnitude(&Target::ById(999), T, 0), UNKNOWN_MAGNITUDE);
    }

    #[test]
    fn test_earth_magnitude_is_sentinel() {
        let ss = SolarSystem::new();
        assert_eq!(ss.magnitude(&Target::ById(EARTH), T, 0), UNKNOWN_MAGNITUDE);
    }

    #[test]
    fn test_venus_magnitude_is_bright() {
        let ss = SolarSystem::new();
        let m = ss.magnitude(&Target::ById(VENUS), T, 0);
        assert!((-5.0..-3.0).contains(&m), "m = {m}");
    }

    #[test]
    fn test_moon_illuminated_fraction_in_range() {
        let ss = SolarSystem::new();
        for i in 0..10 {
            let t = T + i as f64 * 3.0;
            let f = ss
                .illuminated_fraction(&Target::ById(MOON), t, 0)
                .unwrap();
            assert!((0.0..=1.0).contains(&f), "t {t}: {f}");
        }
    }

    #[test]
    fn test_sun_phase_angle_zero() {
        let ss = SolarSystem::new();
        assert_eq!(ss.phase_angle(&Target::ById(SUN), T, 0), Some(Angle::ZERO));
    }

    #[test]
    fn test_ring_tilt_bounded_by_inclination() {
        let ss = SolarSystem::new();
        let rings = ss.saturn_rings(T, 0);
        assert!(rings.earth_tilt.degrees().abs() <= rings.inclination.degrees() + 0.1);
        assert!(rings.sun_tilt.degrees().abs() <= rings.inclination.degrees() + 0.1);
    }

    #[test]
    fn test_grs_unavailable_then_interpolates() {
        let mut ss = SolarSystem::new();
        assert!(ss.grs_longitude(T).is_none());

        ss.initialize_grs(GrsTable {
            drift_rates: [0.01, 0.01, 0.02],
            samples: vec![(T, 100.0), (T + 100.0, 104.0)],
        });
        assert_relative_eq!(
            ss.grs_longitude(T + 50.0).unwrap().degrees(),
            102.0,
            epsilon = 1e-9
        );
        // Past the table, the trailing drift rate takes over
        assert_relative_eq!(
            ss.grs_longitude(T + 200.0).unwrap().degrees(),
            106.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_satellite_theory_dispatch() {
        let ss = SolarSystem::new();
        assert_eq!(ss.satellite_theory(JUPITER).unwrap().satellite_count(), 4);
        assert_eq!(ss.satellite_theory(JOVIAN_BASE + 2).unwrap().satellite_count(), 4);
        assert_eq!(ss.satellite_theory(SATURNIAN_BASE).unwrap().satellite_count(), 8);
        assert!(ss.satellite_theory(MARS).is_none());
    }

    #[test]
    fn test_equatorial_declination_bounded() {
        // An ecliptic body's declination stays within the obliquity plus
        // its ecliptic latitude
        let ss = SolarSystem::new();
        let eq = ss
            .equatorial_position(&Target::ById(SUN), T, flags::NUTATION)
            .unwrap();
        assert!(eq.latitude.degrees().abs() < 23.5);
    }

    #[test]
    fn test_eclipse_queries_classify() {
        // At an arbitrary instant nothing should be mid-eclipse, but the
        // geometry must still come back classified
        let ss = SolarSystem::new();
        let lunar = ss.lunar_eclipse(T, 0).unwrap();
        assert!(lunar.penumbra_radius.radians() > 0.0);
        let solar = ss.solar_eclipse(T, 0).unwrap();
        assert!(solar.penumbra_radius.radians() > 0.0);
    }

    #[test]
    fn test_resolved_target_uses_elements() {
        // A circular 1 AU orbit in the ecliptic plane stays at radius 1
        let ss = SolarSystem::new();
        let elements = OrbitalElements {
            semi_major_axis: 1.0,
            eccentricity: 0.0,
            perihelion_distance: 1.0,
            perihelion_time: J2000,
            epoch: J2000,
            ..Default::default()
        };
        let pos = ss
            .heliocentric(&Target::Resolved(elements), J2000 + 100.0, 0)
            .unwrap();
        assert_relative_eq!(pos.radius, 1.0, epsilon = 1e-9);
        assert_relative_eq!(pos.latitude.radians(), 0.0, epsilon = 1e-12);
    }
}
