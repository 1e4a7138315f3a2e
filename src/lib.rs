//! Solar-system ephemeris and event-finding engine
//!
//! The crate computes positions of the Sun, Moon, planets, Pluto, the
//! classical satellites of Jupiter and Saturn, and table-driven asteroids
//! and comets, in heliocentric, geocentric, equatorial and horizontal
//! frames, and searches those positions for dated events: rises and sets,
//! lunar phases, seasons, planetary phenomena, eclipses and satellite
//! disc crossings.
//!
//! [`solarsystem::SolarSystem`] is the facade over the per-body providers;
//! [`eventlib::EventFinder`] drives the searches on top of it. Everything
//! underneath is usable on its own: the VSOP87 planetary theory in
//! [`planetlib`], the ELP-derived lunar series in [`moonlib`], Kepler
//! orbit propagation in [`keplerlib`], precession, nutation and frame
//! conversions in [`precessionlib`] and [`ecliptic`].
//!
//! Unavailable results are reported as `None` (or a sentinel magnitude),
//! never as a panic; time scales follow [`timelib`], with UT at the public
//! surface and TDB inside the theories.

pub mod angles;
pub mod cache;
pub mod constants;
pub mod eclipselib;
pub mod ecliptic;
pub mod eventlib;
pub mod keplerlib;
pub mod magnitudelib;
pub mod minorlib;
pub mod moonlib;
pub mod observerlib;
pub mod planetlib;
pub mod plutolib;
pub mod precessionlib;
pub mod satlib;
pub mod searchlib;
pub mod solarsystem;
pub mod timelib;

pub use angles::{Angle, SphericalPosition, SphericalPosition3};
pub use eventlib::{AstroEvent, EventFinder, EventType, SearchDirection};
pub use observerlib::{GeographicObserver, Observer};
pub use solarsystem::{SolarSystem, Target};
