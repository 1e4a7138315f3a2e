//! Eclipse shadow geometry and classification
//!
//! Umbra and penumbra sizes come from the similar-triangles shadow cone of
//! a spherical occulter lit by the Sun: the umbral radius goes negative
//! past the cone tip, which is exactly the antumbra an annular eclipse is
//! seen from. [`EclipseInfo`] reduces the geometry to the boolean
//! vocabulary the event finder works with.
//!
//! Lunar eclipses use the cone directly with the traditional 2% shadow
//! enlargement for Earth's atmosphere. Solar eclipses compare the apparent
//! discs of Sun and Moon and consult the cone only for the total/annular
//! hybrid case, where the umbra tip falls inside Earth's radius.

use crate::angles::{Angle, SphericalPosition};
use crate::constants::{EARTH_RADIUS_KM, MOON_RADIUS_KM, SUN_RADIUS_KM};

/// Atmospheric enlargement applied to Earth's shadow for lunar eclipses
const SHADOW_ENLARGEMENT: f64 = 1.02;

/// Shadow-cone cross-section radii at a fixed range behind the occulter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowRadii {
    /// Umbral radius in km; negative past the cone tip (antumbra)
    pub umbra_km: f64,
    /// Penumbral radius in km, always positive
    pub penumbra_km: f64,
}

/// Umbra and penumbra radii of `occulter_radius_km` at `range_km` behind
/// it, with the Sun `sun_distance_km` in front.
pub fn shadow_radii(sun_distance_km: f64, occulter_radius_km: f64, range_km: f64) -> ShadowRadii {
    let umbra_length = sun_distance_km * occulter_radius_km / (SUN_RADIUS_KM - occulter_radius_km);
    let penumbra_length =
        sun_distance_km * occulter_radius_km / (SUN_RADIUS_KM + occulter_radius_km);
    ShadowRadii {
        umbra_km: occulter_radius_km * (umbra_length - range_km) / umbra_length,
        penumbra_km: occulter_radius_km * (penumbra_length + range_km) / penumbra_length,
    }
}

/// Geometry and classification of one eclipse configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EclipseInfo {
    /// Apparent radius of the eclipsed body
    pub body_radius: Angle,
    /// Apparent radius of the penumbra (lunar) or the disc-contact limit
    /// Sun + Moon (solar)
    pub penumbra_radius: Angle,
    /// Apparent umbral radius, signed: negative means antumbra (lunar) or
    /// a Moon smaller than the Sun (solar)
    pub umbra_radius_rad: f64,
    /// Separation of the relevant centers
    pub separation: Angle,
    /// Some part of the body is inside the penumbra
    pub in_penumbra: bool,
    /// Some part of the body is inside the umbra (or antumbra)
    pub in_umbra: bool,
    pub total: bool,
    pub annular: bool,
    /// Total along part of the track and annular along the rest
    pub hybrid: bool,
    /// Geographic point under the shadow axis, for solar eclipses
    pub surface_shadow: Option<SphericalPosition>,
}

impl EclipseInfo {
    /// Classify a lunar eclipse.
    ///
    /// `separation` is the angle between the Moon's center and the center
    /// of Earth's shadow (the anti-solar point) as seen from Earth.
    pub fn lunar(sun_distance_km: f64, moon_distance_km: f64, separation: Angle) -> EclipseInfo {
        let cone = shadow_radii(sun_distance_km, EARTH_RADIUS_KM, moon_distance_km);
        let umbra = (cone.umbra_km * SHADOW_ENLARGEMENT / moon_distance_km).atan();
        let penumbra = (cone.penumbra_km * SHADOW_ENLARGEMENT / moon_distance_km).atan();
        let body = (MOON_RADIUS_KM / moon_distance_km).atan();

        let sep = separation.radians();
        let in_penumbra = sep <= penumbra + body;
        let in_umbra = sep <= umbra.abs() + body;
        let total = umbra > 0.0 && sep + body <= umbra;

        EclipseInfo {
            body_radius: Angle::from_radians(body),
            penumbra_radius: Angle::from_radians(penumbra),
            umbra_radius_rad: umbra,
            separation,
            in_penumbra: in_penumbra || in_umbra,
            in_umbra,
            total,
            annular: false,
            hybrid: false,
            surface_shadow: None,
        }
    }

    /// Classify a solar eclipse from the apparent discs.
    ///
    /// `separation` is the geocentric angle between the centers of Sun and
    /// Moon. The discs are compared with the lunar-parallax allowance, so
    /// the booleans mean "somewhere on Earth", not "at the geocenter";
    /// distances locate the umbra tip for the hybrid test.
    pub fn solar(
        sun_distance_km: f64,
        moon_distance_km: f64,
        separation: Angle,
        surface_shadow: Option<SphericalPosition>,
    ) -> EclipseInfo {
        let sun_radius = (SUN_RADIUS_KM / sun_distance_km).atan();
        let moon_radius = (MOON_RADIUS_KM / moon_distance_km).atan();
        let contact = sun_radius + moon_radius;
        let central = moon_radius - sun_radius;

        // Shifting the observer across Earth moves the Moon against the
        // Sun by up to the difference of their horizontal parallaxes
        let parallax_margin = (EARTH_RADIUS_KM / moon_distance_km).asin()
            - (EARTH_RADIUS_KM / sun_distance_km).asin();

        let sep = separation.radians();
        let in_penumbra = sep <= contact + parallax_margin;
        let in_umbra = sep <= central.abs() + parallax_margin;

        // Umbra tip relative to Earth's center decides total vs annular vs
        // hybrid along the ground track
        let cone = shadow_radii(sun_distance_km, MOON_RADIUS_KM, moon_distance_km);
        let hybrid = in_umbra && cone.umbra_km.abs() < EARTH_RADIUS_KM;

        EclipseInfo {
            body_radius: Angle::from_radians(sun_radius),
            penumbra_radius: Angle::from_radians(contact),
            umbra_radius_rad: central,
            separation,
            in_penumbra: in_penumbra || in_umbra,
            in_umbra,
            total: in_umbra && central >= 0.0,
            annular: in_umbra && central < 0.0,
            hybrid,
            surface_shadow,
        }
    }

    /// Fraction of the body's diameter inside the umbra, the usual umbral
    /// magnitude of a lunar eclipse. Negative when the body is clear.
    pub fn umbral_magnitude(&self) -> f64 {
        let body = self.body_radius.radians();
        if body == 0.0 {
            return 0.0;
        }
        (self.umbra_radius_rad + body - self.separation.radians()) / (2.0 * body)
    }
}
