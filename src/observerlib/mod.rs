//! Observer-relative coordinate transforms
//!
//! Everything that depends on where on Earth (or above it) the observer
//! stands: local hour angle from Greenwich sidereal time, equatorial to
//! horizontal conversion and back, diurnal parallax to topocentric place,
//! and atmospheric refraction.
//!
//! The [`Observer`] trait carries only longitude and latitude; the
//! transforms are default methods so alternate observer models (a moving
//! platform, a fixed site table) substitute freely. Azimuth is measured
//! from north through east; longitude is positive east of Greenwich.

use crate::angles::{Angle, AngleMode, SphericalPosition, SphericalPosition3};
use crate::constants::{AMIN2RAD, AU_KM, EARTH_FLATTENING, EARTH_RADIUS_KM, J2000};

/// Greenwich mean sidereal time at a UT Julian date (Meeus 12.4).
pub fn greenwich_sidereal_time(time_jdu: f64) -> Angle {
    let d = time_jdu - J2000;
    let t = d / 36_525.0;
    Angle::from_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + t * t * (0.000_387_933 - t / 38_710_000.0),
    )
}

/// Refraction to add to a true altitude to get the apparent one
/// (Saemundsson's formula). Zero below -2 degrees, where the formula has
/// no physical meaning.
pub fn refraction(true_altitude: Angle) -> Angle {
    let h = true_altitude.degrees();
    if h < -2.0 {
        return Angle::ZERO;
    }
    let r_arcmin = 1.02 / ((h + 10.3 / (h + 5.11)).to_radians().tan());
    Angle::from_radians(r_arcmin.max(0.0) * AMIN2RAD)
}

/// Refraction to subtract from an apparent altitude to get the true one
/// (Bennett's formula).
pub fn refraction_from_apparent(apparent_altitude: Angle) -> Angle {
    let h = apparent_altitude.degrees();
    if h < -2.0 {
        return Angle::ZERO;
    }
    let r_arcmin = 1.0 / ((h + 7.31 / (h + 4.4)).to_radians().tan());
    Angle::from_radians(r_arcmin.max(0.0) * AMIN2RAD)
}

/// An observing site, polymorphic so non-geographic models can substitute.
pub trait Observer {
    /// East-positive longitude.
    fn longitude(&self) -> Angle;

    /// Geographic latitude.
    fn latitude(&self) -> Angle;

    /// Height above the reference ellipsoid in meters.
    fn elevation_m(&self) -> f64 {
        0.0
    }

    /// Local hour angle of a right ascension at a UT instant.
    ///
    /// Non-negative [0, 2π) by default; `signed` folds into [-π, π) so
    /// east-of-meridian comes out negative.
    fn local_hour_angle(&self, time_jdu: f64, right_ascension: Angle, signed: bool) -> Angle {
        let h = greenwich_sidereal_time(time_jdu) + self.longitude() - right_ascension;
        if signed {
            h.with_mode(AngleMode::Signed)
        } else {
            h.with_mode(AngleMode::NonNegative)
        }
    }

    /// Equatorial (RA/dec) to horizontal (azimuth/altitude).
    fn equatorial_to_horizontal(
        &self,
        time_jdu: f64,
        equatorial: &SphericalPosition,
    ) -> SphericalPosition {
        let h = self.local_hour_angle(time_jdu, equatorial.right_ascension(), false);
        let dec = equatorial.declination();
        let lat = self.latitude();

        let altitude = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos())
            .clamp(-1.0, 1.0)
            .asin();
        let azimuth = f64::atan2(-dec.cos() * h.sin(), dec.sin() * lat.cos() - dec.cos() * h.cos() * lat.sin());
        SphericalPosition::new(azimuth, altitude)
    }

    /// Horizontal (azimuth/altitude) back to equatorial (RA/dec).
    fn horizontal_to_equatorial(
        &self,
        time_jdu: f64,
        horizontal: &SphericalPosition,
    ) -> SphericalPosition {
        let az = horizontal.azimuth();
        let alt = horizontal.altitude();
        let lat = self.latitude();

        let dec = (lat.sin() * alt.sin() + lat.cos() * alt.cos() * az.cos())
            .clamp(-1.0, 1.0)
            .asin();
        let h = f64::atan2(-az.sin() * alt.cos(), alt.sin() * lat.cos() - alt.cos() * az.cos() * lat.sin());
        let ra = greenwich_sidereal_time(time_jdu) + self.longitude() - Angle::from_radians(h);
        SphericalPosition::new(ra.radians(), dec)
    }

    /// Geocentric equatorial place and distance to the topocentric one
    /// (diurnal parallax, Meeus chapter 40).
    fn topocentric(
        &self,
        time_jdu: f64,
        equatorial: &SphericalPosition3,
    ) -> SphericalPosition3 {
        let (rho_sin, rho_cos) = self.geocentric_site(self.elevation_m());
        let sin_parallax = EARTH_RADIUS_KM / (equatorial.radius * AU_KM);

        let h = self.local_hour_angle(time_jdu, equatorial.longitude, false);
        let dec = equatorial.latitude;

        let a = dec.cos() * h.sin();
        let b = dec.cos() * h.cos() - rho_cos * sin_parallax;
        let c = dec.sin() - rho_sin * sin_parallax;
        let q = (a * a + b * b + c * c).sqrt();

        let h_topo = f64::atan2(a, b);
        let ra = greenwich_sidereal_time(time_jdu) + self.longitude() - Angle::from_radians(h_topo);
        let dec_topo = (c / q).clamp(-1.0, 1.0).asin();
        SphericalPosition3::new(ra.radians(), dec_topo, equatorial.radius * q)
    }

    /// Flattened-Earth site terms rho sin phi' and rho cos phi'.
    fn geocentric_site(&self, elevation_m: f64) -> (f64, f64) {
        let lat = self.latitude();
        let u = ((1.0 - EARTH_FLATTENING) * lat.tan()).atan();
        let h = elevation_m / (EARTH_RADIUS_KM * 1000.0);
        (
            (1.0 - EARTH_FLATTENING) * u.sin() + h * lat.sin(),
            u.cos() + h * lat.cos(),
        )
    }
}

/// A fixed site on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicObserver {
    pub longitude: Angle,
    pub latitude: Angle,
    pub elevation_m: f64,
}

impl GeographicObserver {
    /// Site from east-positive longitude and latitude in degrees.
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64, elevation_m: f64) -> Self {
        GeographicObserver {
            longitude: Angle::from_radians_signed(longitude_deg.to_radians()),
            latitude: Angle::from_radians_signed(latitude_deg.to_radians()),
            elevation_m,
        }
    }
}

impl Observer for GeographicObserver {
    fn longitude(&self) -> Angle {
        self.longitude
    }

    fn latitude(&self) -> Angle {
        self.latitude
    }

    fn elevation_m(&self) -> f64 {
        self.elevation_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sidereal_time_meeus_example() {
        // Meeus example 12.a: 1987 April 10.0 UT, theta0 = 13h10m46.3668s
        let gmst = greenwich_sidereal_time(2_446_895.5);
        assert_relative_eq!(gmst.degrees(), 197.693_195, epsilon = 1e-5);
    }

    #[test]
    fn test_hour_angle_modes() {
        let site = GeographicObserver::from_degrees(0.0, 45.0, 0.0);
        // An RA slightly ahead of the sidereal time gives a small negative
        // hour angle
        let gmst = greenwich_sidereal_time(2_451_545.0);
        let ra = Angle::from_radians(gmst.radians() + 0.1);
        let unsigned = site.local_hour_angle(2_451_545.0, ra, false);
        let signed = site.local_hour_angle(2_451_545.0, ra, true);
        assert_relative_eq!(signed.radians(), -0.1, epsilon = 1e-10);
        assert_relative_eq!(unsigned.radians(), crate::constants::TAU - 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_celestial_pole_altitude_is_latitude() {
        let site = GeographicObserver::from_degrees(10.0, 52.0, 0.0);
        let pole = SphericalPosition::from_degrees(123.0, 90.0);
        let horiz = site.equatorial_to_horizontal(2_455_000.0, &pole);
        assert_relative_eq!(horiz.altitude().degrees(), 52.0, epsilon = 1e-8);
    }

    #[test]
    fn test_horizontal_round_trip() {
        let site = GeographicObserver::from_degrees(-71.08, 42.33, 0.0);
        let eq = SphericalPosition::from_degrees(201.3, -11.2);
        let t = 2_455_321.25;
        let horiz = site.equatorial_to_horizontal(t, &eq);
        let back = site.horizontal_to_equatorial(t, &horiz);
        assert_relative_eq!(back.longitude.degrees(), 201.3, epsilon = 1e-8);
        assert_relative_eq!(back.latitude.degrees(), -11.2, epsilon = 1e-8);
    }

    #[test]
    fn test_transit_azimuth_south() {
        // A body on the meridian south of the zenith sits at azimuth 180
        let site = GeographicObserver::from_degrees(0.0, 50.0, 0.0);
        let t = 2_451_545.0;
        let gmst = greenwich_sidereal_time(t);
        let eq = SphericalPosition::new(gmst.radians(), 0.0);
        let horiz = site.equatorial_to_horizontal(t, &eq);
        assert_relative_eq!(horiz.azimuth().degrees(), 180.0, epsilon = 1e-6);
        assert_relative_eq!(horiz.altitude().degrees(), 40.0, epsilon = 1e-6);
    }

    #[test]
    fn test_refraction_at_horizon() {
        // Standard refraction at the horizon is close to 34 arcminutes
        let r = refraction(Angle::from_degrees(0.0));
        assert!((28.0..36.0).contains(&r.arcminutes()), "{}", r.arcminutes());
    }

    #[test]
    fn test_refraction_vanishes_high_up() {
        let r = refraction(Angle::from_degrees(89.0));
        assert!(r.arcminutes() < 0.05);
        assert_eq!(refraction(Angle::from_degrees(-10.0)), Angle::ZERO);
    }

    #[test]
    fn test_bennett_roughly_inverts_saemundsson() {
        let true_alt = Angle::from_degrees(5.0);
        let apparent = Angle::from_radians(true_alt.radians() + refraction(true_alt).radians());
        let back = apparent.radians() - refraction_from_apparent(apparent).radians();
        assert_relative_eq!(back, true_alt.radians(), epsilon = 2e-4);
    }

    #[test]
    fn test_topocentric_parallax_magnitude() {
        // For the Moon the diurnal parallax shifts the place by up to about
        // one degree and always increases with a low altitude site geometry
        let site = GeographicObserver::from_degrees(0.0, 45.0, 0.0);
        let moon = SphericalPosition3::new(1.0, 0.2, 0.002_57);
        let topo = site.topocentric(2_455_000.0, &moon);
        let shift = moon.to_2d().distance_from(&topo.to_2d());
        assert!(shift.degrees() < 1.2, "{}", shift.degrees());
        assert!(shift.degrees() > 0.01, "{}", shift.degrees());
    }

    #[test]
    fn test_topocentric_negligible_for_distant_body() {
        let site = GeographicObserver::from_degrees(0.0, 45.0, 0.0);
        let jupiter = SphericalPosition3::new(2.0, -0.1, 5.2);
        let topo = site.topocentric(2_455_000.0, &jupiter);
        let shift = jupiter.to_2d().distance_from(&topo.to_2d());
        assert!(shift.arcseconds() < 3.0, "{}", shift.arcseconds());
    }

    #[test]
    fn test_geocentric_site_terms() {
        let site = GeographicObserver::from_degrees(0.0, 33.356_111, 1_706.0);
        let (rho_sin, rho_cos) = site.geocentric_site(site.elevation_m());
        // Meeus example 11.a (Palomar): rho sin = 0.546861, rho cos = 0.836339
        assert_relative_eq!(rho_sin, 0.546_861, epsilon = 1e-4);
        assert_relative_eq!(rho_cos, 0.836_339, epsilon = 1e-4);
    }
}
