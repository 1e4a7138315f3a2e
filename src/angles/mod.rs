//! Angle and spherical-position primitives
//!
//! [`Angle`] is an immutable value type that stores radians, normalizes on
//! construction according to an explicit [`AngleMode`], and caches its sine
//! and cosine eagerly so series evaluation never recomputes them. Degrees,
//! hours, arcseconds, rotations, and grads are views, never storage.
//!
//! [`SphericalPosition`] and [`SphericalPosition3`] are the 2D/3D spherical
//! coordinate pairs used throughout the crate for ecliptic, equatorial, and
//! horizontal frames alike: the longitude slot holds λ, α, or azimuth and
//! the latitude slot holds β, δ, or altitude. Longitude is stored in
//! [0, 2π); latitude is signed.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::Vector3;

use crate::constants::{ASEC2RAD, DEG2RAD, GRAD2RAD, HOUR2RAD, RAD2DEG, TAU};

/// Normalization applied to an [`Angle`] when it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    /// Normalize into [-π, π)
    Signed,
    /// Normalize into [0, 2π)
    #[default]
    NonNegative,
    /// No normalization; the raw value is kept
    Unbounded,
}

/// An immutable angle with cached trigonometry.
///
/// All arithmetic produces a new `Angle` normalized under the left
/// operand's mode.
#[derive(Debug, Clone, Copy)]
pub struct Angle {
    radians: f64,
    mode: AngleMode,
    sin: f64,
    cos: f64,
}

impl Angle {
    /// Zero angle in the default non-negative mode.
    pub const ZERO: Angle = Angle {
        radians: 0.0,
        mode: AngleMode::NonNegative,
        sin: 0.0,
        cos: 1.0,
    };

    /// Create an angle from radians with the given normalization mode.
    pub fn new(radians: f64, mode: AngleMode) -> Self {
        let radians = match mode {
            AngleMode::Signed => {
                let r = radians.rem_euclid(TAU);
                if r >= PI {
                    r - TAU
                } else {
                    r
                }
            }
            AngleMode::NonNegative => radians.rem_euclid(TAU),
            AngleMode::Unbounded => radians,
        };
        let (sin, cos) = radians.sin_cos();
        Angle {
            radians,
            mode,
            sin,
            cos,
        }
    }

    /// Create from radians, normalized into [0, 2π).
    pub fn from_radians(radians: f64) -> Self {
        Self::new(radians, AngleMode::NonNegative)
    }

    /// Create from radians, normalized into [-π, π).
    pub fn from_radians_signed(radians: f64) -> Self {
        Self::new(radians, AngleMode::Signed)
    }

    /// Create from degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees * DEG2RAD)
    }

    /// Create from degrees, normalized into [-π, π).
    pub fn from_degrees_signed(degrees: f64) -> Self {
        Self::from_radians_signed(degrees * DEG2RAD)
    }

    /// Create from hours of right ascension.
    pub fn from_hours(hours: f64) -> Self {
        Self::from_radians(hours * HOUR2RAD)
    }

    /// Create from arcseconds.
    pub fn from_arcseconds(asec: f64) -> Self {
        Self::from_radians(asec * ASEC2RAD)
    }

    /// Create from gradians.
    pub fn from_grads(grads: f64) -> Self {
        Self::from_radians(grads * GRAD2RAD)
    }

    /// Create from whole rotations.
    pub fn from_rotations(rotations: f64) -> Self {
        Self::from_radians(rotations * TAU)
    }

    /// The canonical radian value.
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// Degree view.
    pub fn degrees(&self) -> f64 {
        self.radians * RAD2DEG
    }

    /// Hour view (24 hours per rotation).
    pub fn hours(&self) -> f64 {
        self.radians / HOUR2RAD
    }

    /// Arcminute view.
    pub fn arcminutes(&self) -> f64 {
        self.degrees() * 60.0
    }

    /// Arcsecond view.
    pub fn arcseconds(&self) -> f64 {
        self.radians / ASEC2RAD
    }

    /// Rotation view.
    pub fn rotations(&self) -> f64 {
        self.radians / TAU
    }

    /// Gradian view.
    pub fn grads(&self) -> f64 {
        self.radians / GRAD2RAD
    }

    /// The normalization mode this angle was constructed with.
    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    /// Cached sine.
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Cached cosine.
    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// Tangent, derived from the cached sine and cosine.
    pub fn tan(&self) -> f64 {
        self.sin / self.cos
    }

    /// Rebuild this angle under a different normalization mode.
    pub fn with_mode(&self, mode: AngleMode) -> Self {
        Angle::new(self.radians, mode)
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::ZERO
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.radians == other.radians
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.radians + rhs.radians, self.mode)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.radians - rhs.radians, self.mode)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle::new(self.radians * rhs, self.mode)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::new(-self.radians, self.mode)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}

/// A direction on the celestial sphere.
///
/// The longitude/latitude pair doubles as RA/declination and
/// azimuth/altitude; only the frame interpretation changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPosition {
    /// Longitude-like coordinate in [0, 2π)
    pub longitude: Angle,
    /// Latitude-like coordinate, signed
    pub latitude: Angle,
}

impl SphericalPosition {
    /// Build from radian values, normalizing longitude into [0, 2π).
    pub fn new(longitude_rad: f64, latitude_rad: f64) -> Self {
        SphericalPosition {
            longitude: Angle::from_radians(longitude_rad),
            latitude: Angle::from_radians_signed(latitude_rad),
        }
    }

    /// Build from degree values.
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64) -> Self {
        Self::new(longitude_deg * DEG2RAD, latitude_deg * DEG2RAD)
    }

    /// Right ascension, an alias for the longitude slot.
    pub fn right_ascension(&self) -> Angle {
        self.longitude
    }

    /// Declination, an alias for the latitude slot.
    pub fn declination(&self) -> Angle {
        self.latitude
    }

    /// Azimuth, an alias for the longitude slot.
    pub fn azimuth(&self) -> Angle {
        self.longitude
    }

    /// Altitude, an alias for the latitude slot.
    pub fn altitude(&self) -> Angle {
        self.latitude
    }

    /// Unit direction vector: x toward longitude 0, z toward the north pole.
    pub fn to_rectangular(&self) -> Vector3<f64> {
        let cos_lat = self.latitude.cos();
        Vector3::new(
            cos_lat * self.longitude.cos(),
            cos_lat * self.longitude.sin(),
            self.latitude.sin(),
        )
    }

    /// Recover a direction from a rectangular vector (radius discarded).
    pub fn from_rectangular(v: &Vector3<f64>) -> Self {
        let r = v.norm();
        if r == 0.0 {
            return SphericalPosition::new(0.0, 0.0);
        }
        SphericalPosition::new(v.y.atan2(v.x), (v.z / r).clamp(-1.0, 1.0).asin())
    }

    /// Great-circle separation from another position.
    ///
    /// The dot-product argument is clamped so rounding can never produce NaN
    /// for coincident or antipodal positions.
    pub fn distance_from(&self, other: &SphericalPosition) -> Angle {
        let cos_d = self.latitude.sin() * other.latitude.sin()
            + self.latitude.cos()
                * other.latitude.cos()
                * (self.longitude - other.longitude).cos();
        Angle::from_radians(cos_d.clamp(-1.0, 1.0).acos())
    }

    /// Position angle of `other` relative to this position, measured from
    /// north through east.
    pub fn position_angle(&self, other: &SphericalPosition) -> Angle {
        let d_lon = other.longitude - self.longitude;
        let y = d_lon.sin();
        let x = self.latitude.cos() * other.latitude.tan() - self.latitude.sin() * d_lon.cos();
        Angle::from_radians(y.atan2(x))
    }
}

impl fmt::Display for SphericalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}°, {:+.6}°)",
            self.longitude.degrees(),
            self.latitude.degrees()
        )
    }
}

/// A spherical position with distance, in astronomical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPosition3 {
    /// Longitude-like coordinate in [0, 2π)
    pub longitude: Angle,
    /// Latitude-like coordinate, signed
    pub latitude: Angle,
    /// Distance in AU
    pub radius: f64,
}

impl SphericalPosition3 {
    /// Build from radian values and a radius in AU.
    pub fn new(longitude_rad: f64, latitude_rad: f64, radius_au: f64) -> Self {
        SphericalPosition3 {
            longitude: Angle::from_radians(longitude_rad),
            latitude: Angle::from_radians_signed(latitude_rad),
            radius: radius_au,
        }
    }

    /// Drop the radius.
    pub fn to_2d(&self) -> SphericalPosition {
        SphericalPosition {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }

    /// Full rectangular vector in AU.
    pub fn to_rectangular(&self) -> Vector3<f64> {
        self.to_2d().to_rectangular() * self.radius
    }

    /// Build from a rectangular vector in AU.
    pub fn from_rectangular(v: &Vector3<f64>) -> Self {
        let r = v.norm();
        if r == 0.0 {
            return SphericalPosition3::new(0.0, 0.0, 0.0);
        }
        SphericalPosition3::new(v.y.atan2(v.x), (v.z / r).clamp(-1.0, 1.0).asin(), r)
    }

    /// Great-circle separation, ignoring radius.
    pub fn distance_from(&self, other: &SphericalPosition3) -> Angle {
        self.to_2d().distance_from(&other.to_2d())
    }
}

impl fmt::Display for SphericalPosition3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}°, {:+.6}°, {:.8} AU)",
            self.longitude.degrees(),
            self.latitude.degrees(),
            self.radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nonnegative_normalization() {
        let a = Angle::from_degrees(-90.0);
        assert_relative_eq!(a.degrees(), 270.0, epsilon = 1e-12);
        let b = Angle::from_degrees(725.0);
        assert_relative_eq!(b.degrees(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_signed_normalization() {
        let a = Angle::from_degrees_signed(270.0);
        assert_relative_eq!(a.degrees(), -90.0, epsilon = 1e-12);
        let b = Angle::from_degrees_signed(180.0);
        assert_relative_eq!(b.degrees(), -180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unbounded_keeps_value() {
        let a = Angle::new(3.0 * TAU, AngleMode::Unbounded);
        assert_relative_eq!(a.radians(), 3.0 * TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_cached_trig_matches_std() {
        let a = Angle::from_degrees(37.5);
        assert_relative_eq!(a.sin(), (37.5 * DEG2RAD).sin(), epsilon = 1e-15);
        assert_relative_eq!(a.cos(), (37.5 * DEG2RAD).cos(), epsilon = 1e-15);
        assert_relative_eq!(a.tan(), (37.5 * DEG2RAD).tan(), epsilon = 1e-12);
    }

    #[test]
    fn test_unit_views() {
        let a = Angle::from_hours(6.0);
        assert_relative_eq!(a.degrees(), 90.0, epsilon = 1e-12);
        assert_relative_eq!(a.rotations(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(a.grads(), 100.0, epsilon = 1e-12);
        assert_relative_eq!(a.arcseconds(), 324_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_arithmetic_renormalizes() {
        let a = Angle::from_degrees(350.0) + Angle::from_degrees(20.0);
        assert_relative_eq!(a.degrees(), 10.0, epsilon = 1e-10);
        let b = Angle::from_degrees_signed(10.0) - Angle::from_degrees(20.0);
        assert_relative_eq!(b.degrees(), -10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_spherical_rectangular_round_trip() {
        let p = SphericalPosition3::new(1.2, -0.4, 2.5);
        let v = p.to_rectangular();
        let q = SphericalPosition3::from_rectangular(&v);
        assert_relative_eq!(q.longitude.radians(), 1.2, epsilon = 1e-12);
        assert_relative_eq!(q.latitude.radians(), -0.4, epsilon = 1e-12);
        assert_relative_eq!(q.radius, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_longitude_stored_nonnegative() {
        let p = SphericalPosition::from_degrees(-10.0, 45.0);
        assert_relative_eq!(p.longitude.degrees(), 350.0, epsilon = 1e-10);
        assert_relative_eq!(p.latitude.degrees(), 45.0, epsilon = 1e-10);
    }

    #[test]
    fn test_great_circle_distance() {
        let a = SphericalPosition::from_degrees(0.0, 0.0);
        let b = SphericalPosition::from_degrees(90.0, 0.0);
        assert_relative_eq!(a.distance_from(&b).degrees(), 90.0, epsilon = 1e-10);

        // Coincident points must not produce NaN
        let d = a.distance_from(&a);
        assert_relative_eq!(d.radians(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_antipodal() {
        let a = SphericalPosition::from_degrees(0.0, 0.0);
        let b = SphericalPosition::from_degrees(180.0, 0.0);
        assert_relative_eq!(a.distance_from(&b).degrees(), 180.0, epsilon = 1e-10);
    }
}
