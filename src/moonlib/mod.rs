//! Geocentric lunar position
//!
//! The luni-solar perturbation series of Meeus chapter 47: sixty periodic
//! terms each for longitude/distance and latitude over the four fundamental
//! arguments, with the secular eccentricity factor E applied to every term
//! carrying a solar-anomaly multiplier, plus the three additive planetary
//! corrections (A1 Venus, A2 Jupiter, A3). Accuracy is about 10 arcseconds
//! in longitude and 4 in latitude.
//!
//! Results are memoized in a small ring cache; event searches bounce
//! between the same few instants repeatedly while bracketing.

mod series;

use std::cell::RefCell;

use crate::angles::{Angle, SphericalPosition3};
use crate::cache::RingCache;
use crate::constants::{AU_KM, EARTH_RADIUS_KM};
use crate::timelib::julian_centuries;

use series::{DISTANCE_COEFFS, LATITUDE_ARGS, LATITUDE_COEFFS, LONGITUDE_COEFFS, LON_DIST_ARGS};

/// Mean lunar distance in km, the constant part of the distance series
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// The fundamental arguments of the lunar theory at one instant.
#[derive(Debug, Clone, Copy)]
pub struct LunarArguments {
    /// Mean longitude L'
    pub mean_longitude: Angle,
    /// Mean elongation of the Moon from the Sun, D
    pub elongation: Angle,
    /// Sun's mean anomaly M
    pub solar_anomaly: Angle,
    /// Moon's mean anomaly M'
    pub lunar_anomaly: Angle,
    /// Moon's argument of latitude F
    pub latitude_argument: Angle,
    /// Secular eccentricity factor E
    pub eccentricity_factor: f64,
}

/// Fundamental arguments at a Julian ephemeris date (Meeus 47.1-47.7).
pub fn lunar_arguments(time_jde: f64) -> LunarArguments {
    let t = julian_centuries(time_jde);

    let lp = 218.316_447_7
        + t * (481_267.881_234_21 + t * (-0.001_578_6 + t * (1.0 / 538_841.0 - t / 65_194_000.0)));
    let d = 297.850_192_1
        + t * (445_267.111_403_4 + t * (-0.001_881_9 + t * (1.0 / 545_868.0 - t / 113_065_000.0)));
    let m = 357.529_109_2 + t * (35_999.050_290_9 + t * (-0.000_153_6 + t / 24_490_000.0));
    let mp = 134.963_396_4
        + t * (477_198.867_505_5 + t * (0.008_741_4 + t * (1.0 / 69_699.0 - t / 14_712_000.0)));
    let f = 93.272_095_0
        + t * (483_202.017_523_3 + t * (-0.003_653_9 + t * (-1.0 / 3_526_000.0 + t / 863_310_000.0)));

    LunarArguments {
        mean_longitude: Angle::from_degrees(lp),
        elongation: Angle::from_degrees(d),
        solar_anomaly: Angle::from_degrees(m),
        lunar_anomaly: Angle::from_degrees(mp),
        latitude_argument: Angle::from_degrees(f),
        eccentricity_factor: 1.0 - t * (0.002_516 + t * 0.000_007_4),
    }
}

/// E to the power of the solar-anomaly multiplier's magnitude.
fn e_scale(e: f64, m_mult: i8) -> f64 {
    match m_mult.abs() {
        0 => 1.0,
        1 => e,
        _ => e * e,
    }
}

fn series_position(time_jde: f64) -> SphericalPosition3 {
    let t = julian_centuries(time_jde);
    let args = lunar_arguments(time_jde);
    let (lp, d, m, mp, f) = (
        args.mean_longitude,
        args.elongation,
        args.solar_anomaly,
        args.lunar_anomaly,
        args.latitude_argument,
    );
    let e = args.eccentricity_factor;

    let mut sum_lon = 0.0;
    let mut sum_dist = 0.0;
    for (i, mult) in LON_DIST_ARGS.iter().enumerate() {
        let arg = d.radians() * mult[0] as f64
            + m.radians() * mult[1] as f64
            + mp.radians() * mult[2] as f64
            + f.radians() * mult[3] as f64;
        let scale = e_scale(e, mult[1]);
        sum_lon += LONGITUDE_COEFFS[i] * scale * arg.sin();
        sum_dist += DISTANCE_COEFFS[i] * scale * arg.cos();
    }

    let mut sum_lat = 0.0;
    for (i, mult) in LATITUDE_ARGS.iter().enumerate() {
        let arg = d.radians() * mult[0] as f64
            + m.radians() * mult[1] as f64
            + mp.radians() * mult[2] as f64
            + f.radians() * mult[3] as f64;
        sum_lat += LATITUDE_COEFFS[i] * e_scale(e, mult[1]) * arg.sin();
    }

    // Planetary and flattening corrections, Meeus p. 342
    let a1 = Angle::from_degrees(119.75 + 131.849 * t);
    let a2 = Angle::from_degrees(53.09 + 479_264.290 * t);
    let a3 = Angle::from_degrees(313.45 + 481_266.484 * t);

    sum_lon += 3_958.0 * a1.sin() + 1_962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_lat += -2_235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    let longitude = lp + Angle::from_degrees_signed(sum_lon * 1.0e-6);
    let latitude = Angle::from_degrees_signed(sum_lat * 1.0e-6);
    let distance_km = MEAN_DISTANCE_KM + sum_dist * 1.0e-3;

    SphericalPosition3::new(
        longitude.radians(),
        latitude.radians(),
        distance_km / AU_KM,
    )
}

/// Lunar position provider with a small result memo.
#[derive(Debug, Default)]
pub struct Moon {
    cache: RefCell<RingCache<f64, SphericalPosition3, 4>>,
}

impl Moon {
    pub fn new() -> Self {
        Moon::default()
    }

    /// Geocentric ecliptic longitude, latitude, and distance (AU) of the
    /// Moon at a Julian ephemeris date, mean equinox of date.
    pub fn geocentric_position(&self, time_jde: f64) -> SphericalPosition3 {
        if let Some(hit) = self.cache.borrow().get(&time_jde) {
            return hit;
        }
        let pos = series_position(time_jde);
        self.cache.borrow_mut().insert(time_jde, pos);
        pos
    }

    /// Geocentric distance in kilometers.
    pub fn distance_km(&self, time_jde: f64) -> f64 {
        self.geocentric_position(time_jde).radius * AU_KM
    }

    /// Equatorial horizontal parallax of the Moon.
    pub fn parallax(&self, time_jde: f64) -> Angle {
        let dist = self.distance_km(time_jde);
        Angle::from_radians((EARTH_RADIUS_KM / dist).asin())
    }
}
