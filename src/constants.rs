//! Shared astronomical and numerical constants
//!
//! Angle factors are exact by definition; physical values follow the IAU
//! 2012/2015 resolutions and the Explanatory Supplement.

use std::f64::consts::PI;

/// Tau, one full turn in radians
pub const TAU: f64 = 2.0 * PI;

/// Degrees to radians
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees
pub const RAD2DEG: f64 = 180.0 / PI;
/// Arcseconds to radians
pub const ASEC2RAD: f64 = DEG2RAD / 3600.0;
/// Arcminutes to radians
pub const AMIN2RAD: f64 = DEG2RAD / 60.0;
/// Hours of right ascension to radians
pub const HOUR2RAD: f64 = TAU / 24.0;
/// Gradians to radians
pub const GRAD2RAD: f64 = PI / 200.0;

/// J2000.0 epoch as a Julian date (TT)
pub const J2000: f64 = 2_451_545.0;
/// B1950.0 epoch as a Julian date
pub const B1950: f64 = 2_433_282.423_5;
/// Days per Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Days per Julian year
pub const JULIAN_YEAR: f64 = 365.25;

/// IAU 2012 exact astronomical unit in meters
pub const AU_M: f64 = 149_597_870_700.0;
/// Astronomical unit in kilometers
pub const AU_KM: f64 = AU_M / 1000.0;
/// Seconds per day
pub const DAY_S: f64 = 86_400.0;
/// Minutes per day
pub const DAY_MIN: f64 = 1_440.0;
/// Light travel time for one AU, in days
pub const LIGHT_DAYS_PER_AU: f64 = AU_M / 299_792_458.0 / DAY_S;
/// Gaussian gravitational constant, radians per day at 1 AU
pub const GAUSSIAN_GRAVITY: f64 = 0.017_202_098_95;

/// Mean synodic month in days
pub const MEAN_SYNODIC_MONTH: f64 = 29.530_588_861;
/// Mean tropical year in days
pub const MEAN_TROPICAL_YEAR: f64 = 365.242_189;
/// Mean sidereal month in days
pub const MEAN_SIDEREAL_MONTH: f64 = 27.321_661;

/// Sun's radius in km
pub const SUN_RADIUS_KM: f64 = 696_000.0;
/// Moon's radius in km
pub const MOON_RADIUS_KM: f64 = 1_737.4;
/// Earth's equatorial radius in km
pub const EARTH_RADIUS_KM: f64 = 6_378.14;
/// Earth's polar flattening
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257;
/// Jupiter's equatorial radius in km
pub const JUPITER_RADIUS_KM: f64 = 71_492.0;
/// Jupiter's polar/equatorial axis ratio
pub const JUPITER_FLATTENING: f64 = 0.935_12;
/// Saturn's equatorial radius in km
pub const SATURN_RADIUS_KM: f64 = 60_268.0;
/// Saturn's polar/equatorial axis ratio
pub const SATURN_FLATTENING: f64 = 0.902_04;
/// Outer radius of Saturn's A ring in units of Saturn's equatorial radius
pub const SATURN_RING_RATIO: f64 = 2.27;

/// Mean orbital periods of the planets in days, Mercury through Pluto
pub const PLANET_ORBIT_DAYS: [f64; 9] = [
    87.969, 224.701, 365.256, 686.980, 4_332.589, 10_759.22, 30_685.4, 60_189.0, 90_465.0,
];

/// Mean synodic periods of the planets in days, Mercury through Pluto
/// (interval between successive identical Earth-planet configurations)
pub const PLANET_SYNODIC_DAYS: [f64; 9] = [
    115.88, 583.92, 365.256, 779.94, 398.88, 378.09, 369.66, 367.49, 366.73,
];

/// Sentinel magnitude for bodies with no defined magnitude model
pub const UNKNOWN_MAGNITUDE: f64 = -999.0;
