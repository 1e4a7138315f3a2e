//! Major-planet heliocentric positions
//!
//! High precision delegates to the VSOP87D analytic theory through the
//! `vsop87` crate, which returns heliocentric ecliptic longitude, latitude,
//! and radius for the dynamical equinox of date. The quick path evaluates
//! Meeus's mean orbital-element polynomials (chapter 31) and runs a single
//! elliptical Kepler pass; it is good to a few arcminutes near the present
//! era and far cheaper than the full series.
//!
//! Earth is a planet here like any other; the Sun's geocentric place is
//! derived from Earth's heliocentric one by the facade.

use vsop87::vsop87d;

use crate::angles::{Angle, SphericalPosition3};
use crate::constants::GAUSSIAN_GRAVITY;
use crate::keplerlib::{eccentric_anomaly, OrbitalElements};
use crate::timelib::julian_centuries;

/// The eight major planets handled by the planetary theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    /// All planets in heliocentric order.
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// Planet for a zero-based heliocentric index (0 = Mercury).
    pub fn from_index(index: usize) -> Option<Planet> {
        Planet::ALL.get(index).copied()
    }

    /// Zero-based heliocentric index.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Source of heliocentric ecliptic positions for the major planets.
///
/// The default implementation is VSOP87D; the seam exists so tests and
/// alternate theories (truncated series, numerical ephemerides) can be
/// substituted without touching the facade.
pub trait PlanetaryTheory {
    /// Heliocentric ecliptic longitude, latitude, and radius at a Julian
    /// ephemeris date, referred to the equinox of date.
    fn heliocentric(&self, planet: Planet, time_jde: f64) -> SphericalPosition3;
}

/// The VSOP87D planetary theory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vsop87Theory;

impl PlanetaryTheory for Vsop87Theory {
    fn heliocentric(&self, planet: Planet, time_jde: f64) -> SphericalPosition3 {
        let coords = match planet {
            Planet::Mercury => vsop87d::mercury(time_jde),
            Planet::Venus => vsop87d::venus(time_jde),
            Planet::Earth => vsop87d::earth(time_jde),
            Planet::Mars => vsop87d::mars(time_jde),
            Planet::Jupiter => vsop87d::jupiter(time_jde),
            Planet::Saturn => vsop87d::saturn(time_jde),
            Planet::Uranus => vsop87d::uranus(time_jde),
            Planet::Neptune => vsop87d::neptune(time_jde),
        };
        SphericalPosition3::new(coords.longitude(), coords.latitude(), coords.distance())
    }
}

/// Mean-element polynomial row: [c0, c1, c2, c3] evaluated in centuries.
type Poly = [f64; 4];

/// Mean orbital elements per planet, Meeus Table 31.a, equinox of date.
/// Rows: mean longitude L, semi-major axis a, eccentricity e,
/// inclination i, ascending node Omega, perihelion longitude pi.
/// Angles in degrees, a in AU.
#[rustfmt::skip]
const MEAN_ELEMENTS: [[Poly; 6]; 8] = [
    // Mercury
    [
        [252.250_906, 149_474.072_249_1, 0.000_303_97, 0.000_000_018],
        [0.387_098_310, 0.0, 0.0, 0.0],
        [0.205_631_75, 0.000_020_406, -0.000_000_028_4, -0.000_000_000_17],
        [7.004_986, 0.001_821_5, -0.000_018_09, 0.000_000_053],
        [48.330_893, 1.186_189_0, 0.000_175_87, 0.000_000_211],
        [77.456_119, 1.556_477_5, 0.000_295_89, 0.000_000_056],
    ],
    // Venus
    [
        [181.979_801, 58_519.213_030_2, 0.000_310_60, 0.000_000_015],
        [0.723_329_820, 0.0, 0.0, 0.0],
        [0.006_771_88, -0.000_047_766, 0.000_000_097_5, 0.000_000_000_44],
        [3.394_662, 0.001_003_7, -0.000_000_88, -0.000_000_007],
        [76.679_920, 0.901_119_0, 0.000_406_65, -0.000_000_080],
        [131.563_707, 1.402_218_8, -0.001_073_37, -0.000_005_315],
    ],
    // Earth
    [
        [100.466_449, 36_000.769_823_1, 0.000_303_68, 0.000_000_021],
        [1.000_001_018, 0.0, 0.0, 0.0],
        [0.016_708_62, -0.000_042_037, -0.000_000_123_6, 0.000_000_000_04],
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [102.937_348, 1.719_526_9, 0.000_459_62, 0.000_000_499],
    ],
    // Mars
    [
        [355.433_275, 19_141.696_474_6, 0.000_310_97, 0.000_000_015],
        [1.523_679_342, 0.0, 0.0, 0.0],
        [0.093_400_62, 0.000_090_483, -0.000_000_080_6, -0.000_000_000_35],
        [1.849_726, -0.000_601_0, 0.000_012_76, -0.000_000_006],
        [49.558_093, 0.772_092_3, 0.000_016_05, 0.000_002_325],
        [336.060_234, 1.841_033_1, 0.000_135_15, 0.000_000_318],
    ],
    // Jupiter
    [
        [34.351_484, 3_036.302_788_9, 0.000_223_74, 0.000_000_025],
        [5.202_603_191, 0.000_000_191_3, 0.0, 0.0],
        [0.048_494_85, 0.000_163_244, -0.000_000_471_9, -0.000_000_001_97],
        [1.303_270, -0.005_496_6, 0.000_004_65, -0.000_000_004],
        [100.464_441, 1.020_955_0, 0.000_401_17, 0.000_000_569],
        [14.331_309, 1.612_666_8, 0.001_031_27, -0.000_004_569],
    ],
    // Saturn
    [
        [50.077_471, 1_223.511_014_1, 0.000_519_52, -0.000_000_003],
        [9.554_909_596, -0.000_002_138_9, 0.0, 0.0],
        [0.055_508_62, -0.000_346_818, -0.000_000_645_6, 0.000_000_003_38],
        [2.488_878, -0.003_736_3, -0.000_015_16, 0.000_000_089],
        [113.665_524, 0.877_097_9, -0.000_120_67, -0.000_002_380],
        [93.056_787, 1.963_769_4, 0.000_837_57, 0.000_004_899],
    ],
    // Uranus
    [
        [314.055_005, 429.864_056_1, 0.000_304_34, 0.000_000_026],
        [19.218_446_062, -0.000_000_037_2, 0.000_000_000_98, 0.0],
        [0.046_295_90, -0.000_027_337, 0.000_000_079_0, 0.000_000_000_25],
        [0.773_196, 0.000_774_4, 0.000_037_49, -0.000_000_092],
        [74.005_947, 0.521_125_8, 0.001_339_82, 0.000_018_516],
        [173.005_159, 1.486_378_4, 0.000_214_50, 0.000_000_433],
    ],
    // Neptune
    [
        [304.348_665, 219.883_309_2, 0.000_309_26, 0.000_000_018],
        [30.110_386_869, -0.000_000_166_3, 0.000_000_000_69, 0.0],
        [0.008_988_09, 0.000_006_408, -0.000_000_000_8, 0.0],
        [1.769_952, -0.009_308_2, -0.000_007_08, 0.000_000_028],
        [131.784_057, 1.102_205_7, 0.000_260_06, -0.000_000_636],
        [48.123_691, 1.426_267_7, 0.000_379_18, -0.000_000_003],
    ],
];

fn poly(p: &Poly, t: f64) -> f64 {
    p[0] + t * (p[1] + t * (p[2] + t * p[3]))
}

/// Mean orbital elements of a planet at a Julian ephemeris date, referred
/// to the mean equinox of date.
pub fn mean_orbital_elements(planet: Planet, time_jde: f64) -> OrbitalElements {
    let t = julian_centuries(time_jde);
    let rows = &MEAN_ELEMENTS[planet.index()];

    let mean_longitude = Angle::from_degrees(poly(&rows[0], t));
    let a = poly(&rows[1], t);
    let e = poly(&rows[2], t);
    let inclination = Angle::from_degrees(poly(&rows[3], t));
    let node = Angle::from_degrees(poly(&rows[4], t));
    let perihelion_longitude = Angle::from_degrees(poly(&rows[5], t));

    let mean_anomaly = mean_longitude - perihelion_longitude;
    let n = GAUSSIAN_GRAVITY / (a * a * a).sqrt();

    OrbitalElements {
        semi_major_axis: a,
        eccentricity: e,
        perihelion_distance: a * (1.0 - e),
        inclination: inclination.radians(),
        ascending_node: node.radians(),
        perihelion_argument: (perihelion_longitude - node).radians(),
        mean_anomaly: mean_anomaly.radians(),
        perihelion_time: time_jde - mean_anomaly.radians() / n,
        epoch: time_jde,
        ..Default::default()
    }
}

/// Quick heliocentric position from mean elements and one Kepler pass.
pub fn quick_heliocentric(planet: Planet, time_jde: f64) -> SphericalPosition3 {
    let el = mean_orbital_elements(planet, time_jde);
    let e_anom = eccentric_anomaly(el.eccentricity, el.mean_anomaly);
    let v = 2.0
        * (((1.0 + el.eccentricity) / (1.0 - el.eccentricity)).sqrt() * (e_anom / 2.0).tan())
            .atan();
    let r = el.semi_major_axis * (1.0 - el.eccentricity * e_anom.cos());

    // Argument of latitude, then project out of the orbital plane
    let u = Angle::from_radians(v + el.perihelion_argument);
    let cos_i = el.inclination.cos();
    let lat = (u.sin() * el.inclination.sin()).clamp(-1.0, 1.0).asin();
    let lon = el.ascending_node + f64::atan2(cos_i * u.sin(), u.cos());

    SphericalPosition3::new(lon, lat, r)
}

/// Low-precision geocentric solar position, Meeus chapter 25.
///
/// Good to about 0.01 degree; used when the QUICK_SUN flag asks to skip
/// the full Earth theory. Latitude is taken as zero.
pub fn quick_sun_geocentric(time_jde: f64) -> SphericalPosition3 {
    let t = julian_centuries(time_jde);

    let l0 = Angle::from_degrees(280.466_46 + t * (36_000.769_83 + t * 0.000_303_2));
    let m = Angle::from_degrees(357.529_11 + t * (35_999.050_29 - t * 0.000_153_7));
    let e = 0.016_708_634 - t * (0.000_042_037 + t * 0.000_000_126_7);

    let c = (1.914_602 - t * (0.004_817 + t * 0.000_014)) * m.sin()
        + (0.019_993 - t * 0.000_101) * (m * 2.0).sin()
        + 0.000_289 * (m * 3.0).sin();

    let true_longitude = l0 + Angle::from_degrees(c);
    let v = m + Angle::from_degrees(c);
    let radius = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * v.cos());

    SphericalPosition3::new(true_longitude.radians(), 0.0, radius)
}
