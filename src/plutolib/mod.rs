//! Heliocentric position of Pluto
//!
//! The perturbation series of Meeus chapter 37, built on three slow angular
//! arguments tied to Jupiter, Saturn, and Pluto's own mean longitude. The
//! fit is only valid between 1885 and 2099; outside that window the
//! provider reports no result rather than extrapolating a polynomial that
//! is known to diverge.
//!
//! The series is referred to the standard equinox of J2000.0; the result is
//! precessed to the equinox of date before being returned.

use crate::angles::{Angle, SphericalPosition3};
use crate::constants::J2000;
use crate::precessionlib::precess_ecliptic3;
use crate::timelib::julian_centuries;

/// JDE at 1885.0, start of the fit's validity
const VALID_FROM_JDE: f64 = 2_409_543.0;
/// JDE at 2100.0, end of the fit's validity
const VALID_UNTIL_JDE: f64 = 2_488_070.0;

/// Argument multipliers [J, S, P] per term
#[rustfmt::skip]
const ARGS: [[i8; 3]; 43] = [
    [0, 0, 1], [0, 0, 2], [0, 0, 3], [0, 0, 4], [0, 0, 5], [0, 0, 6],
    [0, 1, -1], [0, 1, 0], [0, 1, 1], [0, 1, 2], [0, 1, 3], [0, 2, -2],
    [0, 2, -1], [0, 2, 0],
    [1, -1, 0], [1, -1, 1],
    [1, 0, -3], [1, 0, -2], [1, 0, -1], [1, 0, 0], [1, 0, 1], [1, 0, 2],
    [1, 0, 3], [1, 0, 4],
    [1, 1, -3], [1, 1, -2], [1, 1, -1], [1, 1, 0], [1, 1, 1], [1, 1, 3],
    [2, 0, -6], [2, 0, -5], [2, 0, -4], [2, 0, -3], [2, 0, -2], [2, 0, -1],
    [2, 0, 0], [2, 0, 1], [2, 0, 2], [2, 0, 3],
    [3, 0, -2], [3, 0, -1], [3, 0, 0],
];

/// Longitude coefficients [sine, cosine] in 1e-6 degree
#[rustfmt::skip]
const LONGITUDE: [[f64; 2]; 43] = [
    [-19_799_805.0, 19_850_055.0], [897_144.0, -4_954_829.0],
    [611_149.0, 1_211_027.0], [-341_243.0, -189_585.0],
    [129_287.0, -34_992.0], [-38_164.0, 30_893.0],
    [20_442.0, -9_987.0], [-4_063.0, -5_071.0], [-6_016.0, -3_336.0],
    [-3_956.0, 3_039.0], [-667.0, 3_572.0], [1_276.0, 501.0],
    [1_152.0, -917.0], [630.0, -1_277.0],
    [2_571.0, -459.0], [899.0, -1_449.0],
    [-1_016.0, 1_043.0], [-2_343.0, -1_012.0], [7_042.0, 788.0],
    [1_199.0, -338.0], [418.0, -67.0], [120.0, -274.0],
    [-60.0, -159.0], [-82.0, -29.0],
    [-36.0, -29.0], [-40.0, 7.0], [-14.0, 22.0], [4.0, 13.0],
    [5.0, 2.0], [-1.0, 0.0],
    [2.0, 0.0], [-4.0, 5.0], [4.0, -7.0], [14.0, 24.0],
    [-49.0, -34.0], [163.0, -48.0], [9.0, -24.0], [-4.0, 1.0],
    [-3.0, 1.0], [1.0, 3.0],
    [-3.0, -1.0], [5.0, -3.0], [0.0, 0.0],
];

/// Latitude coefficients [sine, cosine] in 1e-6 degree
#[rustfmt::skip]
const LATITUDE: [[f64; 2]; 43] = [
    [-5_452_852.0, -14_974_862.0], [3_527_812.0, 1_672_790.0],
    [-1_050_748.0, 327_647.0], [178_690.0, -292_153.0],
    [18_650.0, 100_340.0], [-30_697.0, -25_823.0],
    [4_878.0, 11_248.0], [226.0, -64.0], [2_030.0, -836.0],
    [69.0, -604.0], [-247.0, -567.0], [-57.0, 1.0],
    [-122.0, 175.0], [-49.0, -164.0],
    [-197.0, 199.0], [-25.0, 217.0],
    [589.0, -248.0], [-269.0, 711.0], [185.0, 193.0],
    [315.0, 807.0], [-130.0, -43.0], [5.0, 3.0],
    [2.0, 17.0], [2.0, 5.0],
    [2.0, 3.0], [3.0, 1.0], [2.0, -1.0], [1.0, -1.0],
    [0.0, -1.0], [0.0, 0.0],
    [0.0, -2.0], [2.0, 2.0], [-7.0, 0.0], [10.0, -8.0],
    [-3.0, 20.0], [6.0, 5.0], [14.0, 17.0], [-2.0, 0.0],
    [0.0, 0.0], [0.0, 0.0],
    [0.0, 1.0], [0.0, 0.0], [1.0, 0.0],
];

/// Radius coefficients [sine, cosine] in 1e-7 AU
#[rustfmt::skip]
const RADIUS: [[f64; 2]; 43] = [
    [66_865_439.0, 68_951_812.0], [-11_827_535.0, -332_538.0],
    [1_593_179.0, -1_438_890.0], [-18_444.0, 483_220.0],
    [-65_977.0, -85_431.0], [31_174.0, -6_032.0],
    [-5_794.0, 22_161.0], [4_601.0, 4_032.0], [-1_729.0, 234.0],
    [-415.0, 702.0], [239.0, 723.0], [67.0, -67.0],
    [1_034.0, -451.0], [-129.0, 504.0],
    [480.0, -231.0], [2.0, -441.0],
    [-3_359.0, 265.0], [7_856.0, -7_832.0], [36.0, 45_763.0],
    [8_663.0, 8_547.0], [-809.0, -769.0], [263.0, -144.0],
    [-126.0, 32.0], [-35.0, -16.0],
    [-19.0, -4.0], [-15.0, 8.0], [-4.0, 12.0], [5.0, 6.0],
    [3.0, 1.0], [6.0, -2.0],
    [2.0, 2.0], [-2.0, -2.0], [14.0, 13.0], [-63.0, 13.0],
    [136.0, -236.0], [273.0, 1_065.0], [251.0, 149.0], [-25.0, -9.0],
    [9.0, -2.0], [-8.0, 7.0],
    [2.0, -10.0], [19.0, 35.0], [10.0, 3.0],
];

/// Heliocentric ecliptic position of Pluto at a Julian ephemeris date,
/// referred to the equinox of date.
///
/// `None` outside the 1885-2099 validity window of the fit.
pub fn heliocentric_position(time_jde: f64) -> Option<SphericalPosition3> {
    if !(VALID_FROM_JDE..VALID_UNTIL_JDE).contains(&time_jde) {
        return None;
    }
    let t = julian_centuries(time_jde);

    let j = Angle::from_degrees(34.35 + 3_034.905_7 * t);
    let s = Angle::from_degrees(50.08 + 1_222.113_8 * t);
    let p = Angle::from_degrees(238.96 + 144.960_0 * t);

    let mut lon = 0.0;
    let mut lat = 0.0;
    let mut rad = 0.0;
    for (i, mult) in ARGS.iter().enumerate() {
        let alpha = j.radians() * mult[0] as f64
            + s.radians() * mult[1] as f64
            + p.radians() * mult[2] as f64;
        let (sin_a, cos_a) = alpha.sin_cos();
        lon += LONGITUDE[i][0] * sin_a + LONGITUDE[i][1] * cos_a;
        lat += LATITUDE[i][0] * sin_a + LATITUDE[i][1] * cos_a;
        rad += RADIUS[i][0] * sin_a + RADIUS[i][1] * cos_a;
    }

    let longitude = 238.958_116 + 144.96 * t + lon * 1.0e-6;
    let latitude = -3.908_239 + lat * 1.0e-6;
    let radius = 40.724_134_6 + rad * 1.0e-7;

    let j2000 = SphericalPosition3::new(
        longitude.to_radians(),
        latitude.to_radians(),
        radius,
    );
    Some(precess_ecliptic3(&j2000, J2000, time_jde))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meeus_example() {
        // Meeus example 37.a: 1992 October 13.0 TD = JDE 2448908.5,
        // equinox J2000: l = 232.74071, b = 14.58782, r = 29.711111
        let pos = heliocentric_position(2_448_908.5).unwrap();
        // The published values are for equinox J2000; undo the precession
        let back = crate::precessionlib::precess_ecliptic3(&pos, 2_448_908.5, J2000);
        assert_relative_eq!(back.longitude.degrees(), 232.740_71, epsilon = 1e-4);
        assert_relative_eq!(back.latitude.degrees(), 14.587_82, epsilon = 1e-4);
        assert_relative_eq!(back.radius, 29.711_111, epsilon = 1e-5);
    }

    #[test]
    fn test_outside_validity_is_none() {
        assert!(heliocentric_position(2_400_000.0).is_none());
        assert!(heliocentric_position(2_500_000.0).is_none());
    }

    #[test]
    fn test_radius_in_plutonian_range() {
        // Perihelion ~29.7 AU, aphelion ~49.3 AU
        for i in 0..20 {
            let jde = VALID_FROM_JDE + i as f64 * (VALID_UNTIL_JDE - VALID_FROM_JDE) / 20.0;
            let pos = heliocentric_position(jde).unwrap();
            assert!(
                (29.0..50.0).contains(&pos.radius),
                "jde {jde}: r = {}",
                pos.radius
            );
        }
    }
}
