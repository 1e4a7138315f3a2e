//! Lunar periodic-term tables (Meeus, chapter 47)
//!
//! Table 47.A drives longitude (sine, 1e-6 degree) and distance (cosine,
//! 1e-3 km); table 47.B drives latitude (sine, 1e-6 degree). Argument
//! multipliers are [D, M, M', F]. Terms whose solar-anomaly multiplier is
//! ±1 or ±2 are scaled by the matching power of the eccentricity factor E
//! at evaluation time.

/// Argument multipliers [D, M, M', F] for the longitude/distance series
#[rustfmt::skip]
pub const LON_DIST_ARGS: [[i8; 4]; 60] = [
    [0,  0,  1,  0], [2,  0, -1,  0], [2,  0,  0,  0], [0,  0,  2,  0],
    [0,  1,  0,  0], [0,  0,  0,  2], [2,  0, -2,  0], [2, -1, -1,  0],
    [2,  0,  1,  0], [2, -1,  0,  0], [0,  1, -1,  0], [1,  0,  0,  0],
    [0,  1,  1,  0], [2,  0,  0, -2], [0,  0,  1,  2], [0,  0,  1, -2],
    [4,  0, -1,  0], [0,  0,  3,  0], [4,  0, -2,  0], [2,  1, -1,  0],
    [2,  1,  0,  0], [1,  0, -1,  0], [1,  1,  0,  0], [2, -1,  1,  0],
    [2,  0,  2,  0], [4,  0,  0,  0], [2,  0, -3,  0], [0,  1, -2,  0],
    [2,  0, -1,  2], [2, -1, -2,  0], [1,  0,  1,  0], [2, -2,  0,  0],
    [0,  1,  2,  0], [0,  2,  0,  0], [2, -2, -1,  0], [2,  0,  1, -2],
    [2,  0,  0,  2], [4, -1, -1,  0], [0,  0,  2,  2], [3,  0, -1,  0],
    [2,  1,  1,  0], [4, -1, -2,  0], [0,  2, -1,  0], [2,  2, -1,  0],
    [2,  1, -2,  0], [2, -1,  0, -2], [4,  0,  1,  0], [0,  0,  4,  0],
    [4, -1,  0,  0], [1,  0, -2,  0], [2,  1,  0, -2], [0,  0,  2, -2],
    [1,  1,  1,  0], [3,  0, -2,  0], [4,  0, -3,  0], [2, -1,  2,  0],
    [0,  2,  1,  0], [1,  1, -1,  0], [2,  0,  3,  0], [2,  0, -1, -2],
];

/// Longitude sine coefficients in 1e-6 degree
#[rustfmt::skip]
pub const LONGITUDE_COEFFS: [f64; 60] = [
     6_288_774.0,  1_274_027.0,   658_314.0,   213_618.0,  -185_116.0,
      -114_332.0,     58_793.0,    57_066.0,    53_322.0,    45_758.0,
       -40_923.0,    -34_720.0,   -30_383.0,    15_327.0,   -12_528.0,
        10_980.0,     10_675.0,    10_034.0,     8_548.0,    -7_888.0,
        -6_766.0,     -5_163.0,     4_987.0,     4_036.0,     3_994.0,
         3_861.0,      3_665.0,    -2_689.0,    -2_602.0,     2_390.0,
        -2_348.0,      2_236.0,    -2_120.0,    -2_069.0,     2_048.0,
        -1_773.0,     -1_595.0,     1_215.0,    -1_110.0,      -892.0,
          -810.0,        759.0,      -713.0,      -700.0,       691.0,
           596.0,        549.0,       537.0,       520.0,      -487.0,
          -399.0,       -381.0,       351.0,      -340.0,       330.0,
           327.0,       -323.0,       299.0,       294.0,         0.0,
];

/// Distance cosine coefficients in 1e-3 km
#[rustfmt::skip]
pub const DISTANCE_COEFFS: [f64; 60] = [
    -20_905_355.0, -3_699_111.0, -2_955_968.0,   -569_925.0,     48_888.0,
         -3_149.0,    246_158.0,   -152_138.0,   -170_733.0,   -204_586.0,
       -129_620.0,    108_743.0,    104_755.0,     10_321.0,          0.0,
         79_661.0,    -34_782.0,    -23_210.0,    -21_636.0,     24_208.0,
         30_824.0,     -8_379.0,    -16_675.0,    -12_831.0,    -10_445.0,
        -11_650.0,     14_403.0,     -7_003.0,          0.0,     10_056.0,
          6_322.0,     -9_884.0,      5_751.0,          0.0,     -4_950.0,
          4_130.0,          0.0,     -3_958.0,          0.0,      3_258.0,
          2_616.0,     -1_897.0,     -2_117.0,      2_354.0,          0.0,
              0.0,     -1_423.0,     -1_117.0,     -1_571.0,     -1_739.0,
              0.0,     -4_421.0,          0.0,          0.0,          0.0,
              0.0,      1_165.0,          0.0,          0.0,      8_752.0,
];

/// Argument multipliers [D, M, M', F] for the latitude series
#[rustfmt::skip]
pub const LATITUDE_ARGS: [[i8; 4]; 60] = [
    [0,  0,  0,  1], [0,  0,  1,  1], [0,  0,  1, -1], [2,  0,  0, -1],
    [2,  0, -1,  1], [2,  0, -1, -1], [2,  0,  0,  1], [0,  0,  2,  1],
    [2,  0,  1, -1], [0,  0,  2, -1], [2, -1,  0, -1], [2,  0, -2, -1],
    [2,  0,  1,  1], [2,  1,  0, -1], [2, -1, -1,  1], [2, -1,  0,  1],
    [2, -1, -1, -1], [0,  1, -1, -1], [4,  0, -1, -1], [0,  1,  0,  1],
    [0,  0,  0,  3], [0,  1, -1,  1], [1,  0,  0,  1], [0,  1,  1,  1],
    [0,  1,  1, -1], [0,  1,  0, -1], [1,  0,  0, -1], [0,  0,  3,  1],
    [4,  0,  0, -1], [4,  0, -1,  1], [0,  0,  1, -3], [4,  0, -2,  1],
    [2,  0,  0, -3], [2,  0,  2, -1], [2, -1,  1, -1], [2,  0, -2,  1],
    [0,  0,  3, -1], [2,  0,  2,  1], [2,  0, -3, -1], [2,  1, -1,  1],
    [2,  1,  0,  1], [4,  0,  0,  1], [2, -1,  1,  1], [2, -2,  0, -1],
    [0,  0,  1,  3], [2,  1,  1, -1], [1,  1,  0, -1], [1,  1,  0,  1],
    [0,  1, -2, -1], [2,  1, -1, -1], [1,  0,  1,  1], [2, -1, -2, -1],
    [0,  1,  2,  1], [4,  0, -2, -1], [4, -1, -1, -1], [1,  0,  1, -1],
    [4,  0,  1, -1], [1,  0, -1, -1], [4, -1,  0, -1], [2, -2,  0,  1],
];

/// Latitude sine coefficients in 1e-6 degree
#[rustfmt::skip]
pub const LATITUDE_COEFFS: [f64; 60] = [
     5_128_122.0,    280_602.0,   277_693.0,   173_237.0,     55_413.0,
        46_271.0,     32_573.0,    17_198.0,     9_266.0,      8_822.0,
         8_216.0,      4_324.0,     4_200.0,    -3_359.0,      2_463.0,
         2_211.0,      2_065.0,    -1_870.0,     1_828.0,     -1_794.0,
        -1_749.0,     -1_565.0,    -1_491.0,    -1_475.0,     -1_410.0,
        -1_344.0,     -1_335.0,     1_107.0,     1_021.0,        833.0,
           777.0,        671.0,       607.0,       596.0,        491.0,
          -451.0,        439.0,       422.0,       421.0,       -366.0,
          -351.0,        331.0,       315.0,       302.0,       -283.0,
          -229.0,        223.0,       223.0,      -220.0,       -220.0,
          -185.0,        181.0,      -177.0,       176.0,        166.0,
          -164.0,        132.0,      -119.0,       115.0,        107.0,
];
