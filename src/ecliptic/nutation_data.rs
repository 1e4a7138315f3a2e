//! IAU 1980 nutation series coefficients (Meeus, Table 22.A)
//!
//! 63 periodic terms over the five fundamental arguments. Sine coefficients
//! give nutation in longitude, cosine coefficients nutation in obliquity,
//! both in units of 0.0001 arcsecond with a linear-in-time part per Julian
//! century.

/// Multipliers of the fundamental arguments [D, M, M', F, Omega] per term
#[rustfmt::skip]
pub const ARG_MULTIPLIERS: [[i8; 5]; 63] = [
    [ 0,  0,  0,  0,  1],
    [-2,  0,  0,  2,  2],
    [ 0,  0,  0,  2,  2],
    [ 0,  0,  0,  0,  2],
    [ 0,  1,  0,  0,  0],
    [ 0,  0,  1,  0,  0],
    [-2,  1,  0,  2,  2],
    [ 0,  0,  0,  2,  1],
    [ 0,  0,  1,  2,  2],
    [-2, -1,  0,  2,  2],
    [-2,  0,  1,  0,  0],
    [-2,  0,  0,  2,  1],
    [ 0,  0, -1,  2,  2],
    [ 2,  0,  0,  0,  0],
    [ 0,  0,  1,  0,  1],
    [ 2,  0, -1,  2,  2],
    [ 0,  0, -1,  0,  1],
    [ 0,  0,  1,  2,  1],
    [-2,  0,  2,  0,  0],
    [ 0,  0, -2,  2,  1],
    [ 2,  0,  0,  2,  2],
    [ 0,  0,  2,  2,  2],
    [ 0,  0,  2,  0,  0],
    [-2,  0,  1,  2,  2],
    [ 0,  0,  0,  2,  0],
    [-2,  0,  0,  2,  0],
    [ 0,  0, -1,  2,  1],
    [ 0,  2,  0,  0,  0],
    [ 2,  0, -1,  0,  1],
    [-2,  2,  0,  2,  2],
    [ 0,  1,  0,  0,  1],
    [-2,  0,  1,  0,  1],
    [ 0, -1,  0,  0,  1],
    [ 0,  0,  2, -2,  0],
    [ 2,  0, -1,  2,  1],
    [ 2,  0,  1,  2,  2],
    [ 0,  1,  0,  2,  2],
    [-2,  1,  1,  0,  0],
    [ 0, -1,  0,  2,  2],
    [ 2,  0,  0,  2,  1],
    [ 2,  0,  1,  0,  0],
    [-2,  0,  2,  2,  2],
    [-2,  0,  1,  2,  1],
    [ 2,  0, -2,  0,  1],
    [ 2,  0,  0,  0,  1],
    [ 0, -1,  1,  0,  0],
    [-2, -1,  0,  2,  1],
    [-2,  0,  0,  0,  1],
    [ 0,  0,  2,  2,  1],
    [-2,  0,  2,  0,  1],
    [-2,  1,  0,  2,  1],
    [ 0,  0,  1, -2,  0],
    [-1,  0,  1,  0,  0],
    [-2,  1,  0,  0,  0],
    [ 1,  0,  0,  0,  0],
    [ 0,  0,  1,  2,  0],
    [ 0,  0, -2,  2,  2],
    [-1, -1,  1,  0,  0],
    [ 0,  1,  1,  0,  0],
    [ 0, -1,  1,  2,  2],
    [ 2, -1, -1,  2,  2],
    [ 0,  0,  3,  2,  2],
    [ 2, -1,  0,  2,  2],
];

/// Longitude coefficients [sine, sine*t] in 0.0001 arcseconds
#[rustfmt::skip]
pub const LONGITUDE_COEFFS: [[f64; 2]; 63] = [
    [-171996.0, -174.2],
    [ -13187.0,   -1.6],
    [  -2274.0,   -0.2],
    [   2062.0,    0.2],
    [   1426.0,   -3.4],
    [    712.0,    0.1],
    [   -517.0,    1.2],
    [   -386.0,   -0.4],
    [   -301.0,    0.0],
    [    217.0,   -0.5],
    [   -158.0,    0.0],
    [    129.0,    0.1],
    [    123.0,    0.0],
    [     63.0,    0.0],
    [     63.0,    0.1],
    [    -59.0,    0.0],
    [    -58.0,   -0.1],
    [    -51.0,    0.0],
    [     48.0,    0.0],
    [     46.0,    0.0],
    [    -38.0,    0.0],
    [    -31.0,    0.0],
    [     29.0,    0.0],
    [     29.0,    0.0],
    [     26.0,    0.0],
    [    -22.0,    0.0],
    [     21.0,    0.0],
    [     17.0,   -0.1],
    [     16.0,    0.0],
    [    -16.0,    0.1],
    [    -15.0,    0.0],
    [    -13.0,    0.0],
    [    -12.0,    0.0],
    [     11.0,    0.0],
    [    -10.0,    0.0],
    [     -8.0,    0.0],
    [      7.0,    0.0],
    [     -7.0,    0.0],
    [     -7.0,    0.0],
    [     -7.0,    0.0],
    [      6.0,    0.0],
    [      6.0,    0.0],
    [      6.0,    0.0],
    [     -6.0,    0.0],
    [     -6.0,    0.0],
    [      5.0,    0.0],
    [     -5.0,    0.0],
    [     -5.0,    0.0],
    [     -5.0,    0.0],
    [      4.0,    0.0],
    [      4.0,    0.0],
    [      4.0,    0.0],
    [     -4.0,    0.0],
    [     -4.0,    0.0],
    [     -4.0,    0.0],
    [      3.0,    0.0],
    [     -3.0,    0.0],
    [     -3.0,    0.0],
    [     -3.0,    0.0],
    [     -3.0,    0.0],
    [     -3.0,    0.0],
    [     -3.0,    0.0],
    [     -3.0,    0.0],
];

/// Obliquity coefficients [cosine, cosine*t] in 0.0001 arcseconds
#[rustfmt::skip]
pub const OBLIQUITY_COEFFS: [[f64; 2]; 63] = [
    [ 92025.0,  8.9],
    [  5736.0, -3.1],
    [   977.0, -0.5],
    [  -895.0,  0.5],
    [    54.0, -0.1],
    [    -7.0,  0.0],
    [   224.0, -0.6],
    [   200.0,  0.0],
    [   129.0, -0.1],
    [   -95.0,  0.3],
    [     0.0,  0.0],
    [   -70.0,  0.0],
    [   -53.0,  0.0],
    [     0.0,  0.0],
    [   -33.0,  0.0],
    [    26.0,  0.0],
    [    32.0,  0.0],
    [    27.0,  0.0],
    [     0.0,  0.0],
    [   -24.0,  0.0],
    [    16.0,  0.0],
    [    13.0,  0.0],
    [     0.0,  0.0],
    [   -12.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [   -10.0,  0.0],
    [     0.0,  0.0],
    [    -8.0,  0.0],
    [     7.0,  0.0],
    [     9.0,  0.0],
    [     7.0,  0.0],
    [     6.0,  0.0],
    [     0.0,  0.0],
    [     5.0,  0.0],
    [     3.0,  0.0],
    [    -3.0,  0.0],
    [     0.0,  0.0],
    [     3.0,  0.0],
    [     3.0,  0.0],
    [     0.0,  0.0],
    [    -3.0,  0.0],
    [    -3.0,  0.0],
    [     3.0,  0.0],
    [     3.0,  0.0],
    [     0.0,  0.0],
    [     3.0,  0.0],
    [     3.0,  0.0],
    [     3.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
    [     0.0,  0.0],
];
