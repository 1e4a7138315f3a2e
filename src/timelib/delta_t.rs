//! Delta-T (TDB - UT) evaluation
//!
//! Composite evaluator: a biennial historical table (1620-1992) with
//! Bessel-style interpolation between entries, quadratic fits for ancient
//! and medieval dates (Stephenson & Houlden 1986), a three-point decade
//! interpolation for 1992-2010, and the Meeus long-term quadratic for dates
//! beyond the data. Returns seconds.

/// Number of biennial table entries (1620 through 1992)
const TERMS: usize = 187;

/// Biennial delta-T values 1620-1992 in seconds (Meeus, Table 10.A)
#[rustfmt::skip]
const DELTA_T_TABLE: [f64; TERMS] = [
    124.0, 115.0, 106.0,  98.0,  91.0,  85.0,  79.0,  74.0,  70.0,  65.0,
     62.0,  58.0,  55.0,  53.0,  50.0,  48.0,  46.0,  44.0,  42.0,  40.0,
     37.0,  35.0,  33.0,  31.0,  28.0,  26.0,  24.0,  22.0,  20.0,  18.0,
     16.0,  14.0,  13.0,  12.0,  11.0,  10.0,   9.0,   9.0,   9.0,   9.0,
      9.0,   9.0,   9.0,   9.0,  10.0,  10.0,  10.0,  10.0,  10.0,  11.0,
     11.0,  11.0,  11.0,  11.0,  11.0,  11.0,  12.0,  12.0,  12.0,  12.0,
     12.0,  12.0,  13.0,  13.0,  13.0,  13.0,  14.0,  14.0,  14.0,  15.0,
     15.0,  15.0,  15.0,  16.0,  16.0,  16.0,  16.0,  16.0,  17.0,  17.0,
     17.0,  17.0,  17.0,  17.0,  17.0,  17.0,  16.0,  16.0,  15.0,  14.0,
     13.7,  13.1,  12.7,  12.5,  12.5,  12.5,  12.5,  12.5,  12.5,  12.3,
     12.0,  11.4,  10.6,   9.6,   8.6,   7.5,   6.6,   6.0,   5.7,   5.6,
      5.7,   5.9,   6.2,   6.5,   6.8,   7.1,   7.3,   7.5,   7.7,   7.8,
      7.9,   7.5,   6.4,   5.4,   2.9,   1.6,  -1.0,  -2.7,  -3.6,  -4.7,
     -5.4,  -5.2,  -5.5,  -5.6,  -5.8,  -5.9,  -6.2,  -6.4,  -6.1,  -4.7,
     -2.7,   0.0,   2.6,   5.4,   7.7,  10.5,  13.4,  16.0,  18.2,  20.2,
     21.2,  22.4,  23.5,  23.9,  24.3,  24.0,  23.9,  23.9,  23.7,  24.0,
     24.3,  25.3,  26.2,  27.3,  28.2,  29.1,  30.0,  30.7,  31.4,  32.2,
     33.1,  34.0,  35.0,  36.5,  38.3,  40.2,  42.2,  44.5,  46.5,  48.5,
     50.5,  52.2,  53.8,  54.9,  55.8,  56.9,  58.3,
];

/// JD at the start of the biennial table (1620.0)
const JD_TABLE_START: f64 = 2_312_752.5;
/// Days per biennial table step
const BIENNIAL_STEP: f64 = 730.5;
/// JD at 948 CE, the ancient/medieval boundary
const JD_948: f64 = 2_067_314.5;
/// JD at 1992.0, the table/recent boundary
const JD_1992: f64 = 2_448_622.5;
/// JD at 2010.0, the recent/extrapolation boundary
const JD_2010: f64 = 2_455_197.5;
/// Days per Julian century
const CENTURY: f64 = 36_525.0;

/// Stephenson & Houlden quadratic for years before 948 CE
fn ancient(jd: f64) -> f64 {
    let c = (jd - JD_948) / CENTURY;
    1_830.0 - 405.0 * c + 46.5 * c * c
}

/// Stephenson & Houlden quadratic for 948 CE up to the table start,
/// centered on 1850
fn medieval(jd: f64) -> f64 {
    let c = (jd - 2_396_758.5) / CENTURY;
    22.5 * c * c
}

/// Bessel interpolation within the biennial table
fn table(jd: f64) -> f64 {
    let mut i = ((jd - JD_TABLE_START) / BIENNIAL_STEP) as usize;
    if i > TERMS - 3 {
        i = TERMS - 3;
    }
    let a = DELTA_T_TABLE[i + 1] - DELTA_T_TABLE[i];
    let b = DELTA_T_TABLE[i + 2] - DELTA_T_TABLE[i + 1];
    let c = a - b;
    let n = (jd - (JD_TABLE_START + BIENNIAL_STEP * i as f64)) / BIENNIAL_STEP;
    DELTA_T_TABLE[i + 1] + n / 2.0 * (a + b + n * c)
}

/// Decade interpolation from the estimated values for 1990, 2000, 2010
fn recent(jd: f64) -> f64 {
    const DT: [f64; 3] = [56.86, 63.83, 70.0];
    let a = DT[1] - DT[0];
    let b = DT[2] - DT[1];
    let c = b - a;
    let n = (jd - 2_451_544.5) / 3_652.5;
    DT[1] + n / 2.0 * (a + b + n * c)
}

/// Meeus eq. (10.1) long-term quadratic, centered on 1810
fn extrapolated(jd: f64) -> f64 {
    let t = jd - 2_382_148.0;
    -15.0 + t * t / 41_048_480.0
}

/// Delta-T in seconds for a Julian date on the UT axis.
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    if jd_ut < JD_948 {
        ancient(jd_ut)
    } else if jd_ut < JD_TABLE_START {
        medieval(jd_ut)
    } else if jd_ut < JD_1992 {
        table(jd_ut)
    } else if jd_ut <= JD_2010 {
        recent(jd_ut)
    } else {
        extrapolated(jd_ut)
    }
}
