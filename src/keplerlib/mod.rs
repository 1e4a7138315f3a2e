//! Classical orbital elements and Kepler's equation
//!
//! Four numerically distinct anomaly solvers cover the full eccentricity
//! range:
//!
//! - elliptical (`e < 0.98`): sign-directed binary search on the eccentric
//!   anomaly, Sinnott's scheme, a fixed 60 halvings
//! - hyperbolic (`e > 1.1`): Laguerre-Conway iteration with a fifth-order
//!   correction term
//! - parabolic (`e == 1`): Barker's equation in closed form via its cubic
//!   root
//! - near-parabolic (`0.98 <= e <= 1.1`): Meeus's nested series refinement
//!   (chapter 35), which can fail to converge; callers fall back to the
//!   elliptical or hyperbolic solver when it does
//!
//! All anomalies are in radians, times in days, distances in AU.

use std::f64::consts::PI;

use thiserror::Error;

use crate::angles::{Angle, SphericalPosition3};
use crate::constants::{GAUSSIAN_GRAVITY, TAU};

/// Lower edge of the near-parabolic eccentricity band
pub const NEAR_PARABOLIC_MIN: f64 = 0.98;
/// Upper edge of the near-parabolic eccentricity band
pub const NEAR_PARABOLIC_MAX: f64 = 1.1;

/// Hyperbolic solver convergence tolerance on the anomaly step
const HYPERBOLIC_TOLERANCE: f64 = 1.0e-12;
/// Hyperbolic solver iteration cap
const HYPERBOLIC_MAX_ITERATIONS: usize = 100;
/// Near-parabolic per-loop iteration cap
const NEAR_PARABOLIC_MAX_ITERATIONS: usize = 50;
/// Near-parabolic convergence tolerance
const NEAR_PARABOLIC_TOLERANCE: f64 = 1.0e-9;
/// Near-parabolic series divergence guard
const NEAR_PARABOLIC_DIVERGENCE: f64 = 1.0e4;

/// Errors from the anomaly solvers.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum KeplerError {
    /// An iterative solver hit its cap without meeting tolerance
    #[error("kepler solver failed to converge after {iterations} iterations (e = {eccentricity})")]
    NonConvergence {
        iterations: usize,
        eccentricity: f64,
    },
    /// Elements missing a field the requested operation needs
    #[error("orbital elements are incomplete for this operation")]
    IncompleteElements,
}

/// True anomaly and heliocentric radius, the common solver output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyResult {
    /// True anomaly in radians, signed
    pub true_anomaly: f64,
    /// Radius in AU
    pub radius: f64,
}

/// Classical orbital elements.
///
/// Interpolated minor-body elements populate only the fields their source
/// records carry; `partial` marks those instances so consumers know the
/// derived fields (anomalies, equation of center) are absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalElements {
    /// Semi-major axis in AU (negative for hyperbolic orbits)
    pub semi_major_axis: f64,
    /// Eccentricity
    pub eccentricity: f64,
    /// Perihelion distance in AU
    pub perihelion_distance: f64,
    /// Inclination, radians
    pub inclination: f64,
    /// Longitude of the ascending node, radians
    pub ascending_node: f64,
    /// Argument of perihelion, radians
    pub perihelion_argument: f64,
    /// Mean anomaly at the element epoch, radians
    pub mean_anomaly: f64,
    /// True anomaly, radians (derived)
    pub true_anomaly: f64,
    /// Equation of center (true minus mean anomaly), radians (derived)
    pub equation_of_center: f64,
    /// Time of perihelion passage, JDE
    pub perihelion_time: f64,
    /// Element epoch, JDE
    pub epoch: f64,
    /// True when only the tabulated subset of fields is populated
    pub partial: bool,
}

impl OrbitalElements {
    /// Mean daily motion in radians per day.
    ///
    /// Derived from the semi-major axis through Kepler's third law; `None`
    /// for parabolic elements, which have no period.
    pub fn mean_motion(&self) -> Option<f64> {
        let a = self.semi_major_axis.abs();
        if a == 0.0 || self.eccentricity == 1.0 {
            return None;
        }
        Some(GAUSSIAN_GRAVITY / (a * a * a).sqrt())
    }

    /// Orbital period in days; `None` for open orbits.
    pub fn period_days(&self) -> Option<f64> {
        if self.eccentricity >= 1.0 {
            return None;
        }
        self.mean_motion().map(|n| TAU / n)
    }
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly.
///
/// Sinnott's binary search: the step starts at a quarter turn and halves
/// on every pass, its direction picked by the sign of the residual. Always
/// runs the full 60 halvings; cost is constant and the error bound is set
/// by the final step size alone.
pub fn eccentric_anomaly(eccentricity: f64, mean_anomaly: f64) -> f64 {
    let direction = if mean_anomaly < 0.0 { -1.0 } else { 1.0 };
    let mut m = mean_anomaly.abs().rem_euclid(TAU);
    let flip = if m > PI {
        m = TAU - m;
        -1.0
    } else {
        1.0
    };

    let mut e_anom = PI / 2.0;
    let mut step = PI / 4.0;
    for _ in 0..60 {
        let m1 = e_anom - eccentricity * e_anom.sin();
        e_anom += if m > m1 { step } else { -step };
        step *= 0.5;
    }
    e_anom * flip * direction
}

/// Elliptical true anomaly and radius from `e`, `M`, and the semi-major
/// axis in AU.
pub fn elliptical(eccentricity: f64, mean_anomaly: f64, semi_major_axis: f64) -> AnomalyResult {
    let e_anom = eccentric_anomaly(eccentricity, mean_anomaly);
    let true_anomaly = 2.0
        * (((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt() * (e_anom / 2.0).tan()).atan();
    let radius = semi_major_axis * (1.0 - eccentricity * e_anom.cos());
    AnomalyResult {
        true_anomaly,
        radius,
    }
}

/// Solve the hyperbolic Kepler equation `M = e sinh H - H`.
///
/// Laguerre-Conway iteration of order five. Converges in a handful of
/// steps for any sane input; the cap turns a pathological input into a
/// reported [`KeplerError::NonConvergence`] instead of a spin.
pub fn hyperbolic_anomaly(eccentricity: f64, mean_anomaly: f64) -> Result<f64, KeplerError> {
    const ORDER: f64 = 5.0;
    let m = mean_anomaly;
    let mut h = (2.0 * m.abs() / eccentricity + 1.8).ln();
    if m < 0.0 {
        h = -h;
    }

    for _ in 0..HYPERBOLIC_MAX_ITERATIONS {
        let f = eccentricity * h.sinh() - h - m;
        let fp = eccentricity * h.cosh() - 1.0;
        let fpp = eccentricity * h.sinh();

        let disc = ((ORDER - 1.0) * (ORDER - 1.0) * fp * fp
            - ORDER * (ORDER - 1.0) * f * fpp)
            .abs()
            .sqrt();
        let denom = if fp >= 0.0 { fp + disc } else { fp - disc };
        let step = ORDER * f / denom;
        h -= step;

        if step.abs() < HYPERBOLIC_TOLERANCE {
            return Ok(h);
        }
    }
    Err(KeplerError::NonConvergence {
        iterations: HYPERBOLIC_MAX_ITERATIONS,
        eccentricity,
    })
}

/// Hyperbolic true anomaly and radius from `e`, `M`, and the (negative)
/// semi-major axis in AU.
pub fn hyperbolic(
    eccentricity: f64,
    mean_anomaly: f64,
    semi_major_axis: f64,
) -> Result<AnomalyResult, KeplerError> {
    let h = hyperbolic_anomaly(eccentricity, mean_anomaly)?;
    let true_anomaly = 2.0
        * (((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt() * (h / 2.0).tanh()).atan();
    let radius = semi_major_axis.abs() * (eccentricity * h.cosh() - 1.0);
    Ok(AnomalyResult {
        true_anomaly,
        radius,
    })
}

/// Parabolic true anomaly and radius from the perihelion distance and days
/// since perihelion, via the closed-form root of Barker's equation.
pub fn parabolic(perihelion_distance: f64, days_since_perihelion: f64) -> AnomalyResult {
    let q = perihelion_distance;
    let w = 3.0 * GAUSSIAN_GRAVITY / (q * (2.0 * q).sqrt()) * days_since_perihelion;
    let g = w / 2.0;
    let y = (g + (g * g + 1.0).sqrt()).cbrt();
    let s = y - 1.0 / y;
    AnomalyResult {
        true_anomaly: 2.0 * s.atan(),
        radius: q * (1.0 + s * s),
    }
}

/// Near-parabolic true anomaly and radius, Meeus chapter 35.
///
/// Nested refinement: the inner sum accumulates the series in `g`, the
/// middle loop re-solves the cubic for `s`, and the outer loop repeats
/// until `s` is stable. Every loop is capped; exceeding any cap (or the
/// series running away) reports non-convergence so the caller can fall
/// back to the elliptical or hyperbolic regime and memoize the failure.
pub fn near_parabolic(
    eccentricity: f64,
    perihelion_distance: f64,
    days_since_perihelion: f64,
) -> Result<AnomalyResult, KeplerError> {
    let q = perihelion_distance;
    let e = eccentricity;
    if days_since_perihelion == 0.0 {
        return Ok(AnomalyResult {
            true_anomaly: 0.0,
            radius: q,
        });
    }

    let q1 = GAUSSIAN_GRAVITY * ((1.0 + e) / q).sqrt() / (2.0 * q);
    let g = (1.0 - e) / (1.0 + e);
    let q2 = q1 * days_since_perihelion;

    // Barker starting value for s = tan(v/2)
    let mut s = 2.0 / (3.0 * q2.abs());
    s = 2.0 / (2.0 * ((s.atan() / 2.0).tan().cbrt()).atan()).tan();
    if days_since_perihelion < 0.0 {
        s = -s;
    }

    for _ in 0..NEAR_PARABOLIC_MAX_ITERATIONS {
        let s0 = s;
        let mut z = 1.0;
        let y = s * s;
        let mut g1 = -y * s;
        let mut q3 = q2 + 2.0 * g * s * y / 3.0;

        let mut inner = 0;
        loop {
            z += 1.0;
            g1 *= -g * y;
            let z1 = (z - (z + 1.0) * g) / (2.0 * z + 1.0);
            let f = z1 * g1;
            q3 += f;

            inner += 1;
            if inner > NEAR_PARABOLIC_MAX_ITERATIONS || f.abs() > NEAR_PARABOLIC_DIVERGENCE {
                return Err(KeplerError::NonConvergence {
                    iterations: inner,
                    eccentricity: e,
                });
            }
            if f.abs() <= NEAR_PARABOLIC_TOLERANCE {
                break;
            }
        }

        let mut refine = 0;
        loop {
            let s1 = s;
            s = (2.0 * s * s * s / 3.0 + q3) / (s * s + 1.0);

            refine += 1;
            if refine > NEAR_PARABOLIC_MAX_ITERATIONS {
                return Err(KeplerError::NonConvergence {
                    iterations: refine,
                    eccentricity: e,
                });
            }
            if (s - s1).abs() <= NEAR_PARABOLIC_TOLERANCE {
                break;
            }
        }

        if (s - s0).abs() <= NEAR_PARABOLIC_TOLERANCE {
            let true_anomaly = 2.0 * s.atan();
            let radius = q * (1.0 + e) / (1.0 + e * true_anomaly.cos());
            return Ok(AnomalyResult {
                true_anomaly,
                radius,
            });
        }
    }
    Err(KeplerError::NonConvergence {
        iterations: NEAR_PARABOLIC_MAX_ITERATIONS,
        eccentricity: e,
    })
}

/// True anomaly and radius for arbitrary eccentricity.
///
/// Dispatches in precedence order: exact parabolic, then clearly elliptical
/// (`e < 0.98`), then clearly hyperbolic (`e > 1.1`), and only then the
/// near-parabolic band. `force_fallback` skips the near-parabolic solver
/// and routes the band to whichever closed regime is nearer; the minor-body
/// provider sets it from its convergence memo.
pub fn solve_anomaly(
    eccentricity: f64,
    perihelion_distance: f64,
    days_since_perihelion: f64,
    force_fallback: bool,
) -> Result<AnomalyResult, KeplerError> {
    let e = eccentricity;
    let q = perihelion_distance;

    if e == 1.0 {
        return Ok(parabolic(q, days_since_perihelion));
    }

    let in_band = (NEAR_PARABOLIC_MIN..=NEAR_PARABOLIC_MAX).contains(&e);
    if in_band && !force_fallback {
        return near_parabolic(e, q, days_since_perihelion);
    }

    if e < 1.0 {
        let a = q / (1.0 - e);
        let n = GAUSSIAN_GRAVITY / (a * a * a).sqrt();
        Ok(elliptical(e, n * days_since_perihelion, a))
    } else {
        let a = q / (1.0 - e); // negative
        let n = GAUSSIAN_GRAVITY / (a.abs().powi(3)).sqrt();
        hyperbolic(e, n * days_since_perihelion, a)
    }
}

/// Heliocentric ecliptic position of a body on the orbit described by
/// `elements` at `days_since_perihelion`.
///
/// Solves the appropriate anomaly regime, then rotates the in-plane
/// position through the argument of perihelion, inclination, and ascending
/// node into the ecliptic frame of the element epoch.
pub fn heliocentric_position(
    elements: &OrbitalElements,
    days_since_perihelion: f64,
    force_fallback: bool,
) -> Result<SphericalPosition3, KeplerError> {
    let result = solve_anomaly(
        elements.eccentricity,
        elements.perihelion_distance,
        days_since_perihelion,
        force_fallback,
    )?;

    let u = Angle::from_radians(result.true_anomaly + elements.perihelion_argument);
    let node = Angle::from_radians(elements.ascending_node);
    let cos_i = elements.inclination.cos();
    let sin_i = elements.inclination.sin();

    let x = result.radius * (node.cos() * u.cos() - node.sin() * u.sin() * cos_i);
    let y = result.radius * (node.sin() * u.cos() + node.cos() * u.sin() * cos_i);
    let z = result.radius * u.sin() * sin_i;

    Ok(SphericalPosition3::new(
        y.atan2(x),
        (z / result.radius).clamp(-1.0, 1.0).asin(),
        result.radius,
    ))
}
