//! Root-finding utilities for event searches
//!
//! Two bracketed 1-D solvers sit under every "when does quantity X cross
//! threshold Y" question in the crate:
//!
//! - [`find_zero`]: secant iteration from two bracketing samples
//! - [`find_extremum`]: golden-section search with parabolic-interpolation
//!   acceleration, in the style of Brent's method, auto-detecting whether a
//!   minimum or maximum is being bracketed
//!
//! Both are best-effort: when the iteration cap is reached the last abscissa
//! tried is returned, and callers treat the result as approximate.

/// Golden ratio step for the extremum search
const GOLD: f64 = 0.381_966_011_250_105;

/// Default convergence tolerance in the abscissa (days, for time searches)
pub const DEFAULT_TOLERANCE: f64 = 1.0e-8;

/// Result of an extremum search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    /// Abscissa of the extremum
    pub x: f64,
    /// Function value at the extremum
    pub y: f64,
    /// True when the extremum is a maximum
    pub is_maximum: bool,
}

/// Find a zero of `f` between two bracketing samples.
///
/// `(x0, y0)` and `(x1, y1)` must straddle the zero (`y0` and `y1` of
/// opposite sign). Each secant step replaces whichever bracket shares the
/// sign of the new sample. Iteration stops when the step or the residual
/// drops below `tolerance`, or after `max_iterations` steps; in the capped
/// case the last x tried is still returned.
pub fn find_zero<F>(
    mut x0: f64,
    mut y0: f64,
    mut x1: f64,
    mut y1: f64,
    tolerance: f64,
    max_iterations: usize,
    mut f: F,
) -> f64
where
    F: FnMut(f64) -> f64,
{
    if y0 == 0.0 {
        return x0;
    }
    if y1 == 0.0 {
        return x1;
    }

    let mut x = x1;
    for _ in 0..max_iterations {
        if y1 == y0 {
            break;
        }
        x = x1 - y1 * (x1 - x0) / (y1 - y0);
        let y = f(x);

        if y == 0.0 || (x - x1).abs() < tolerance {
            return x;
        }

        // Replace the bracket that shares the new sample's sign
        if (y > 0.0) == (y1 > 0.0) {
            x1 = x;
            y1 = y;
        } else {
            x0 = x;
            y0 = y;
        }
    }
    x
}

/// Find a local extremum of `f` inside the bracket `ax < bx < cx`.
///
/// Whether the bracket holds a minimum or a maximum is detected from the
/// sign of the function change from `ax` to `bx`; a maximum is searched by
/// negating internally and restoring the sign on output.
///
/// Parabolic interpolation through the three current points is tried first
/// each round; when the fitted step is unusable the search falls back to a
/// golden-section step. Best-effort on hitting `max_iterations`.
pub fn find_extremum<F>(
    ax: f64,
    bx: f64,
    cx: f64,
    tolerance: f64,
    max_iterations: usize,
    mut f: F,
) -> Extremum
where
    F: FnMut(f64) -> f64,
{
    let fa = f(ax);
    let fb = f(bx);

    // Rising toward bx means the bracket holds a maximum
    let is_maximum = fb > fa;
    let sign = if is_maximum { -1.0 } else { 1.0 };

    let mut g = |x: f64| sign * f(x);

    let (mut a, mut b) = if ax < cx { (ax, cx) } else { (cx, ax) };
    let mut x = bx;
    let mut w = bx;
    let mut v = bx;
    let mut fx = sign * fb;
    let mut fw = fx;
    let mut fv = fx;
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for _ in 0..max_iterations {
        let xm = 0.5 * (a + b);
        let tol1 = tolerance * x.abs() + 1e-12;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            break;
        }

        let mut use_golden = true;
        if e.abs() > tol1 {
            // Parabolic fit through x, w, v
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let e_prev = e;
            e = d;
            if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = if xm > x { tol1 } else { -tol1 };
                }
                use_golden = false;
            }
        }
        if use_golden {
            e = if x >= xm { a - x } else { b - x };
            d = GOLD * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else if d > 0.0 {
            x + tol1
        } else {
            x - tol1
        };
        let fu = g(u);

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    Extremum {
        x,
        y: sign * fx,
        is_maximum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_find_zero_linear() {
        let f = |x: f64| 2.0 * x - 3.0;
        let x = find_zero(0.0, f(0.0), 5.0, f(5.0), 1e-12, 50, f);
        assert_relative_eq!(x, 1.5, epsilon = 1e-10);
    }

    #[test]
    fn test_find_zero_sine() {
        let f = |x: f64| x.sin();
        let x = find_zero(3.0, f(3.0), 3.3, f(3.3), 1e-12, 50, f);
        assert_relative_eq!(x, PI, epsilon = 1e-10);
    }

    #[test]
    fn test_find_zero_exact_endpoint() {
        let f = |x: f64| x - 2.0;
        let x = find_zero(2.0, 0.0, 4.0, 2.0, 1e-12, 50, f);
        assert_relative_eq!(x, 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_find_zero_capped_returns_last_x() {
        // With the cap exhausted the result is approximate but finite
        let f = |x: f64| x * x - 2.0;
        let x = find_zero(1.0, f(1.0), 2.0, f(2.0), 1e-15, 1, f);
        assert!(x.is_finite());
        assert!((x - 2.0_f64.sqrt()).abs() < 0.5);
    }

    #[test]
    fn test_find_extremum_minimum() {
        let f = |x: f64| (x - 1.0) * (x - 1.0) + 0.5;
        let ext = find_extremum(-2.0, 0.5, 4.0, 1e-10, 100, f);
        assert!(!ext.is_maximum);
        assert_relative_eq!(ext.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(ext.y, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_find_extremum_maximum() {
        let f = |x: f64| x.sin();
        let ext = find_extremum(1.0, 1.4, 2.5, 1e-10, 100, f);
        assert!(ext.is_maximum);
        assert_relative_eq!(ext.x, PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(ext.y, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_find_extremum_detects_direction() {
        // Falling from ax toward bx brackets a minimum
        let down = find_extremum(0.0, 1.0, 2.0, 1e-10, 100, |x| (x - 1.0).powi(2));
        assert!(!down.is_maximum);
        // Rising toward bx brackets a maximum
        let up = find_extremum(0.0, 1.0, 2.0, 1e-10, 100, |x| -(x - 1.0).powi(2));
        assert!(up.is_maximum);
    }

    #[test]
    fn test_find_extremum_reversed_bracket() {
        let f = |x: f64| (x - 3.0) * (x - 3.0);
        let ext = find_extremum(5.0, 3.5, 1.0, 1e-10, 100, f);
        assert_relative_eq!(ext.x, 3.0, epsilon = 1e-6);
    }
}
