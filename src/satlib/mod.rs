//! Planetary satellite positions and disc-relation events
//!
//! A satellite theory produces, per moon, a rectangular offset from the
//! primary in units of the primary's equatorial radius: X positive toward
//! celestial east, Y positive toward celestial north (projected through the
//! planet's flattening), Z positive toward the observer. From those offsets
//! each moon is classified against the planet's disc, and transitions of
//! the classification over a one-minute window become transit, occultation,
//! shadow, and eclipse events.
//!
//! The same classification run from the Sun's vantage point instead of
//! Earth's turns transits into shadow passages and occultations into
//! eclipses.

pub mod jupiter;
pub mod saturn;

use crate::constants::{AU_KM, DAY_MIN};

/// Which vantage point the offsets are computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Perspective {
    /// As seen from Earth: disc relations are transits and occultations
    #[default]
    Earth,
    /// As seen from the Sun: disc relations are shadows and eclipses
    Sun,
}

/// Position and disc relation of one satellite at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonInfo {
    /// Zero-based satellite index within its theory
    pub satellite: usize,
    /// East-west offset in planet equatorial radii
    pub x: f64,
    /// North-south offset in planet equatorial radii
    pub y: f64,
    /// Line-of-sight offset; positive is nearer the observer
    pub z: f64,
    /// Nearer the observer than the planet's center
    pub inferior: bool,
    /// Projects onto the planet's flattened disc
    pub within_disc: bool,
    /// On the disc and nearer: transit (Earth) or shadow passage (Sun)
    pub in_front_of_disc: bool,
    /// On the disc and farther: occultation (Earth) or eclipse (Sun)
    pub behind_disc: bool,
}

impl MoonInfo {
    /// Classify an offset against a disc with the given polar/equatorial
    /// axis ratio.
    pub fn classify(satellite: usize, x: f64, y: f64, z: f64, flattening: f64) -> MoonInfo {
        let inferior = z > 0.0;
        let ys = y / flattening;
        let within_disc = x * x + ys * ys < 1.0;
        MoonInfo {
            satellite,
            x,
            y,
            z,
            inferior,
            within_disc,
            in_front_of_disc: within_disc && inferior,
            behind_disc: within_disc && !inferior,
        }
    }

    /// Distance from the disc edge in the projected plane, negative inside.
    pub fn disc_distance(&self, flattening: f64) -> f64 {
        let ys = self.y / flattening;
        (self.x * self.x + ys * ys).sqrt() - 1.0
    }
}

/// Perspective factor for the projected X/Y offsets: a satellite nearer
/// the observer than the planet's center (`z_radii` positive) subtends
/// its offset from a shorter distance than the planet does.
pub(crate) fn perspective_scale(distance_au: f64, z_radii: f64, radius_km: f64) -> f64 {
    distance_au / (distance_au - z_radii * radius_km / AU_KM)
}

/// A satellite theory for one primary planet.
pub trait SatelliteTheory {
    /// Number of satellites the theory models.
    fn satellite_count(&self) -> usize;

    /// Satellite names, indexed like the positions.
    fn satellite_names(&self) -> &'static [&'static str];

    /// Polar/equatorial axis ratio of the primary's disc.
    fn flattening(&self) -> f64;

    /// Offsets and disc relations for every satellite at a UT instant.
    fn positions(&self, time_jdu: f64, perspective: Perspective) -> Vec<MoonInfo>;

    /// Maximum angular rate per satellite in planet radii per minute, used
    /// to widen the event-search stride. `None` degrades the search to a
    /// one-minute step.
    fn max_radii_per_minute(&self) -> Option<&'static [f64]>;
}

/// What changed for one satellite across the event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonEventKind {
    TransitStart,
    TransitEnd,
    OccultationStart,
    OccultationEnd,
    ShadowStart,
    ShadowEnd,
    EclipseStart,
    EclipseEnd,
}

/// One disc-relation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoonEvent {
    pub satellite: usize,
    pub kind: MoonEventKind,
}

/// All transitions in the minute surrounding a query instant, plus a hint
/// for how far ahead the next transition can possibly be.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonEvents {
    /// Center of the one-minute comparison window, JDU
    pub time_jdu: f64,
    pub events: Vec<MoonEvent>,
    /// Lower bound on minutes until any satellite can reach a disc edge
    pub stride_minutes: f64,
}

/// Longest stride the adaptive estimator may take, minutes.
const MAX_STRIDE_MINUTES: f64 = 120.0;
/// Half-width of the event comparison window, days (30 seconds).
const HALF_WINDOW_DAYS: f64 = 30.0 / 86_400.0;

fn transitions(
    before: &[MoonInfo],
    after: &[MoonInfo],
    perspective: Perspective,
) -> Vec<MoonEvent> {
    let mut events = Vec::new();
    for (b, a) in before.iter().zip(after) {
        let (front_start, front_end, back_start, back_end) = match perspective {
            Perspective::Earth => (
                MoonEventKind::TransitStart,
                MoonEventKind::TransitEnd,
                MoonEventKind::OccultationStart,
                MoonEventKind::OccultationEnd,
            ),
            Perspective::Sun => (
                MoonEventKind::ShadowStart,
                MoonEventKind::ShadowEnd,
                MoonEventKind::EclipseStart,
                MoonEventKind::EclipseEnd,
            ),
        };
        if !b.in_front_of_disc && a.in_front_of_disc {
            events.push(MoonEvent {
                satellite: a.satellite,
                kind: front_start,
            });
        }
        if b.in_front_of_disc && !a.in_front_of_disc {
            events.push(MoonEvent {
                satellite: a.satellite,
                kind: front_end,
            });
        }
        if !b.behind_disc && a.behind_disc {
            events.push(MoonEvent {
                satellite: a.satellite,
                kind: back_start,
            });
        }
        if b.behind_disc && !a.behind_disc {
            events.push(MoonEvent {
                satellite: a.satellite,
                kind: back_end,
            });
        }
    }
    events
}

/// Detect disc-relation transitions in the minute around `time_jdu`.
///
/// Positions are compared 30 seconds before and after the query instant;
/// the stride hint is how many minutes the caller may skip before any
/// satellite could reach a disc boundary.
pub fn events_at<T: SatelliteTheory + ?Sized>(
    theory: &T,
    time_jdu: f64,
    perspective: Perspective,
) -> MoonEvents {
    let before = theory.positions(time_jdu - HALF_WINDOW_DAYS, perspective);
    let after = theory.positions(time_jdu + HALF_WINDOW_DAYS, perspective);
    let events = transitions(&before, &after, perspective);
    let stride_minutes = stride_estimate(theory, &after);
    MoonEvents {
        time_jdu,
        events,
        stride_minutes,
    }
}

/// Minutes the search may skip, from each satellite's distance to the disc
/// edge and its maximum angular rate. Capped; degrades to one minute when
/// the theory publishes no rate table.
pub fn stride_estimate<T: SatelliteTheory + ?Sized>(theory: &T, positions: &[MoonInfo]) -> f64 {
    let Some(rates) = theory.max_radii_per_minute() else {
        return 1.0;
    };
    let flattening = theory.flattening();
    let mut stride = MAX_STRIDE_MINUTES;
    for info in positions {
        let rate = rates.get(info.satellite).copied().unwrap_or(0.0);
        if rate <= 0.0 {
            continue;
        }
        let distance = info.disc_distance(flattening).abs();
        stride = stride.min((distance / rate).max(1.0));
    }
    stride
}

/// Scan forward from `start_jdu` with the adaptive stride until some
/// satellite event occurs; `None` when `limit_days` is exhausted.
pub fn next_events<T: SatelliteTheory + ?Sized>(
    theory: &T,
    start_jdu: f64,
    perspective: Perspective,
    limit_days: f64,
) -> Option<MoonEvents> {
    let mut t = start_jdu;
    let end = start_jdu + limit_days;
    while t <= end {
        let found = events_at(theory, t, perspective);
        if !found.events.is_empty() {
            return Some(found);
        }
        t += found.stride_minutes.max(1.0) / DAY_MIN;
    }
    None
}

/// Scan backward from `start_jdu` with the adaptive stride until some
/// satellite event occurs; `None` when `limit_days` is exhausted. The
/// stride is a bound on minutes before any satellite reaches a disc
/// edge in either direction, so stepping backward by it is safe too.
pub fn previous_events<T: SatelliteTheory + ?Sized>(
    theory: &T,
    start_jdu: f64,
    perspective: Perspective,
    limit_days: f64,
) -> Option<MoonEvents> {
    let mut t = start_jdu;
    let end = start_jdu - limit_days;
    while t >= end {
        let found = events_at(theory, t, perspective);
        if !found.events.is_empty() {
            return Some(found);
        }
        t -= found.stride_minutes.max(1.0) / DAY_MIN;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_in_front() {
        let info = MoonInfo::classify(0, 0.2, 0.1, 5.0, 0.9);
        assert!(info.inferior);
        assert!(info.within_disc);
        assert!(info.in_front_of_disc);
        assert!(!info.behind_disc);
    }

    #[test]
    fn test_classify_behind() {
        let info = MoonInfo::classify(0, -0.3, 0.0, -4.0, 0.9);
        assert!(!info.inferior);
        assert!(info.behind_disc);
        assert!(!info.in_front_of_disc);
    }

    #[test]
    fn test_classify_off_disc() {
        let info = MoonInfo::classify(0, 2.0, 0.0, 3.0, 0.9);
        assert!(info.inferior);
        assert!(!info.within_disc);
        assert!(!info.in_front_of_disc);
        assert!(!info.behind_disc);
    }

    #[test]
    fn test_flattening_squashes_disc_north_south() {
        // y just outside the polar radius but inside the equatorial one
        let on_equator = MoonInfo::classify(0, 0.95, 0.0, 1.0, 0.9);
        assert!(on_equator.within_disc);
        let near_pole = MoonInfo::classify(0, 0.0, 0.95, 1.0, 0.9);
        assert!(!near_pole.within_disc);
    }

    #[test]
    fn test_transition_kinds_by_perspective() {
        let before = vec![MoonInfo::classify(0, 1.5, 0.0, 1.0, 0.9)];
        let after = vec![MoonInfo::classify(0, 0.5, 0.0, 1.0, 0.9)];
        let earth = transitions(&before, &after, Perspective::Earth);
        assert_eq!(
            earth,
            vec![MoonEvent {
                satellite: 0,
                kind: MoonEventKind::TransitStart
            }]
        );
        let sun = transitions(&before, &after, Perspective::Sun);
        assert_eq!(sun[0].kind, MoonEventKind::ShadowStart);
    }

    #[test]
    fn test_no_transition_no_events() {
        let a = vec![MoonInfo::classify(0, 1.5, 0.0, 1.0, 0.9)];
        assert!(transitions(&a, &a, Perspective::Earth).is_empty());
    }

    #[test]
    fn test_disc_distance_sign() {
        let outside = MoonInfo::classify(0, 2.0, 0.0, 1.0, 1.0);
        assert!(outside.disc_distance(1.0) > 0.0);
        let inside = MoonInfo::classify(0, 0.5, 0.0, 1.0, 1.0);
        assert!(inside.disc_distance(1.0) < 0.0);
    }

    #[test]
    fn test_perspective_scale_direction() {
        // Callisto-like geometry: 26 radii in front of or behind Jupiter
        // at 5.6 AU stretches or shrinks the offsets by about 0.2 percent
        let near = perspective_scale(5.6, 26.0, 71_492.0);
        let far = perspective_scale(5.6, -26.0, 71_492.0);
        assert!(near > 1.001 && near < 1.004, "near = {near}");
        assert!(far < 0.999 && far > 0.996, "far = {far}");
        assert!((perspective_scale(5.6, 0.0, 71_492.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_previous_events_walks_backward() {
        let theory = jupiter::JupiterMoons;
        let start = 2_451_555.0;
        let found = previous_events(&theory, start, Perspective::Earth, 10.0)
            .expect("Galilean activity expected within ten days back");
        assert!(found.time_jdu <= start);
        assert!(found.time_jdu > start - 10.0);
        assert!(!found.events.is_empty());
    }
}
