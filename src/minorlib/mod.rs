//! Asteroid and comet positions from tabulated orbital elements
//!
//! A catalog loader (outside this crate) supplies one element record per
//! tabulated epoch per body. A query between two epochs interpolates: the
//! scalar elements linearly, the angular elements through the shortest
//! modular arc, and the time of perihelion passage only after shifting it
//! into the same orbital cycle as the earlier bracket so a
//! perihelion-to-perihelion rollover cannot inject a discontinuity.
//!
//! Near-parabolic bodies carry a convergence memo: when the near-parabolic
//! solver fails at some instant, the failing time range is recorded against
//! the body and both bracketing records, and later queries inside the range
//! go straight to the closed-form fallback regime. Ranges only ever widen.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::ops::Range;

use thiserror::Error;

use crate::angles::SphericalPosition3;
use crate::constants::TAU;
use crate::keplerlib::{self, KeplerError, OrbitalElements};

/// Half-width of the failure window recorded around a non-converging query
const FAILURE_WINDOW_DAYS: f64 = 1.0;

/// Errors from minor-body queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MinorBodyError {
    /// The element table has not been loaded (or failed to load)
    #[error("minor-body element table is not available")]
    Unavailable,
    /// No element records exist for this body identifier
    #[error("no orbital elements for body {0}")]
    UnknownBody(u32),
    /// Both anomaly regimes failed for this query
    #[error(transparent)]
    Kepler(#[from] KeplerError),
}

/// One tabulated orbital-element epoch for a minor body.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    /// Body identifier (asteroids >= 20000, comets >= 30000)
    pub body_id: u32,
    /// Designation, e.g. "1P/Halley" or "(1) Ceres"
    pub designation: String,
    /// Epoch of these elements, JDE
    pub epoch: f64,
    /// Perihelion distance q, AU
    pub perihelion_distance: f64,
    /// Eccentricity
    pub eccentricity: f64,
    /// Inclination, radians
    pub inclination: f64,
    /// Argument of perihelion, radians
    pub perihelion_argument: f64,
    /// Longitude of the ascending node, radians
    pub ascending_node: f64,
    /// Time of perihelion passage, JDE
    pub perihelion_time: f64,
    /// Absolute magnitude and slope/activity parameter
    pub magnitude_params: Option<(f64, f64)>,
}

impl ElementRecord {
    fn to_elements(&self) -> OrbitalElements {
        let a = if self.eccentricity == 1.0 {
            0.0
        } else {
            self.perihelion_distance / (1.0 - self.eccentricity)
        };
        OrbitalElements {
            semi_major_axis: a,
            eccentricity: self.eccentricity,
            perihelion_distance: self.perihelion_distance,
            inclination: self.inclination,
            ascending_node: self.ascending_node,
            perihelion_argument: self.perihelion_argument,
            perihelion_time: self.perihelion_time,
            epoch: self.epoch,
            partial: true,
            ..Default::default()
        }
    }
}

/// Time range where the near-parabolic solver is known to fail.
#[derive(Debug, Clone, Copy, Default)]
struct ConvergenceMemo {
    failed: bool,
    min_jde: f64,
    max_jde: f64,
}

impl ConvergenceMemo {
    fn covers(&self, jde: f64) -> bool {
        self.failed && (self.min_jde..=self.max_jde).contains(&jde)
    }

    fn widen(&mut self, jde: f64) {
        if self.failed {
            self.min_jde = self.min_jde.min(jde - FAILURE_WINDOW_DAYS);
            self.max_jde = self.max_jde.max(jde + FAILURE_WINDOW_DAYS);
        } else {
            self.failed = true;
            self.min_jde = jde - FAILURE_WINDOW_DAYS;
            self.max_jde = jde + FAILURE_WINDOW_DAYS;
        }
    }
}

/// The two records bracketing a query instant, as indices into the body's
/// record slice.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    lower: usize,
    upper: usize,
    fraction: f64,
}

/// Minor-body element table and position provider.
#[derive(Debug, Default)]
pub struct MinorBodies {
    /// All records, sorted by body then epoch
    records: Vec<ElementRecord>,
    /// Record range per body id
    index: HashMap<u32, Range<usize>>,
    /// Per-record convergence-failure memo, parallel to `records`
    record_memo: RefCell<Vec<ConvergenceMemo>>,
    /// Per-body convergence-failure memo
    body_memo: RefCell<HashMap<u32, ConvergenceMemo>>,
    initialized: bool,
}

impl MinorBodies {
    pub fn new() -> Self {
        MinorBodies::default()
    }

    /// Load the element table. Until this succeeds every query returns
    /// [`MinorBodyError::Unavailable`].
    pub fn initialize(&mut self, mut records: Vec<ElementRecord>) -> Result<(), MinorBodyError> {
        if records.is_empty() {
            return Err(MinorBodyError::Unavailable);
        }
        records.sort_by(|a, b| {
            a.body_id
                .cmp(&b.body_id)
                .then(a.epoch.partial_cmp(&b.epoch).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut index = HashMap::new();
        let mut start = 0;
        for i in 1..=records.len() {
            if i == records.len() || records[i].body_id != records[start].body_id {
                index.insert(records[start].body_id, start..i);
                start = i;
            }
        }

        self.record_memo = RefCell::new(vec![ConvergenceMemo::default(); records.len()]);
        self.body_memo = RefCell::new(HashMap::new());
        self.records = records;
        self.index = index;
        self.initialized = true;
        Ok(())
    }

    /// True once the element table has loaded.
    pub fn is_available(&self) -> bool {
        self.initialized
    }

    /// All body ids with at least one record.
    pub fn body_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.index.keys().copied()
    }

    /// The designation of a body, from its first record.
    pub fn designation(&self, body_id: u32) -> Option<&str> {
        let range = self.index.get(&body_id)?;
        Some(&self.records[range.start].designation)
    }

    /// Absolute-magnitude parameters of a body (H and G for asteroids, g
    /// and k for comets), from the first record that carries them.
    pub fn magnitude_params(&self, body_id: u32) -> Option<(f64, f64)> {
        let range = self.index.get(&body_id)?;
        self.records[range.clone()]
            .iter()
            .find_map(|r| r.magnitude_params)
    }

    fn bracket(&self, body_id: u32, time_jde: f64) -> Result<Bracket, MinorBodyError> {
        if !self.initialized {
            return Err(MinorBodyError::Unavailable);
        }
        let range = self
            .index
            .get(&body_id)
            .ok_or(MinorBodyError::UnknownBody(body_id))?
            .clone();
        let slice = &self.records[range.clone()];

        // Clamp outside the table; interpolate inside
        if time_jde <= slice[0].epoch || slice.len() == 1 {
            return Ok(Bracket {
                lower: range.start,
                upper: range.start,
                fraction: 0.0,
            });
        }
        let last = slice.len() - 1;
        if time_jde >= slice[last].epoch {
            return Ok(Bracket {
                lower: range.start + last,
                upper: range.start + last,
                fraction: 0.0,
            });
        }

        let upper_rel = slice.partition_point(|r| r.epoch <= time_jde);
        let lower = range.start + upper_rel - 1;
        let upper = range.start + upper_rel;
        let e0 = self.records[lower].epoch;
        let e1 = self.records[upper].epoch;
        Ok(Bracket {
            lower,
            upper,
            fraction: (time_jde - e0) / (e1 - e0),
        })
    }

    /// Orbital elements of a body at an instant.
    ///
    /// Exactly at a tabulated epoch the record's own values come back
    /// unchanged; between two epochs a new partial element set is
    /// interpolated.
    pub fn orbital_elements(
        &self,
        body_id: u32,
        time_jde: f64,
    ) -> Result<OrbitalElements, MinorBodyError> {
        let bracket = self.bracket(body_id, time_jde)?;
        if bracket.lower == bracket.upper || bracket.fraction == 0.0 {
            return Ok(self.records[bracket.lower].to_elements());
        }
        Ok(interpolate_records(
            &self.records[bracket.lower],
            &self.records[bracket.upper],
            bracket.fraction,
        ))
    }

    fn fallback_forced(&self, body_id: u32, bracket: &Bracket, time_jde: f64) -> bool {
        if self
            .body_memo
            .borrow()
            .get(&body_id)
            .is_some_and(|m| m.covers(time_jde))
        {
            return true;
        }
        let memo = self.record_memo.borrow();
        memo[bracket.lower].covers(time_jde) || memo[bracket.upper].covers(time_jde)
    }

    fn record_failure(&self, body_id: u32, bracket: &Bracket, time_jde: f64) {
        self.body_memo
            .borrow_mut()
            .entry(body_id)
            .or_default()
            .widen(time_jde);
        let mut memo = self.record_memo.borrow_mut();
        memo[bracket.lower].widen(time_jde);
        memo[bracket.upper].widen(time_jde);
    }

    /// Heliocentric ecliptic position of a minor body.
    ///
    /// A near-parabolic convergence failure is memoized and the query
    /// retried once with the closed-regime fallback; only a failure of the
    /// fallback itself surfaces as an error.
    pub fn heliocentric_position(
        &self,
        body_id: u32,
        time_jde: f64,
    ) -> Result<SphericalPosition3, MinorBodyError> {
        let bracket = self.bracket(body_id, time_jde)?;
        let elements = self.orbital_elements(body_id, time_jde)?;
        let dt = time_jde - elements.perihelion_time;

        let force = self.fallback_forced(body_id, &bracket, time_jde);
        match keplerlib::heliocentric_position(&elements, dt, force) {
            Ok(pos) => Ok(pos),
            Err(KeplerError::NonConvergence { .. }) if !force => {
                self.record_failure(body_id, &bracket, time_jde);
                Ok(keplerlib::heliocentric_position(&elements, dt, true)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Shortest-arc interpolation of a non-negative angle, radians.
fn interpolate_modular(a: f64, b: f64, fraction: f64) -> f64 {
    let mut delta = (b - a).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    (a + delta * fraction).rem_euclid(TAU)
}

/// Shortest-arc interpolation keeping the signed range, for inclination.
fn interpolate_signed(a: f64, b: f64, fraction: f64) -> f64 {
    let mut delta = (b - a).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    a + delta * fraction
}

/// Shift `tp1` by whole orbital periods until it lies within half a period
/// of `tp0`.
fn normalize_perihelion_time(tp0: f64, tp1: f64, period: Option<f64>) -> f64 {
    match period {
        Some(p) if p > 0.0 => tp1 - p * ((tp1 - tp0) / p).round(),
        _ => tp1,
    }
}

/// Build interpolated elements from two bracketing records.
fn interpolate_records(r0: &ElementRecord, r1: &ElementRecord, fraction: f64) -> OrbitalElements {
    let q = r0.perihelion_distance + (r1.perihelion_distance - r0.perihelion_distance) * fraction;
    let e = r0.eccentricity + (r1.eccentricity - r0.eccentricity) * fraction;

    let base = r0.to_elements();
    let tp1 = normalize_perihelion_time(
        r0.perihelion_time,
        r1.perihelion_time,
        base.period_days(),
    );
    let tp = r0.perihelion_time + (tp1 - r0.perihelion_time) * fraction;

    OrbitalElements {
        semi_major_axis: if e == 1.0 { 0.0 } else { q / (1.0 - e) },
        eccentricity: e,
        perihelion_distance: q,
        inclination: interpolate_signed(r0.inclination, r1.inclination, fraction),
        ascending_node: interpolate_modular(r0.ascending_node, r1.ascending_node, fraction),
        perihelion_argument: interpolate_modular(
            r0.perihelion_argument,
            r1.perihelion_argument,
            fraction,
        ),
        perihelion_time: tp,
        epoch: r0.epoch + (r1.epoch - r0.epoch) * fraction,
        partial: true,
        ..Default::default()
    }
}
