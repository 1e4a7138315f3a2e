//! Astronomical event searches
//!
//! [`EventFinder`] turns the instantaneous queries of
//! [`SolarSystem`](crate::solarsystem::SolarSystem) into dated events:
//! rise/set/transit and twilight for an observer, lunar phases, equinoxes
//! and solstices, planetary phenomena (oppositions, conjunctions,
//! elongations, quadratures, apsides), eclipses, Great Red Spot transits
//! and Galilean/Saturnian satellite activity.
//!
//! Every search follows the same scheme: sample a scalar function of time
//! at a coarse stride, bracket a sign change or a local extremum, refine
//! with [`find_zero`]/[`find_extremum`], and finally resample on a fixed
//! one-minute grid anchored to absolute Julian-date multiples. The last
//! step makes results independent of where the search started from, so
//! scanning into the same event from different directions reports the
//! same instant.
//!
//! Angular comparisons go through a signed difference in (-180°, 180°];
//! a bracket is only accepted when the jump across it stays under a half
//! turn, which rejects the spurious sign change at the 0/360 seam.

use std::fmt;

use crate::angles::{Angle, AngleMode};
use crate::constants::{
    DAY_MIN, J2000, MEAN_SIDEREAL_MONTH, MEAN_SYNODIC_MONTH, MEAN_TROPICAL_YEAR, PLANET_ORBIT_DAYS,
    PLANET_SYNODIC_DAYS,
};
use crate::eclipselib::EclipseInfo;
use crate::observerlib::Observer;
use crate::satlib::{self, MoonEvents, Perspective};
use crate::searchlib::{find_extremum, find_zero};
use crate::solarsystem::{
    flags, is_true_planet, SolarSystem, Target, EARTH, JUPITER, MARS, MERCURY, MOON, NEPTUNE,
    PLUTO, SATURN, SUN, URANUS, VENUS,
};
use crate::timelib::{calendar_from_jd, ut_to_tdb, CalendarDate, CalendarKind};

/// Coarse samples per search period for the phenomenon scans
const SCAN_DIVISIONS: usize = 64;
/// Fixed resample grid spacing: one minute of time
const RESAMPLE_STEP_DAYS: f64 = 1.0 / DAY_MIN;
/// Half-width of the resample window in grid steps
const RESAMPLE_SPAN: i64 = 30;
/// Acceptance gap on the first try: just under half a minute
const EVENT_GAP_FIRST_DAYS: f64 = 0.49 / DAY_MIN;
/// Acceptance gap after a rejected candidate: five minutes
const EVENT_GAP_RETRY_DAYS: f64 = 5.0 / DAY_MIN;
/// Rejected-candidate retries before a search gives up
const MAX_RETRIES: usize = 8;
/// Abscissa tolerance for the refinement solvers, days
const ROOT_TOLERANCE: f64 = 1.0e-7;
const ROOT_ITERATIONS: usize = 50;
/// Days a rise/set/transit scan covers before concluding the event does
/// not happen (polar night outlasts a lunation, not this window)
const DAILY_SCAN_DAYS: f64 = 40.0;

/// Mean System II rotation of Jupiter, degrees per day.
const JUPITER_SYSTEM_II_RATE: f64 = 870.270;
/// System II central-meridian longitude at J2000.0, degrees.
const JUPITER_SYSTEM_II_EPOCH_DEG: f64 = 43.3;

/// Standard refraction-only rise/set altitude for stars and planets.
pub const RISE_SET_ALTITUDE_DEG: f64 = -0.5667;
/// Rise/set altitude of the Sun's upper limb.
pub const SUN_RISE_SET_ALTITUDE_DEG: f64 = -0.8333;
/// Rise/set altitude of the Moon, parallax folded in.
pub const MOON_RISE_SET_ALTITUDE_DEG: f64 = 0.125;
pub const CIVIL_TWILIGHT_ALTITUDE_DEG: f64 = -6.0;
pub const NAUTICAL_TWILIGHT_ALTITUDE_DEG: f64 = -12.0;
pub const ASTRONOMICAL_TWILIGHT_ALTITUDE_DEG: f64 = -18.0;

/// Which way a search walks away from its start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    fn sign(self) -> f64 {
        match self {
            SearchDirection::Forward => 1.0,
            SearchDirection::Backward => -1.0,
        }
    }
}

/// Every event kind the finder can search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Rise,
    Set,
    Transit,
    CivilDawn,
    CivilDusk,
    NauticalDawn,
    NauticalDusk,
    AstronomicalDawn,
    AstronomicalDusk,
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
    Opposition,
    InferiorConjunction,
    SuperiorConjunction,
    GreatestElongation,
    EasternQuadrature,
    WesternQuadrature,
    Perihelion,
    Aphelion,
    LunarEclipse,
    SolarEclipse,
    GrsTransit,
    SatelliteActivity,
}

impl EventType {
    /// Short lowercase description used in event labels.
    pub fn describe(self) -> &'static str {
        match self {
            EventType::Rise => "rise",
            EventType::Set => "set",
            EventType::Transit => "transit",
            EventType::CivilDawn => "civil dawn",
            EventType::CivilDusk => "civil dusk",
            EventType::NauticalDawn => "nautical dawn",
            EventType::NauticalDusk => "nautical dusk",
            EventType::AstronomicalDawn => "astronomical dawn",
            EventType::AstronomicalDusk => "astronomical dusk",
            EventType::NewMoon => "new moon",
            EventType::FirstQuarter => "first quarter",
            EventType::FullMoon => "full moon",
            EventType::LastQuarter => "last quarter",
            EventType::MarchEquinox => "March equinox",
            EventType::JuneSolstice => "June solstice",
            EventType::SeptemberEquinox => "September equinox",
            EventType::DecemberSolstice => "December solstice",
            EventType::Opposition => "opposition",
            EventType::InferiorConjunction => "inferior conjunction",
            EventType::SuperiorConjunction => "superior conjunction",
            EventType::GreatestElongation => "greatest elongation",
            EventType::EasternQuadrature => "eastern quadrature",
            EventType::WesternQuadrature => "western quadrature",
            EventType::Perihelion => "perihelion",
            EventType::Aphelion => "aphelion",
            EventType::LunarEclipse => "lunar eclipse",
            EventType::SolarEclipse => "solar eclipse",
            EventType::GrsTransit => "Great Red Spot transit",
            EventType::SatelliteActivity => "satellite activity",
        }
    }

    /// Events that are not tied to a particular body label.
    fn is_global(self) -> bool {
        matches!(
            self,
            EventType::NewMoon
                | EventType::FirstQuarter
                | EventType::FullMoon
                | EventType::LastQuarter
                | EventType::MarchEquinox
                | EventType::JuneSolstice
                | EventType::SeptemberEquinox
                | EventType::DecemberSolstice
                | EventType::LunarEclipse
                | EventType::SolarEclipse
        )
    }
}

/// Extra structure attached to an event when the search produced more than
/// an instant.
#[derive(Debug, Clone, PartialEq)]
pub enum EventDetail {
    None,
    Eclipse(EclipseInfo),
    Satellites(MoonEvents),
}

/// One dated astronomical event.
#[derive(Debug, Clone, PartialEq)]
pub struct AstroEvent {
    pub event_type: EventType,
    pub body_id: u32,
    /// Human-readable description, e.g. "Jupiter opposition"
    pub label: String,
    /// Instant of the event, JD in UT
    pub time_jdu: f64,
    /// Calendar rendering of the instant, `None` outside the supported span
    pub date: Option<CalendarDate>,
    /// Event-specific quantity: elongation in degrees, apsis distance in
    /// AU, umbral magnitude, Great Red Spot longitude in degrees
    pub value: Option<f64>,
    pub detail: EventDetail,
}

/// Display name of a body identifier.
pub fn body_name(body_id: u32) -> &'static str {
    match body_id {
        SUN => "Sun",
        MERCURY => "Mercury",
        VENUS => "Venus",
        EARTH => "Earth",
        MARS => "Mars",
        JUPITER => "Jupiter",
        SATURN => "Saturn",
        URANUS => "Uranus",
        NEPTUNE => "Neptune",
        PLUTO => "Pluto",
        MOON => "Moon",
        _ => "minor body",
    }
}

/// Difference mapped into (-180, 180] degrees.
fn signed_degrees(x: f64) -> f64 {
    let d = x.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Event searcher over one [`SolarSystem`].
///
/// Position queries run with a configurable flag set; the default asks for
/// astrometric (light-time corrected) places, which is what phase and
/// season instants are defined against.
#[derive(Debug)]
pub struct EventFinder<'a> {
    system: &'a SolarSystem,
    calendar: CalendarKind,
    option_flags: u32,
}

impl<'a> EventFinder<'a> {
    pub fn new(system: &'a SolarSystem) -> Self {
        EventFinder {
            system,
            calendar: CalendarKind::Mixed,
            option_flags: flags::ASTROMETRIC,
        }
    }

    /// Calendar used when rendering event dates.
    pub fn with_calendar(mut self, calendar: CalendarKind) -> Self {
        self.calendar = calendar;
        self
    }

    /// Position flags applied to every query the searches make.
    pub fn with_flags(mut self, option_flags: u32) -> Self {
        self.option_flags = option_flags;
        self
    }

    fn make_event(
        &self,
        event_type: EventType,
        body_id: u32,
        time_jdu: f64,
        value: Option<f64>,
        detail: EventDetail,
    ) -> AstroEvent {
        let label = if event_type.is_global() {
            event_type.describe().to_string()
        } else {
            format!("{} {}", body_name(body_id), event_type.describe())
        };
        AstroEvent {
            event_type,
            body_id,
            label,
            time_jdu,
            date: calendar_from_jd(time_jdu, self.calendar),
            value,
            detail,
        }
    }

    /// Find the next (or previous) occurrence of an event.
    ///
    /// `observer` is required for the horizon-relative kinds (rise, set,
    /// transit, twilight) and ignored by the rest. A candidate closer to
    /// `start_jdu` than half a minute is treated as the event the caller
    /// already has and skipped, so feeding a result back in walks the
    /// sequence instead of repeating it.
    pub fn find_event(
        &self,
        body_id: u32,
        event_type: EventType,
        start_jdu: f64,
        observer: Option<&dyn Observer>,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let sign = direction.sign();
        let mut gap = EVENT_GAP_FIRST_DAYS;
        let mut from = start_jdu;

        for _ in 0..MAX_RETRIES {
            let candidate = self.search_once(body_id, event_type, from, observer, direction)?;
            if (candidate.time_jdu - start_jdu) * sign >= gap {
                return Some(candidate);
            }
            gap = EVENT_GAP_RETRY_DAYS;
            from = candidate.time_jdu + sign * EVENT_GAP_RETRY_DAYS;
        }
        None
    }

    /// Lazily iterate occurrences between two instants, earliest first.
    pub fn events_between(
        &'a self,
        body_id: u32,
        event_type: EventType,
        start_jdu: f64,
        end_jdu: f64,
        observer: Option<&'a dyn Observer>,
    ) -> EventRange<'a> {
        EventRange {
            finder: self,
            body_id,
            event_type,
            observer,
            cursor_jdu: start_jdu,
            end_jdu,
        }
    }

    fn search_once(
        &self,
        body_id: u32,
        event_type: EventType,
        from: f64,
        observer: Option<&dyn Observer>,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        match event_type {
            EventType::Rise | EventType::Set => {
                let target = match body_id {
                    SUN => SUN_RISE_SET_ALTITUDE_DEG,
                    MOON => MOON_RISE_SET_ALTITUDE_DEG,
                    _ => RISE_SET_ALTITUDE_DEG,
                };
                let rising = event_type == EventType::Rise;
                let t = self.altitude_crossing(body_id, target, from, direction, rising, observer?)?;
                Some(self.make_event(event_type, body_id, t, None, EventDetail::None))
            }
            EventType::CivilDawn | EventType::CivilDusk => {
                self.twilight(event_type, CIVIL_TWILIGHT_ALTITUDE_DEG, from, observer?, direction)
            }
            EventType::NauticalDawn | EventType::NauticalDusk => self.twilight(
                event_type,
                NAUTICAL_TWILIGHT_ALTITUDE_DEG,
                from,
                observer?,
                direction,
            ),
            EventType::AstronomicalDawn | EventType::AstronomicalDusk => self.twilight(
                event_type,
                ASTRONOMICAL_TWILIGHT_ALTITUDE_DEG,
                from,
                observer?,
                direction,
            ),
            EventType::Transit => {
                let t = self.transit_crossing(body_id, from, direction, observer?)?;
                Some(self.make_event(EventType::Transit, body_id, t, None, EventDetail::None))
            }
            EventType::NewMoon => self.phase_event(EventType::NewMoon, 0.0, from, direction),
            EventType::FirstQuarter => {
                self.phase_event(EventType::FirstQuarter, 90.0, from, direction)
            }
            EventType::FullMoon => self.phase_event(EventType::FullMoon, 180.0, from, direction),
            EventType::LastQuarter => {
                self.phase_event(EventType::LastQuarter, 270.0, from, direction)
            }
            EventType::MarchEquinox => self.season_event(EventType::MarchEquinox, 0.0, from, direction),
            EventType::JuneSolstice => {
                self.season_event(EventType::JuneSolstice, 90.0, from, direction)
            }
            EventType::SeptemberEquinox => {
                self.season_event(EventType::SeptemberEquinox, 180.0, from, direction)
            }
            EventType::DecemberSolstice => {
                self.season_event(EventType::DecemberSolstice, 270.0, from, direction)
            }
            EventType::Opposition => {
                let t = self.relative_longitude_crossing(body_id, 180.0, from, direction)?;
                Some(self.make_event(EventType::Opposition, body_id, t, None, EventDetail::None))
            }
            EventType::EasternQuadrature => {
                let t = self.relative_longitude_crossing(body_id, 90.0, from, direction)?;
                Some(self.make_event(event_type, body_id, t, None, EventDetail::None))
            }
            EventType::WesternQuadrature => {
                let t = self.relative_longitude_crossing(body_id, 270.0, from, direction)?;
                Some(self.make_event(event_type, body_id, t, None, EventDetail::None))
            }
            EventType::InferiorConjunction | EventType::SuperiorConjunction => {
                self.conjunction(body_id, event_type, from, direction)
            }
            EventType::GreatestElongation => self.greatest_elongation(body_id, from, direction),
            EventType::Perihelion => self.apsis(body_id, false, from, direction),
            EventType::Aphelion => self.apsis(body_id, true, from, direction),
            EventType::LunarEclipse => self.eclipse(EventType::LunarEclipse, from, direction),
            EventType::SolarEclipse => self.eclipse(EventType::SolarEclipse, from, direction),
            EventType::GrsTransit => self.grs_transit(from, direction),
            EventType::SatelliteActivity => self.satellite_activity(body_id, from, direction),
        }
    }

    // --- scalar functions of time -------------------------------------

    /// Geocentric ecliptic longitude of a body minus the Sun's, degrees in
    /// [0, 360). NaN when the body is unavailable, which makes every
    /// bracket test fail and the scan come back empty.
    fn relative_longitude_deg(&self, body_id: u32, time_jdu: f64) -> f64 {
        let body = match self
            .system
            .ecliptic_position(&Target::ById(body_id), time_jdu, self.option_flags)
        {
            Some(p) => p.longitude.degrees(),
            None => return f64::NAN,
        };
        let sun = match self
            .system
            .ecliptic_position(&Target::ById(SUN), time_jdu, self.option_flags)
        {
            Some(p) => p.longitude.degrees(),
            None => return f64::NAN,
        };
        (body - sun).rem_euclid(360.0)
    }

    fn sun_longitude_deg(&self, time_jdu: f64) -> f64 {
        match self
            .system
            .ecliptic_position(&Target::ById(SUN), time_jdu, self.option_flags)
        {
            Some(p) => p.longitude.degrees(),
            None => f64::NAN,
        }
    }

    // --- bracketing machinery ------------------------------------------

    /// Walk from `start` in steps of `step_days`, bracket the first sign
    /// change of `diff_deg` whose jump stays under a half turn, refine it
    /// and pin it to the fixed grid.
    fn crossing_scan<F: FnMut(f64) -> f64>(
        &self,
        mut diff_deg: F,
        start: f64,
        direction: SearchDirection,
        step_days: f64,
        max_steps: usize,
    ) -> Option<f64> {
        let sign = direction.sign();
        for i in 0..max_steps {
            let t0 = start + sign * i as f64 * step_days;
            let t1 = start + sign * (i + 1) as f64 * step_days;
            let (lo, hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
            let d_lo = diff_deg(lo);
            let d_hi = diff_deg(hi);
            if d_lo == 0.0 {
                return Some(self.stabilize_zero(&mut diff_deg, lo));
            }
            if d_lo * d_hi < 0.0 && (d_hi - d_lo).abs() < 180.0 {
                let zero = find_zero(lo, d_lo, hi, d_hi, ROOT_TOLERANCE, ROOT_ITERATIONS, &mut diff_deg);
                return Some(self.stabilize_zero(&mut diff_deg, zero));
            }
        }
        None
    }

    /// One-minute grid point `index` as a Julian date. Indexing from an
    /// integer keeps the grid identical no matter which search reached it.
    fn grid_point(index: i64) -> f64 {
        index as f64 / DAY_MIN
    }

    /// Re-bracket a refined zero on the absolute one-minute grid.
    ///
    /// Grid points are multiples of one minute of Julian date, so the
    /// result depends only on the event, not on the path that found it.
    fn stabilize_zero<F: FnMut(f64) -> f64>(&self, f: &mut F, t: f64) -> f64 {
        let center = (t * DAY_MIN).round() as i64;
        let mut prev_t = Self::grid_point(center - RESAMPLE_SPAN);
        let mut prev_d = f(prev_t);
        for i in (1 - RESAMPLE_SPAN)..=RESAMPLE_SPAN {
            let ti = Self::grid_point(center + i);
            let di = f(ti);
            if prev_d == 0.0 {
                return prev_t;
            }
            if prev_d * di < 0.0 && (di - prev_d).abs() < 180.0 {
                return prev_t + (ti - prev_t) * prev_d / (prev_d - di);
            }
            prev_t = ti;
            prev_d = di;
        }
        t
    }

    /// Resample an extremum on the absolute one-minute grid, with a
    /// parabolic refinement through the best grid point's neighbors.
    fn stabilize_extremum<F: FnMut(f64) -> f64>(
        &self,
        f: &mut F,
        t: f64,
        maximize: bool,
    ) -> (f64, f64) {
        let center = (t * DAY_MIN).round() as i64;
        let mut best_i = center;
        let mut best_y = f(Self::grid_point(center));
        for i in -RESAMPLE_SPAN..=RESAMPLE_SPAN {
            if i == 0 {
                continue;
            }
            let yi = f(Self::grid_point(center + i));
            if (maximize && yi > best_y) || (!maximize && yi < best_y) {
                best_i = center + i;
                best_y = yi;
            }
        }

        let best_t = Self::grid_point(best_i);
        let y_minus = f(Self::grid_point(best_i - 1));
        let y_plus = f(Self::grid_point(best_i + 1));
        let denom = y_minus - 2.0 * best_y + y_plus;
        if denom != 0.0 {
            let offset = (0.5 * (y_minus - y_plus) / denom)
                .clamp(-1.0, 1.0)
                * RESAMPLE_STEP_DAYS;
            let t_refined = best_t + offset;
            return (t_refined, f(t_refined));
        }
        (best_t, best_y)
    }

    /// Sample one period of `f`, bracket the first interior local extremum
    /// of the requested sense in the scan direction, refine and resample.
    fn extremum_scan<F: FnMut(f64) -> f64>(
        &self,
        mut f: F,
        start: f64,
        direction: SearchDirection,
        period_days: f64,
        maximize: bool,
    ) -> Option<(f64, f64)> {
        let step = direction.sign() * period_days / SCAN_DIVISIONS as f64;
        let mut ts = Vec::with_capacity(SCAN_DIVISIONS + 1);
        let mut ys = Vec::with_capacity(SCAN_DIVISIONS + 1);
        for i in 0..=SCAN_DIVISIONS {
            let t = start + i as f64 * step;
            ts.push(t);
            ys.push(f(t));
        }

        let better = |a: f64, b: f64| if maximize { a > b } else { a < b };
        for i in 1..SCAN_DIVISIONS {
            if better(ys[i], ys[i - 1]) && better(ys[i], ys[i + 1]) {
                let found = find_extremum(ts[i - 1], ts[i], ts[i + 1], ROOT_TOLERANCE, 100, &mut f);
                if found.is_maximum == maximize {
                    return Some(self.stabilize_extremum(&mut f, found.x, maximize));
                }
            }
        }
        None
    }

    // --- horizon events ------------------------------------------------

    /// Altitude-crossing scan for rise-type (`want_rising`) or set-type
    /// events. Stride shrinks for the Moon and for polar observers, where
    /// the altitude curve hugs the target and brief crossings hide between
    /// coarser samples.
    fn altitude_crossing(
        &self,
        body_id: u32,
        target_alt_deg: f64,
        from: f64,
        direction: SearchDirection,
        want_rising: bool,
        observer: &dyn Observer,
    ) -> Option<f64> {
        let mut per_day = 96usize;
        if body_id == MOON {
            per_day *= 2;
        }
        if observer.latitude().degrees().abs() > 60.0 {
            per_day *= 2;
        }
        let step = 1.0 / per_day as f64;
        let max_steps = (DAILY_SCAN_DAYS * per_day as f64) as usize;

        let mut diff = |t: f64| match self.system.horizontal_position(
            &Target::ById(body_id),
            t,
            observer,
            self.option_flags,
        ) {
            Some(h) => h.latitude.degrees() - target_alt_deg,
            None => f64::NAN,
        };

        let sign = direction.sign();
        for i in 0..max_steps {
            let t0 = from + sign * i as f64 * step;
            let t1 = from + sign * (i + 1) as f64 * step;
            let (lo, hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
            let d_lo = diff(lo);
            let d_hi = diff(hi);
            if d_lo * d_hi < 0.0 && (d_hi > d_lo) == want_rising {
                let zero = find_zero(lo, d_lo, hi, d_hi, ROOT_TOLERANCE, ROOT_ITERATIONS, &mut diff);
                return Some(self.stabilize_zero(&mut diff, zero));
            }
        }
        None
    }

    /// Refine one bracketed altitude crossing into a rise or set event.
    fn crossing_event<F: FnMut(f64) -> f64>(
        &self,
        body_id: u32,
        lo: (f64, f64),
        hi: (f64, f64),
        diff: &mut F,
    ) -> AstroEvent {
        let zero = find_zero(lo.0, lo.1, hi.0, hi.1, ROOT_TOLERANCE, ROOT_ITERATIONS, &mut *diff);
        let t = self.stabilize_zero(diff, zero);
        let event_type = if hi.1 > lo.1 {
            EventType::Rise
        } else {
            EventType::Set
        };
        self.make_event(event_type, body_id, t, None, EventDetail::None)
    }

    fn twilight(
        &self,
        event_type: EventType,
        target_alt_deg: f64,
        from: f64,
        observer: &dyn Observer,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let rising = matches!(
            event_type,
            EventType::CivilDawn | EventType::NauticalDawn | EventType::AstronomicalDawn
        );
        let t = self.altitude_crossing(SUN, target_alt_deg, from, direction, rising, observer)?;
        Some(self.make_event(event_type, SUN, t, None, EventDetail::None))
    }

    /// Upper-meridian crossing: the signed hour angle sweeps through zero
    /// from east to west.
    fn transit_crossing(
        &self,
        body_id: u32,
        from: f64,
        direction: SearchDirection,
        observer: &dyn Observer,
    ) -> Option<f64> {
        let flags_ha = self.option_flags | flags::SIGNED_HOUR_ANGLE;
        let diff = |t: f64| match self
            .system
            .hour_angle(&Target::ById(body_id), t, observer, flags_ha)
        {
            Some(ha) => ha.degrees(),
            None => f64::NAN,
        };
        self.crossing_scan(diff, from, direction, 1.0 / 24.0, (DAILY_SCAN_DAYS * 24.0) as usize)
    }

    /// Segment one local day and report every altitude crossing in it,
    /// with the all-day above/below verdicts when there is none.
    ///
    /// Segments where both endpoints sit on the same side of the target
    /// but within five degrees of it are rechecked in ten subsegments, so
    /// a curve that merely skims the target altitude still yields its
    /// crossing pair.
    pub fn daily_altitude_events(
        &self,
        body_id: u32,
        day_start_jdu: f64,
        observer: &dyn Observer,
        target_altitude: Angle,
    ) -> DailyEvents {
        let mut segments = 24usize;
        if body_id == MOON {
            segments *= 4;
        }
        if observer.latitude().degrees().abs() > 60.0 {
            segments *= 4;
        }
        // Below-horizon targets must read negative, not as 359-and-change
        let target_deg = target_altitude.with_mode(AngleMode::Signed).degrees();
        let mut diff = |t: f64| match self.system.horizontal_position(
            &Target::ById(body_id),
            t,
            observer,
            self.option_flags,
        ) {
            Some(h) => h.latitude.degrees() - target_deg,
            None => f64::NAN,
        };

        let step = 1.0 / segments as f64;
        let mut events = Vec::new();
        let mut any_above = false;
        let mut any_below = false;

        let mut d0 = diff(day_start_jdu);
        for i in 0..segments {
            let t0 = day_start_jdu + i as f64 * step;
            let t1 = day_start_jdu + (i + 1) as f64 * step;
            let d1 = diff(t1);
            if d0 > 0.0 {
                any_above = true;
            }
            if d0 < 0.0 {
                any_below = true;
            }

            if d0 * d1 < 0.0 {
                events.push(self.crossing_event(body_id, (t0, d0), (t1, d1), &mut diff));
            } else if d0.abs().min(d1.abs()) < 5.0 {
                // Both endpoints on one side but close: check for a brief
                // excursion through the target inside the segment
                let sub = step / 10.0;
                let mut s0 = d0;
                for j in 0..10 {
                    let u0 = t0 + j as f64 * sub;
                    let u1 = t0 + (j + 1) as f64 * sub;
                    let s1 = diff(u1);
                    if s0 * s1 < 0.0 {
                        events.push(self.crossing_event(body_id, (u0, s0), (u1, s1), &mut diff));
                        any_above = true;
                        any_below = true;
                    }
                    s0 = s1;
                }
            }
            d0 = d1;
        }
        if d0 > 0.0 {
            any_above = true;
        }
        if d0 < 0.0 {
            any_below = true;
        }

        DailyEvents {
            always_above: events.is_empty() && any_above && !any_below,
            always_below: events.is_empty() && any_below && !any_above,
            events,
        }
    }

    // --- phases and seasons --------------------------------------------

    fn phase_event(
        &self,
        event_type: EventType,
        target_deg: f64,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let t = self.crossing_scan(
            |t| signed_degrees(self.relative_longitude_deg(MOON, t) - target_deg),
            from,
            direction,
            1.0,
            (MEAN_SYNODIC_MONTH + 3.0) as usize,
        )?;
        Some(self.make_event(event_type, MOON, t, None, EventDetail::None))
    }

    fn season_event(
        &self,
        event_type: EventType,
        target_deg: f64,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let t = self.crossing_scan(
            |t| signed_degrees(self.sun_longitude_deg(t) - target_deg),
            from,
            direction,
            1.0,
            (MEAN_TROPICAL_YEAR + 5.0) as usize,
        )?;
        Some(self.make_event(event_type, SUN, t, None, EventDetail::None))
    }

    // --- planetary phenomena -------------------------------------------

    fn synodic_period(&self, body_id: u32) -> Option<f64> {
        if (MERCURY..=PLUTO).contains(&body_id) && body_id != EARTH {
            Some(PLANET_SYNODIC_DAYS[(body_id - 1) as usize])
        } else {
            None
        }
    }

    /// Crossing of the body-minus-Sun geocentric longitude through a
    /// target angle, scanned over slightly more than one synodic period.
    /// Inner planets never reach 180°, so opposition searches on them run
    /// the scan dry and report `None`.
    fn relative_longitude_crossing(
        &self,
        body_id: u32,
        target_deg: f64,
        from: f64,
        direction: SearchDirection,
    ) -> Option<f64> {
        let period = self.synodic_period(body_id)?;
        let step = period / SCAN_DIVISIONS as f64;
        self.crossing_scan(
            |t| signed_degrees(self.relative_longitude_deg(body_id, t) - target_deg),
            from,
            direction,
            step,
            SCAN_DIVISIONS + 8,
        )
    }

    /// Conjunction with the Sun, disambiguated by distance: a body nearer
    /// to Earth than the Sun at the crossing is passing in front, at
    /// inferior conjunction. Crossings of the wrong kind are skipped, up
    /// to a few synodic periods out.
    fn conjunction(
        &self,
        body_id: u32,
        event_type: EventType,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let want_inferior = event_type == EventType::InferiorConjunction;
        let mut cursor = from;
        for _ in 0..4 {
            let t = self.relative_longitude_crossing(body_id, 0.0, cursor, direction)?;
            let body_delta = self
                .system
                .ecliptic_position(&Target::ById(body_id), t, self.option_flags)?
                .radius;
            let sun_delta = self
                .system
                .ecliptic_position(&Target::ById(SUN), t, self.option_flags)?
                .radius;
            if (body_delta < sun_delta) == want_inferior {
                return Some(self.make_event(event_type, body_id, t, None, EventDetail::None));
            }
            cursor = t + direction.sign() * EVENT_GAP_RETRY_DAYS;
        }
        None
    }

    fn greatest_elongation(
        &self,
        body_id: u32,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let period = self.synodic_period(body_id)?;
        let target = Target::ById(body_id);
        let (t, value) = self.extremum_scan(
            |t| match self.system.elongation(&target, t, self.option_flags) {
                Some(e) => e.degrees(),
                None => f64::NAN,
            },
            from,
            direction,
            period,
            true,
        )?;
        Some(self.make_event(
            EventType::GreatestElongation,
            body_id,
            t,
            Some(value),
            EventDetail::None,
        ))
    }

    /// Perihelion/aphelion of a planet or minor body; for the Moon the
    /// same search runs on the geocentric distance, yielding perigee and
    /// apogee.
    fn apsis(
        &self,
        body_id: u32,
        maximize: bool,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let event_type = if maximize {
            EventType::Aphelion
        } else {
            EventType::Perihelion
        };
        let target = Target::ById(body_id);

        let (period, geocentric) = match body_id {
            MOON => (MEAN_SIDEREAL_MONTH, true),
            id if is_true_planet(id) || id == PLUTO => {
                (PLANET_ORBIT_DAYS[(id - 1) as usize], false)
            }
            _ => (MEAN_TROPICAL_YEAR * 4.0, false),
        };

        let radius = |t: f64| {
            if geocentric {
                match self.system.ecliptic_position(&target, t, self.option_flags) {
                    Some(p) => p.radius,
                    None => f64::NAN,
                }
            } else {
                match self
                    .system
                    .heliocentric(&target, ut_to_tdb(t), self.option_flags)
                {
                    Some(p) => p.radius,
                    None => f64::NAN,
                }
            }
        };
        let (t, value) = self.extremum_scan(radius, from, direction, period, maximize)?;
        Some(self.make_event(event_type, body_id, t, Some(value), EventDetail::None))
    }

    // --- eclipses ------------------------------------------------------

    /// Eclipse search: walk the syzygies (full moons for lunar, new moons
    /// for solar), minimize the relevant separation around each, keep the
    /// first instant whose geometry classifies as an eclipse.
    fn eclipse(
        &self,
        event_type: EventType,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let lunar = event_type == EventType::LunarEclipse;
        let phase_target = if lunar { 180.0 } else { 0.0 };
        let mut cursor = from;

        // Five years of lunations bounds the search; no gap between
        // eclipse seasons comes close to that
        for _ in 0..62 {
            let syzygy = self
                .crossing_scan(
                    |t| signed_degrees(self.relative_longitude_deg(MOON, t) - phase_target),
                    cursor,
                    direction,
                    1.0,
                    (MEAN_SYNODIC_MONTH + 3.0) as usize,
                )?;

            let mut separation = |t: f64| {
                let info = if lunar {
                    self.system.lunar_eclipse(t, self.option_flags)
                } else {
                    self.system.solar_eclipse(t, self.option_flags)
                };
                match info {
                    Some(e) => e.separation.degrees(),
                    None => f64::NAN,
                }
            };
            let bracket = find_extremum(
                syzygy - 0.5,
                syzygy,
                syzygy + 0.5,
                ROOT_TOLERANCE,
                100,
                &mut separation,
            );
            let (t_min, _) = self.stabilize_extremum(&mut separation, bracket.x, false);

            let info = if lunar {
                self.system.lunar_eclipse(t_min, self.option_flags)?
            } else {
                self.system.solar_eclipse(t_min, self.option_flags)?
            };
            if info.in_penumbra {
                let magnitude = info.umbral_magnitude();
                return Some(self.make_event(
                    event_type,
                    MOON,
                    t_min,
                    Some(magnitude),
                    EventDetail::Eclipse(info),
                ));
            }
            cursor = syzygy + direction.sign();
        }
        None
    }

    // --- Great Red Spot and satellites ---------------------------------

    /// System II central-meridian longitude of Jupiter, degrees.
    fn system_ii_meridian_deg(time_jdu: f64) -> f64 {
        (JUPITER_SYSTEM_II_EPOCH_DEG + JUPITER_SYSTEM_II_RATE * (time_jdu - J2000)).rem_euclid(360.0)
    }

    /// Instant the Great Red Spot crosses Jupiter's central meridian.
    /// `None` until a spot longitude table has been loaded.
    fn grs_transit(&self, from: f64, direction: SearchDirection) -> Option<AstroEvent> {
        self.system.grs_longitude(from)?;
        let rotation = 360.0 / JUPITER_SYSTEM_II_RATE;
        let diff = |t: f64| match self.system.grs_longitude(t) {
            Some(spot) => signed_degrees(Self::system_ii_meridian_deg(t) - spot.degrees()),
            None => f64::NAN,
        };
        let t = self.crossing_scan(
            diff,
            from,
            direction,
            rotation / SCAN_DIVISIONS as f64,
            SCAN_DIVISIONS + 8,
        )?;
        let value = self.system.grs_longitude(t).map(|a| a.degrees());
        Some(self.make_event(EventType::GrsTransit, JUPITER, t, value, EventDetail::None))
    }

    /// Nearest satellite disc event (transit, occultation, shadow,
    /// eclipse contact) in the search direction for a primary with a
    /// satellite theory.
    fn satellite_activity(
        &self,
        body_id: u32,
        from: f64,
        direction: SearchDirection,
    ) -> Option<AstroEvent> {
        let theory = self.system.satellite_theory(body_id)?;
        let found = match direction {
            SearchDirection::Forward => {
                satlib::next_events(theory, from, Perspective::Earth, DAILY_SCAN_DAYS)?
            }
            SearchDirection::Backward => {
                satlib::previous_events(theory, from, Perspective::Earth, DAILY_SCAN_DAYS)?
            }
        };
        let t = found.time_jdu;
        Some(self.make_event(
            EventType::SatelliteActivity,
            body_id,
            t,
            None,
            EventDetail::Satellites(found),
        ))
    }
}

/// One local day's altitude crossings for a body, or the all-day verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEvents {
    /// Rise and set events in time order
    pub events: Vec<AstroEvent>,
    /// The body stayed above the target altitude for the whole day
    pub always_above: bool,
    /// The body stayed below the target altitude for the whole day
    pub always_below: bool,
}

/// Lazy forward iterator over occurrences of one event kind in a window.
///
/// Each `next` resumes the search from the previous result, so the scan
/// costs nothing until consumed and can be restarted anywhere.
pub struct EventRange<'a> {
    finder: &'a EventFinder<'a>,
    body_id: u32,
    event_type: EventType,
    observer: Option<&'a dyn Observer>,
    cursor_jdu: f64,
    end_jdu: f64,
}

impl fmt::Debug for EventRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRange")
            .field("body_id", &self.body_id)
            .field("event_type", &self.event_type)
            .field("has_observer", &self.observer.is_some())
            .field("cursor_jdu", &self.cursor_jdu)
            .field("end_jdu", &self.end_jdu)
            .finish()
    }
}

impl<'a> EventRange<'a> {
    /// Move the cursor; the next event yielded is the first one after
    /// `from_jdu`.
    pub fn restart(&mut self, from_jdu: f64) {
        self.cursor_jdu = from_jdu;
    }
}

impl<'a> Iterator for EventRange<'a> {
    type Item = AstroEvent;

    fn next(&mut self) -> Option<AstroEvent> {
        if self.cursor_jdu >= self.end_jdu {
            return None;
        }
        let event = self.finder.find_event(
            self.body_id,
            self.event_type,
            self.cursor_jdu,
            self.observer,
            SearchDirection::Forward,
        )?;
        if event.time_jdu > self.end_jdu {
            return None;
        }
        self.cursor_jdu = event.time_jdu;
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observerlib::GeographicObserver;
    use crate::solarsystem::GrsTable;

    /// 2000 January 1.0 UT
    const T2000: f64 = 2_451_545.0;

    fn finder_system() -> SolarSystem {
        SolarSystem::new()
    }

    #[test]
    fn test_new_moon_january_2000() {
        // 2000 Jan 6, 18:14 UT
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(MOON, EventType::NewMoon, T2000, None, SearchDirection::Forward)
            .unwrap();
        assert!(
            (event.time_jdu - 2_451_550.26).abs() < 0.05,
            "new moon at {}",
            event.time_jdu
        );
        assert_eq!(event.label, "new moon");
        let date = event.date.unwrap();
        assert_eq!((date.year, date.month), (2000, 1));
    }

    #[test]
    fn test_full_moon_january_2000() {
        // 2000 Jan 21, 04:40 UT
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(MOON, EventType::FullMoon, 2_451_550.3, None, SearchDirection::Forward)
            .unwrap();
        assert!(
            (event.time_jdu - 2_451_564.69).abs() < 0.05,
            "full moon at {}",
            event.time_jdu
        );
    }

    #[test]
    fn test_find_event_walks_the_sequence() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let first = finder
            .find_event(MOON, EventType::NewMoon, T2000, None, SearchDirection::Forward)
            .unwrap();

        // Searching forward from the event itself must yield the next
        // lunation, backward the previous one
        let next = finder
            .find_event(
                MOON,
                EventType::NewMoon,
                first.time_jdu,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert!((2_451_578.0..2_451_582.0).contains(&next.time_jdu), "{}", next.time_jdu);

        let previous = finder
            .find_event(
                MOON,
                EventType::NewMoon,
                first.time_jdu,
                None,
                SearchDirection::Backward,
            )
            .unwrap();
        assert!(
            (2_451_518.0..2_451_522.0).contains(&previous.time_jdu),
            "{}",
            previous.time_jdu
        );
    }

    #[test]
    fn test_september_equinox_2000() {
        // 2000 Sep 22, 17:28 UT
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                SUN,
                EventType::SeptemberEquinox,
                2_451_700.0,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert!(
            (event.time_jdu - 2_451_810.23).abs() < 0.03,
            "equinox at {}",
            event.time_jdu
        );
    }

    #[test]
    fn test_march_equinox_sun_longitude() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(SUN, EventType::MarchEquinox, T2000, None, SearchDirection::Forward)
            .unwrap();
        let lon = finder.sun_longitude_deg(event.time_jdu);
        assert!(signed_degrees(lon).abs() < 0.01, "longitude {lon}");
    }

    #[test]
    fn test_sun_rise_and_set_at_equator() {
        // 2000 Mar 20, observer on the equator at Greenwich longitude:
        // sunrise near 06:00 UT, sunset near 18:00 UT
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let observer = GeographicObserver::from_degrees(0.0, 0.0, 0.0);
        let day = 2_451_623.5;

        let rise = finder
            .find_event(
                SUN,
                EventType::Rise,
                day,
                Some(&observer),
                SearchDirection::Forward,
            )
            .unwrap();
        assert!(
            (rise.time_jdu - (day + 0.25)).abs() < 0.02,
            "rise at {}",
            rise.time_jdu
        );

        let set = finder
            .find_event(SUN, EventType::Set, day, Some(&observer), SearchDirection::Forward)
            .unwrap();
        assert!(
            (set.time_jdu - (day + 0.75)).abs() < 0.02,
            "set at {}",
            set.time_jdu
        );
    }

    #[test]
    fn test_sun_transit_near_noon() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let observer = GeographicObserver::from_degrees(0.0, 10.0, 0.0);
        let transit = finder
            .find_event(
                SUN,
                EventType::Transit,
                2_451_623.5,
                Some(&observer),
                SearchDirection::Forward,
            )
            .unwrap();
        // Noon UT plus/minus the equation of time
        assert!(
            (transit.time_jdu - 2_451_624.0).abs() < 0.02,
            "transit at {}",
            transit.time_jdu
        );
    }

    #[test]
    fn test_civil_dawn_precedes_sunrise() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let observer = GeographicObserver::from_degrees(0.0, 0.0, 0.0);
        let day = 2_451_623.5;

        let dawn = finder
            .find_event(
                SUN,
                EventType::CivilDawn,
                day,
                Some(&observer),
                SearchDirection::Forward,
            )
            .unwrap();
        let rise = finder
            .find_event(SUN, EventType::Rise, day, Some(&observer), SearchDirection::Forward)
            .unwrap();
        let gap = rise.time_jdu - dawn.time_jdu;
        assert!((0.005..0.03).contains(&gap), "dawn-to-rise gap {gap}");
    }

    #[test]
    fn test_midnight_sun_and_polar_night() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let arctic = GeographicObserver::from_degrees(0.0, 80.0, 0.0);
        let target = Angle::from_degrees(SUN_RISE_SET_ALTITUDE_DEG);

        // 2000 Jun 21: the Sun never sets at 80 N
        let summer = finder.daily_altitude_events(SUN, 2_451_716.5, &arctic, target);
        assert!(summer.always_above, "{:?}", summer.events);
        assert!(summer.events.is_empty());

        // 2000 Dec 22: it never rises
        let winter = finder.daily_altitude_events(SUN, 2_451_900.5, &arctic, target);
        assert!(winter.always_below, "{:?}", winter.events);
    }

    #[test]
    fn test_daily_events_pair_at_equator() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let observer = GeographicObserver::from_degrees(0.0, 0.0, 0.0);
        let day = finder.daily_altitude_events(
            SUN,
            2_451_623.5,
            &observer,
            Angle::from_degrees(SUN_RISE_SET_ALTITUDE_DEG),
        );
        assert_eq!(day.events.len(), 2, "{:?}", day.events);
        assert_eq!(day.events[0].event_type, EventType::Rise);
        assert_eq!(day.events[1].event_type, EventType::Set);
        assert!(!day.always_above && !day.always_below);
    }

    #[test]
    fn test_jupiter_opposition_2000() {
        // 2000 Nov 28
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                JUPITER,
                EventType::Opposition,
                2_451_700.0,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert!(
            (2_451_874.0..2_451_879.0).contains(&event.time_jdu),
            "opposition at {}",
            event.time_jdu
        );
        assert_eq!(event.label, "Jupiter opposition");
    }

    #[test]
    fn test_venus_conjunctions_by_distance() {
        let system = finder_system();
        let finder = EventFinder::new(&system);

        let superior = finder
            .find_event(
                VENUS,
                EventType::SuperiorConjunction,
                T2000,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        let far = system
            .ecliptic_position(&Target::ById(VENUS), superior.time_jdu, 0)
            .unwrap()
            .radius;
        assert!(far > 1.5, "superior conjunction distance {far}");

        let inferior = finder
            .find_event(
                VENUS,
                EventType::InferiorConjunction,
                T2000,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        let near = system
            .ecliptic_position(&Target::ById(VENUS), inferior.time_jdu, 0)
            .unwrap()
            .radius;
        assert!(near < 0.4, "inferior conjunction distance {near}");
    }

    #[test]
    fn test_venus_greatest_elongation_value() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                VENUS,
                EventType::GreatestElongation,
                T2000,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        let value = event.value.unwrap();
        assert!((44.0..48.5).contains(&value), "elongation {value}");
    }

    #[test]
    fn test_jupiter_eastern_quadrature_angle() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                JUPITER,
                EventType::EasternQuadrature,
                T2000,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        let diff = signed_degrees(finder.relative_longitude_deg(JUPITER, event.time_jdu) - 90.0);
        assert!(diff.abs() < 0.5, "off quadrature by {diff}");
    }

    #[test]
    fn test_earth_perihelion_2000() {
        // 2000 Jan 3; Earth was 0.9833 AU from the Sun
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                EARTH,
                EventType::Perihelion,
                2_451_500.0,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert!(
            (2_451_543.0..2_451_550.0).contains(&event.time_jdu),
            "perihelion at {}",
            event.time_jdu
        );
        let r = event.value.unwrap();
        assert!((0.982..0.985).contains(&r), "distance {r}");
    }

    #[test]
    fn test_moon_perigee_distance() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(MOON, EventType::Perihelion, T2000, None, SearchDirection::Forward)
            .unwrap();
        let r = event.value.unwrap();
        // Perigee falls between 356,500 and 370,000 km
        assert!((0.00235..0.00248).contains(&r), "perigee distance {r} AU");
    }

    #[test]
    fn test_lunar_eclipse_january_2000() {
        // Total lunar eclipse of 2000 Jan 21, maximum 04:44 UT
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(MOON, EventType::LunarEclipse, T2000, None, SearchDirection::Forward)
            .unwrap();
        assert!(
            (event.time_jdu - 2_451_564.70).abs() < 0.1,
            "eclipse at {}",
            event.time_jdu
        );
        match &event.detail {
            EventDetail::Eclipse(info) => assert!(info.in_umbra),
            other => panic!("expected eclipse detail, got {other:?}"),
        }
    }

    #[test]
    fn test_solar_eclipse_february_2000() {
        // Partial solar eclipse of 2000 Feb 5
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                MOON,
                EventType::SolarEclipse,
                2_451_551.0,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert!(
            (event.time_jdu - 2_451_580.03).abs() < 0.2,
            "eclipse at {}",
            event.time_jdu
        );
        match &event.detail {
            EventDetail::Eclipse(info) => {
                assert!(info.in_penumbra);
                assert!(!info.total);
            }
            other => panic!("expected eclipse detail, got {other:?}"),
        }
    }

    #[test]
    fn test_grs_transit_matches_meridian() {
        let mut system = finder_system();
        system.initialize_grs(GrsTable {
            drift_rates: [0.0, 0.0, 0.0],
            samples: vec![(T2000, 70.0)],
        });
        let finder = EventFinder::new(&system);
        let event = finder
            .find_event(
                JUPITER,
                EventType::GrsTransit,
                T2000,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        // One System II rotation is under ten hours
        assert!(event.time_jdu - T2000 < 0.45, "transit at {}", event.time_jdu);
        let meridian = EventFinder::system_ii_meridian_deg(event.time_jdu);
        assert!(
            signed_degrees(meridian - 70.0).abs() < 0.2,
            "meridian {meridian}"
        );
    }

    #[test]
    fn test_grs_transit_requires_table() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        assert!(finder
            .find_event(JUPITER, EventType::GrsTransit, T2000, None, SearchDirection::Forward)
            .is_none());
    }

    #[test]
    fn test_satellite_activity_both_directions() {
        // Galilean disc events recur every day or two, so a forward and a
        // backward search from the same instant both land inside a few days
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let start = T2000 + 10.0;
        let forward = finder
            .find_event(
                JUPITER,
                EventType::SatelliteActivity,
                start,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert!(forward.time_jdu > start);
        assert!(forward.time_jdu < start + 5.0, "next at {}", forward.time_jdu);

        let backward = finder
            .find_event(
                JUPITER,
                EventType::SatelliteActivity,
                start,
                None,
                SearchDirection::Backward,
            )
            .unwrap();
        assert!(backward.time_jdu < start);
        assert!(backward.time_jdu > start - 5.0, "previous at {}", backward.time_jdu);
        match backward.detail {
            EventDetail::Satellites(ref moons) => assert!(!moons.events.is_empty()),
            _ => panic!("expected satellite detail"),
        }
    }

    #[test]
    fn test_event_range_counts_full_moons() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        // Jan 21, Feb 19 and Mar 20 fall inside the first hundred days of
        // 2000
        let moons: Vec<AstroEvent> = finder
            .events_between(MOON, EventType::FullMoon, T2000, T2000 + 100.0, None)
            .collect();
        assert_eq!(moons.len(), 3, "{moons:?}");
        for pair in moons.windows(2) {
            let gap = pair[1].time_jdu - pair[0].time_jdu;
            assert!((28.5..30.5).contains(&gap), "lunation gap {gap}");
        }
    }

    #[test]
    fn test_event_range_restart() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let mut range = finder.events_between(MOON, EventType::NewMoon, T2000, T2000 + 70.0, None);
        let first = range.next().unwrap();
        let second = range.next().unwrap();
        assert!(second.time_jdu > first.time_jdu + 28.0);

        range.restart(T2000);
        let again = range.next().unwrap();
        assert_eq!(again.time_jdu, first.time_jdu);
    }

    #[test]
    fn test_opposition_rejected_for_inner_planet() {
        let system = finder_system();
        let finder = EventFinder::new(&system);
        assert!(finder
            .find_event(VENUS, EventType::Opposition, T2000, None, SearchDirection::Forward)
            .is_none());
    }

    #[test]
    fn test_stabilized_instant_is_path_independent() {
        // Approaching the same new moon from two different start instants
        // must land on the identical stabilized time
        let system = finder_system();
        let finder = EventFinder::new(&system);
        let a = finder
            .find_event(MOON, EventType::NewMoon, T2000, None, SearchDirection::Forward)
            .unwrap();
        let b = finder
            .find_event(
                MOON,
                EventType::NewMoon,
                T2000 + 2.3,
                None,
                SearchDirection::Forward,
            )
            .unwrap();
        assert_eq!(a.time_jdu, b.time_jdu);
    }
}
