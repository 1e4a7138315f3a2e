//! Time-system conversion
//!
//! Julian Day to calendar conversion (Gregorian, Julian, or the historical
//! mixed calendar with the 1582 changeover), plus the Universal Time ↔
//! Barycentric Dynamical Time bridge built on the [`delta_t`] evaluator.
//!
//! The crate distinguishes JDU (Julian date in Universal Time) from JDE
//! (Julian date in Dynamical Time) everywhere; conversion is always explicit.

pub mod delta_t;

use chrono::NaiveDate;

use crate::constants::{DAY_S, J2000, JULIAN_CENTURY};

pub use delta_t::delta_t_seconds;

/// First Julian date of the Gregorian calendar (1582 October 15.0)
pub const GREGORIAN_START_JD: f64 = 2_299_160.5;

/// Earliest Julian date the calendar conversion supports
pub const MIN_SUPPORTED_JD: f64 = 0.0;
/// Latest Julian date the calendar conversion supports (year ~11000)
pub const MAX_SUPPORTED_JD: f64 = 5_740_000.0;

/// Calendar system selector for date conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarKind {
    /// Julian calendar before 1582 October 15, Gregorian after
    #[default]
    Mixed,
    /// Proleptic Gregorian for all dates
    Gregorian,
    /// Julian calendar for all dates
    Julian,
}

/// A calendar date with a fractional day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    /// Day of month including the time-of-day fraction
    pub day: f64,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: f64) -> Self {
        CalendarDate { year, month, day }
    }

    /// Whole day of month.
    pub fn day_of_month(&self) -> u32 {
        self.day as u32
    }

    /// Time of day as (hour, minute, second).
    pub fn time_of_day(&self) -> (u32, u32, f64) {
        let frac = self.day.fract() * 24.0;
        let hour = frac as u32;
        let min_f = (frac - hour as f64) * 60.0;
        let minute = min_f as u32;
        let second = (min_f - minute as f64) * 60.0;
        (hour, minute, second)
    }

    /// Chrono date for the whole-day part, if representable.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day_of_month().max(1))
    }
}

/// Convert a calendar date to a Julian date.
///
/// Returns `None` for invalid month/day fields or dates outside the
/// supported range; callers treat that as "no result", not an error.
pub fn jd_from_calendar(date: &CalendarDate, kind: CalendarKind) -> Option<f64> {
    if date.month < 1 || date.month > 12 || date.day < 0.0 || date.day >= 32.0 {
        return None;
    }

    let (mut y, mut m) = (date.year as f64, date.month as f64);
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }

    let julian_jd = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + date.day
        - 1524.5;

    let gregorian = match kind {
        CalendarKind::Gregorian => true,
        CalendarKind::Julian => false,
        CalendarKind::Mixed => julian_jd >= GREGORIAN_START_JD,
    };

    let jd = if gregorian {
        let a = (y / 100.0).floor();
        julian_jd + 2.0 - a + (a / 4.0).floor()
    } else {
        julian_jd
    };

    if !(MIN_SUPPORTED_JD..=MAX_SUPPORTED_JD).contains(&jd) {
        return None;
    }
    Some(jd)
}

/// Convert a Julian date to a calendar date.
///
/// Returns `None` outside the supported range.
pub fn calendar_from_jd(jd: f64, kind: CalendarKind) -> Option<CalendarDate> {
    if !(MIN_SUPPORTED_JD..=MAX_SUPPORTED_JD).contains(&jd) {
        return None;
    }

    let jd5 = jd + 0.5;
    let z = jd5.floor();
    let f = jd5 - z;

    let gregorian = match kind {
        CalendarKind::Gregorian => true,
        CalendarKind::Julian => false,
        CalendarKind::Mixed => jd >= GREGORIAN_START_JD,
    };

    let a = if gregorian {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    Some(CalendarDate::new(year as i32, month as u32, day))
}

/// Day of week for a Julian date: 0 = Sunday through 6 = Saturday.
pub fn day_of_week(jd: f64) -> u32 {
    ((jd + 1.5).floor().rem_euclid(7.0)) as u32
}

/// Convert a UT Julian date to a Dynamical Time Julian date.
pub fn ut_to_tdb(jdu: f64) -> f64 {
    jdu + delta_t_seconds(jdu) / DAY_S
}

/// Convert a Dynamical Time Julian date to a UT Julian date.
///
/// Delta-T is tabulated against UT, so the inverse is solved by a short
/// fixed-point iteration.
pub fn tdb_to_ut(jde: f64) -> f64 {
    let mut jdu = jde;
    for _ in 0..3 {
        jdu = jde - delta_t_seconds(jdu) / DAY_S;
    }
    jdu
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jde: f64) -> f64 {
    (jde - J2000) / JULIAN_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_j2000_round_trip() {
        let date = CalendarDate::new(2000, 1, 1.5);
        let jd = jd_from_calendar(&date, CalendarKind::Mixed).unwrap();
        assert_relative_eq!(jd, 2_451_545.0, epsilon = 1e-9);

        let back = calendar_from_jd(jd, CalendarKind::Mixed).unwrap();
        assert_eq!(back.year, 2000);
        assert_eq!(back.month, 1);
        assert_relative_eq!(back.day, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_meeus_example_sputnik() {
        // Meeus example 7.b: 1957 October 4.81 = JD 2436116.31
        let jd = jd_from_calendar(&CalendarDate::new(1957, 10, 4.81), CalendarKind::Mixed).unwrap();
        assert_relative_eq!(jd, 2_436_116.31, epsilon = 1e-6);
    }

    #[test]
    fn test_julian_calendar_date() {
        // Meeus example 7.a: 333 January 27.5 (Julian calendar) = JD 1842713.0
        let jd = jd_from_calendar(&CalendarDate::new(333, 1, 27.5), CalendarKind::Mixed).unwrap();
        assert_relative_eq!(jd, 1_842_713.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gregorian_changeover() {
        // 1582 October 4 (Julian) is immediately followed by October 15 (Gregorian)
        let before =
            jd_from_calendar(&CalendarDate::new(1582, 10, 4.0), CalendarKind::Mixed).unwrap();
        let after =
            jd_from_calendar(&CalendarDate::new(1582, 10, 15.0), CalendarKind::Mixed).unwrap();
        assert_relative_eq!(after - before, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_month_is_none() {
        assert!(jd_from_calendar(&CalendarDate::new(2000, 13, 1.0), CalendarKind::Mixed).is_none());
        assert!(jd_from_calendar(&CalendarDate::new(2000, 0, 1.0), CalendarKind::Mixed).is_none());
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert!(calendar_from_jd(-5.0, CalendarKind::Mixed).is_none());
        assert!(calendar_from_jd(9.0e6, CalendarKind::Mixed).is_none());
    }

    #[test]
    fn test_day_of_week() {
        // 2000 January 1 was a Saturday
        let jd = jd_from_calendar(&CalendarDate::new(2000, 1, 1.0), CalendarKind::Mixed).unwrap();
        assert_eq!(day_of_week(jd), 6);
    }

    #[test]
    fn test_ut_tdb_round_trip() {
        let jdu = 2_451_545.0;
        let jde = ut_to_tdb(jdu);
        assert!(jde > jdu, "TDB should be ahead of UT in 2000");
        let back = tdb_to_ut(jde);
        assert_relative_eq!(back, jdu, epsilon = 1e-9);
    }

    #[test]
    fn test_time_of_day() {
        let date = CalendarDate::new(2024, 6, 10.75);
        let (h, m, s) = date.time_of_day();
        assert_eq!(h, 18);
        assert_eq!(m, 0);
        assert!(s.abs() < 1e-6);
    }

    #[test]
    fn test_julian_centuries_at_j2000() {
        assert_relative_eq!(julian_centuries(2_451_545.0), 0.0, epsilon = 1e-15);
    }
}
