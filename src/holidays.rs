//! Public-holiday calendars.
//!
//! The slot calendar only asks one question of a holiday source: is this
//! date a holiday? [`HolidayCalendar`] is that seam. Built-in sources:
//!
//! - [`SwedishHolidays`]: Swedish public holidays, including the
//!   Easter-derived movable feasts and Midsummer Eve.
//! - [`HolidaySet`]: an explicit list of dates.
//! - [`NoHolidays`]: nothing is a holiday.
//!
//! # Reference
//! Easter dates use the anonymous Gregorian algorithm (Meeus/Jones/Butcher).

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::error::{Result, RotaError};

/// A source of public holidays.
pub trait HolidayCalendar: Send + Sync + Debug {
    /// Calendar name (e.g., "SE").
    fn name(&self) -> &'static str;

    /// Whether `date` is a public holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Returns the holiday calendar for a region code.
///
/// Recognized: `SE` (Sweden) and `none`. Case is ignored.
pub fn for_region(region: &str) -> Result<Box<dyn HolidayCalendar>> {
    match region.to_ascii_lowercase().as_str() {
        "se" | "sweden" => Ok(Box::new(SwedishHolidays)),
        "none" | "" => Ok(Box::new(NoHolidays)),
        _ => Err(RotaError::config(format!("unknown holiday region {region:?}"))),
    }
}

/// No holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// An explicit set of holiday dates.
#[derive(Debug, Clone, Default)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Creates a set from dates.
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for HolidaySet {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Swedish public holidays.
///
/// Sundays are not included; only named holidays count.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishHolidays;

impl SwedishHolidays {
    /// All named holidays of `year`, in date order.
    pub fn holidays_in(year: i32) -> Vec<(NaiveDate, &'static str)> {
        let ymd = |m, d| NaiveDate::from_ymd_opt(year, m, d);
        let mut days: Vec<(NaiveDate, &'static str)> = Vec::with_capacity(16);

        let fixed = [
            (1, 1, "New Year's Day"),
            (1, 6, "Epiphany"),
            (5, 1, "May Day"),
            (6, 6, "National Day of Sweden"),
            (12, 24, "Christmas Eve"),
            (12, 25, "Christmas Day"),
            (12, 26, "Second Day of Christmas"),
            (12, 31, "New Year's Eve"),
        ];
        days.extend(fixed.iter().filter_map(|&(m, d, name)| ymd(m, d).map(|dt| (dt, name))));

        if let Some(easter) = easter_sunday(year) {
            let movable = [
                (-2, "Good Friday"),
                (0, "Easter Sunday"),
                (1, "Easter Monday"),
                (39, "Ascension Day"),
                (49, "Whit Sunday"),
            ];
            days.extend(movable.iter().filter_map(|&(offset, name)| {
                easter.checked_add_signed(Duration::days(offset)).map(|dt| (dt, name))
            }));
        }

        // Midsummer Eve: the Friday between 19 and 25 June.
        if let Some(eve) = first_weekday_on_or_after(ymd(6, 19), Weekday::Fri) {
            days.push((eve, "Midsummer Eve"));
            if let Some(day) = eve.succ_opt() {
                days.push((day, "Midsummer Day"));
            }
        }
        // All Saints' Day: the Saturday between 31 October and 6 November.
        if let Some(saints) = first_weekday_on_or_after(ymd(10, 31), Weekday::Sat) {
            days.push((saints, "All Saints' Day"));
        }

        days.sort_by_key(|&(d, _)| d);
        days
    }
}

impl HolidayCalendar for SwedishHolidays {
    fn name(&self) -> &'static str {
        "SE"
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::holidays_in(date.year()).iter().any(|&(d, _)| d == date)
    }
}

/// Easter Sunday of `year` (Gregorian).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// First `weekday` on or after `from`, or `None` past the last
/// representable date.
pub(crate) fn first_weekday_on_or_after(
    from: Option<NaiveDate>,
    weekday: Weekday,
) -> Option<NaiveDate> {
    let from = from?;
    let offset = (weekday.num_days_from_monday() + 7 - from.weekday().num_days_from_monday()) % 7;
    from.checked_add_signed(Duration::days(i64::from(offset)))
}
