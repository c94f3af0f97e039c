//! Slot calendar: which weekly dates can host a slot.
//!
//! A candidate slot date falls on a fixed weekday. It is rejected when the
//! date itself or the day before is blocked. A day is blocked if any of
//! these hold:
//! - the holiday calendar marks it as a public holiday,
//! - it lies in a seasonal break,
//! - it is an explicitly added blackout date.
//!
//! # Seasonal breaks
//! By default the breaks are placed once, relative to the start date: the
//! coming summer (20 Jun – 31 Aug of the start year, or of the next year when
//! starting in October or later) and the winter break beginning 20 Dec of the
//! start year. A rotation running past them is not blocked again.
//!
//! Configured [`BlackoutWindow`]s replace these and recur every year; a window
//! whose end precedes its start wraps the year boundary (e.g. 20 Dec – 9 Jan).

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{Result, RotaError};
use crate::holidays::{first_weekday_on_or_after, HolidayCalendar};

/// A month and day, without year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Creates a month-day. Feb 29 is accepted.
    pub fn new(month: u32, day: u32) -> Result<Self> {
        // 2000 is a leap year, so every valid month-day exists in it.
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or_else(|| RotaError::config(format!("invalid month-day {month:02}-{day:02}")))
    }

    /// Month-day of a date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = RotaError;

    /// Parses `MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || RotaError::config(format!("expected MM-DD, got {s:?}"));
        let (m, d) = s.trim().split_once('-').ok_or_else(bad)?;
        let month = m.parse().map_err(|_| bad())?;
        let day = d.parse().map_err(|_| bad())?;
        Self::new(month, day)
    }
}

impl TryFrom<String> for MonthDay {
    type Error = RotaError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MonthDay> for String {
    fn from(md: MonthDay) -> Self {
        md.to_string()
    }
}

/// An annual blackout window, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackoutWindow {
    /// First blocked day.
    pub start: MonthDay,
    /// Last blocked day.
    pub end: MonthDay,
}

impl BlackoutWindow {
    /// Creates a window.
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Midsummer through August: 20 Jun – 31 Aug.
    pub fn summer() -> Self {
        Self::new(MonthDay { month: 6, day: 20 }, MonthDay { month: 8, day: 31 })
    }

    /// Three weeks over Christmas and New Year: 20 Dec – 9 Jan.
    pub fn winter() -> Self {
        Self::new(MonthDay { month: 12, day: 20 }, MonthDay { month: 1, day: 9 })
    }

    /// The dates of the occurrence beginning in `year`.
    ///
    /// A wrapping window ends in the following year. `None` when either end
    /// is not a date in the calendar range (or Feb 29 of a common year).
    pub fn occurrence(&self, year: i32) -> Option<RangeInclusive<NaiveDate>> {
        let end_year = if self.start <= self.end { year } else { year.checked_add(1)? };
        let start = NaiveDate::from_ymd_opt(year, self.start.month, self.start.day)?;
        let end = NaiveDate::from_ymd_opt(end_year, self.end.month, self.end.day)?;
        Some(start..=end)
    }

    /// Whether `date` falls inside this window in any year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let md = MonthDay::of(date);
        if self.start <= self.end {
            self.start <= md && md <= self.end
        } else {
            md >= self.start || md <= self.end
        }
    }
}

/// Produces the weekly slot dates of a rotation.
#[derive(Debug)]
pub struct ScheduleCalendar {
    weekday: Weekday,
    /// Recurring windows; `None` places the seasonal breaks from the start date.
    windows: Option<Vec<BlackoutWindow>>,
    extra: BTreeSet<NaiveDate>,
    holidays: Box<dyn HolidayCalendar>,
    max_weeks_scanned: usize,
}

impl ScheduleCalendar {
    /// Creates a Friday calendar with summer and winter breaks placed from
    /// the start date.
    pub fn new(holidays: Box<dyn HolidayCalendar>) -> Self {
        Self {
            weekday: Weekday::Fri,
            windows: None,
            extra: BTreeSet::new(),
            holidays,
            max_weeks_scanned: 520,
        }
    }

    /// Sets the slot weekday.
    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = weekday;
        self
    }

    /// Replaces the seasonal breaks with windows that recur every year.
    ///
    /// An empty list disables seasonal breaks.
    pub fn with_windows(mut self, windows: Vec<BlackoutWindow>) -> Self {
        self.windows = Some(windows);
        self
    }

    /// Adds explicit blackout dates.
    pub fn with_blackout_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra.extend(dates);
        self
    }

    /// Caps how many consecutive weeks are examined.
    pub fn with_max_weeks_scanned(mut self, weeks: usize) -> Self {
        self.max_weeks_scanned = weeks;
        self
    }

    /// Slot weekday.
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Whether no slot may touch `date`, whatever the start date.
    ///
    /// Covers holidays, explicit dates and recurring windows; seasonal
    /// breaks depend on the start date, see [`Self::season_breaks`].
    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.extra.contains(&date)
            || self
                .windows
                .as_deref()
                .is_some_and(|ws| ws.iter().any(|w| w.contains(date)))
            || self.holidays.is_holiday(date)
    }

    /// Seasonal breaks for a rotation starting on `start`.
    ///
    /// Empty when recurring windows are configured.
    pub fn season_breaks(&self, start: NaiveDate) -> Vec<RangeInclusive<NaiveDate>> {
        if self.windows.is_some() {
            return Vec::new();
        }
        let summer_year = if start.month() <= 9 {
            Some(start.year())
        } else {
            start.year().checked_add(1)
        };
        [
            summer_year.and_then(|y| BlackoutWindow::summer().occurrence(y)),
            BlackoutWindow::winter().occurrence(start.year()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn is_available(&self, date: NaiveDate, breaks: &[RangeInclusive<NaiveDate>]) -> bool {
        let blocked = |d: NaiveDate| self.is_blocked(d) || breaks.iter().any(|b| b.contains(&d));
        !blocked(date) && !date.pred_opt().is_some_and(blocked)
    }

    /// Returns exactly `n` slot dates, strictly increasing, one per week at most.
    ///
    /// Scanning starts at the first configured weekday on or after `start`.
    ///
    /// # Errors
    /// `Configuration` if `max_weeks_scanned` weeks pass without finding
    /// `n` available dates, or the scan runs past the last representable date.
    pub fn slot_dates(&self, n: usize, start: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::with_capacity(n);
        if n == 0 {
            return Ok(dates);
        }
        let out_of_range = |found: usize| {
            RotaError::config(format!("only {found} of {n} slot dates fit after {start}"))
        };
        let mut slot =
            first_weekday_on_or_after(Some(start), self.weekday).ok_or_else(|| out_of_range(0))?;
        let breaks = self.season_breaks(start);

        let mut scanned = 0;
        loop {
            if scanned >= self.max_weeks_scanned {
                return Err(RotaError::config(format!(
                    "only {} of {n} slot dates found within {scanned} weeks of {start}",
                    dates.len()
                )));
            }
            if self.is_available(slot, &breaks) {
                dates.push(slot);
                if dates.len() == n {
                    return Ok(dates);
                }
            }
            scanned += 1;
            slot = slot
                .checked_add_signed(Duration::weeks(1))
                .ok_or_else(|| out_of_range(dates.len()))?;
        }
    }
}
