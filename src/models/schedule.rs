//! Generated rotation.
//!
//! A schedule is an ordered list of weekly entries, each assigning one
//! pairing to one slot date. Week numbers follow ISO 8601.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::participant::Pairing;

/// Display format for slot dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One slot of the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// ISO week number of `date`.
    pub week: u32,
    /// Slot date.
    pub date: NaiveDate,
    /// Who serves.
    pub pairing: Pairing,
}

impl ScheduleEntry {
    /// Creates an entry; the week number is derived from the date.
    pub fn new(date: NaiveDate, pairing: Pairing) -> Self {
        Self {
            week: date.iso_week().week(),
            date,
            pairing,
        }
    }

    /// Date rendered as `dd/mm/yyyy`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A complete rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Entries in date order.
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairings in slot order.
    pub fn pairings(&self) -> impl Iterator<Item = &Pairing> {
        self.entries.iter().map(|e| &e.pairing)
    }

    /// The entry in which `id` serves.
    pub fn entry_for(&self, id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.pairing.contains(id))
    }

    /// First and last slot dates.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.entries.first()?.date, self.entries.last()?.date))
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4}  {:<10}  {:<12}  {:<12}", "Week", "Date", "Person 1", "Person 2")?;
        for e in &self.entries {
            writeln!(
                f,
                "{:>4}  {:<10}  {:<12}  {:<12}",
                e.week,
                e.date_string(),
                e.pairing.first.to_string(),
                e.pairing.second.to_string()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.add_entry(ScheduleEntry::new(date(2024, 1, 12), Pairing::of("A", "B")));
        s.add_entry(ScheduleEntry::new(date(2024, 1, 19), Pairing::alone("C")));
        s
    }

    #[test]
    fn test_entry_week_and_date() {
        let e = ScheduleEntry::new(date(2024, 1, 12), Pairing::of("A", "B"));
        assert_eq!(e.week, 2);
        assert_eq!(e.date_string(), "12/01/2024");
        // 30 Dec 2024 belongs to ISO week 1 of 2025.
        assert_eq!(ScheduleEntry::new(date(2024, 12, 30), Pairing::alone("A")).week, 1);
    }

    #[test]
    fn test_entry_for() {
        let s = sample_schedule();
        assert_eq!(s.entry_for("C").unwrap().week, 3);
        assert!(s.entry_for("Z").is_none());
    }

    #[test]
    fn test_span() {
        let s = sample_schedule();
        assert_eq!(s.span(), Some((date(2024, 1, 12), date(2024, 1, 19))));
        assert_eq!(Schedule::new().span(), None);
    }

    #[test]
    fn test_display() {
        let text = sample_schedule().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("12/01/2024"));
        assert!(lines[2].trim_end().ends_with("nan"));
    }
}
