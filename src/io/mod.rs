//! Rotation record files.
//!
//! # Format
//!
//! Plain text, one row per line, four whitespace-separated fields:
//!
//! ```text
//! # Week  Date        Person1  Person2
//!     2   12/01/2024  Ann      Bo
//!     3   19/01/2024  Cy       nan
//!     4   26/01/2024  HOLIDAY  HOLIDAY
//! ```
//!
//! - `#` starts a comment, on its own line or after the fields.
//! - `nan` / `none` (any case) is an empty slot.
//! - `HOLIDAY` in either person field marks a holiday row. Holiday rows
//!   carry no participants and no history.

mod reader;
mod writer;

pub use reader::{load_records, parse_records};
pub use writer::{render_records, write_records};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Pairing, ParticipantRef, RosterHistory, Schedule};

/// One person field of a record row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// A participant, or nobody.
    Person(ParticipantRef),
    /// Holiday marker.
    Holiday,
}

/// One row of a record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// ISO week number as written.
    pub week: u32,
    /// Slot date.
    pub date: NaiveDate,
    /// First person field.
    pub first: Slot,
    /// Second person field.
    pub second: Slot,
}

impl Record {
    /// Whether this row marks a holiday.
    pub fn is_holiday(&self) -> bool {
        self.first == Slot::Holiday || self.second == Slot::Holiday
    }

    /// The pairing on this row, or `None` for holiday rows.
    pub fn pairing(&self) -> Option<Pairing> {
        match (&self.first, &self.second) {
            (Slot::Person(a), Slot::Person(b)) => Some(Pairing::new(a.clone(), b.clone())),
            _ => None,
        }
    }
}

impl Schedule {
    /// Converts the schedule into record rows.
    pub fn to_records(&self) -> Vec<Record> {
        self.entries
            .iter()
            .map(|e| Record {
                week: e.week,
                date: e.date,
                first: Slot::Person(e.pairing.first.clone()),
                second: Slot::Person(e.pairing.second.clone()),
            })
            .collect()
    }
}

impl RosterHistory {
    /// Builds a roster and history from record rows in file order.
    ///
    /// Holiday rows add no history, but a participant named next to a
    /// `HOLIDAY` marker still joins the roster. Rows are taken as
    /// chronological, so a participant's roster position follows their
    /// latest row.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for record in records {
            for slot in [&record.first, &record.second] {
                if let Slot::Person(ParticipantRef::Participant(id)) = slot {
                    names.retain(|n| n != id);
                    names.push(id.clone());
                }
            }
        }
        let history = records.iter().filter_map(Record::pairing).collect();
        Self::new(names, history)
    }
}
