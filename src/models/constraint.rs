//! Rotation constraints.
//!
//! Three kinds of rule shape a rotation:
//! - **Priority** (leaving soon, just arrived): moved to the front of the
//!   roster before matching, so they are the most likely to be drawn early.
//! - **Together**: two participants always paired when both are active.
//! - **Holiday**: extra dates on which no slot is scheduled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::participant::validate_identifier;
use crate::error::{Result, RotaError};

/// Constraint categories accepted by [`ConstraintSet::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Participant leaves the group soon.
    LeavingSoon,
    /// Participant joined recently.
    JustArrived,
    /// Two participants that must always be paired.
    Together,
    /// Extra blackout date.
    Holiday,
}

impl ConstraintKind {
    /// Whether this kind moves participants to the front of the roster.
    pub fn is_priority(self) -> bool {
        matches!(self, Self::LeavingSoon | Self::JustArrived)
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::LeavingSoon => "leaving soon",
            Self::JustArrived => "just arrived",
            Self::Together => "together",
            Self::Holiday => "holiday",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintKind {
    type Err = RotaError;

    /// Parses `leaving soon`, `just arrived`, `together` or `holiday`.
    /// Spaces, `-` and `_` are interchangeable; case is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let norm: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        match norm.as_str() {
            "leaving soon" => Ok(Self::LeavingSoon),
            "just arrived" => Ok(Self::JustArrived),
            "together" => Ok(Self::Together),
            "holiday" => Ok(Self::Holiday),
            _ => Err(RotaError::config(format!("{s:?} is not a defined constraint"))),
        }
    }
}

/// Registered constraints for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintSet {
    leaving_soon: Vec<String>,
    just_arrived: Vec<String>,
    together: Vec<(String, String)>,
    blackout_dates: BTreeSet<NaiveDate>,
}

impl ConstraintSet {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers identifiers under a constraint kind.
    ///
    /// `Together` requires exactly two identifiers. `Holiday` takes dates,
    /// not identifiers, and is rejected here; use [`Self::add_blackout_date`].
    pub fn add(&mut self, kind: ConstraintKind, ids: &[&str]) -> Result<()> {
        match kind {
            ConstraintKind::LeavingSoon | ConstraintKind::JustArrived => {
                self.add_priority(kind, ids)
            }
            ConstraintKind::Together => self.add_fixed_together(ids),
            ConstraintKind::Holiday => Err(RotaError::config(
                "holiday constraints take dates, not participant identifiers",
            )),
        }
    }

    /// Appends identifiers to a priority list.
    pub fn add_priority(&mut self, kind: ConstraintKind, ids: &[&str]) -> Result<()> {
        for id in ids {
            validate_identifier(id)?;
        }
        let list = match kind {
            ConstraintKind::LeavingSoon => &mut self.leaving_soon,
            ConstraintKind::JustArrived => &mut self.just_arrived,
            other => {
                return Err(RotaError::config(format!(
                    "{other} is not a priority constraint"
                )))
            }
        };
        list.extend(ids.iter().map(|s| s.to_string()));
        Ok(())
    }

    /// Registers one participant as leaving soon.
    pub fn add_leaving_soon(&mut self, id: &str) -> Result<()> {
        self.add_priority(ConstraintKind::LeavingSoon, &[id])
    }

    /// Registers several participants as leaving soon.
    pub fn add_leaving_soon_many(&mut self, ids: &[&str]) -> Result<()> {
        self.add_priority(ConstraintKind::LeavingSoon, ids)
    }

    /// Registers one participant as just arrived.
    pub fn add_just_arrived(&mut self, id: &str) -> Result<()> {
        self.add_priority(ConstraintKind::JustArrived, &[id])
    }

    /// Registers several participants as just arrived.
    pub fn add_just_arrived_many(&mut self, ids: &[&str]) -> Result<()> {
        self.add_priority(ConstraintKind::JustArrived, ids)
    }

    /// Registers a pair that must always be matched together.
    ///
    /// # Errors
    /// `Configuration` if `ids` does not hold exactly two distinct
    /// identifiers, or if either member already belongs to a fixed pair.
    pub fn add_fixed_together(&mut self, ids: &[&str]) -> Result<()> {
        let [a, b] = ids else {
            return Err(RotaError::config(format!(
                "a together constraint needs exactly 2 participants, got {}",
                ids.len()
            )));
        };
        if a == b {
            return Err(RotaError::config(format!(
                "a together constraint needs two distinct participants, got {a} twice"
            )));
        }
        validate_identifier(a)?;
        validate_identifier(b)?;
        for id in [a, b] {
            if self.fixed_partner(id).is_some() {
                return Err(RotaError::config(format!(
                    "{id} already belongs to a together constraint"
                )));
            }
        }
        self.together.push((a.to_string(), b.to_string()));
        Ok(())
    }

    /// Adds a date on which no slot may be scheduled.
    pub fn add_blackout_date(&mut self, date: NaiveDate) {
        self.blackout_dates.insert(date);
    }

    /// Priority identifiers in application order: leaving soon, then just arrived.
    pub fn priority(&self) -> impl Iterator<Item = &str> {
        self.leaving_soon
            .iter()
            .chain(self.just_arrived.iter())
            .map(String::as_str)
    }

    /// Fixed-together pairs.
    pub fn fixed_together(&self) -> &[(String, String)] {
        &self.together
    }

    /// The fixed partner registered for `id`, if any.
    pub fn fixed_partner(&self, id: &str) -> Option<&str> {
        self.together.iter().find_map(|(a, b)| {
            if a == id {
                Some(b.as_str())
            } else if b == id {
                Some(a.as_str())
            } else {
                None
            }
        })
    }

    /// Extra blackout dates.
    pub fn blackout_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.blackout_dates
    }

    /// Whether no constraint of any kind is registered.
    pub fn is_empty(&self) -> bool {
        self.leaving_soon.is_empty()
            && self.just_arrived.is_empty()
            && self.together.is_empty()
            && self.blackout_dates.is_empty()
    }
}
