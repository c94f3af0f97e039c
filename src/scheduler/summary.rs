//! Rotation quality metrics.
//!
//! Summarizes a generated schedule against the roster and constraints it
//! was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Slots | Number of schedule entries |
//! | Solo slots | Entries where one side is nobody |
//! | Repeated pairings | Entries already present in the history |
//! | Fixed pairs honored | Together pairs found in the schedule / applicable ones |
//! | Span | Weeks between first and last slot |
//! | Priority mean slot | Mean 0-based slot index of priority participants |

use chrono::NaiveDate;

use crate::models::{ConstraintSet, Pairing, RosterHistory, Schedule};

/// Rotation summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationSummary {
    /// Number of slots.
    pub slot_count: usize,
    /// Number of slots with an empty side.
    pub solo_slots: usize,
    /// Slots repeating a pairing from the history.
    pub repeated_pairings: usize,
    /// Together pairs present in the schedule.
    pub fixed_pairs_honored: usize,
    /// Together pairs whose members are both on the roster.
    pub fixed_pairs_applicable: usize,
    /// Whole weeks between the first and the last slot.
    pub span_weeks: i64,
    /// Mean slot index of priority participants, `None` if there are none.
    pub priority_mean_slot: Option<f64>,
}

impl RotationSummary {
    /// Computes the summary.
    ///
    /// # Arguments
    /// * `schedule` - The generated schedule.
    /// * `roster` - Roster and history the schedule was generated from.
    /// * `constraints` - Constraints in effect.
    pub fn calculate(
        schedule: &Schedule,
        roster: &RosterHistory,
        constraints: &ConstraintSet,
    ) -> Self {
        let solo_slots = schedule.pairings().filter(|p| p.has_nobody()).count();
        let repeated_pairings = schedule
            .pairings()
            .filter(|p| !p.has_nobody() && roster.was_paired(&p.first, &p.second))
            .count();

        let applicable: Vec<&(String, String)> = constraints
            .fixed_together()
            .iter()
            .filter(|(a, b)| roster.contains(a) && roster.contains(b))
            .collect();
        let fixed_pairs_honored = applicable
            .iter()
            .filter(|(a, b)| {
                let pair = Pairing::of(a.as_str(), b.as_str());
                schedule.pairings().any(|p| *p == pair)
            })
            .count();

        let span_weeks = schedule
            .span()
            .map(|(first, last): (NaiveDate, NaiveDate)| (last - first).num_weeks())
            .unwrap_or(0);

        let slots: Vec<usize> = constraints
            .priority()
            .filter_map(|id| schedule.entries.iter().position(|e| e.pairing.contains(id)))
            .collect();
        let priority_mean_slot = if slots.is_empty() {
            None
        } else {
            Some(slots.iter().sum::<usize>() as f64 / slots.len() as f64)
        };

        Self {
            slot_count: schedule.len(),
            solo_slots,
            repeated_pairings,
            fixed_pairs_honored,
            fixed_pairs_applicable: applicable.len(),
            span_weeks,
            priority_mean_slot,
        }
    }

    /// Whether every applicable together pair was honored.
    pub fn all_fixed_pairs_honored(&self) -> bool {
        self.fixed_pairs_honored == self.fixed_pairs_applicable
    }
}
