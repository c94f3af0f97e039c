//! Rotation generation.
//!
//! # Algorithm
//!
//! 1. Validate roster and constraints; unknown names are logged, structural
//!    problems abort.
//! 2. Copy the roster and move priority participants to the front.
//! 3. Pair everyone with the [`Matcher`].
//! 4. Ask the [`ScheduleCalendar`] for one slot date per pair.
//! 5. Zip dates and pairs into schedule entries.

use chrono::{Local, NaiveDate};
use rand::Rng;
use tracing::{info, warn};

use crate::error::{Result, RotaError};
use crate::matching::Matcher;
use crate::models::{ConstraintSet, RosterHistory, Schedule, ScheduleCalendar, ScheduleEntry};
use crate::validation::validate_input;

/// Builds a rotation from a roster, its constraints, and a slot calendar.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use fika_rota::holidays::NoHolidays;
/// use fika_rota::models::{ConstraintSet, RosterHistory, ScheduleCalendar};
/// use fika_rota::scheduler::ScheduleBuilder;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let roster = RosterHistory::new(
///     vec!["Ann".into(), "Bo".into(), "Cy".into(), "Di".into()],
///     vec![],
/// ).unwrap();
/// let calendar = ScheduleCalendar::new(Box::new(NoHolidays)).with_windows(vec![]);
/// let builder = ScheduleBuilder::new(roster, ConstraintSet::new(), calendar);
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let mut rng = SmallRng::seed_from_u64(1);
/// let schedule = builder.generate(Some(start), &mut rng).unwrap();
/// assert_eq!(schedule.len(), 2);
/// ```
#[derive(Debug)]
pub struct ScheduleBuilder {
    roster: RosterHistory,
    constraints: ConstraintSet,
    calendar: ScheduleCalendar,
    matcher: Matcher,
}

impl ScheduleBuilder {
    /// Creates a builder. Blackout dates registered in `constraints` are
    /// added to the calendar.
    pub fn new(
        roster: RosterHistory,
        constraints: ConstraintSet,
        calendar: ScheduleCalendar,
    ) -> Self {
        let calendar = calendar.with_blackout_dates(constraints.blackout_dates().iter().copied());
        Self {
            roster,
            constraints,
            calendar,
            matcher: Matcher::default(),
        }
    }

    /// Sets the matcher.
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Roster as given, before priority reordering.
    pub fn roster(&self) -> &RosterHistory {
        &self.roster
    }

    /// Constraints in effect.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Slot calendar.
    pub fn calendar(&self) -> &ScheduleCalendar {
        &self.calendar
    }

    /// The roster in the order the matcher will see it.
    pub fn prioritized_roster(&self) -> RosterHistory {
        let mut roster = self.roster.clone();
        roster.apply_priority_reorder(&self.constraints);
        roster
    }

    /// Generates a rotation starting on or after `start` (today if `None`).
    ///
    /// Deterministic for a given RNG state.
    ///
    /// # Errors
    /// - `Configuration` for fatal validation problems or when the calendar
    ///   cannot supply enough dates.
    /// - `MatchingExhausted` when the matcher gives up.
    #[tracing::instrument(skip(self, rng), fields(participants = self.roster.len()))]
    pub fn generate<R: Rng>(&self, start: Option<NaiveDate>, rng: &mut R) -> Result<Schedule> {
        if let Err(errors) = validate_input(&self.roster, &self.constraints) {
            let (fatal, minor): (Vec<_>, Vec<_>) =
                errors.into_iter().partition(|e| e.kind.is_fatal());
            for e in &minor {
                warn!("{}", e.message);
            }
            if !fatal.is_empty() {
                let messages: Vec<String> = fatal.into_iter().map(|e| e.message).collect();
                return Err(RotaError::config(messages.join("; ")));
            }
        }

        let roster = self.prioritized_roster();
        let pairs = self.matcher.pair_up(&roster, &self.constraints, rng)?;

        let start = start.unwrap_or_else(|| Local::now().date_naive());
        let dates = self.calendar.slot_dates(pairs.len(), start)?;

        let mut schedule = Schedule::new();
        for (date, pairing) in dates.into_iter().zip(pairs) {
            schedule.add_entry(ScheduleEntry::new(date, pairing));
        }

        if let Some((first, last)) = schedule.span() {
            info!(slots = schedule.len(), %first, %last, "rotation generated");
        }
        Ok(schedule)
    }
}
