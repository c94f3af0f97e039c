//! Rotation domain models.
//!
//! Provides the core data types for a weekly pair rotation: who is in the
//! group, who has been paired before, which rules apply, and which dates
//! can host a slot.
//!
//! # Domain Mappings
//!
//! | fika-rota | Office fika | On-call | Code review |
//! |-----------|-------------|---------|-------------|
//! | Participant | Colleague | Engineer | Reviewer |
//! | Pairing | Fika hosts | Primary + secondary | Review buddies |
//! | Slot date | Friday | Rotation start | Review day |

mod calendar;
mod constraint;
mod participant;
mod roster;
mod schedule;

pub use calendar::{BlackoutWindow, MonthDay, ScheduleCalendar};
pub use constraint::{ConstraintKind, ConstraintSet};
pub use participant::{
    validate_identifier, Pairing, ParticipantRef, TOKEN_HOLIDAY, TOKEN_NOBODY,
};
pub use roster::RosterHistory;
pub use schedule::{Schedule, ScheduleEntry, DATE_FORMAT};
