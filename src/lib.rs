//! Weekly pair rotation.
//!
//! Assigns pairs of people from a group to a recurring weekly slot. People
//! who served longest ago are the most likely to be picked first, past
//! pairings are not repeated while an alternative exists, fixed pairs are
//! always kept together, and slots avoid public holidays, their eves, and
//! annual blackout windows.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `RosterHistory`, `ConstraintSet`,
//!   `Pairing`, `ScheduleCalendar`, `Schedule`
//! - **`matching`**: Recency-weighted constrained matching
//! - **`scheduler`**: `ScheduleBuilder` orchestration and `RotationSummary`
//! - **`holidays`**: `HolidayCalendar` trait and built-in calendars
//! - **`io`**: Plain-text record files
//! - **`validation`**: Input integrity checks (duplicates, conflicting pairs)
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use fika_rota::holidays::SwedishHolidays;
//! use fika_rota::io::parse_records;
//! use fika_rota::models::{ConstraintSet, RosterHistory, ScheduleCalendar};
//! use fika_rota::scheduler::ScheduleBuilder;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let records = parse_records("\
//!     1 05/01/2024 Ann Bo
//!     2 12/01/2024 Cy  Di
//! ").unwrap();
//! let mut roster = RosterHistory::from_records(&records).unwrap();
//! roster.add_participant("Ed").unwrap();
//!
//! let mut constraints = ConstraintSet::new();
//! constraints.add_leaving_soon("Cy").unwrap();
//!
//! let calendar = ScheduleCalendar::new(Box::new(SwedishHolidays));
//! let builder = ScheduleBuilder::new(roster, constraints, calendar);
//! let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let schedule = builder.generate(Some(start), &mut SmallRng::seed_from_u64(7)).unwrap();
//! assert_eq!(schedule.len(), 3);
//! ```

pub mod error;
pub mod holidays;
pub mod io;
pub mod matching;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, RotaError};
