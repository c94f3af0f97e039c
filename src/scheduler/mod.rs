//! Rotation generation and summary metrics.
//!
//! Provides the orchestration that turns a roster, its constraints and a
//! slot calendar into a dated rotation, and a summary of how well the
//! result honors the constraints.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` reorders the roster by priority, pairs it with the
//! recency-weighted matcher, and assigns one slot date per pair.
//!
//! # Summary
//!
//! `RotationSummary` reports solo slots, repeated pairings, honored fixed
//! pairs, span, and where priority participants landed.

mod builder;
mod summary;

pub use builder::ScheduleBuilder;
pub use summary::RotationSummary;
