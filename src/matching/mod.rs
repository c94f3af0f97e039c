//! Recency-weighted random matching.
//!
//! Turns an ordered roster into a complete set of pairs. Participants near
//! the front of the roster (longest since they last served) are the most
//! likely to be drawn early, fixed pairs are always kept together, and
//! repeats of past pairings are avoided while any alternative remains.
//!
//! # Modules
//!
//! - **`sample`**: rank weights and weighted draws without replacement
//! - **`matcher`**: the constrained matching loop

mod matcher;
mod sample;

pub use matcher::{Matcher, MatcherConfig};
pub use sample::rank_weights;
