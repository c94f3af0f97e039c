//! Participant identifiers, the "nobody" placeholder, and pairings.
//!
//! # Sentinel
//! A pairing slot may be empty: either the roster had odd size, or a
//! historical partner has since left. That slot is [`ParticipantRef::Nobody`],
//! never a magic string.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RotaError};

/// Record token for a holiday-only row.
pub const TOKEN_HOLIDAY: &str = "HOLIDAY";
/// Record token for an empty pairing slot.
pub const TOKEN_NOBODY: &str = "nan";

const RESERVED: [&str; 3] = ["holiday", "nan", "none"];

/// Checks that `id` can be used as a participant identifier.
///
/// Identifiers must be non-empty, contain no whitespace or `#`, and must not
/// collide with a record token.
pub fn validate_identifier(id: &str) -> Result<()> {
    let reserved = RESERVED.iter().any(|t| t.eq_ignore_ascii_case(id));
    if id.is_empty() || reserved || id.chars().any(|c| c.is_whitespace() || c == '#') {
        return Err(RotaError::InvalidIdentifier { id: id.to_string() });
    }
    Ok(())
}

/// One side of a pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantRef {
    /// An active or former participant.
    Participant(String),
    /// No partner.
    Nobody,
}

impl ParticipantRef {
    /// Creates a reference to a named participant.
    pub fn participant(id: impl Into<String>) -> Self {
        Self::Participant(id.into())
    }

    /// The identifier, or `None` for the placeholder.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Participant(id) => Some(id),
            Self::Nobody => None,
        }
    }

    /// Whether this is the placeholder.
    #[inline]
    pub fn is_nobody(&self) -> bool {
        matches!(self, Self::Nobody)
    }

    /// Whether this refers to `id`.
    #[inline]
    pub fn is(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

impl fmt::Display for ParticipantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participant(id) => f.write_str(id),
            Self::Nobody => f.write_str(TOKEN_NOBODY),
        }
    }
}

impl From<&str> for ParticipantRef {
    fn from(id: &str) -> Self {
        Self::participant(id)
    }
}

/// An unordered pair of participants.
///
/// Equality ignores member order: `(A, B) == (B, A)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pairing {
    /// First member, in draw order.
    pub first: ParticipantRef,
    /// Second member, in draw order.
    pub second: ParticipantRef,
}

impl Pairing {
    /// Creates a pairing.
    pub fn new(first: ParticipantRef, second: ParticipantRef) -> Self {
        Self { first, second }
    }

    /// Creates a pairing of two named participants.
    pub fn of(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(ParticipantRef::participant(a), ParticipantRef::participant(b))
    }

    /// Creates a pairing of one participant with nobody.
    pub fn alone(id: impl Into<String>) -> Self {
        Self::new(ParticipantRef::participant(id), ParticipantRef::Nobody)
    }

    /// Whether either member is `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.first.is(id) || self.second.is(id)
    }

    /// Whether this pairing consists of exactly `a` and `b`, in any order.
    pub fn matches(&self, a: &ParticipantRef, b: &ParticipantRef) -> bool {
        (&self.first == a && &self.second == b) || (&self.first == b && &self.second == a)
    }

    /// Whether either slot is empty.
    pub fn has_nobody(&self) -> bool {
        self.first.is_nobody() || self.second.is_nobody()
    }

    /// Both members.
    pub fn members(&self) -> [&ParticipantRef; 2] {
        [&self.first, &self.second]
    }

    /// Replaces every occurrence of `id` with the placeholder.
    ///
    /// Returns the number of slots rewritten.
    pub fn forget(&mut self, id: &str) -> usize {
        let mut n = 0;
        for slot in [&mut self.first, &mut self.second] {
            if slot.is(id) {
                *slot = ParticipantRef::Nobody;
                n += 1;
            }
        }
        n
    }
}

impl PartialEq for Pairing {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.first, &other.second)
    }
}

impl Eq for Pairing {}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("Ann").is_ok());
        assert!(validate_identifier("Ann-Sofie").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("Ann Sofie").is_err());
        assert!(validate_identifier("a#b").is_err());
        assert!(validate_identifier("HOLIDAY").is_err());
        assert!(validate_identifier("NaN").is_err());
        assert!(validate_identifier("none").is_err());
    }

    #[test]
    fn test_pairing_unordered_eq() {
        assert_eq!(Pairing::of("A", "B"), Pairing::of("B", "A"));
        assert_ne!(Pairing::of("A", "B"), Pairing::of("A", "C"));
        assert_eq!(Pairing::alone("A"), Pairing::new(ParticipantRef::Nobody, "A".into()));
    }

    #[test]
    fn test_pairing_forget() {
        let mut p = Pairing::of("A", "B");
        assert_eq!(p.forget("A"), 1);
        assert_eq!(p, Pairing::alone("B"));
        assert!(p.has_nobody());
        assert_eq!(p.forget("Z"), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pairing::alone("A").to_string(), "A & nan");
        assert_eq!(ParticipantRef::participant("B").to_string(), "B");
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = Pairing::alone("A");
        let json = serde_json::to_string(&p).unwrap();
        let back: Pairing = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
