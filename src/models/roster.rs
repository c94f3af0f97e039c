//! Active roster and pairing history.
//!
//! # Ordering
//! The roster is ordered by recency of service: the participant at the
//! front served longest ago (or is new, or has been prioritized). The
//! matcher turns this order into sampling weights.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::constraint::ConstraintSet;
use super::participant::{validate_identifier, Pairing, ParticipantRef};
use crate::error::{Result, RotaError};
use crate::matching::rank_weights;

/// Ordered participants plus every pairing made so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterHistory {
    names: Vec<String>,
    history: Vec<Pairing>,
}

impl RosterHistory {
    /// Creates a roster from names (front = most overdue) and a history.
    ///
    /// # Errors
    /// `InvalidIdentifier` for a malformed name, `Configuration` for a duplicate.
    pub fn new(names: Vec<String>, history: Vec<Pairing>) -> Result<Self> {
        for (i, name) in names.iter().enumerate() {
            validate_identifier(name)?;
            if names[..i].contains(name) {
                return Err(RotaError::config(format!("{name} appears twice in the roster")));
            }
        }
        Ok(Self { names, history })
    }

    /// Builds a roster from pairings in chronological order (oldest first).
    ///
    /// Participants are ordered by their most recent appearance, least
    /// recent first. Every pairing becomes history.
    pub fn from_pairings(pairings: Vec<Pairing>) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for pairing in &pairings {
            for member in pairing.members() {
                if let Some(id) = member.id() {
                    validate_identifier(id)?;
                    names.retain(|n| n != id);
                    names.push(id.to_string());
                }
            }
        }
        Ok(Self {
            names,
            history: pairings,
        })
    }

    /// Participants in recency order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Past pairings.
    pub fn history(&self) -> &[Pairing] {
        &self.history
    }

    /// Number of active participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the roster has no active participants.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `id` is active.
    pub fn contains(&self, id: &str) -> bool {
        self.names.iter().any(|n| n == id)
    }

    /// 0-based roster position of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.names.iter().position(|n| n == id)
    }

    /// Sampling weight of each participant in the first draw of a round.
    pub fn weights(&self) -> Vec<(&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(rank_weights(self.names.len()))
            .collect()
    }

    /// Whether `a` and `b` have been paired before.
    pub fn was_paired(&self, a: &ParticipantRef, b: &ParticipantRef) -> bool {
        self.history.iter().any(|p| p.matches(a, b))
    }

    /// Adds a participant at the front of the roster.
    ///
    /// New arrivals have never served, so they are the most overdue.
    pub fn add_participant(&mut self, id: &str) -> Result<()> {
        validate_identifier(id)?;
        if self.contains(id) {
            return Err(RotaError::config(format!("{id} is already in the roster")));
        }
        self.names.insert(0, id.to_string());
        info!(participant = id, "welcome");
        Ok(())
    }

    /// Adds several participants, each inserted at the front in turn.
    pub fn add_participants(&mut self, ids: &[&str]) -> Result<()> {
        ids.iter().try_for_each(|id| self.add_participant(id))
    }

    /// Removes a participant from the roster.
    ///
    /// Every history occurrence of `id` is replaced by
    /// [`ParticipantRef::Nobody`] whether or not `id` was active, so the
    /// pairing is kept but can no longer block a real match.
    ///
    /// # Errors
    /// `ParticipantNotFound` if `id` was not active. History is still rewritten.
    pub fn remove_participant(&mut self, id: &str) -> Result<()> {
        let rewritten: usize = self.history.iter_mut().map(|p| p.forget(id)).sum();
        debug!(participant = id, rewritten, "history entries forgotten");

        match self.position(id) {
            Some(pos) => {
                self.names.remove(pos);
                info!(participant = id, "farewell");
                Ok(())
            }
            None => Err(RotaError::ParticipantNotFound { id: id.to_string() }),
        }
    }

    /// Removes several participants.
    ///
    /// Missing participants are logged and skipped.
    pub fn remove_participants(&mut self, ids: &[&str]) {
        for id in ids {
            if let Err(e) = self.remove_participant(id) {
                warn!("{e}");
            }
        }
    }

    /// Moves each priority participant to the front, in registration order.
    ///
    /// The last one applied ends at rank 1. Unknown identifiers are logged
    /// and skipped.
    pub fn apply_priority_reorder(&mut self, constraints: &ConstraintSet) {
        for id in constraints.priority() {
            match self.position(id) {
                Some(pos) => {
                    let name = self.names.remove(pos);
                    self.names.insert(0, name);
                }
                None => warn!(participant = id, "priority participant is not in the roster"),
            }
        }
    }

    /// Appends new pairings to the history.
    pub fn record(&mut self, pairings: impl IntoIterator<Item = Pairing>) {
        self.history.extend(pairings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> RosterHistory {
        RosterHistory::new(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![Pairing::of("A", "B"), Pairing::of("C", "D"), Pairing::of("A", "C")],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = RosterHistory::new(vec!["A".into(), "A".into()], vec![]).unwrap_err();
        assert!(matches!(err, RotaError::Configuration { .. }));
        assert!(RosterHistory::new(vec!["nan".into()], vec![]).is_err());
    }

    #[test]
    fn test_from_pairings_recency() {
        let r = RosterHistory::from_pairings(vec![
            Pairing::of("A", "B"),
            Pairing::of("C", "D"),
            Pairing::of("B", "E"),
            Pairing::alone("F"),
        ])
        .unwrap();
        assert_eq!(r.names(), &["A", "C", "D", "B", "E", "F"]);
        assert_eq!(r.history().len(), 4);
    }

    #[test]
    fn test_add_participant_front() {
        let mut r = roster();
        r.add_participant("E").unwrap();
        assert_eq!(r.names()[0], "E");
        assert!(r.add_participant("E").is_err());

        r.add_participants(&["F", "G"]).unwrap();
        assert_eq!(&r.names()[..3], &["G", "F", "E"]);
    }

    #[test]
    fn test_remove_participant_rewrites_history() {
        let mut r = roster();
        let before = r.history().len();
        r.remove_participant("A").unwrap();
        assert!(!r.contains("A"));
        assert_eq!(r.history().len(), before);
        assert!(r.history().iter().all(|p| !p.contains("A")));
        assert_eq!(r.history()[0], Pairing::alone("B"));
        assert_eq!(r.history()[2], Pairing::alone("C"));
    }

    #[test]
    fn test_remove_missing_is_reported() {
        let mut r = roster();
        let err = r.remove_participant("Z").unwrap_err();
        assert!(matches!(err, RotaError::ParticipantNotFound { .. }));
        assert_eq!(r.len(), 4);

        r.remove_participants(&["Z", "B"]);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_priority_reorder() {
        let mut r = roster();
        let mut cs = ConstraintSet::new();
        cs.add_leaving_soon("D").unwrap();
        cs.add_just_arrived("C").unwrap();
        cs.add_just_arrived("Q").unwrap();
        r.apply_priority_reorder(&cs);
        assert_eq!(r.names(), &["C", "D", "A", "B"]);

        let weights = r.weights();
        let max = weights.iter().map(|&(_, w)| w).fold(0.0, f64::max);
        assert_eq!(weights[0], ("C", max));
    }

    #[test]
    fn test_was_paired() {
        let r = roster();
        assert!(r.was_paired(&"B".into(), &"A".into()));
        assert!(!r.was_paired(&"B".into(), &"D".into()));
    }
}
