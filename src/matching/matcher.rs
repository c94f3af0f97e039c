//! Constrained recency-weighted matching.
//!
//! # Algorithm
//!
//! 1. Copy the roster into a working set; if its size is odd, append
//!    [`ParticipantRef::Nobody`].
//! 2. While the working set is non-empty:
//!    a. weight every entry by rank (see [`rank_weights`]),
//!    b. draw two entries without replacement,
//!    c. if a drawn participant has a fixed partner still in the working
//!       set, the pair becomes (drawn, partner),
//!    d. otherwise reject the pair if it already occurs in the history,
//!       unless it contains nobody or only two entries remain,
//!    e. accept: remove both entries, record the pair.
//!
//! Step (d) retries at most [`MatcherConfig::max_attempts`] times in a row.
//!
//! # Complexity
//! O(n² · h) per accepted pair in the worst case, n = roster size,
//! h = history length. Rosters are small.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::sample::{draw_two, rank_weights};
use crate::error::{Result, RotaError};
use crate::models::{ConstraintSet, Pairing, ParticipantRef, RosterHistory};

/// Matcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Consecutive rejected draws allowed before giving up on a pair.
    pub max_attempts: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10_000,
        }
    }
}

/// Splits a roster into pairs.
///
/// Stateless between calls; the roster is borrowed and never mutated.
///
/// # Example
///
/// ```
/// use fika_rota::matching::Matcher;
/// use fika_rota::models::{ConstraintSet, RosterHistory};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let roster = RosterHistory::new(
///     vec!["Ann".into(), "Bo".into(), "Cy".into()],
///     vec![],
/// ).unwrap();
/// let mut rng = SmallRng::seed_from_u64(3);
/// let pairs = Matcher::default()
///     .pair_up(&roster, &ConstraintSet::new(), &mut rng)
///     .unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs.iter().filter(|p| p.has_nobody()).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Creates a matcher.
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Pairs every active participant exactly once.
    ///
    /// Returns `ceil(n / 2)` pairings; with an odd roster exactly one of
    /// them contains [`ParticipantRef::Nobody`].
    ///
    /// # Errors
    /// `MatchingExhausted` if `max_attempts` consecutive draws are rejected.
    pub fn pair_up<R: Rng>(
        &self,
        roster: &RosterHistory,
        constraints: &ConstraintSet,
        rng: &mut R,
    ) -> Result<Vec<Pairing>> {
        let mut working: Vec<ParticipantRef> = roster
            .names()
            .iter()
            .map(|n| ParticipantRef::participant(n.as_str()))
            .collect();
        if working.len() % 2 != 0 {
            working.push(ParticipantRef::Nobody);
        }

        let mut pairs = Vec::with_capacity(working.len() / 2);
        let mut attempts = 0;

        while !working.is_empty() {
            let n = working.len();
            let (i, j, fixed) = match draw(&working, constraints, rng) {
                Draw::Fixed(i, j) => (i, j, true),
                Draw::Free(i, j) => (i, j, false),
            };

            let (a, b) = (&working[i], &working[j]);
            let repeat = !fixed
                && n > 2
                && !a.is_nobody()
                && !b.is_nobody()
                && roster.was_paired(a, b);
            if repeat {
                attempts += 1;
                trace!(first = %a, second = %b, attempts, "rejected old pairing");
                if attempts >= self.config.max_attempts {
                    return Err(RotaError::MatchingExhausted {
                        attempts,
                        remaining: n,
                    });
                }
                continue;
            }
            attempts = 0;

            // Remove the higher index first so the lower stays valid.
            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            let second = working.remove(hi);
            let first = working.remove(lo);
            let pairing = if lo == i {
                Pairing::new(first, second)
            } else {
                Pairing::new(second, first)
            };
            debug!(pair = %pairing, fixed, remaining = working.len(), "paired");
            pairs.push(pairing);
        }

        Ok(pairs)
    }
}

enum Draw {
    /// Produced by the fixed-together override.
    Fixed(usize, usize),
    /// Plain weighted draw.
    Free(usize, usize),
}

fn draw<R: Rng>(working: &[ParticipantRef], constraints: &ConstraintSet, rng: &mut R) -> Draw {
    let weights = rank_weights(working.len());
    let (i, j) = draw_two(&weights, rng);

    for d in [i, j] {
        let partner = working[d]
            .id()
            .and_then(|id| constraints.fixed_partner(id))
            .and_then(|p| working.iter().position(|w| w.is(p)));
        if let Some(q) = partner {
            return Draw::Fixed(d, q);
        }
    }
    Draw::Free(i, j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn roster(names: &[&str], history: Vec<Pairing>) -> RosterHistory {
        RosterHistory::new(names.iter().map(|s| s.to_string()).collect(), history).unwrap()
    }

    fn covers_everyone(pairs: &[Pairing], names: &[&str]) -> bool {
        names
            .iter()
            .all(|n| pairs.iter().filter(|p| p.contains(n)).count() == 1)
    }

    #[test]
    fn test_even_roster() {
        let names = ["A", "B", "C", "D", "E", "F"];
        let r = roster(&names, vec![]);
        let mut rng = SmallRng::seed_from_u64(42);
        let pairs = Matcher::default()
            .pair_up(&r, &ConstraintSet::new(), &mut rng)
            .unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(covers_everyone(&pairs, &names));
        assert!(pairs.iter().all(|p| !p.has_nobody()));
    }

    #[test]
    fn test_odd_roster_gets_one_nobody() {
        let names = ["A", "B", "C", "D", "E"];
        let r = roster(&names, vec![]);
        let mut rng = SmallRng::seed_from_u64(42);
        let pairs = Matcher::default()
            .pair_up(&r, &ConstraintSet::new(), &mut rng)
            .unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(covers_everyone(&pairs, &names));
        assert_eq!(pairs.iter().filter(|p| p.has_nobody()).count(), 1);
    }

    #[test]
    fn test_single_and_empty_roster() {
        let mut rng = SmallRng::seed_from_u64(0);
        let m = Matcher::default();
        let pairs = m
            .pair_up(&roster(&["A"], vec![]), &ConstraintSet::new(), &mut rng)
            .unwrap();
        assert_eq!(pairs, vec![Pairing::alone("A")]);
        let pairs = m
            .pair_up(&roster(&[], vec![]), &ConstraintSet::new(), &mut rng)
            .unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_history_avoided_until_last_two() {
        // (A, B) is never drawn while four remain. It can only appear as the
        // forced final pair, after (C, D) was taken first.
        let r = roster(&["A", "B", "C", "D"], vec![Pairing::of("A", "B")]);
        let m = Matcher::default();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pairs = m.pair_up(&r, &ConstraintSet::new(), &mut rng).unwrap();
            assert_eq!(pairs.len(), 2);
            assert_ne!(pairs[0], Pairing::of("A", "B"), "seed {seed}: {pairs:?}");
            if pairs[1] == Pairing::of("A", "B") {
                assert_eq!(pairs[0], Pairing::of("C", "D"));
            }
        }
    }

    #[test]
    fn test_history_avoided_with_spare_partners() {
        // Six participants, A's only old partner is B: A-B can only be the
        // forced last pair.
        let r = roster(&["A", "B", "C", "D", "E", "F"], vec![Pairing::of("A", "B")]);
        let m = Matcher::default();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pairs = m.pair_up(&r, &ConstraintSet::new(), &mut rng).unwrap();
            assert!(!pairs[..2].contains(&Pairing::of("A", "B")), "seed {seed}: {pairs:?}");
        }
    }

    #[test]
    fn test_last_two_accepted_even_if_old() {
        let r = roster(&["A", "B"], vec![Pairing::of("A", "B")]);
        let mut rng = SmallRng::seed_from_u64(5);
        let pairs = Matcher::default()
            .pair_up(&r, &ConstraintSet::new(), &mut rng)
            .unwrap();
        assert_eq!(pairs, vec![Pairing::of("A", "B")]);
    }

    #[test]
    fn test_fixed_together_honored() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let r = roster(&names, vec![Pairing::of("C", "H")]);
        let mut cs = ConstraintSet::new();
        cs.add_fixed_together(&["C", "H"]).unwrap();
        let m = Matcher::default();
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pairs = m.pair_up(&r, &cs, &mut rng).unwrap();
            assert!(pairs.contains(&Pairing::of("H", "C")), "seed {seed}: {pairs:?}");
            assert!(covers_everyone(&pairs, &names));
        }
    }

    #[test]
    fn test_fixed_partner_absent_is_ignored() {
        let names = ["A", "B", "C", "D"];
        let r = roster(&names, vec![]);
        let mut cs = ConstraintSet::new();
        cs.add_fixed_together(&["A", "Z"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        let pairs = Matcher::default().pair_up(&r, &cs, &mut rng).unwrap();
        assert!(covers_everyone(&pairs, &names));
    }

    #[test]
    fn test_exhausted() {
        // Every pairing among the four is old, and four remain: nothing is acceptable.
        let names = ["A", "B", "C", "D"];
        let history = vec![
            Pairing::of("A", "B"),
            Pairing::of("A", "C"),
            Pairing::of("A", "D"),
            Pairing::of("B", "C"),
            Pairing::of("B", "D"),
            Pairing::of("C", "D"),
        ];
        let r = roster(&names, history);
        let m = Matcher::new(MatcherConfig { max_attempts: 50 });
        let mut rng = SmallRng::seed_from_u64(1);
        let err = m.pair_up(&r, &ConstraintSet::new(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            RotaError::MatchingExhausted {
                attempts: 50,
                remaining: 4
            }
        ));
    }

    #[test]
    fn test_nobody_pair_never_rejected() {
        let r = roster(
            &["A", "B", "C"],
            vec![Pairing::alone("A"), Pairing::alone("B"), Pairing::alone("C")],
        );
        let m = Matcher::new(MatcherConfig { max_attempts: 1 });
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            assert!(m.pair_up(&r, &ConstraintSet::new(), &mut rng).is_ok());
        }
    }

    #[test]
    fn test_same_seed_same_pairs() {
        let r = roster(&["A", "B", "C", "D", "E", "F", "G"], vec![Pairing::of("A", "B")]);
        let m = Matcher::default();
        let a = m
            .pair_up(&r, &ConstraintSet::new(), &mut SmallRng::seed_from_u64(11))
            .unwrap();
        let b = m
            .pair_up(&r, &ConstraintSet::new(), &mut SmallRng::seed_from_u64(11))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_front_drawn_more_often() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let r = roster(&names, vec![]);
        let m = Matcher::default();
        let mut first_slot = [0usize; 8];
        for seed in 0..2000 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pairs = m.pair_up(&r, &ConstraintSet::new(), &mut rng).unwrap();
            for member in pairs[0].members() {
                let idx = names.iter().position(|n| member.is(n)).unwrap();
                first_slot[idx] += 1;
            }
        }
        assert!(first_slot[0] > first_slot[7] * 2, "{first_slot:?}");
    }
}
