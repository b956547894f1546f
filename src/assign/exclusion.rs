//! Combined exclusion relation and the permutation validity predicate.

use super::types::{normalize_key, ForbiddenPair, Pair, ParticipantSet};
use tracing::debug;

/// The set of (giver, receiver) index pairs that may not be assigned.
///
/// Combines self-assignment, prior assignments, and forbidden pairs into a
/// dense n×n table so a candidate permutation can be checked in O(n).
/// Indices refer to positions in the [`ParticipantSet`] the relation was
/// built from.
///
/// # Examples
///
/// ```
/// use u_santa::assign::{ExclusionRelation, ForbiddenPair, Pair, Participant, ParticipantSet};
///
/// let set = ParticipantSet::new(vec![
///     Participant::new("a", "A"),
///     Participant::new("b", "B"),
///     Participant::new("c", "C"),
/// ])
/// .unwrap();
/// let rel = ExclusionRelation::build(
///     &set,
///     &[Pair::new("a", "b")],
///     &[ForbiddenPair::both_ways("b", "c")],
/// );
/// assert!(rel.is_excluded(0, 0)); // self
/// assert!(rel.is_excluded(0, 1)); // prior
/// assert!(rel.is_excluded(2, 1)); // symmetric ban
/// assert!(!rel.is_excluded(0, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRelation {
    n: usize,
    excluded: Vec<bool>,
}

impl ExclusionRelation {
    /// Builds the relation for `participants`.
    ///
    /// Constraint keys are matched after [`normalize_key`]. Pairs naming a
    /// key outside the set are inert and skipped.
    pub fn build(participants: &ParticipantSet, prior: &[Pair], forbidden: &[ForbiddenPair]) -> Self {
        let mut rel = Self::from_fn(participants.len(), |_, _| false);

        // Constraint fields are public and may hold unnormalized keys.
        let resolve = |giver: &str, receiver: &str| {
            Some((
                participants.index_of(&normalize_key(giver))?,
                participants.index_of(&normalize_key(receiver))?,
            ))
        };

        for pair in prior {
            match resolve(&pair.giver, &pair.receiver) {
                Some((g, r)) => rel.exclude(g, r),
                None => debug!(giver = %pair.giver, receiver = %pair.receiver, "ignoring prior pair outside participant set"),
            }
        }

        for pair in forbidden {
            match resolve(&pair.giver, &pair.receiver) {
                Some((g, r)) => {
                    rel.exclude(g, r);
                    if pair.symmetric {
                        rel.exclude(r, g);
                    }
                }
                None => debug!(giver = %pair.giver, receiver = %pair.receiver, "ignoring forbidden pair outside participant set"),
            }
        }

        rel
    }

    /// Builds a relation over `n` indices from a predicate.
    ///
    /// Self-assignment is always excluded, whatever `excluded` returns.
    pub fn from_fn(n: usize, mut excluded: impl FnMut(usize, usize) -> bool) -> Self {
        let mut table = vec![false; n * n];
        for g in 0..n {
            for r in 0..n {
                table[g * n + r] = g == r || excluded(g, r);
            }
        }
        Self { n, excluded: table }
    }

    fn exclude(&mut self, giver: usize, receiver: usize) {
        self.excluded[giver * self.n + receiver] = true;
    }

    /// Number of participants covered.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Whether `giver` may not give to `receiver`.
    pub fn is_excluded(&self, giver: usize, receiver: usize) -> bool {
        self.excluded[giver * self.n + receiver]
    }

    /// Receivers `giver` may be assigned, in index order.
    pub fn allowed_receivers(&self, giver: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |&r| !self.is_excluded(giver, r))
    }

    /// Validity predicate: `receivers[g]` is an admissible receiver for every giver.
    ///
    /// `receivers` is assumed to be a permutation of `0..n`.
    pub fn admits(&self, receivers: &[usize]) -> bool {
        receivers.len() == self.n
            && receivers
                .iter()
                .enumerate()
                .all(|(g, &r)| !self.is_excluded(g, r))
    }

    /// Whether some giver has no admissible receiver, or some receiver no
    /// admissible giver. Either makes a perfect matching impossible.
    pub fn has_isolated(&self) -> bool {
        let giver_stuck = (0..self.n).any(|g| self.allowed_receivers(g).next().is_none());
        let receiver_stuck =
            (0..self.n).any(|r| (0..self.n).all(|g| self.is_excluded(g, r)));
        giver_stuck || receiver_stuck
    }
}
