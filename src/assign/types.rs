//! Participants, constraint pairs, and the produced assignment.

use crate::error::AssignError;
use std::collections::{HashMap, HashSet};

/// Canonical form of an identity key: trimmed and lower-cased.
///
/// Keys are email addresses in practice, which compare case-insensitively.
/// The constructors in this module apply it, so keys built through them
/// always line up.
///
/// ```
/// assert_eq!(u_santa::assign::normalize_key("  Alice@Example.COM "), "alice@example.com");
/// ```
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// A group member.
///
/// `key` identifies the participant (typically an email address) and must
/// be unique within a [`ParticipantSet`]. `name` is for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub key: String,
    pub name: String,
}

impl Participant {
    pub fn new(key: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            key: normalize_key(key.as_ref()),
            name: name.into(),
        }
    }
}

/// An ordered set of participants with pairwise distinct keys.
///
/// The order is preserved and becomes the giver order of every
/// [`Assignment`] produced from this set.
///
/// # Examples
///
/// ```
/// use u_santa::assign::{Participant, ParticipantSet};
///
/// let set = ParticipantSet::new(vec![
///     Participant::new("alice@example.com", "Alice"),
///     Participant::new("bob@example.com", "Bob"),
/// ])
/// .unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.index_of("bob@example.com"), Some(1));
///
/// let dup = ParticipantSet::new(vec![
///     Participant::new("alice@example.com", "Alice"),
///     Participant::new("alice@example.com", "Alice again"),
/// ]);
/// assert!(dup.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Participant>", into = "Vec<Participant>")
)]
pub struct ParticipantSet {
    members: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl ParticipantSet {
    /// Builds a set, normalizing keys and rejecting empty or duplicate ones.
    pub fn new(mut members: Vec<Participant>) -> Result<Self, AssignError> {
        let mut index = HashMap::with_capacity(members.len());
        for (i, p) in members.iter_mut().enumerate() {
            p.key = normalize_key(&p.key);
            if p.key.is_empty() {
                return Err(AssignError::EmptyKey { index: i });
            }
            if index.insert(p.key.clone(), i).is_some() {
                return Err(AssignError::DuplicateParticipant { key: p.key.clone() });
            }
        }
        Ok(Self { members, index })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of the participant with `key`, if present.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn get(&self, key: &str) -> Option<&Participant> {
        self.index_of(key).map(|i| &self.members[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.members.iter()
    }
}

impl TryFrom<Vec<Participant>> for ParticipantSet {
    type Error = AssignError;

    fn try_from(members: Vec<Participant>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}

impl From<ParticipantSet> for Vec<Participant> {
    fn from(set: ParticipantSet) -> Self {
        set.members
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// A giver→receiver pair, identified by participant keys.
///
/// Used both for prior assignments (negative constraints) and for the
/// rows of a produced [`Assignment`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    pub giver: String,
    pub receiver: String,
}

impl Pair {
    pub fn new(giver: impl AsRef<str>, receiver: impl AsRef<str>) -> Self {
        Self {
            giver: normalize_key(giver.as_ref()),
            receiver: normalize_key(receiver.as_ref()),
        }
    }
}

/// A giver→receiver pair that must never be assigned.
///
/// When `symmetric` is set, `receiver → giver` is forbidden too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForbiddenPair {
    pub giver: String,
    pub receiver: String,
    pub symmetric: bool,
}

impl ForbiddenPair {
    /// Forbids `giver → receiver` only.
    pub fn one_way(giver: impl AsRef<str>, receiver: impl AsRef<str>) -> Self {
        Self::new(giver, receiver, false)
    }

    /// Forbids both `giver → receiver` and `receiver → giver`.
    pub fn both_ways(giver: impl AsRef<str>, receiver: impl AsRef<str>) -> Self {
        Self::new(giver, receiver, true)
    }

    pub fn new(giver: impl AsRef<str>, receiver: impl AsRef<str>, symmetric: bool) -> Self {
        Self {
            giver: normalize_key(giver.as_ref()),
            receiver: normalize_key(receiver.as_ref()),
            symmetric,
        }
    }

    /// Whether this ban applies to `giver → receiver`.
    pub fn forbids(&self, giver: &str, receiver: &str) -> bool {
        (self.giver == giver && self.receiver == receiver)
            || (self.symmetric && self.giver == receiver && self.receiver == giver)
    }
}

/// A complete giver→receiver mapping over a participant set.
///
/// Every participant appears exactly once as giver and once as receiver,
/// and nobody receives from themselves. Pairs are kept in the giver order
/// of the participant set the assignment was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    pairs: Vec<Pair>,
}

impl Assignment {
    /// Builds an assignment from `receivers[giver_index] = receiver_index`.
    pub(crate) fn from_permutation(participants: &ParticipantSet, receivers: &[usize]) -> Self {
        let members = participants.as_slice();
        let pairs = receivers
            .iter()
            .enumerate()
            .map(|(g, &r)| Pair {
                giver: members[g].key.clone(),
                receiver: members[r].key.clone(),
            })
            .collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The receiver assigned to `giver`, if `giver` is part of the assignment.
    pub fn receiver_of(&self, giver: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.giver == giver)
            .map(|p| p.receiver.as_str())
    }

    /// Checks every assignment invariant against the given inputs.
    ///
    /// Verifies that the mapping is a bijection over `participants`, has no
    /// fixed point, repeats no `prior` pair that lies inside the set, and
    /// avoids every `forbidden` pair (in both directions when symmetric).
    /// Constraint keys are compared after [`normalize_key`].
    pub fn satisfies(
        &self,
        participants: &ParticipantSet,
        prior: &[Pair],
        forbidden: &[ForbiddenPair],
    ) -> bool {
        if self.pairs.len() != participants.len() {
            return false;
        }

        let mut givers = HashSet::with_capacity(self.pairs.len());
        let mut receivers = HashSet::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            if !participants.contains(&pair.giver) || !participants.contains(&pair.receiver) {
                return false;
            }
            if pair.giver == pair.receiver {
                return false;
            }
            if !givers.insert(pair.giver.as_str()) || !receivers.insert(pair.receiver.as_str()) {
                return false;
            }
        }

        // Constraint fields are public and may hold unnormalized keys.
        let prior: HashSet<Pair> = prior
            .iter()
            .map(|p| Pair::new(&p.giver, &p.receiver))
            .collect();
        let forbidden: Vec<ForbiddenPair> = forbidden
            .iter()
            .map(|f| ForbiddenPair::new(&f.giver, &f.receiver, f.symmetric))
            .collect();

        let repeats_prior = self.pairs.iter().any(|a| prior.contains(a));
        let hits_forbidden = self
            .pairs
            .iter()
            .any(|a| forbidden.iter().any(|f| f.forbids(&a.giver, &a.receiver)));

        !repeats_prior && !hits_forbidden
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> ParticipantSet {
        ParticipantSet::new(vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("c", "C"),
            Participant::new("d", "D"),
        ])
        .unwrap()
    }

    #[test]
    fn test_participant_set_rejects_duplicates() {
        let err = ParticipantSet::new(vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("a", "A2"),
        ])
        .unwrap_err();
        assert_eq!(err, AssignError::DuplicateParticipant { key: "a".into() });
    }

    #[test]
    fn test_keys_are_normalized() {
        let set = ParticipantSet::new(vec![
            Participant::new(" Alice@Example.com", "Alice"),
            Participant {
                key: "BOB@example.com".into(),
                name: "Bob".into(),
            },
        ])
        .unwrap();
        assert!(set.contains("alice@example.com"));
        assert!(set.contains("bob@example.com"));
        assert_eq!(Pair::new("A@x.io ", "B@X.io"), Pair::new("a@x.io", "b@x.io"));

        let clash = ParticipantSet::new(vec![
            Participant::new("a@x.io", "A"),
            Participant {
                key: "A@X.IO".into(),
                name: "A again".into(),
            },
        ]);
        assert!(clash.is_err());
    }

    #[test]
    fn test_participant_set_rejects_empty_keys() {
        let err = ParticipantSet::new(vec![
            Participant::new("b@x.io", "B"),
            Participant::new("", "Nobody"),
        ])
        .unwrap_err();
        assert_eq!(err, AssignError::EmptyKey { index: 1 });

        let err = ParticipantSet::new(vec![Participant {
            key: "   ".into(),
            name: "Blank".into(),
        }])
        .unwrap_err();
        assert_eq!(err, AssignError::EmptyKey { index: 0 });
    }

    #[test]
    fn test_satisfies_normalizes_constraint_keys() {
        let set = abcd();
        let a = Assignment::from_permutation(&set, &[1, 2, 3, 0]);
        let prior = [Pair {
            giver: " A".into(),
            receiver: "B".into(),
        }];
        let forbidden = [ForbiddenPair {
            giver: "D ".into(),
            receiver: "C".into(),
            symmetric: true,
        }];
        assert!(!a.satisfies(&set, &prior, &[]));
        assert!(!a.satisfies(&set, &[], &forbidden));
    }

    #[test]
    fn test_participant_set_lookup() {
        let set = abcd();
        assert_eq!(set.len(), 4);
        assert_eq!(set.index_of("c"), Some(2));
        assert_eq!(set.get("d").map(|p| p.name.as_str()), Some("D"));
        assert!(!set.contains("z"));
    }

    #[test]
    fn test_forbidden_pair_directions() {
        let one = ForbiddenPair::one_way("a", "b");
        assert!(one.forbids("a", "b"));
        assert!(!one.forbids("b", "a"));

        let both = ForbiddenPair::both_ways("a", "b");
        assert!(both.forbids("a", "b"));
        assert!(both.forbids("b", "a"));
        assert!(!both.forbids("a", "c"));
    }

    #[test]
    fn test_assignment_from_permutation() {
        let set = abcd();
        let a = Assignment::from_permutation(&set, &[1, 2, 3, 0]);
        assert_eq!(a.len(), 4);
        assert_eq!(a.receiver_of("a"), Some("b"));
        assert_eq!(a.receiver_of("d"), Some("a"));
        assert_eq!(a.receiver_of("z"), None);
        assert_eq!(a.pairs()[2], Pair::new("c", "d"));
    }

    #[test]
    fn test_satisfies_accepts_valid_cycle() {
        let set = abcd();
        let a = Assignment::from_permutation(&set, &[1, 2, 3, 0]);
        assert!(a.satisfies(&set, &[], &[]));
        assert!(a.satisfies(&set, &[Pair::new("a", "c")], &[ForbiddenPair::one_way("b", "a")]));
    }

    #[test]
    fn test_satisfies_rejects_violations() {
        let set = abcd();
        let a = Assignment::from_permutation(&set, &[1, 2, 3, 0]);
        assert!(!a.satisfies(&set, &[Pair::new("a", "b")], &[]));
        assert!(!a.satisfies(&set, &[], &[ForbiddenPair::one_way("c", "d")]));
        // symmetric ban on d->c also blocks c->d
        assert!(!a.satisfies(&set, &[], &[ForbiddenPair::both_ways("d", "c")]));

        let fixed_point = Assignment::from_permutation(&set, &[0, 2, 3, 1]);
        assert!(!fixed_point.satisfies(&set, &[], &[]));

        let not_bijective = Assignment::from_permutation(&set, &[1, 0, 0, 1]);
        assert!(!not_bijective.satisfies(&set, &[], &[]));
    }
}
