//! Assignment execution: randomized fast path, then exact matching.
//!
//! # Algorithm
//!
//! 1. Reject malformed input (fewer than two participants)
//! 2. Build the exclusion relation; stop early if some participant has no
//!    admissible partner at all
//! 3. Shuffle receivers (Fisher–Yates) up to the configured budget,
//!    accepting the first permutation the relation admits
//! 4. Otherwise run maximum bipartite matching; a perfect matching is the
//!    assignment, anything less proves infeasibility

use super::config::AssignConfig;
use super::exclusion::ExclusionRelation;
use super::matching::perfect_matching;
use super::types::{Assignment, ForbiddenPair, Pair, ParticipantSet};
use crate::error::AssignError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// What the engine found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A valid assignment.
    Assigned(Assignment),
    /// The constraints admit no valid assignment for this group.
    NoSolution,
}

impl AssignOutcome {
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            AssignOutcome::Assigned(a) => Some(a),
            AssignOutcome::NoSolution => None,
        }
    }

    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            AssignOutcome::Assigned(a) => Some(a),
            AssignOutcome::NoSolution => None,
        }
    }
}

/// Result of an assignment run.
#[derive(Debug, Clone)]
pub struct AssignResult {
    /// The assignment, or proof that none exists.
    pub outcome: AssignOutcome,

    /// Number of shuffles tried in the randomized phase.
    pub attempts: usize,

    /// Whether the matching fallback ran.
    pub used_fallback: bool,
}

impl AssignResult {
    /// Whether a valid assignment was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.outcome, AssignOutcome::Assigned(_))
    }
}

/// Executes the assignment engine.
pub struct AssignRunner;

impl AssignRunner {
    /// Assigns every participant a receiver.
    ///
    /// Returns [`AssignOutcome::NoSolution`] when the constraints cannot be
    /// met; that is a normal outcome, not an error. Errors are reserved for
    /// malformed input.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_santa::assign::{AssignConfig, AssignRunner, ForbiddenPair, Participant, ParticipantSet};
    ///
    /// let set = ParticipantSet::new(vec![
    ///     Participant::new("alice@example.com", "Alice"),
    ///     Participant::new("bob@example.com", "Bob"),
    ///     Participant::new("carol@example.com", "Carol"),
    /// ])
    /// .unwrap();
    /// let forbidden = [ForbiddenPair::one_way("alice@example.com", "bob@example.com")];
    ///
    /// let result = AssignRunner::run(&set, &[], &forbidden, &AssignConfig::default().with_seed(1)).unwrap();
    /// let assignment = result.outcome.assignment().unwrap();
    /// assert_eq!(assignment.receiver_of("alice@example.com"), Some("carol@example.com"));
    /// ```
    pub fn run(
        participants: &ParticipantSet,
        prior: &[Pair],
        forbidden: &[ForbiddenPair],
        config: &AssignConfig,
    ) -> Result<AssignResult, AssignError> {
        let n = participants.len();
        if n < 2 {
            return Err(AssignError::TooFewParticipants { count: n });
        }

        let rel = ExclusionRelation::build(participants, prior, forbidden);

        if rel.has_isolated() {
            info!(participants = n, "no solution: a participant has no admissible partner");
            return Ok(AssignResult {
                outcome: AssignOutcome::NoSolution,
                attempts: 0,
                used_fallback: false,
            });
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let max_attempts = config.max_attempts(n);
        let mut receivers: Vec<usize> = (0..n).collect();
        let mut attempts = 0usize;

        while attempts < max_attempts {
            receivers.shuffle(&mut rng);
            attempts += 1;

            if rel.admits(&receivers) {
                debug!(attempts, participants = n, "shuffle accepted");
                info!(participants = n, "assignment found");
                return Ok(AssignResult {
                    outcome: AssignOutcome::Assigned(Assignment::from_permutation(
                        participants,
                        &receivers,
                    )),
                    attempts,
                    used_fallback: false,
                });
            }
        }

        warn!(
            attempts,
            participants = n,
            "randomized phase exhausted, falling back to bipartite matching"
        );

        let outcome = match perfect_matching(&rel) {
            Some(perm) => {
                info!(participants = n, "assignment found by matching");
                AssignOutcome::Assigned(Assignment::from_permutation(participants, &perm))
            }
            None => {
                info!(participants = n, "no solution: no perfect matching exists");
                AssignOutcome::NoSolution
            }
        };

        Ok(AssignResult {
            outcome,
            attempts,
            used_fallback: true,
        })
    }
}

/// Runs the engine with the default attempt budget and an optional seed.
pub fn assign(
    participants: &ParticipantSet,
    prior: &[Pair],
    forbidden: &[ForbiddenPair],
    seed: Option<u64>,
) -> Result<AssignOutcome, AssignError> {
    let config = AssignConfig {
        seed,
        ..AssignConfig::default()
    };
    AssignRunner::run(participants, prior, forbidden, &config).map(|r| r.outcome)
}
