//! Constrained assignment engine.
//!
//! Produces a derangement of a participant set (every participant gives to
//! exactly one other participant) that avoids every excluded pair:
//!
//! - **Self**: nobody gives to themselves.
//! - **Prior**: no giver repeats last run's receiver.
//! - **Forbidden**: explicit giver→receiver bans, optionally symmetric.
//!
//! # Algorithm
//!
//! A randomized fast path shuffles receivers and checks each permutation
//! against the [`ExclusionRelation`] in O(n). When the attempt budget from
//! [`AssignConfig`] runs out, a maximum bipartite matching over the
//! admissible edges decides feasibility exactly, so [`AssignOutcome::NoSolution`]
//! is only reported when no valid assignment exists.
//!
//! # References
//!
//! - Kuhn, H. W. (1955), "The Hungarian Method for the Assignment Problem"
//! - Durstenfeld, R. (1964), "Algorithm 235: Random permutation"

mod config;
mod exclusion;
mod matching;
mod runner;
mod types;

pub use config::{AssignConfig, DEFAULT_ATTEMPTS_PER_PARTICIPANT, DEFAULT_BASE_ATTEMPTS};
pub use exclusion::ExclusionRelation;
pub use matching::{max_matching, perfect_matching};
pub use runner::{assign, AssignOutcome, AssignResult, AssignRunner};
pub use types::{normalize_key, Assignment, ForbiddenPair, Pair, Participant, ParticipantSet};
