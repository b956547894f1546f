//! Constrained Secret Santa assignment.
//!
//! Gives every member of a group exactly one other member to buy a gift
//! for, honouring three kinds of exclusion:
//!
//! - **Self**: nobody draws themselves.
//! - **Prior**: nobody repeats last year's receiver.
//! - **Forbidden**: explicit giver→receiver bans, optionally symmetric.
//!
//! # Modules
//!
//! - [`assign`]: the engine. Randomized shuffles for speed, exact bipartite
//!   matching for a definitive answer when shuffling fails.
//! - [`io`]: CSV loading of participants and constraints, persistence of
//!   results for reuse as next year's prior assignments.
//! - [`preview`]: side-effect-free rendering of an assignment.
//! - [`notify`]: per-giver messages over a pluggable transport.
//!
//! # Architecture
//!
//! The engine is a pure function of its inputs (plus an optional seed) and
//! knows nothing about files, templates or transports. Loading, preview and
//! notification sit around it and only exchange plain data with it.
//!
//! ```
//! use u_santa::assign::{AssignConfig, AssignRunner};
//! use u_santa::io::{read_participants, SAMPLE_PARTICIPANTS};
//!
//! let participants = read_participants(SAMPLE_PARTICIPANTS.as_bytes()).unwrap();
//! let result = AssignRunner::run(&participants, &[], &[], &AssignConfig::default().with_seed(42)).unwrap();
//! assert!(result.is_solution_found());
//! ```

pub mod assign;
pub mod error;
pub mod io;
pub mod notify;
pub mod preview;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{AssignError, DataError, NotifyError, UnknownParticipant};
