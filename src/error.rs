//! Error types.
//!
//! Each layer has its own enum so callers can tell malformed input apart
//! from transport trouble. Infeasible constraints are not an error: the
//! engine reports them as [`AssignOutcome::NoSolution`].
//!
//! [`AssignOutcome::NoSolution`]: crate::assign::AssignOutcome::NoSolution

/// Precondition failures detected before the engine starts searching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// Fewer than two participants: no derangement exists.
    #[error("need at least 2 participants, got {count}")]
    TooFewParticipants { count: usize },

    /// Two participants share the same identity key.
    #[error("duplicate participant key: {key}")]
    DuplicateParticipant { key: String },

    /// A participant key is empty once trimmed; `index` is its position.
    #[error("participant {index} has an empty key")]
    EmptyKey { index: usize },
}

/// An assignment names a key the participant set does not contain.
///
/// Only happens when an assignment is paired with a different participant
/// set than the one it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown participant: {key}")]
pub struct UnknownParticipant {
    pub key: String,
}

/// Errors raised while reading or writing tabular data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one of the required columns.
    #[error("CSV must have headers: {expected}")]
    MissingHeaders { expected: &'static str },

    /// A participant key appears twice; `line` is the 1-based source line.
    #[error("duplicate email in participants: {key} (line {line})")]
    DuplicateParticipant { key: String, line: u64 },

    #[error(transparent)]
    Participants(#[from] AssignError),

    #[error(transparent)]
    UnknownParticipant(#[from] UnknownParticipant),
}

/// Errors raised while composing or sending notifications.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid email address: {address:?}")]
    InvalidAddress { address: String },

    #[error(transparent)]
    UnknownParticipant(#[from] UnknownParticipant),

    #[error("failed to deliver to {recipient}: {reason}")]
    Transport { recipient: String, reason: String },

    /// The mail relay could not be reached or refused the login.
    #[error("mail relay {host} unavailable: {reason}")]
    Relay { host: String, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
