//! CSV input loading and assignment persistence.
//!
//! # Formats
//!
//! | File | Headers |
//! |------|---------|
//! | Participants | `name,email` |
//! | Last matches / forbidden pairs | `giver_email,receiver_email` |
//! | Full match export | `giver_name,giver_email,receiver_name,receiver_email` |
//!
//! Header names are matched after trimming and lower-casing; extra columns
//! are ignored. Emails are normalized with
//! [`normalize_key`](crate::assign::normalize_key).
//!
//! A file written by [`write_pairs`] and read back with [`read_pairs`]
//! yields exactly the pairs of the original assignment, so this year's
//! result can serve as next year's prior assignments.

mod load;
mod persist;

pub use load::{read_forbidden_pairs, read_pairs, read_participants};
pub use persist::{escape_formula, write_matches, write_pairs};

/// Example participants file.
pub const SAMPLE_PARTICIPANTS: &str = "name,email
Alice,alice@example.com
Bob,bob@example.com
Carol,carol@example.com
Dave,dave@example.com
";

/// Example last-matches file.
pub const SAMPLE_LAST_MATCHES: &str = "giver_email,receiver_email
alice@example.com,bob@example.com
bob@example.com,carol@example.com
carol@example.com,dave@example.com
dave@example.com,alice@example.com
";

/// Example forbidden-pairs file.
pub const SAMPLE_FORBIDDEN: &str = "giver_email,receiver_email
alice@example.com,carol@example.com
bob@example.com,alice@example.com
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::{AssignConfig, AssignOutcome, AssignRunner};

    #[test]
    fn test_samples_solvable_one_constraint_file_at_a_time() {
        let participants = read_participants(SAMPLE_PARTICIPANTS.as_bytes()).unwrap();
        let prior = read_pairs(SAMPLE_LAST_MATCHES.as_bytes()).unwrap();
        let forbidden = read_forbidden_pairs(SAMPLE_FORBIDDEN.as_bytes(), true).unwrap();
        let config = AssignConfig::default().with_seed(11);

        let with_prior = AssignRunner::run(&participants, &prior, &[], &config).unwrap();
        assert!(with_prior
            .outcome
            .assignment()
            .unwrap()
            .satisfies(&participants, &prior, &[]));

        let with_forbidden = AssignRunner::run(&participants, &[], &forbidden, &config).unwrap();
        assert!(with_forbidden
            .outcome
            .assignment()
            .unwrap()
            .satisfies(&participants, &[], &forbidden));
    }

    #[test]
    fn test_samples_combined_are_infeasible() {
        // Alice and Bob are both left with Dave as their only option.
        let participants = read_participants(SAMPLE_PARTICIPANTS.as_bytes()).unwrap();
        let prior = read_pairs(SAMPLE_LAST_MATCHES.as_bytes()).unwrap();
        let config = AssignConfig::default().with_seed(11);

        for symmetric in [true, false] {
            let forbidden = read_forbidden_pairs(SAMPLE_FORBIDDEN.as_bytes(), symmetric).unwrap();
            let result = AssignRunner::run(&participants, &prior, &forbidden, &config).unwrap();
            assert_eq!(result.outcome, AssignOutcome::NoSolution);
        }
    }
}
