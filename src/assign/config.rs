//! Engine configuration.

/// Shuffle attempts granted regardless of group size.
pub const DEFAULT_BASE_ATTEMPTS: usize = 1_000;

/// Additional shuffle attempts granted per participant.
pub const DEFAULT_ATTEMPTS_PER_PARTICIPANT: usize = 100;

/// Configuration for [`AssignRunner`](super::AssignRunner).
///
/// The randomized phase is capped at
/// `base_attempts + attempts_per_participant * n` shuffles before the
/// matching fallback takes over. Setting both to zero skips straight to
/// the fallback.
///
/// Every value is valid, so there is no `validate` step: the budget only
/// trades shuffle time for fallback time, and the fallback alone decides
/// feasibility.
///
/// # Examples
///
/// ```
/// use u_santa::assign::AssignConfig;
///
/// let config = AssignConfig::default()
///     .with_base_attempts(500)
///     .with_attempts_per_participant(10)
///     .with_seed(7);
/// assert_eq!(config.max_attempts(4), 540);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct AssignConfig {
    /// Shuffle attempts granted regardless of group size.
    pub base_attempts: usize,

    /// Additional shuffle attempts per participant.
    pub attempts_per_participant: usize,

    /// Random seed for reproducibility. `None` draws fresh entropy per run.
    pub seed: Option<u64>,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            base_attempts: DEFAULT_BASE_ATTEMPTS,
            attempts_per_participant: DEFAULT_ATTEMPTS_PER_PARTICIPANT,
            seed: None,
        }
    }
}

impl AssignConfig {
    pub fn with_base_attempts(mut self, n: usize) -> Self {
        self.base_attempts = n;
        self
    }

    pub fn with_attempts_per_participant(mut self, n: usize) -> Self {
        self.attempts_per_participant = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Shuffle budget for a group of `n` participants.
    pub fn max_attempts(&self, n: usize) -> usize {
        self.base_attempts
            .saturating_add(self.attempts_per_participant.saturating_mul(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssignConfig::default();
        assert_eq!(config.base_attempts, DEFAULT_BASE_ATTEMPTS);
        assert_eq!(config.attempts_per_participant, DEFAULT_ATTEMPTS_PER_PARTICIPANT);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_max_attempts_scales_with_size() {
        let config = AssignConfig::default();
        assert_eq!(config.max_attempts(0), 1_000);
        assert_eq!(config.max_attempts(10), 2_000);
    }

    #[test]
    fn test_extreme_budgets_still_decide_feasibility() {
        use crate::assign::{AssignRunner, ForbiddenPair, Participant, ParticipantSet};

        let set = ParticipantSet::new(vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("c", "C"),
        ])
        .unwrap();
        let forbidden = [ForbiddenPair::one_way("a", "b")];

        for config in [
            AssignConfig::default().with_base_attempts(0).with_attempts_per_participant(0),
            AssignConfig::default().with_base_attempts(1).with_attempts_per_participant(0),
            AssignConfig::default(),
        ] {
            let result = AssignRunner::run(&set, &[], &forbidden, &config.with_seed(3)).unwrap();
            assert!(result.is_solution_found());
        }
    }

    #[test]
    fn test_max_attempts_saturates() {
        let config = AssignConfig::default()
            .with_base_attempts(usize::MAX)
            .with_attempts_per_participant(usize::MAX);
        assert_eq!(config.max_attempts(3), usize::MAX);
    }
}
