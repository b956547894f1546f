//! Property tests for the assignment engine.
//!
//! Feasibility is cross-checked against an exhaustive search over all
//! permutations, written independently of the engine's own matching.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use u_santa::assign::{
    AssignConfig, AssignOutcome, AssignRunner, Assignment, ForbiddenPair, Pair, Participant,
    ParticipantSet,
};
use u_santa::io::{read_pairs, write_pairs};
use u_santa::AssignError;

#[derive(Debug, Clone)]
struct Instance {
    n: usize,
    prior: Vec<(usize, usize)>,
    forbidden: Vec<(usize, usize, bool)>,
}

fn key(i: usize) -> String {
    format!("p{i}@example.com")
}

impl Instance {
    fn participants(&self) -> ParticipantSet {
        ParticipantSet::new((0..self.n).map(|i| Participant::new(key(i), format!("P{i}"))).collect())
            .unwrap()
    }

    fn prior(&self) -> Vec<Pair> {
        self.prior.iter().map(|&(g, r)| Pair::new(key(g), key(r))).collect()
    }

    fn forbidden(&self) -> Vec<ForbiddenPair> {
        self.forbidden
            .iter()
            .map(|&(g, r, sym)| ForbiddenPair::new(key(g), key(r), sym))
            .collect()
    }

    fn banned(&self) -> Vec<Vec<bool>> {
        let mut banned = vec![vec![false; self.n]; self.n];
        for (i, row) in banned.iter_mut().enumerate() {
            row[i] = true;
        }
        for &(g, r) in &self.prior {
            banned[g][r] = true;
        }
        for &(g, r, sym) in &self.forbidden {
            banned[g][r] = true;
            if sym {
                banned[r][g] = true;
            }
        }
        banned
    }

    /// Exhaustive search for any admissible permutation.
    fn feasible(&self) -> bool {
        fn extend(g: usize, used: &mut [bool], banned: &[Vec<bool>]) -> bool {
            if g == banned.len() {
                return true;
            }
            for r in 0..banned.len() {
                if !used[r] && !banned[g][r] {
                    used[r] = true;
                    if extend(g + 1, used, banned) {
                        return true;
                    }
                    used[r] = false;
                }
            }
            false
        }
        extend(0, &mut vec![false; self.n], &self.banned())
    }

    fn run(&self, config: &AssignConfig) -> AssignOutcome {
        AssignRunner::run(&self.participants(), &self.prior(), &self.forbidden(), config)
            .unwrap()
            .outcome
    }
}

fn instance() -> impl Strategy<Value = Instance> {
    (2usize..=7).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..=n),
            prop::collection::vec((0..n, 0..n, any::<bool>()), 0..=2 * n),
        )
            .prop_map(|(n, prior, forbidden)| Instance {
                n,
                prior,
                forbidden,
            })
    })
}

fn config() -> impl Strategy<Value = AssignConfig> {
    (0usize..40, any::<u64>()).prop_map(|(attempts, seed)| {
        AssignConfig::default()
            .with_base_attempts(attempts)
            .with_attempts_per_participant(0)
            .with_seed(seed)
    })
}

/// Checks the invariants directly against index-level bans.
fn valid(inst: &Instance, a: &Assignment) -> bool {
    let banned = inst.banned();
    let index = |k: &str| (0..inst.n).find(|&i| key(i) == k);

    let mut seen_giver = vec![false; inst.n];
    let mut seen_receiver = vec![false; inst.n];
    for pair in a {
        let (Some(g), Some(r)) = (index(&pair.giver), index(&pair.receiver)) else {
            return false;
        };
        if seen_giver[g] || seen_receiver[r] || banned[g][r] {
            return false;
        }
        seen_giver[g] = true;
        seen_receiver[r] = true;
    }
    seen_giver.iter().all(|&s| s) && seen_receiver.iter().all(|&s| s)
}

proptest! {
    #[test]
    fn assignment_respects_every_constraint(inst in instance(), cfg in config()) {
        if let AssignOutcome::Assigned(a) = inst.run(&cfg) {
            prop_assert!(valid(&inst, &a));
            prop_assert!(a.satisfies(&inst.participants(), &inst.prior(), &inst.forbidden()));
        }
    }

    #[test]
    fn no_solution_iff_infeasible(inst in instance(), cfg in config()) {
        let assigned = matches!(inst.run(&cfg), AssignOutcome::Assigned(_));
        prop_assert_eq!(assigned, inst.feasible());
    }

    #[test]
    fn same_seed_same_outcome(inst in instance(), cfg in config()) {
        prop_assert_eq!(inst.run(&cfg), inst.run(&cfg));
    }

    #[test]
    fn unknown_keys_change_nothing(inst in instance(), cfg in config()) {
        let set = inst.participants();
        let mut prior = inst.prior();
        prior.push(Pair::new("ghost@example.com", key(0)));
        let mut forbidden = inst.forbidden();
        forbidden.push(ForbiddenPair::both_ways(key(1), "nobody@example.com"));

        let noisy = AssignRunner::run(&set, &prior, &forbidden, &cfg).unwrap().outcome;
        prop_assert_eq!(noisy, inst.run(&cfg));
    }

    #[test]
    fn adding_constraints_never_restores_feasibility(
        inst in instance(),
        extra in prop::collection::vec((0usize..7, 0usize..7), 1..5),
        cfg in config(),
    ) {
        if inst.run(&cfg) != AssignOutcome::NoSolution {
            return Ok(());
        }

        let mut tighter = inst.clone();
        tighter
            .forbidden
            .extend(extra.into_iter().map(|(g, r)| (g % inst.n, r % inst.n, false)));
        prop_assert_eq!(tighter.run(&cfg), AssignOutcome::NoSolution);
    }

    #[test]
    fn persisted_pairs_reload_identically(
        keys in prop::collection::vec("[ a-zA-Z0-9@.,\"'=+-]{0,6}", 2..10),
        seed in any::<u64>(),
    ) {
        let members = keys
            .iter()
            .enumerate()
            .map(|(i, k)| Participant::new(k, format!("P{i}")))
            .collect();
        let set = match ParticipantSet::new(members) {
            Ok(set) => set,
            Err(AssignError::EmptyKey { index }) => {
                prop_assert!(keys[index].trim().is_empty());
                return Ok(());
            }
            Err(AssignError::DuplicateParticipant { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };

        let cfg = AssignConfig::default().with_seed(seed);
        let a = AssignRunner::run(&set, &[], &[], &cfg).unwrap().outcome.into_assignment().unwrap();

        let mut buf = Vec::new();
        write_pairs(&mut buf, &a).unwrap();
        let reloaded = read_pairs(buf.as_slice()).unwrap();
        prop_assert_eq!(reloaded.as_slice(), a.pairs());
    }
}
