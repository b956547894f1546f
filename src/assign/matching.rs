//! Maximum bipartite matching between givers and receivers.
//!
//! # Algorithm
//!
//! Kuhn's augmenting-path method: each giver in turn searches for an
//! alternating path ending at a free receiver, re-routing previously
//! matched givers along the way. Runs in O(n · E) ≤ O(n³).
//!
//! Exploration order is fixed (givers and receivers by index), so the
//! result depends only on the relation.
//!
//! # Reference
//!
//! Kuhn, H. W. (1955), "The Hungarian Method for the Assignment Problem",
//! *Naval Research Logistics Quarterly* 2, 83-97.

use super::exclusion::ExclusionRelation;

/// Computes a maximum matching over the admissible edges of `rel`.
///
/// Returns `receivers[g] = Some(r)` for every matched giver.
pub fn max_matching(rel: &ExclusionRelation) -> Vec<Option<usize>> {
    let n = rel.len();
    // giver currently holding each receiver
    let mut holder: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];

    for g in 0..n {
        visited.iter_mut().for_each(|v| *v = false);
        augment(rel, g, &mut visited, &mut holder);
    }

    let mut receivers = vec![None; n];
    for (r, g) in holder.iter().enumerate() {
        if let Some(g) = *g {
            receivers[g] = Some(r);
        }
    }
    receivers
}

/// Returns a complete receiver permutation if one exists.
///
/// # Examples
///
/// ```
/// use u_santa::assign::{perfect_matching, ExclusionRelation};
///
/// // 0 may only give to 1, 1 only to 2, 2 only to 0.
/// let rel = ExclusionRelation::from_fn(3, |g, r| r != (g + 1) % 3);
/// assert_eq!(perfect_matching(&rel), Some(vec![1, 2, 0]));
///
/// // Two people who may not give to each other.
/// let rel = ExclusionRelation::from_fn(2, |_, _| true);
/// assert_eq!(perfect_matching(&rel), None);
/// ```
pub fn perfect_matching(rel: &ExclusionRelation) -> Option<Vec<usize>> {
    max_matching(rel).into_iter().collect()
}

fn augment(
    rel: &ExclusionRelation,
    giver: usize,
    visited: &mut [bool],
    holder: &mut [Option<usize>],
) -> bool {
    for r in rel.allowed_receivers(giver) {
        if visited[r] {
            continue;
        }
        visited[r] = true;

        let free = match holder[r] {
            None => true,
            Some(other) => augment(rel, other, visited, holder),
        };
        if free {
            holder[r] = Some(giver);
            return true;
        }
    }
    false
}
