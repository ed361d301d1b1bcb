//! Existence search for an assignment of pattern items to tree nodes.
//!
//! Each frame is an immutable snapshot of the reduced problem. A frame picks
//! the open item with the fewest candidate edges and pushes one child frame
//! per candidate, so every assignment is reachable and the first complete one
//! is returned.

use hashbrown::HashSet;
use itertools::Itertools;
use tracing::trace;

use crate::utils::unwrap_or;

/// An edge `(node, item)` says that pattern item `item` accepts node `node`
pub type Edge = (usize, usize);

/// The constraints of one assignment problem
pub struct Problem<'a> {
  /// For each node, the set of nodes that become unavailable and covered once
  /// it is claimed. Always includes the node itself.
  pub claims: &'a [HashSet<usize>],
  /// Number of pattern items, each of which must be assigned
  pub items: usize,
  /// Nodes that must be covered by some claim
  pub required: HashSet<usize>,
  /// Candidate edges
  pub edges: Vec<Edge>,
}

#[derive(Clone, Debug)]
struct Frame {
  open: Vec<usize>,
  required: HashSet<usize>,
  edges: Vec<Edge>,
  assigned: Vec<Edge>,
}
impl Frame {
  /// Every open item still has a candidate and every required node can still
  /// be covered
  fn viable(&self, claims: &[HashSet<usize>]) -> bool {
    let open_ok = self.open.iter().all(|j| self.edges.iter().any(|e| e.1 == *j));
    let required_ok = (self.required.iter())
      .all(|r| self.edges.iter().any(|(i, _)| claims[*i].contains(r)));
    open_ok && required_ok
  }

  fn claim(&self, (i, j): Edge, claims: &[HashSet<usize>]) -> Self {
    let claim = &claims[i];
    Self {
      open: self.open.iter().copied().filter(|o| *o != j).collect(),
      required: self.required.difference(claim).copied().collect(),
      edges: (self.edges.iter().copied())
        .filter(|(ei, ej)| *ej != j && !claim.contains(ei))
        .collect(),
      assigned: self.assigned.iter().copied().chain([(i, j)]).collect(),
    }
  }
}

impl<'a> Problem<'a> {
  /// Find an assignment that gives every item a distinct node, never
  /// claims the same node twice, and covers every required node. The
  /// witness is returned as `(node, item)` pairs in the order they were
  /// chosen.
  #[must_use]
  pub fn solve(self) -> Option<Vec<Edge>> {
    let Problem { claims, items, required, edges } = self;
    let root = Frame { open: (0..items).collect(), required, edges, assigned: Vec::new() };
    let mut stack = vec![root];
    let mut visited = 0usize;
    while let Some(frame) = stack.pop() {
      visited += 1;
      if frame.open.is_empty() {
        if frame.required.is_empty() {
          trace!(visited, "assignment found");
          return Some(frame.assigned);
        }
        continue;
      }
      if !frame.viable(claims) {
        continue;
      }
      let item = (frame.open.iter().copied())
        .min_by_key(|j| (frame.edges.iter().filter(|e| e.1 == *j).count(), *j));
      let item = unwrap_or!(item; continue);
      let candidates = frame.edges.iter().copied().filter(|e| e.1 == item).collect_vec();
      // reversed so that the first candidate is popped first
      stack.extend(candidates.into_iter().rev().map(|e| frame.claim(e, claims)));
    }
    trace!(visited, "no assignment");
    None
  }
}

#[cfg(test)]
mod test {
  use hashbrown::HashSet;

  use super::{Edge, Problem};

  fn singletons(n: usize) -> Vec<HashSet<usize>> { (0..n).map(|i| HashSet::from([i])).collect() }

  fn solve(claims: &[HashSet<usize>], items: usize, required: &[usize], edges: &[Edge]) -> Option<Vec<Edge>> {
    let required = required.iter().copied().collect();
    Problem { claims, items, required, edges: edges.to_vec() }.solve()
  }

  #[test]
  fn perfect_matching() {
    let claims = singletons(3);
    let edges = [(0, 0), (0, 1), (1, 0), (2, 2)];
    let mut found = solve(&claims, 3, &[0, 1, 2], &edges).unwrap();
    found.sort();
    assert_eq!(found, vec![(0, 1), (1, 0), (2, 2)]);
  }

  #[test]
  fn item_without_candidate() {
    let claims = singletons(2);
    assert_eq!(solve(&claims, 2, &[], &[(0, 0), (1, 0)]), None);
  }

  #[test]
  fn uncovered_required() {
    let claims = singletons(3);
    assert_eq!(solve(&claims, 2, &[0, 1, 2], &[(0, 0), (1, 1), (2, 1)]), None);
    assert!(solve(&claims, 2, &[0, 1], &[(0, 0), (1, 1), (2, 1)]).is_some());
  }

  #[test]
  fn optional_node_must_be_skipped() {
    // greedy pick of the optional node 0 for item 0 would strand node 1
    let claims = singletons(3);
    let edges = [(0, 0), (1, 0), (2, 1)];
    let found = solve(&claims, 2, &[1, 2], &edges).unwrap();
    assert!(found.contains(&(1, 0)));
  }

  #[test]
  fn claims_remove_lineage() {
    // 0 is the parent of 1, both accept either item
    let claims = vec![HashSet::from([0, 1]), HashSet::from([0, 1]), HashSet::from([2])];
    assert_eq!(solve(&claims, 2, &[], &[(0, 0), (0, 1), (1, 0), (1, 1)]), None);
    assert!(solve(&claims, 2, &[0, 1, 2], &[(1, 0), (2, 1)]).is_some());
  }
}
