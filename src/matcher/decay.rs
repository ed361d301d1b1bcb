use hashbrown::HashSet;
use itertools::Itertools;
use tracing::trace;

use super::bipartite::Problem;
use super::expand::expand;
use super::{matches, MatchCtx};
use crate::descriptor::Decay;
use crate::particles::PHOTON;

/// Match a decay pattern rooted at `idx` and return the `(tree index, item
/// index)` pairs of a witnessing assignment.
///
/// The direct arrows consider the daughters of `idx`, the long arrows every
/// descendant. In the latter case claiming a particle also rules out its
/// whole lineage within the subtree, and covers it for the purposes of the
/// exclusive check.
#[must_use]
pub fn decay_assignment(ctx: &MatchCtx<'_>, idx: usize, decay: &Decay) -> Option<Vec<(usize, usize)>> {
  let Decay { origin, decays, arrow, inclusive } = decay;
  debug_assert!(!decays.is_empty(), "a decay must list at least one product");
  if !matches(ctx, idx, origin) {
    return None;
  }
  let (nodes, claims) = if arrow.is_long() {
    let exp = expand(ctx.tree, idx);
    (exp.nodes, exp.relatives)
  } else {
    let nodes = ctx.tree.daughters(idx).to_vec();
    let claims = (0..nodes.len()).map(|i| HashSet::from([i])).collect_vec();
    (nodes, claims)
  };
  let (n, m) = (nodes.len(), decays.len());
  let optional = if *inclusive {
    (0..n).collect::<HashSet<_>>()
  } else if arrow.is_radiative() {
    (0..n).filter(|&i| ctx.tree.pdg(nodes[i]) == PHOTON).collect()
  } else {
    HashSet::new()
  };
  let fits = if arrow.is_long() { m <= n } else { n - optional.len() <= m && m <= n };
  if !fits {
    trace!(idx, n, m, optional = optional.len(), "product count rules out {arrow}");
    return None;
  }
  let edges = (0..n)
    .cartesian_product(0..m)
    .filter(|&(i, j)| matches(ctx, nodes[i], &decays[j]))
    .collect_vec();
  let required = (0..n).filter(|i| !optional.contains(i)).collect();
  let witness = Problem { claims: &claims, items: m, required, edges }.solve()?;
  Some(witness.into_iter().map(|(i, j)| (nodes[i], j)).collect())
}
