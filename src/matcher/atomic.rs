use tracing::debug;

use super::MatchCtx;
use crate::descriptor::Atomic;

/// Identity test of a single particle against a name or wildcard
#[must_use]
pub fn atomic_match(ctx: &MatchCtx<'_>, idx: usize, atom: &Atomic) -> bool {
  let charge = ctx.tree.charge(idx);
  match atom {
    Atomic::Any => true,
    Atomic::Neutral => charge == 0.0,
    Atomic::Positive => charge > 0.0,
    Atomic::Negative => charge < 0.0,
    Atomic::Particle(name) => match ctx.db.resolve(name) {
      Some(entry) => entry.pdg == ctx.tree.pdg(idx),
      None => {
        if ctx.unresolved.borrow_mut().insert(name.clone()) {
          debug!(name = name.as_str(), "particle name not in the database");
        }
        false
      },
    },
  }
}
