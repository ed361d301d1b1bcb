//! Evaluation of a [Descriptor] against one particle of a [DecayTree].
//!
//! Evaluation is a pure function of the tree, the database and the pattern.
//! The only per-call state is the [MatchCtx], which can be dropped or reused
//! freely.
mod atomic;
mod bipartite;
mod decay;
mod expand;
mod logical;

use std::cell::RefCell;

use hashbrown::HashSet;
use intern_all::Tok;

pub use self::bipartite::{Edge, Problem};
pub use self::decay::decay_assignment;
pub use self::expand::{expand, Expansion};
use self::atomic::atomic_match;
use self::logical::logical_match;
use crate::descriptor::Descriptor;
use crate::event::DecayTree;
use crate::particles::ParticleDb;

/// Everything a match depends on besides the pattern
pub struct MatchCtx<'a> {
  /// The tree the particle indices refer to
  pub tree: &'a dyn DecayTree,
  /// Used to resolve particle names
  pub db: &'a dyn ParticleDb,
  unresolved: RefCell<HashSet<Tok<String>>>,
}
impl<'a> MatchCtx<'a> {
  /// Create a context for matching in `tree`
  #[must_use]
  pub fn new(tree: &'a dyn DecayTree, db: &'a dyn ParticleDb) -> Self {
    Self { tree, db, unresolved: RefCell::default() }
  }
}

/// Decide whether the particle at `idx` matches the descriptor
#[must_use]
pub fn matches(ctx: &MatchCtx<'_>, idx: usize, desc: &Descriptor) -> bool {
  match desc {
    Descriptor::Atomic { name } => atomic_match(ctx, idx, name),
    Descriptor::Decay(decay) => decay_assignment(ctx, idx, decay).is_some(),
    Descriptor::Logical(logical) => logical_match(ctx, idx, logical),
    Descriptor::Alternatives { items } => items.iter().any(|d| matches(ctx, idx, d)),
  }
}
