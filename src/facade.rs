//! A parsed pattern paired with the database it's evaluated against

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::descriptor::Descriptor;
use crate::error::DescResult;
use crate::event::DecayTree;
use crate::matcher::{matches, MatchCtx};
use crate::parse::parse;
use crate::particles::{ParticleDb, ParticleTable};

/// Parse a pattern once and search any number of trees with it
#[derive(Clone)]
pub struct Finder {
  descriptor: Descriptor,
  db: Arc<dyn ParticleDb>,
}
impl Finder {
  /// Parse `pattern`, resolving names in `db` during matching
  pub fn new(pattern: &str, db: Arc<dyn ParticleDb>) -> DescResult<Self> {
    Ok(Self::from_descriptor(parse(pattern)?, db))
  }

  /// Wrap an already parsed descriptor
  #[must_use]
  pub fn from_descriptor(descriptor: Descriptor, db: Arc<dyn ParticleDb>) -> Self {
    Self { descriptor, db }
  }

  /// Parse `pattern` and use the embedded particle table
  pub fn with_builtin(pattern: &str) -> DescResult<Self> {
    Self::new(pattern, ParticleTable::shared_builtin())
  }

  /// The pattern this finder searches for
  #[must_use]
  pub fn descriptor(&self) -> &Descriptor { &self.descriptor }

  /// The database names are resolved in
  #[must_use]
  pub fn db(&self) -> &dyn ParticleDb { &*self.db }

  /// Whether the particle at `idx` matches
  #[must_use]
  pub fn is_match(&self, tree: &dyn DecayTree, idx: usize) -> bool {
    matches(&MatchCtx::new(tree, &*self.db), idx, &self.descriptor)
  }

  /// Every matching particle index in tree order
  #[must_use]
  pub fn find(&self, tree: &dyn DecayTree) -> Vec<usize> {
    let ctx = MatchCtx::new(tree, &*self.db);
    (0..tree.len()).filter(|&idx| matches(&ctx, idx, &self.descriptor)).collect()
  }

  /// [Finder::find] over every tree, in parallel
  #[must_use]
  pub fn find_all<T: DecayTree>(&self, trees: &[T]) -> Vec<Vec<usize>> {
    let found = trees.par_iter().map(|t| self.find(t)).collect::<Vec<_>>();
    debug!(
      trees = trees.len(),
      hits = found.iter().map(Vec::len).sum::<usize>(),
      "searched for {}",
      self.descriptor
    );
    found
  }
}

#[cfg(test)]
mod test {
  use super::Finder;
  use crate::event::{Event, Particle};

  fn event(links: &[(i32, f64, &[usize])]) -> Event {
    let mut ev = Event::new();
    for (pdg, charge, _) in links {
      ev.push(Particle::new(*pdg, *charge));
    }
    for (parent, (_, _, daughters)) in links.iter().enumerate() {
      daughters.iter().for_each(|&d| ev.adopt(parent, d));
    }
    ev
  }

  #[test]
  fn find_in_order() {
    // two B0 -> e+ nu_e decays and one B0 -> mu+ nu_mu
    let ev = event(&[
      (511, 0.0, &[1, 2]),
      (-11, 1.0, &[]),
      (12, 0.0, &[]),
      (511, 0.0, &[4, 5]),
      (-13, 1.0, &[]),
      (14, 0.0, &[]),
      (511, 0.0, &[7, 8]),
      (12, 0.0, &[]),
      (-11, 1.0, &[]),
    ]);
    let finder = Finder::with_builtin("B0 -> e+ nu_e").unwrap();
    let found = finder.find(&ev);
    assert_eq!(found, vec![0, 6]);
    assert!(found.iter().all(|&idx| finder.is_match(&ev, idx)));
    assert_eq!(Finder::with_builtin("X+").unwrap().find(&ev), vec![1, 4, 8]);
  }

  #[test]
  fn find_all_keeps_event_order() {
    let hit = event(&[(22, 0.0, &[])]);
    let miss = event(&[(111, 0.0, &[])]);
    let finder = Finder::with_builtin("gamma").unwrap();
    let events = vec![hit.clone(), miss, Event::new(), hit];
    assert_eq!(finder.find_all(&events), vec![vec![0], vec![], vec![], vec![0]]);
  }

  #[test]
  fn bad_pattern() {
    assert!(Finder::with_builtin("B0 -> ").is_err());
  }
}
