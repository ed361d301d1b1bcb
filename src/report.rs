//! Human readable rendering of the subtree under a particle

use std::fmt::{self, Display};

use crate::event::DecayTree;
use crate::particles::ParticleDb;

/// Displays the particle at `root` and all of its descendants, one per line,
/// indented by four spaces per generation. Generations one through six are
/// coloured with the ANSI foreground colour of the same number.
pub struct TreeReport<'a> {
  /// The tree to print from
  pub tree: &'a dyn DecayTree,
  /// Used to name the PDG codes
  pub db: &'a dyn ParticleDb,
  /// The first line of the report
  pub root: usize,
  /// Emit ANSI colour codes
  pub color: bool,
}
impl<'a> TreeReport<'a> {
  /// Create a coloured report
  #[must_use]
  pub fn new(tree: &'a dyn DecayTree, db: &'a dyn ParticleDb, root: usize) -> Self {
    Self { tree, db, root, color: true }
  }

  /// Set whether to emit ANSI colour codes
  #[must_use]
  pub fn color(self, color: bool) -> Self { Self { color, ..self } }

  fn line(&self, f: &mut fmt::Formatter<'_>, idx: usize, depth: usize) -> fmt::Result {
    let tree = self.tree;
    let pdg = tree.pdg(idx);
    let name = self.db.by_code(pdg).map_or("unknown", |e| e.name.as_str());
    let (prefix, suffix) = match depth {
      1..=6 if self.color => (format!("\x1b[3{depth}m"), "\x1b[m"),
      _ => (String::new(), ""),
    };
    writeln!(
      f,
      "{}{prefix}[{pdg}] {name} mass={:.6} energy={:.6} charge={:.6}{suffix}",
      "    ".repeat(depth),
      tree.mass(idx),
      tree.energy(idx),
      tree.charge(idx),
    )
  }
}

impl<'a> Display for TreeReport<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut stack = vec![(self.root, 0)];
    while let Some((idx, depth)) = stack.pop() {
      self.line(f, idx, depth)?;
      stack.extend(self.tree.daughters(idx).iter().rev().map(|&d| (d, depth + 1)));
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::TreeReport;
  use crate::event::{Event, Particle};
  use crate::particles::ParticleTable;

  fn sample() -> Event {
    let mut ev = Event::new();
    let b = ev.push(Particle { pdg: 511, charge: 0.0, mass: 5.28, energy: 5.5, daughters: vec![] });
    let e = ev.push(Particle::new(-11, 1.0));
    let x = ev.push(Particle::new(9_999_999, 0.0));
    let g = ev.push(Particle::new(22, 0.0));
    ev.adopt(b, e);
    ev.adopt(b, x);
    ev.adopt(e, g);
    ev
  }

  #[test]
  fn plain() {
    let ev = sample();
    let text = TreeReport::new(&ev, ParticleTable::builtin(), 0).color(false).to_string();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines, vec![
      "[511] B0 mass=5.280000 energy=5.500000 charge=0.000000",
      "    [-11] e+ mass=0.000000 energy=0.000000 charge=1.000000",
      "        [22] gamma mass=0.000000 energy=0.000000 charge=0.000000",
      "    [9999999] unknown mass=0.000000 energy=0.000000 charge=0.000000",
    ]);
  }

  #[test]
  fn colored_by_depth() {
    let ev = sample();
    let text = TreeReport::new(&ev, ParticleTable::builtin(), 0).to_string();
    let lines = text.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("[511]"));
    assert!(lines[1].starts_with("    \x1b[31m[-11]") && lines[1].ends_with("\x1b[m"));
    assert!(lines[2].starts_with("        \x1b[32m[22]"));
  }
}
