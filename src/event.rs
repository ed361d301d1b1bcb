//! Particle trees as the matcher sees them, and the in-memory tree the
//! loaders produce

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BadEventFile, DescResult, DescriptorError};

/// Read-only access to an ordered forest of particles addressed by index.
/// Daughter lists must not form cycles.
pub trait DecayTree: Send + Sync {
  /// Number of particles
  fn len(&self) -> usize;
  /// Whether the tree has no particles
  fn is_empty(&self) -> bool { self.len() == 0 }
  /// PDG code of a particle
  fn pdg(&self, idx: usize) -> i32;
  /// Charge in units of the elementary charge
  fn charge(&self, idx: usize) -> f64;
  /// Mass in GeV/c^2
  fn mass(&self, idx: usize) -> f64;
  /// Energy in GeV
  fn energy(&self, idx: usize) -> f64;
  /// Indices of the direct decay products, in order
  fn daughters(&self, idx: usize) -> &[usize];
}

/// One simulated particle
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
  /// PDG code
  pub pdg: i32,
  /// Charge in units of the elementary charge
  pub charge: f64,
  /// Mass in GeV/c^2
  #[serde(default)]
  pub mass: f64,
  /// Energy in GeV
  #[serde(default)]
  pub energy: f64,
  /// Indices of the decay products within the same event
  #[serde(default)]
  pub daughters: Vec<usize>,
}
impl Particle {
  /// A particle with no products
  #[must_use]
  pub fn new(pdg: i32, charge: f64) -> Self { Self { pdg, charge, ..Self::default() } }
}

/// A generated event, serialized as a bare list of particles
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
  /// Every particle of the event
  pub particles: Vec<Particle>,
}
impl Event {
  /// Create an empty event
  #[must_use]
  pub fn new() -> Self { Self::default() }

  /// Append a particle and return its index
  pub fn push(&mut self, particle: Particle) -> usize {
    self.particles.push(particle);
    self.particles.len() - 1
  }

  /// Record `child` as the next decay product of `parent`
  pub fn adopt(&mut self, parent: usize, child: usize) {
    debug_assert!(child < self.particles.len(), "daughter index out of range");
    self.particles[parent].daughters.push(child);
  }

  fn validate(&self) -> Result<(), String> {
    let len = self.particles.len();
    for (idx, p) in self.particles.iter().enumerate() {
      if let Some(d) = p.daughters.iter().find(|&&d| len <= d || d == idx) {
        return Err(format!("particle {idx} lists invalid daughter {d}"));
      }
    }
    let mut parents = vec![0usize; len];
    self.particles.iter().flat_map(|p| &p.daughters).for_each(|&d| parents[d] += 1);
    let mut ready = (0..len).filter(|&i| parents[i] == 0).collect::<Vec<_>>();
    let mut seen = 0;
    while let Some(idx) = ready.pop() {
      seen += 1;
      for &d in &self.particles[idx].daughters {
        parents[d] -= 1;
        if parents[d] == 0 {
          ready.push(d);
        }
      }
    }
    if seen < len {
      return Err("daughter lists form a cycle".to_string());
    }
    Ok(())
  }
}

impl DecayTree for Event {
  fn len(&self) -> usize { self.particles.len() }
  fn pdg(&self, idx: usize) -> i32 { self.particles[idx].pdg }
  fn charge(&self, idx: usize) -> f64 { self.particles[idx].charge }
  fn mass(&self, idx: usize) -> f64 { self.particles[idx].mass }
  fn energy(&self, idx: usize) -> f64 { self.particles[idx].energy }
  fn daughters(&self, idx: usize) -> &[usize] { &self.particles[idx].daughters }
}

/// Decode a JSON array of events. `source` names the origin in errors.
pub fn parse_events(source: &str, text: &str) -> DescResult<Vec<Event>> {
  let bad = |detail: String| BadEventFile { source: source.to_string(), detail }.pack();
  let events: Vec<Event> = serde_json::from_str(text).map_err(|e| bad(e.to_string()))?;
  for (n, ev) in events.iter().enumerate() {
    ev.validate().map_err(|e| bad(format!("event {n}: {e}")))?;
  }
  debug!(source, events = events.len(), "loaded events");
  Ok(events)
}

/// Read an event file
pub fn load_events(path: &Path) -> DescResult<Vec<Event>> {
  let source = path.display().to_string();
  let text = fs::read_to_string(path)
    .map_err(|e| BadEventFile { source: source.clone(), detail: e.to_string() }.pack())?;
  parse_events(&source, &text)
}

#[cfg(test)]
mod test {
  use super::{parse_events, DecayTree, Event, Particle};
  use crate::error::BadEventFile;

  #[test]
  fn build_tree() {
    let mut ev = Event::new();
    let b = ev.push(Particle::new(511, 0.0));
    let e = ev.push(Particle::new(-11, 1.0));
    let other = ev.push(Particle::new(22, 0.0));
    ev.adopt(b, e);
    assert!(ev.daughters(other).is_empty());
    assert_eq!(ev.daughters(b), &[e]);
    assert!(ev.daughters(e).is_empty());
    assert_eq!(DecayTree::len(&ev), 3);
  }

  #[test]
  fn json_format() {
    let text = r#"[
      [{"pdg": 511, "charge": 0, "mass": 5.28, "energy": 5.3, "daughters": [1]},
       {"pdg": -11, "charge": 1}],
      []
    ]"#;
    let events = parse_events("test", text).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].mass(0), 5.28);
    assert_eq!(events[0].daughters(0), &[1]);
    assert!(events[1].is_empty());
  }

  #[test]
  fn rejects_bad_links() {
    for text in [
      r#"[[{"pdg": 1, "charge": 0, "daughters": [3]}]]"#,
      r#"[[{"pdg": 1, "charge": 0, "daughters": [0]}]]"#,
      r#"[[{"pdg": 1, "charge": 0, "daughters": [1]}, {"pdg": 2, "charge": 0, "daughters": [0]}]]"#,
      "{}",
    ] {
      let err = parse_events("test", text).unwrap_err();
      assert!(err.as_any().downcast_ref::<BadEventFile>().is_some(), "{text}");
    }
  }
}
