//! The particle database the matcher resolves names against. The matcher only
//! sees the [ParticleDb] trait; [ParticleTable] is the implementation shipped
//! with the crate.
mod table;

use serde::{Deserialize, Serialize};
pub use table::ParticleTable;

/// PDG code of the photon, the only product the radiative arrows tolerate
/// unlisted
pub const PHOTON: i32 = 22;

/// Properties of a particle species
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleEntry {
  /// Name as written in patterns
  pub name: String,
  /// PDG Monte Carlo numbering scheme code
  pub pdg: i32,
  /// In units of the elementary charge
  pub charge: f64,
  /// In GeV/c^2
  #[serde(default)]
  pub mass: f64,
}

/// Name and code lookup. Implementations must be safe to share between
/// threads that match events in parallel.
pub trait ParticleDb: Send + Sync {
  /// Find a species by name
  fn resolve(&self, name: &str) -> Option<&ParticleEntry>;
  /// Find a species by PDG code
  fn by_code(&self, pdg: i32) -> Option<&ParticleEntry>;
}
