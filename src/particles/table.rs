use std::fs;
use std::path::Path;
use std::sync::Arc;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use serde::Deserialize;
use tracing::debug;

use super::{ParticleDb, ParticleEntry};
use crate::error::{BadParticleTable, DescResult, DescriptorError};

#[derive(RustEmbed)]
#[folder = "data/"]
#[include = "*.toml"]
struct Assets;

const DEFAULT_TABLE: &str = "particles.toml";

static BUILTIN: Lazy<Arc<ParticleTable>> = Lazy::new(|| {
  let file = Assets::get(DEFAULT_TABLE).expect("the default particle table is embedded");
  let text = std::str::from_utf8(&file.data).expect("the default particle table is UTF-8");
  match ParticleTable::from_toml(DEFAULT_TABLE, text) {
    Ok(table) => Arc::new(table),
    Err(e) => panic!("the embedded particle table is invalid: {e}"),
  }
});

#[derive(Deserialize)]
struct TableFile {
  #[serde(default)]
  particle: Vec<ParticleEntry>,
}

/// A [ParticleDb] indexed by both name and code. When several entries share a
/// code, the first one is reported by [ParticleDb::by_code].
#[derive(Clone, Debug, Default)]
pub struct ParticleTable {
  entries: Vec<ParticleEntry>,
  by_name: HashMap<String, usize>,
  by_code: HashMap<i32, usize>,
}
impl ParticleTable {
  /// Create an empty table
  #[must_use]
  pub fn new() -> Self { Self::default() }

  /// The table embedded in the crate, covering the common leptons, light
  /// mesons, charm and bottom hadrons and a few baryons
  #[must_use]
  pub fn builtin() -> &'static Self { BUILTIN.as_ref() }

  /// A shared handle to [ParticleTable::builtin]
  #[must_use]
  pub fn shared_builtin() -> Arc<Self> { Arc::clone(&BUILTIN) }

  /// Add an entry. An entry with the same name is replaced.
  pub fn insert(&mut self, entry: ParticleEntry) {
    let idx = match self.by_name.get(&entry.name) {
      Some(&idx) => {
        self.entries[idx] = entry;
        idx
      },
      None => {
        self.entries.push(entry);
        self.entries.len() - 1
      },
    };
    let entry = &self.entries[idx];
    self.by_name.insert(entry.name.clone(), idx);
    self.by_code.entry(entry.pdg).or_insert(idx);
  }

  /// Every entry in insertion order
  pub fn iter(&self) -> impl Iterator<Item = &ParticleEntry> { self.entries.iter() }

  /// Number of entries
  #[must_use]
  pub fn len(&self) -> usize { self.entries.len() }

  /// Whether the table has no entries
  #[must_use]
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Decode a table from TOML consisting of `[[particle]]` sections with
  /// `name`, `pdg`, `charge` and optionally `mass` keys. `source` names the
  /// origin in errors.
  pub fn from_toml(source: &str, text: &str) -> DescResult<Self> {
    let file: TableFile = toml::from_str(text)
      .map_err(|e| BadParticleTable { source: source.to_string(), detail: e.to_string() }.pack())?;
    let table = file.particle.into_iter().collect::<Self>();
    debug!(source, particles = table.len(), "loaded particle table");
    Ok(table)
  }

  /// Read a TOML table from a file
  pub fn load(path: &Path) -> DescResult<Self> {
    let source = path.display().to_string();
    let text = fs::read_to_string(path)
      .map_err(|e| BadParticleTable { source: source.clone(), detail: e.to_string() }.pack())?;
    Self::from_toml(&source, &text)
  }
}

impl FromIterator<ParticleEntry> for ParticleTable {
  fn from_iter<T: IntoIterator<Item = ParticleEntry>>(iter: T) -> Self {
    let mut table = Self::new();
    iter.into_iter().for_each(|e| table.insert(e));
    table
  }
}

impl ParticleDb for ParticleTable {
  fn resolve(&self, name: &str) -> Option<&ParticleEntry> {
    self.by_name.get(name).map(|&idx| &self.entries[idx])
  }
  fn by_code(&self, pdg: i32) -> Option<&ParticleEntry> {
    self.by_code.get(&pdg).map(|&idx| &self.entries[idx])
  }
}
