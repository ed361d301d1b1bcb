//! Settings of the command line front end, read from `decayfind.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{BadSettings, DescResult, DescriptorError};

/// Name of the settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "decayfind.toml";

fn default_color() -> bool { true }

/// Options that can be persisted. Command line flags take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
  /// Particle table to use instead of the embedded one
  #[serde(default)]
  pub particles: Option<PathBuf>,
  /// Colour the tree reports
  #[serde(default = "default_color")]
  pub color: bool,
  /// Size of the worker pool, or [None] for one per core
  #[serde(default)]
  pub threads: Option<usize>,
}
impl Default for Settings {
  fn default() -> Self { Self { particles: None, color: default_color(), threads: None } }
}
impl Settings {
  /// Decode settings. `source` names the origin in errors.
  pub fn from_toml(source: &str, text: &str) -> DescResult<Self> {
    toml::from_str(text).map_err(|e| BadSettings { source: source.to_string(), detail: e.to_string() }.pack())
  }

  /// Read a settings file. Relative particle table paths are resolved
  /// against the directory of the file.
  pub fn load(path: &Path) -> DescResult<Self> {
    let source = path.display().to_string();
    let text = fs::read_to_string(path)
      .map_err(|e| BadSettings { source: source.clone(), detail: e.to_string() }.pack())?;
    let mut settings = Self::from_toml(&source, &text)?;
    if let (Some(table), Some(dir)) = (&settings.particles, path.parent()) {
      settings.particles = Some(dir.join(table));
    }
    debug!(?settings, "loaded {source}");
    Ok(settings)
  }

  /// Read `path` if given, otherwise [SETTINGS_FILE] if it exists, otherwise
  /// fall back to the defaults
  pub fn discover(path: Option<&Path>) -> DescResult<Self> {
    match path {
      Some(path) => Self::load(path),
      None if Path::new(SETTINGS_FILE).is_file() => Self::load(Path::new(SETTINGS_FILE)),
      None => Ok(Self::default()),
    }
  }
}
