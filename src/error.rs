//! Abstractions for handling the errors of the parser and the loaders under a
//! common trait object.

use std::any::Any;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use crate::location::SourceRange;

/// A point of interest in resolving the error, such as the token where the
/// parser got stuck
#[derive(Clone, Debug)]
pub struct ErrorPosition {
  /// The suspected location
  pub range: SourceRange,
  /// Any information about the role of this location
  pub message: Option<String>,
}

/// Errors addressed to the author of a pattern or an input file, to be
/// resolved by changing that input
pub trait DescriptorError: Sized + Send + Sync + 'static {
  /// A general description of this type of error
  const DESCRIPTION: &'static str;
  /// A formatted message that includes specific parameters
  #[must_use]
  fn message(&self) -> String { Self::DESCRIPTION.to_string() }
  /// Text positions relevant to this error. Errors about whole files have
  /// none.
  #[must_use]
  fn positions(&self) -> impl IntoIterator<Item = ErrorPosition> { None }
  /// Convert the error into an [ErrorObj] to be able to handle various errors
  /// together
  #[must_use]
  fn pack(self) -> ErrorObj { Arc::new(self) }
}

/// Object-safe version of [DescriptorError]. Implement that instead of this.
pub trait DynDescriptorError: Send + Sync {
  /// Access type information about this error
  #[must_use]
  fn as_any(&self) -> &dyn Any;
  /// A general description of this type of error
  #[must_use]
  fn description(&self) -> &str;
  /// A formatted message that includes specific parameters
  #[must_use]
  fn message(&self) -> String { self.description().to_string() }
  /// Text positions relevant to this error.
  #[must_use]
  fn positions(&self) -> Vec<ErrorPosition>;
}

impl<T> DynDescriptorError for T
where T: DescriptorError
{
  fn as_any(&self) -> &dyn Any { self }
  fn description(&self) -> &str { T::DESCRIPTION }
  fn message(&self) -> String { DescriptorError::message(self) }
  fn positions(&self) -> Vec<ErrorPosition> {
    DescriptorError::positions(self).into_iter().collect()
  }
}

impl Display for dyn DynDescriptorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let description = self.description();
    let message = self.message();
    writeln!(f, "{description}\n{message}")?;
    for ErrorPosition { range, message } in self.positions() {
      match message {
        None => writeln!(f, "@{range}"),
        Some(msg) => writeln!(f, "@{range}: {msg}"),
      }?;
      writeln!(f, "{}", range.caret())?;
    }
    Ok(())
  }
}

impl Debug for dyn DynDescriptorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{self}") }
}

/// Type-erased [DescriptorError] implementor through the
/// [DynDescriptorError] object-trait
pub type ErrorObj = Arc<dyn DynDescriptorError>;
/// Alias for a result with an [ErrorObj]. This is the type of result returned
/// by the parser and every loader.
pub type DescResult<T> = Result<T, ErrorObj>;

/// A particle table file could not be read or decoded
#[derive(Clone, Debug)]
pub struct BadParticleTable {
  /// The file or embedded asset the table came from
  pub source: String,
  /// Error reported by the decoder
  pub detail: String,
}
impl DescriptorError for BadParticleTable {
  const DESCRIPTION: &'static str = "The particle table could not be loaded";
  fn message(&self) -> String { format!("{}: {}", self.source, self.detail) }
}

/// An event file could not be read or decoded
#[derive(Clone, Debug)]
pub struct BadEventFile {
  /// Path of the file
  pub source: String,
  /// Error reported by the decoder
  pub detail: String,
}
impl DescriptorError for BadEventFile {
  const DESCRIPTION: &'static str = "The event file could not be loaded";
  fn message(&self) -> String { format!("{}: {}", self.source, self.detail) }
}

/// A JSON transcription of a descriptor is malformed or breaks an invariant
/// the parser would have enforced
#[derive(Clone, Debug)]
pub struct BadDescriptorJson(pub String);
impl DescriptorError for BadDescriptorJson {
  const DESCRIPTION: &'static str = "Invalid JSON descriptor";
  fn message(&self) -> String { self.0.clone() }
}

/// The settings file could not be read or decoded
#[derive(Clone, Debug)]
pub struct BadSettings {
  /// Path of the file
  pub source: String,
  /// Error reported by the decoder
  pub detail: String,
}
impl DescriptorError for BadSettings {
  const DESCRIPTION: &'static str = "The settings file could not be loaded";
  fn message(&self) -> String { format!("{}: {}", self.source, self.detail) }
}
