//! Errors produced by the parser. Every one of them is a
//! [PatternSyntaxError] with a different kind.

use itertools::Itertools;

use super::lexer::Lexeme;
use crate::descriptor::Arrow;
use crate::error::{DescriptorError, ErrorObj, ErrorPosition};
use crate::location::SourceRange;

/// Parse error information without a location. Location data is added by the
/// parser.
pub trait ParseErrorKind: Sized + Send + Sync + 'static {
  /// A general description of the error condition
  const DESCRIPTION: &'static str;
  /// A specific description of the error with concrete text sections
  fn message(&self) -> String { Self::DESCRIPTION.to_string() }
  /// What the offending token has to do with the error, if it isn't obvious
  fn note(&self) -> Option<String> { None }
  /// Convert this error to a type-erased [ErrorObj]
  fn pack(self, range: SourceRange) -> ErrorObj { PatternSyntaxError { kind: self, range }.pack() }
}

/// The pattern text does not conform to the descriptor grammar
pub struct PatternSyntaxError<T> {
  /// Where the parser gave up
  pub range: SourceRange,
  /// What went wrong
  pub kind: T,
}
impl<T: ParseErrorKind> DescriptorError for PatternSyntaxError<T> {
  const DESCRIPTION: &'static str = T::DESCRIPTION;
  fn message(&self) -> String { self.kind.message() }
  fn positions(&self) -> impl IntoIterator<Item = ErrorPosition> {
    [ErrorPosition { range: self.range.clone(), message: self.kind.note() }]
  }
}

fn either(options: &[&'static str]) -> String {
  match options {
    [] => "nothing".to_string(),
    [only] => only.to_string(),
    [a, b] => format!("either {a} or {b}"),
    [variants @ .., last] => format!("any of {} or {last}", variants.iter().join(", ")),
  }
}

/// A character sequence that is not part of any token
pub struct UnknownToken(pub String);
impl ParseErrorKind for UnknownToken {
  const DESCRIPTION: &'static str = "Unrecognized token";
  fn message(&self) -> String { format!("`{}` is not a particle name, arrow or operator", self.0) }
}

/// Brackets don't pair up
pub struct MisalignedParen(pub Lexeme);
impl ParseErrorKind for MisalignedParen {
  const DESCRIPTION: &'static str = "() and [] must always pair up";
  fn message(&self) -> String { format!("This {} has no pair", self.0) }
  fn note(&self) -> Option<String> {
    match self.0 {
      Lexeme::LP(_) => Some(format!("this {} is never closed", self.0)),
      _ => Some(format!("this {} closes nothing", self.0)),
    }
  }
}

/// A specific token was expected
pub struct Expected {
  /// Human-readable names of the acceptable tokens
  pub expected: Vec<&'static str>,
  /// What was actually found
  pub found: Lexeme,
}
impl ParseErrorKind for Expected {
  const DESCRIPTION: &'static str = "A concrete token was expected";
  fn message(&self) -> String {
    format!("Expected {} but found {}", either(&self.expected), self.found)
  }
}

/// The pattern ended in the middle of a construct
pub struct UnexpectedEnd {
  /// Human-readable names of the tokens that could have continued it
  pub expected: Vec<&'static str>,
}
impl ParseErrorKind for UnexpectedEnd {
  const DESCRIPTION: &'static str = "The pattern ended abruptly";
  fn message(&self) -> String { format!("Expected {} at the end", either(&self.expected)) }
}

/// A complete pattern was followed by more tokens
pub struct ExpectedEnd(pub Lexeme);
impl ParseErrorKind for ExpectedEnd {
  const DESCRIPTION: &'static str = "Expected the end of the pattern";
  fn message(&self) -> String { format!("{} cannot follow a complete pattern", self.0) }
}

/// An arrow with nothing on its right
pub struct EmptyDecay(pub Arrow);
impl ParseErrorKind for EmptyDecay {
  const DESCRIPTION: &'static str = "A decay must list at least one product";
  fn message(&self) -> String { format!("No products follow {}", self.0) }
}

/// Brackets nest deeper than the parser accepts
pub struct TooDeep(pub usize);
impl ParseErrorKind for TooDeep {
  const DESCRIPTION: &'static str = "Brackets are nested too deeply";
  fn message(&self) -> String { format!("At most {} levels of brackets are allowed", self.0) }
  fn note(&self) -> Option<String> { Some("this bracket is one level too deep".to_string()) }
}

/// `[]`
pub struct EmptyList;
impl ParseErrorKind for EmptyList {
  const DESCRIPTION: &'static str = "A list of alternatives cannot be empty";
}
