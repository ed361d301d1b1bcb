//! The [Frag] is the main input datastructure of the parser. Beyond the slice
//! of tokens, it holds the pattern text so that errors at the end of the input
//! can still point somewhere.

use std::sync::Arc;

use super::errors::{Expected, ExpectedEnd, ParseErrorKind, UnexpectedEnd};
use super::lexer::{Entry, Lexeme};
use crate::error::{DescResult, ErrorObj};
use crate::location::SourceRange;

/// Represents the unparsed remainder of the token sequence
#[must_use = "fragment of pattern should not be discarded implicitly"]
#[derive(Clone, Copy)]
pub struct Frag<'a> {
  /// The complete pattern, for error reporting
  pub text: &'a Arc<String>,
  /// Tokens to parse
  pub data: &'a [Entry],
}
impl<'a> Frag<'a> {
  /// Create a new fragment
  pub fn new(text: &'a Arc<String>, data: &'a [Entry]) -> Self { Self { text, data } }

  /// Whether all tokens were consumed
  #[must_use]
  pub fn is_empty(self) -> bool { self.data.is_empty() }

  /// The first entry, if any
  #[must_use]
  pub fn peek(self) -> Option<&'a Entry> { self.data.first() }

  /// Get the first entry or raise an [UnexpectedEnd] listing what could have
  /// come next
  pub fn pop(self, expected: &[&'static str]) -> DescResult<(&'a Entry, Self)> {
    match self.data.split_first() {
      Some((head, data)) => Ok((head, Self { data, ..self })),
      None => Err(UnexpectedEnd { expected: expected.to_vec() }.pack(self.end())),
    }
  }

  /// Get the first entry if there is one
  #[must_use]
  pub fn pop_opt(self) -> Option<(&'a Entry, Self)> {
    let (head, data) = self.data.split_first()?;
    Some((head, Self { data, ..self }))
  }

  /// Consume exactly the given lexeme
  pub fn expect(self, lexeme: Lexeme, name: &'static str) -> DescResult<Self> {
    let (head, tail) = self.pop(&[name])?;
    if head.lexeme != lexeme {
      return Err(self.unexpected(head, &[name]));
    }
    Ok(tail)
  }

  /// Assert that nothing is left
  pub fn expect_end(self) -> DescResult<()> {
    match self.peek() {
      None => Ok(()),
      Some(entry) => Err(ExpectedEnd(entry.lexeme.clone()).pack(self.range_of(entry))),
    }
  }

  /// Build an [Expected] error for an entry of this fragment
  #[must_use]
  pub fn unexpected(self, found: &Entry, expected: &[&'static str]) -> ErrorObj {
    let kind = Expected { expected: expected.to_vec(), found: found.lexeme.clone() };
    kind.pack(self.range_of(found))
  }

  /// The location of an entry
  #[must_use]
  pub fn range_of(self, entry: &Entry) -> SourceRange {
    SourceRange::new(self.text, entry.range.clone())
  }

  /// Zero-length location at the end of the text
  #[must_use]
  pub fn end(self) -> SourceRange { SourceRange::end_of(self.text) }
}
