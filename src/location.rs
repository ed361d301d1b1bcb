//! Locations inside pattern text

use std::fmt::Display;
use std::ops::Range;
use std::sync::Arc;

/// A byte range within a pattern string. Identifies the suspect characters
/// for any parse error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceRange {
  /// The complete pattern text
  pub text: Arc<String>,
  /// Byte offsets of the relevant characters
  pub range: Range<usize>,
}
impl SourceRange {
  /// Create a range. Both ends must lie on character boundaries.
  #[must_use]
  pub fn new(text: &Arc<String>, range: Range<usize>) -> Self {
    debug_assert!(range.start <= range.end && range.end <= text.len());
    Self { text: text.clone(), range }
  }

  /// Zero-length range at the end of the text
  #[must_use]
  pub fn end_of(text: &Arc<String>) -> Self { Self::new(text, text.len()..text.len()) }

  /// Byte offset of the first character
  #[must_use]
  pub fn start(&self) -> usize { self.range.start }

  /// The characters covered by the range
  #[must_use]
  pub fn snippet(&self) -> &str { &self.text[self.range.clone()] }

  /// Connect two ranges of the same text into one that spans both
  #[must_use]
  pub fn to(&self, other: &Self) -> Self {
    debug_assert!(Arc::ptr_eq(&self.text, &other.text), "ranges of different texts");
    Self::new(&self.text, self.range.start..other.range.end.max(self.range.end))
  }

  /// The text with a row of carets underlining the range on the next line
  #[must_use]
  pub fn caret(&self) -> String {
    let pad = self.text[..self.range.start].chars().count();
    let width = self.snippet().chars().count().max(1);
    format!("{}\n{}{}", self.text, " ".repeat(pad), "^".repeat(width))
  }
}

impl Display for SourceRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.snippet() {
      "" => write!(f, "offset {}", self.range.start),
      s => write!(f, "offset {}..{} `{s}`", self.range.start, self.range.end),
    }
  }
}
