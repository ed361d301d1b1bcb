//! Split pattern text into lexemes

use std::fmt::Display;
use std::ops::Range;
use std::sync::Arc;

use intern_all::{i, Tok};
use itertools::Itertools;

use super::errors::{MisalignedParen, ParseErrorKind, UnknownToken};
use crate::descriptor::{Arrow, LogicOp};
use crate::error::DescResult;
use crate::location::SourceRange;

/// Kind of bracket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PType {
  /// `()`, decays and logical expressions
  Par,
  /// `[]`, lists of alternatives
  Sqr,
}
impl PType {
  /// Opening character
  pub fn l(self) -> char {
    match self {
      Self::Par => '(',
      Self::Sqr => '[',
    }
  }
  /// Closing character
  pub fn r(self) -> char {
    match self {
      Self::Par => ')',
      Self::Sqr => ']',
    }
  }
}

/// A unit of syntax
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexeme {
  /// Particle name or wildcard, resonance suffix included
  Name(Tok<String>),
  /// One of the four decay arrows
  Arrow(Arrow),
  /// `||` or `&&`
  Op(LogicOp),
  /// Left bracket
  LP(PType),
  /// Right bracket
  RP(PType),
  /// `,`
  Comma,
  /// `...`
  Ellipsis,
}

impl Display for Lexeme {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Name(name) => write!(f, "{}", name.as_str()),
      Self::Arrow(arrow) => write!(f, "{arrow}"),
      Self::Op(op) => write!(f, "{op}"),
      Self::LP(t) => write!(f, "{}", t.l()),
      Self::RP(t) => write!(f, "{}", t.r()),
      Self::Comma => write!(f, ","),
      Self::Ellipsis => write!(f, "..."),
    }
  }
}

/// A lexeme and the byte range where it was found
#[derive(Clone, Debug)]
pub struct Entry {
  /// the lexeme
  pub lexeme: Lexeme,
  /// byte offsets in the pattern
  pub range: Range<usize>,
}
impl Display for Entry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.lexeme.fmt(f) }
}

/// Neatly format a token sequence
pub fn format(lexed: &[Entry]) -> String { lexed.iter().join(" ") }

/// Character filter that can start a name
pub fn namestart(c: char) -> bool { c.is_ascii_alphabetic() }
/// Character filter that can appear in a name or a resonance suffix
pub fn namechar(c: char) -> bool { c.is_ascii_alphanumeric() || "/*+-_".contains(c) }
/// Characters that can only be part of punctuation
fn opchar(c: char) -> bool { !c.is_ascii_alphanumeric() && !c.is_whitespace() && !"()[],".contains(c) }

/// Split off all characters from the beginning that match a filter
pub fn split_filter(s: &str, mut pred: impl FnMut(char) -> bool) -> (&str, &str) {
  s.find(|c| !pred(c)).map_or((s, ""), |i| s.split_at(i))
}

fn lit_table() -> impl IntoIterator<Item = (&'static str, Lexeme)> {
  let arrows = Arrow::ALL.into_iter().map(|a| (a.symbol(), Lexeme::Arrow(a)));
  arrows.chain([
    ("...", Lexeme::Ellipsis),
    ("||", Lexeme::Op(LogicOp::Or)),
    ("&&", Lexeme::Op(LogicOp::And)),
    ("(", Lexeme::LP(PType::Par)),
    ("[", Lexeme::LP(PType::Sqr)),
    (")", Lexeme::RP(PType::Par)),
    ("]", Lexeme::RP(PType::Sqr)),
    (",", Lexeme::Comma),
  ])
}

/// Length of a resonance suffix such as `(4S)` at the start of the string, if
/// there is a complete one
fn resonance_len(s: &str) -> Option<usize> {
  let body = s.strip_prefix('(')?;
  let (inner, tail) = split_filter(body, namechar);
  (!inner.is_empty() && tail.starts_with(')')).then_some(inner.len() + 2)
}

/// Convert the pattern into tokens
pub fn lex(text: &Arc<String>) -> DescResult<Vec<Entry>> {
  let mut tokens = Vec::new();
  let mut data = text.as_str();
  'tail: loop {
    data = data.trim_start();
    let start = text.len() - data.len();
    let head = match data.chars().next() {
      Some(c) => c,
      None => return Ok(tokens),
    };
    for (prefix, lexeme) in lit_table() {
      if let Some(tail) = data.strip_prefix(prefix) {
        tokens.push(Entry { lexeme, range: start..start + prefix.len() });
        data = tail;
        continue 'tail;
      }
    }
    if namestart(head) {
      let (name, tail) = split_filter(data, namechar);
      let len = name.len() + resonance_len(tail).unwrap_or(0);
      let lexeme = Lexeme::Name(i(&data[..len]));
      tokens.push(Entry { lexeme, range: start..start + len });
      data = &data[len..];
      continue 'tail;
    }
    let (junk, _) = split_filter(data, opchar);
    let len = if junk.is_empty() { head.len_utf8() } else { junk.len() };
    let range = SourceRange::new(text, start..start + len);
    return Err(UnknownToken(data[..len].to_string()).pack(range));
  }
}

/// Verify that brackets pair up so that the grammar can assume they do
pub fn check_parens(tokens: &[Entry], text: &Arc<String>) -> DescResult<()> {
  let mut stack: Vec<&Entry> = Vec::new();
  for entry in tokens {
    match &entry.lexeme {
      Lexeme::LP(_) => stack.push(entry),
      Lexeme::RP(typ) => match stack.pop() {
        Some(Entry { lexeme: Lexeme::LP(open), .. }) if open == typ => (),
        _ => {
          let range = SourceRange::new(text, entry.range.clone());
          return Err(MisalignedParen(entry.lexeme.clone()).pack(range));
        },
      },
      _ => (),
    }
  }
  match stack.pop() {
    None => Ok(()),
    Some(open) => {
      let range = SourceRange::new(text, open.range.clone());
      Err(MisalignedParen(open.lexeme.clone()).pack(range))
    },
  }
}

#[cfg(test)]
mod test {
  use std::sync::Arc;

  use super::{check_parens, format, lex, Lexeme};
  use crate::descriptor::Arrow;

  fn lex_str(s: &str) -> String {
    let text = Arc::new(s.to_string());
    format(&lex(&text).unwrap())
  }

  #[test]
  fn arrows_longest_first() {
    let text = Arc::new("a --> b ==> c -> d => e".to_string());
    let arrows = (lex(&text).unwrap().into_iter())
      .filter_map(|e| match e.lexeme {
        Lexeme::Arrow(a) => Some(a),
        _ => None,
      })
      .collect::<Vec<_>>();
    assert_eq!(arrows, [Arrow::Long, Arrow::LongRadiative, Arrow::Direct, Arrow::DirectRadiative]);
  }

  #[test]
  fn names() {
    assert_eq!(lex_str("D*0_bar anti-nu_e J/psi"), "D*0_bar anti-nu_e J/psi");
    assert_eq!(lex_str("Upsilon(4S) -> B0"), "Upsilon(4S) -> B0");
    assert_eq!(lex_str("(X+||X-)"), "( X+ || X- )");
    assert_eq!(lex_str("[e+,mu+] ..."), "[ e+ , mu+ ] ...");
  }

  #[test]
  fn resonance_needs_closing() {
    let text = Arc::new("(B0 -> D0(e+ ...)".to_string());
    let tokens = lex(&text).unwrap();
    assert!(tokens.iter().any(|e| e.lexeme == Lexeme::Name(intern_all::i("D0"))));
  }

  #[test]
  fn ranges() {
    let text = Arc::new("  B0 -> e+".to_string());
    let tokens = lex(&text).unwrap();
    let ranges = tokens.iter().map(|e| e.range.clone()).collect::<Vec<_>>();
    assert_eq!(ranges, [2..4, 5..7, 8..10]);
  }

  #[test]
  fn unknown_token() {
    let text = Arc::new("B0 ~> e+".to_string());
    let err = lex(&text).unwrap_err();
    assert_eq!(err.positions()[0].range.snippet(), "~>");
    let text = Arc::new("B0 | e+".to_string());
    assert!(lex(&text).is_err());
  }

  #[test]
  fn parens() {
    let check = |s: &str| {
      let text = Arc::new(s.to_string());
      check_parens(&lex(&text).unwrap(), &text)
    };
    assert!(check("(a -> [b, c])").is_ok());
    assert!(check("(a -> [b, c)]").is_err());
    assert!(check("(a -> b").is_err());
    assert!(check("a -> b)").is_err());
  }
}
