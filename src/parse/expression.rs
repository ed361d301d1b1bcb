//! Recursive descent over the `expr` rule of the grammar

use super::errors::{EmptyDecay, EmptyList, ParseErrorKind, TooDeep, UnexpectedEnd};
use super::frag::Frag;
use super::lexer::{Entry, Lexeme, PType};
use crate::descriptor::{Arrow, Atomic, Decay, Descriptor, LogicOp, Logical};
use crate::error::DescResult;

/// Tokens that can start an `expr`
pub const EXPR_START: &[&str] = &["a particle name", "`(`", "`[`"];
/// Tokens that can follow the first `expr` of a parenthesized group
pub const JOINT: &[&str] = &["an arrow", "a logical operator"];
/// Deepest bracket nesting accepted in a pattern
pub const MAX_DEPTH: usize = 128;

/// Parse one `expr` off the front of the fragment. `depth` is the number of
/// brackets the fragment is enclosed in.
pub fn parse_expr(frag: Frag<'_>, depth: usize) -> DescResult<(Descriptor, Frag<'_>)> {
  let (head, tail) = frag.pop(EXPR_START)?;
  if matches!(head.lexeme, Lexeme::LP(_)) && MAX_DEPTH <= depth {
    return Err(TooDeep(MAX_DEPTH).pack(frag.range_of(head)));
  }
  match &head.lexeme {
    Lexeme::Name(name) => Ok((Descriptor::Atomic { name: Atomic::new(name) }, tail)),
    Lexeme::LP(PType::Sqr) => parse_list(head, tail, depth + 1),
    Lexeme::LP(PType::Par) => {
      let (first, tail) = parse_expr(tail, depth + 1)?;
      let (joint, tail) = tail.pop(JOINT)?;
      let (desc, tail) = parse_joint(first, joint, tail, Some(PType::Par), depth + 1)?;
      Ok((desc, tail.expect(Lexeme::RP(PType::Par), "`)`")?))
    },
    _ => Err(frag.unexpected(head, EXPR_START)),
  }
}

/// Parse whatever follows an arrow or an operator, up to but excluding the
/// closing bracket, or to the end of the input if `close` is [None].
pub fn parse_joint<'a>(
  first: Descriptor,
  joint: &Entry,
  tail: Frag<'a>,
  close: Option<PType>,
  depth: usize,
) -> DescResult<(Descriptor, Frag<'a>)> {
  match joint.lexeme {
    Lexeme::Arrow(arrow) => parse_decay(first, arrow, joint, tail, close, depth),
    Lexeme::Op(op) => parse_logical(first, op, tail, depth),
    _ => Err(tail.unexpected(joint, JOINT)),
  }
}

fn parse_logical(
  left: Descriptor,
  op: LogicOp,
  tail: Frag<'_>,
  depth: usize,
) -> DescResult<(Descriptor, Frag<'_>)> {
  let (right, tail) = parse_expr(tail, depth)?;
  let desc = Descriptor::Logical(Logical { op, left: Box::new(left), right: Box::new(right) });
  Ok((desc, tail))
}

fn is_close(entry: Option<&Entry>, close: Option<PType>) -> bool {
  match (entry, close) {
    (None, None) => true,
    (Some(Entry { lexeme: Lexeme::RP(t), .. }), Some(c)) => *t == c,
    _ => false,
  }
}

fn closer_name(close: Option<PType>) -> &'static str {
  match close {
    Some(PType::Par) => "`)`",
    Some(PType::Sqr) => "`]`",
    None => "the end of the pattern",
  }
}

fn parse_decay<'a>(
  origin: Descriptor,
  arrow: Arrow,
  arrow_entry: &Entry,
  mut tail: Frag<'a>,
  close: Option<PType>,
  depth: usize,
) -> DescResult<(Descriptor, Frag<'a>)> {
  let mut decays = Vec::new();
  let mut inclusive = false;
  while !is_close(tail.peek(), close) {
    if let Some((Entry { lexeme: Lexeme::Ellipsis, .. }, rest)) = tail.pop_opt() {
      if decays.is_empty() {
        return Err(EmptyDecay(arrow).pack(tail.range_of(arrow_entry)));
      }
      inclusive = true;
      tail = rest;
      match tail.peek() {
        _ if is_close(tail.peek(), close) => break,
        Some(entry) => return Err(tail.unexpected(entry, &[closer_name(close)])),
        None => return Err(UnexpectedEnd { expected: vec![closer_name(close)] }.pack(tail.end())),
      }
    }
    let (item, rest) = parse_expr(tail, depth)?;
    decays.push(item);
    tail = rest;
  }
  if decays.is_empty() {
    return Err(EmptyDecay(arrow).pack(tail.range_of(arrow_entry)));
  }
  let desc = Descriptor::Decay(Decay { origin: Box::new(origin), decays, arrow, inclusive });
  Ok((desc, tail))
}

fn parse_list<'a>(open: &Entry, mut tail: Frag<'a>, depth: usize) -> DescResult<(Descriptor, Frag<'a>)> {
  if let Some((close @ Entry { lexeme: Lexeme::RP(PType::Sqr), .. }, _)) = tail.pop_opt() {
    return Err(EmptyList.pack(tail.range_of(open).to(&tail.range_of(close))));
  }
  let mut items = Vec::new();
  loop {
    let (item, rest) = parse_expr(tail, depth)?;
    items.push(item);
    let (sep, rest) = rest.pop(&["`,`", "`]`"])?;
    match sep.lexeme {
      Lexeme::Comma => tail = rest,
      Lexeme::RP(PType::Sqr) => return Ok((Descriptor::Alternatives { items }, rest)),
      _ => return Err(rest.unexpected(sep, &["`,`", "`]`"])),
    }
  }
}
