//! Entrypoints to the parser that combine lexing and parsing

use std::sync::Arc;

use tracing::{debug, trace};

use super::errors::{ParseErrorKind, UnexpectedEnd};
use super::expression::{parse_expr, parse_joint, EXPR_START};
use super::frag::Frag;
use super::lexer::{check_parens, format, lex, Lexeme};
use crate::descriptor::Descriptor;
use crate::error::DescResult;

/// Parse a descriptor pattern.
///
/// The outermost construct may be written with or without parentheses, so
/// `B0 -> e+ nu_e` and `(B0 -> e+ nu_e)` are equivalent.
pub fn parse(text: &str) -> DescResult<Descriptor> {
  let text = Arc::new(text.to_string());
  let tokens = lex(&text)?;
  trace!(tokens = %format(&tokens), "lexed pattern");
  check_parens(&tokens, &text)?;
  let frag = Frag::new(&text, &tokens);
  if frag.is_empty() {
    return Err(UnexpectedEnd { expected: EXPR_START.to_vec() }.pack(frag.end()));
  }
  let (first, tail) = parse_expr(frag, 0)?;
  let desc = match tail.pop_opt() {
    None => first,
    Some((joint, rest)) => match joint.lexeme {
      Lexeme::Arrow(_) | Lexeme::Op(_) => {
        let (desc, rest) = parse_joint(first, joint, rest, None, 0)?;
        rest.expect_end()?;
        desc
      },
      _ => return Err(tail.unexpected(joint, &["an arrow", "a logical operator", "the end of the pattern"])),
    },
  };
  debug!(pattern = %text, "parsed descriptor {desc}");
  Ok(desc)
}
