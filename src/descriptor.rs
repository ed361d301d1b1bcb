//! The syntax tree of decay descriptors. A [Descriptor] is built once by
//! [crate::parse::parse] and then only read.

use std::fmt::{self, Display};

use intern_all::{i, Tok};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{BadDescriptorJson, DescResult, DescriptorError};

/// Identity predicate of a single particle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Atomic {
  /// `X`, any particle
  Any,
  /// `X0`, any neutral particle
  Neutral,
  /// `X+`, any positively charged particle
  Positive,
  /// `X-`, any negatively charged particle
  Negative,
  /// A name to be resolved in the particle database
  Particle(Tok<String>),
}
impl Atomic {
  /// Classify a name token, recognizing the wildcards
  #[must_use]
  pub fn new(name: &str) -> Self {
    match name {
      "X" => Self::Any,
      "X0" => Self::Neutral,
      "X+" => Self::Positive,
      "X-" => Self::Negative,
      _ => Self::Particle(i(name)),
    }
  }

  /// The token this predicate was written as
  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Any => "X",
      Self::Neutral => "X0",
      Self::Positive => "X+",
      Self::Negative => "X-",
      Self::Particle(name) => name.as_str(),
    }
  }
}
impl From<String> for Atomic {
  fn from(value: String) -> Self { Self::new(&value) }
}
impl From<Atomic> for String {
  fn from(value: Atomic) -> Self { value.name().to_string() }
}
impl Display for Atomic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// The arrow of a decay pattern decides how far the products may be from the
/// origin and whether stray photons are tolerated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arrow {
  /// `->`, every direct product must be listed
  #[serde(rename = "->")]
  Direct,
  /// `=>`, direct products, unlisted photons are tolerated
  #[serde(rename = "=>")]
  DirectRadiative,
  /// `-->`, products anywhere in the subtree
  #[serde(rename = "-->")]
  Long,
  /// `==>`, products anywhere in the subtree, unlisted photons are tolerated
  #[serde(rename = "==>")]
  LongRadiative,
}
impl Arrow {
  /// Every arrow, longest token first
  pub const ALL: [Self; 4] = [Self::Long, Self::LongRadiative, Self::Direct, Self::DirectRadiative];

  /// Textual form of the arrow
  #[must_use]
  pub fn symbol(self) -> &'static str {
    match self {
      Self::Direct => "->",
      Self::DirectRadiative => "=>",
      Self::Long => "-->",
      Self::LongRadiative => "==>",
    }
  }

  /// Whether products are searched among all descendants
  #[must_use]
  pub fn is_long(self) -> bool { matches!(self, Self::Long | Self::LongRadiative) }

  /// Whether unlisted photons may be left over
  #[must_use]
  pub fn is_radiative(self) -> bool { matches!(self, Self::DirectRadiative | Self::LongRadiative) }
}
impl Display for Arrow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

/// Binary boolean operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
  /// `||`
  #[serde(rename = "||")]
  Or,
  /// `&&`
  #[serde(rename = "&&")]
  And,
}
impl LogicOp {
  /// Textual form of the operator
  #[must_use]
  pub fn symbol(self) -> &'static str {
    match self {
      Self::Or => "||",
      Self::And => "&&",
    }
  }
}
impl Display for LogicOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

/// `(origin arrow decays... [...])`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decay {
  /// Predicate on the decaying particle itself
  pub origin: Box<Descriptor>,
  /// Predicates on the products, never empty
  pub decays: Vec<Descriptor>,
  /// Decides the search depth and the photon rule
  pub arrow: Arrow,
  /// Unlisted products are allowed
  pub inclusive: bool,
}

/// `(left op right)`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logical {
  /// The operator
  pub op: LogicOp,
  /// Left operand
  pub left: Box<Descriptor>,
  /// Right operand
  pub right: Box<Descriptor>,
}

/// A parsed decay descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Descriptor {
  /// Single particle identity
  Atomic {
    /// The predicate
    name: Atomic,
  },
  /// Decay topology
  Decay(Decay),
  /// Boolean combination evaluated on the same particle
  Logical(Logical),
  /// `[a, b, ...]`, matches if any item does. Never empty.
  #[serde(rename = "List")]
  Alternatives {
    /// The options
    items: Vec<Descriptor>,
  },
}
impl Descriptor {
  /// Shorthand for an atomic descriptor
  #[must_use]
  pub fn atom(name: &str) -> Self { Self::Atomic { name: Atomic::new(name) } }

  /// Shorthand for a decay descriptor
  #[must_use]
  pub fn decay(origin: Self, decays: Vec<Self>, arrow: Arrow, inclusive: bool) -> Self {
    debug_assert!(!decays.is_empty(), "a decay must list at least one product");
    Self::Decay(Decay { origin: Box::new(origin), decays, arrow, inclusive })
  }

  /// Shorthand for a logical descriptor
  #[must_use]
  pub fn logical(op: LogicOp, left: Self, right: Self) -> Self {
    Self::Logical(Logical { op, left: Box::new(left), right: Box::new(right) })
  }

  /// Transcribe to the JSON interchange format
  #[must_use]
  pub fn to_json(&self) -> String {
    serde_json::to_string(self).expect("descriptors only contain strings, bools and lists")
  }

  /// Read the JSON interchange format. Enforces the same invariants as the
  /// parser.
  pub fn from_json(json: &str) -> DescResult<Self> {
    let desc: Self =
      serde_json::from_str(json).map_err(|e| BadDescriptorJson(e.to_string()).pack())?;
    desc.check().map_err(|e| BadDescriptorJson(e.to_string()).pack())?;
    Ok(desc)
  }

  fn check(&self) -> Result<(), &'static str> {
    match self {
      Self::Atomic { .. } => Ok(()),
      Self::Decay(Decay { decays, .. }) if decays.is_empty() => Err("decay without products"),
      Self::Decay(Decay { origin, decays, .. }) => {
        origin.check()?;
        decays.iter().try_for_each(Self::check)
      },
      Self::Logical(Logical { left, right, .. }) => {
        left.check()?;
        right.check()
      },
      Self::Alternatives { items } if items.is_empty() => Err("empty list of alternatives"),
      Self::Alternatives { items } => items.iter().try_for_each(Self::check),
    }
  }
}

/// The canonical form. Parsing it yields an equal descriptor.
impl Display for Descriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Atomic { name } => write!(f, "{name}"),
      Self::Decay(Decay { origin, decays, arrow, inclusive }) => {
        let ellipsis = if *inclusive { " ..." } else { "" };
        write!(f, "({origin} {arrow} {}{ellipsis})", decays.iter().join(" "))
      },
      Self::Logical(Logical { op, left, right }) => write!(f, "({left} {op} {right})"),
      Self::Alternatives { items } => write!(f, "[{}]", items.iter().join(", ")),
    }
  }
}

#[cfg(test)]
mod test {
  use super::{Arrow, Atomic, Descriptor, LogicOp};

  #[test]
  fn wildcards() {
    assert_eq!(Atomic::new("X"), Atomic::Any);
    assert_eq!(Atomic::new("X0"), Atomic::Neutral);
    assert_eq!(Atomic::new("X+"), Atomic::Positive);
    assert_eq!(Atomic::new("X-"), Atomic::Negative);
    assert!(matches!(Atomic::new("Xi-"), Atomic::Particle(_)));
    assert_eq!(Atomic::new("anti-B0").name(), "anti-B0");
  }

  #[test]
  fn canonical_form() {
    let desc = Descriptor::logical(
      LogicOp::Or,
      Descriptor::decay(
        Descriptor::atom("B0"),
        vec![Descriptor::atom("X+"), Descriptor::atom("X-")],
        Arrow::Direct,
        true,
      ),
      Descriptor::Alternatives { items: vec![Descriptor::atom("e+"), Descriptor::atom("mu+")] },
    );
    assert_eq!(desc.to_string(), "((B0 -> X+ X- ...) || [e+, mu+])");
  }

  #[test]
  fn json_shape() {
    let desc = Descriptor::decay(
      Descriptor::atom("B0"),
      vec![Descriptor::atom("e+")],
      Arrow::LongRadiative,
      false,
    );
    let json: serde_json::Value = serde_json::from_str(&desc.to_json()).unwrap();
    assert_eq!(json["type"], "Decay");
    assert_eq!(json["arrow"], "==>");
    assert_eq!(json["origin"]["type"], "Atomic");
    assert_eq!(json["origin"]["name"], "B0");
    assert_eq!(json["decays"][0]["name"], "e+");
    assert_eq!(json["inclusive"], false);
    assert_eq!(Descriptor::from_json(&desc.to_json()).unwrap(), desc);
  }

  #[test]
  fn json_list_and_logical() {
    let json = r#"{"type":"Logical","op":"&&","left":{"type":"Atomic","name":"X+"},
      "right":{"type":"List","items":[{"type":"Atomic","name":"pi+"}]}}"#;
    let desc = Descriptor::from_json(json).unwrap();
    assert_eq!(desc.to_string(), "(X+ && [pi+])");
  }

  #[test]
  fn json_rejects_empty() {
    assert!(Descriptor::from_json(r#"{"type":"List","items":[]}"#).is_err());
    let empty_decay = r#"{"type":"Decay","origin":{"type":"Atomic","name":"B0"},
      "decays":[],"arrow":"->","inclusive":false}"#;
    assert!(Descriptor::from_json(empty_decay).is_err());
    assert!(Descriptor::from_json(r#"{"type":"Logical","op":"^^"}"#).is_err());
  }
}
