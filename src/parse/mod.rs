//! Parser for decay descriptor patterns
pub mod errors;
mod expression;
mod facade;
mod frag;
pub mod lexer;

pub use facade::parse;
