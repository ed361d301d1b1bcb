use super::{matches, MatchCtx};
use crate::descriptor::{LogicOp, Logical};

#[must_use]
pub fn logical_match(ctx: &MatchCtx<'_>, idx: usize, logical: &Logical) -> bool {
  let Logical { op, left, right } = logical;
  match op {
    LogicOp::Or => matches(ctx, idx, left) || matches(ctx, idx, right),
    LogicOp::And => matches(ctx, idx, left) && matches(ctx, idx, right),
  }
}
