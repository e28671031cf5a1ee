/*!

Uninterpreted function nodes, the e-nodes of the e-graph.

A node is a symbol applied to applied-id children, written `f[id0[s0, s1], id2]`. Node equality
is structural, which is what makes a node usable as a hashcons key once its children and slots
have been canonicalized.

*/

use std::fmt::Write;

use slotted_abs::{join_string, IString, SmallVec};

use crate::core::format::{FormatStyle, Formattable};
use crate::core::slot::AppliedId;
use crate::impl_display_debug_for_formattable;

/// Children tuples are short, so they are stored inline.
pub type ChildVec = SmallVec<AppliedId, 4>;

/// An uninterpreted function symbol applied to applied-id children.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct FnNode {
  pub symbol: IString,
  pub args:   ChildVec,
}

impl FnNode {
  #[inline(always)]
  pub fn new(symbol: IString, args: ChildVec) -> FnNode {
    FnNode { symbol, args }
  }

  /// A node with no children.
  #[inline(always)]
  pub fn constant(symbol: IString) -> FnNode {
    FnNode {
      symbol,
      args: ChildVec::new(),
    }
  }
}

impl Formattable for FnNode {
  fn repr(&self, out: &mut dyn std::fmt::Write, _style: FormatStyle) -> std::fmt::Result {
    write!(out, "{}", self.symbol)?;
    if !self.args.is_empty() {
      write!(out, "[{}]", join_string(self.args.iter(), ", "))?;
    }
    Ok(())
  }
}

impl_display_debug_for_formattable!(FnNode);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::slot::Id;

  #[test]
  fn display_forms() {
    let constant = FnNode::constant(IString::from("zero"));
    assert_eq!(constant.to_string(), "zero");

    let children: ChildVec = [
      AppliedId::from_labels(Id(0), &[0, 1]),
      AppliedId::from_labels(Id(2), &[]),
    ]
    .into_iter()
    .collect();
    let node = FnNode::new(IString::from("f"), children);
    assert_eq!(node.to_string(), "f[id0[s0, s1], id2]");
  }

  #[test]
  fn structural_equality() {
    let a = FnNode::new(
      IString::from("f"),
      [AppliedId::from_labels(Id(0), &[3])].into_iter().collect(),
    );
    let b = FnNode::new(
      IString::from("f"),
      [AppliedId::from_labels(Id(0), &[3])].into_iter().collect(),
    );
    let c = FnNode::new(
      IString::from("g"),
      [AppliedId::from_labels(Id(0), &[3])].into_iter().collect(),
    );
    assert_eq!(a, b);
    assert_ne!(a, c);
  }
}
