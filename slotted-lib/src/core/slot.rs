/*!

The value types of the engine: slots, class ids, and applied ids.

A *slot* is a symbolic parameter position. Its numeric label carries no meaning of its own; it
only identifies positions consistently within one applied-id tuple, and it is subject to renaming
(see [`crate::core::shape`]).

An *applied id* such as `id3[s2, s3]` instantiates the two slots of class `id3` with the labels
`s2` and `s3`. The argument tuple need not be a permutation: labels may repeat and may be drawn
from any label space.

*/

use std::fmt::Write;

use slotted_abs::{join_string, NatSet, SmallVec};

use crate::core::format::{FormatStyle, Formattable};
use crate::impl_display_debug_for_formattable;

/// A slot label, meaningful only relative to an applied-id tuple. Rendered `s0`, `s1`, ….
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Slot(u32);

impl Slot {
  #[inline(always)]
  pub const fn new(label: u32) -> Slot {
    Slot(label)
  }

  #[inline(always)]
  pub fn label(self) -> u32 {
    self.0
  }

  /// The label as a `usize`. Leader-edge argument tuples store *positions* as slots, so this is
  /// also the position decode used by `find`.
  #[inline(always)]
  pub fn idx(self) -> usize {
    self.0 as usize
  }
}

impl Formattable for Slot {
  fn repr(&self, out: &mut dyn std::fmt::Write, _style: FormatStyle) -> std::fmt::Result {
    write!(out, "s{}", self.0)
  }
}

impl_display_debug_for_formattable!(Slot);

/// A class identifier: opaque, dense, monotonically assigned, never reused. Rendered `id0`,
/// `id1`, ….
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Id(pub(crate) u32);

impl Id {
  #[inline(always)]
  pub fn idx(self) -> usize {
    self.0 as usize
  }
}

impl Formattable for Id {
  fn repr(&self, out: &mut dyn std::fmt::Write, _style: FormatStyle) -> std::fmt::Result {
    write!(out, "id{}", self.0)
  }
}

impl_display_debug_for_formattable!(Id);

/// Argument tuples are short (arities are typically ≤ 8), so they are stored inline.
pub type SlotVec = SmallVec<Slot, 8>;

/// A class id together with an ordered tuple of slot arguments, one per slot of the class.
/// Equality is structural.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AppliedId {
  pub id:   Id,
  pub args: SlotVec,
}

impl AppliedId {
  #[inline(always)]
  pub fn new(id: Id, args: SlotVec) -> AppliedId {
    AppliedId { id, args }
  }

  /// Convenience constructor from raw labels.
  pub fn from_labels(id: Id, labels: &[u32]) -> AppliedId {
    AppliedId {
      id,
      args: labels.iter().map(|&label| Slot::new(label)).collect(),
    }
  }

  #[inline(always)]
  pub fn arity(&self) -> usize {
    self.args.len()
  }

  /// The set of labels occurring in the argument tuple. Repeated labels collapse.
  pub fn slot_set(&self) -> NatSet {
    self.args.iter().map(|s| s.idx()).collect()
  }
}

impl Formattable for AppliedId {
  fn repr(&self, out: &mut dyn std::fmt::Write, style: FormatStyle) -> std::fmt::Result {
    self.id.repr(out, style)?;
    if !self.args.is_empty() {
      write!(out, "[{}]", join_string(self.args.iter(), ", "))?;
    }
    Ok(())
  }
}

impl_display_debug_for_formattable!(AppliedId);
