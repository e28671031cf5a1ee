/*!

Canonical relabeling of slot tuples, also called the *shape* computation.

Two tuples of applied ids that differ only by a consistent renaming of slots describe the same
shape. `reorder` factors the renaming out: every slot occurring in the input is mapped to a
minimal fresh label in first-encounter order, left-to-right across the tuple and left-to-right
within each argument list. The ids themselves stay unchanged, and the result is the
lexicographically minimal relabeling reachable by a global injection of the occurring slots.

E.g. `(id2[s4, s2, s1], id5[s0, s1, s3, s4])` reorders to
`(id2[s0, s1, s2], id5[s3, s2, s4, s0])`.

In particular, when the first applied id has pairwise distinct slots, it relabels to the identity
tuple `(s0, s1, …)`; the union-find leans on this to read a candidate symmetry directly off the
second tuple.

*/

use slotted_abs::HashMap;

use crate::core::slot::{AppliedId, Slot, SlotVec};

/// An injective renaming of slots, built up in first-encounter order. The `reorder` functions
/// produce one; its inverse translates canonical labels back into caller labels.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
  map: HashMap<Slot, Slot>,
  /// Pairs in insertion order, for deterministic iteration and inversion.
  pairs: Vec<(Slot, Slot)>,
}

impl SlotMap {
  #[inline(always)]
  pub fn new() -> SlotMap {
    Self::default()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.pairs.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  #[inline(always)]
  pub fn get(&self, s: Slot) -> Option<Slot> {
    self.map.get(&s).copied()
  }

  /// The image of `s`, which must be present in the map.
  pub fn apply(&self, s: Slot) -> Slot {
    self.get(s).unwrap_or_else(|| panic!("slot {} is not in the map", s))
  }

  /// Applies the map to every entry of an argument tuple.
  pub fn apply_args(&self, args: &SlotVec) -> SlotVec {
    args.iter().map(|&s| self.apply(s)).collect()
  }

  /// Maps `s` to the next fresh minimal label unless it is already mapped; returns the image
  /// either way.
  pub fn bind_next(&mut self, s: Slot) -> Slot {
    if let Some(t) = self.get(s) {
      return t;
    }
    let t = Slot::new(self.pairs.len() as u32);
    self.insert(s, t);
    t
  }

  /// Swaps keys and values. Always well-defined because the map is injective by construction.
  pub fn inverse(&self) -> SlotMap {
    let mut inverse = SlotMap::new();
    for &(s, t) in &self.pairs {
      inverse.insert(t, s);
    }
    inverse
  }

  /// Iterates over `(source, image)` pairs in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (Slot, Slot)> + '_ {
    self.pairs.iter().copied()
  }

  fn insert(&mut self, s: Slot, t: Slot) {
    let previous = self.map.insert(s, t);
    assert!(previous.is_none(), "slot {} is already mapped", s);
    self.pairs.push((s, t));
  }
}

/// Relabels a tuple of applied ids to minimal slot labels, returning the renaming alongside the
/// relabeled tuple. Pure: equal inputs produce equal outputs.
pub fn reorder(app_ids: &[AppliedId]) -> (SlotMap, Vec<AppliedId>) {
  let mut map = SlotMap::new();
  let mut out = Vec::with_capacity(app_ids.len());
  for a in app_ids {
    let args: SlotVec = a.args.iter().map(|&s| map.bind_next(s)).collect();
    out.push(AppliedId::new(a.id, args));
  }
  (map, out)
}

/// `reorder` specialized to the pair case, which is what equation canonicalization uses.
pub fn reorder_pair(x: &AppliedId, y: &AppliedId) -> (SlotMap, AppliedId, AppliedId) {
  let (map, out) = reorder(&[x.clone(), y.clone()]);
  (map, out[0].clone(), out[1].clone())
}
