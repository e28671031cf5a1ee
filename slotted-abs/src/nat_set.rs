/*!

A `NatSet` is a set of (small) natural numbers, backed by the
[`bit-set` crate](https://crates.io/crates/bit-set). Client code treats it as an opaque set of
`usize` values; the dense bit-vector representation is an implementation detail.

Two `NatSet`s compare equal iff they contain the same members, independent of how much capacity
either has allocated.

*/

use std::fmt::{Debug, Display, Formatter};

use bit_set::BitSet;

use crate::join_string;

#[derive(Clone, Default)]
pub struct NatSet(BitSet);

impl NatSet {
  #[inline(always)]
  pub fn new() -> NatSet {
    Self::default()
  }

  /// Inserts `value`, returning `true` if it was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  /// Removes `value`, returning `true` if it was present.
  #[inline(always)]
  pub fn remove(&mut self, value: usize) -> bool {
    self.0.remove(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterates over the members in increasing order.
  #[inline(always)]
  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }

  /// Unions `other` into `self`.
  #[inline(always)]
  pub fn union_in_place(&mut self, other: &NatSet) {
    self.0.union_with(&other.0);
  }

  /// The set of members of `self` that are not members of `other`.
  pub fn difference(&self, other: &NatSet) -> NatSet {
    let mut result = self.clone();
    result.0.difference_with(&other.0);
    result
  }
}

impl PartialEq for NatSet {
  // Member-wise equality; capacities are irrelevant.
  fn eq(&self, other: &NatSet) -> bool {
    self.0.is_subset(&other.0) && other.0.is_subset(&self.0)
  }
}

impl Eq for NatSet {}

impl FromIterator<usize> for NatSet {
  fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
    let mut set = NatSet::new();
    for value in iter {
      set.insert(value);
    }
    set
  }
}

impl Display for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}", join_string(self.iter(), ", "))
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}
