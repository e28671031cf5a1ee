/*!

Permutation groups over slot positions.

A class of arity `n` may satisfy *self-symmetries*: equations of the form
`id[p(0), …, p(n-1)] = id[0, …, n-1]`. The permutations `p` witnessing such equations form a
group under composition, and every class carries one (canonical classes only; a redirected class
defers to its leader's group).

`PermGroup` is the most naive faithful representation: the explicit set of permutations, closed
under composition. The closure is O(|G|²) per fixed-point round and the set is bounded by `n!`,
which is acceptable because arities in practice are small. A Schreier–Sims stabilizer chain could
be substituted without changing any externally visible behavior.

*/

use std::fmt::Write;

use slotted_abs::{join_string, HashSet, NatSet, SmallVec};

use crate::core::format::{FormatStyle, Formattable};
use crate::impl_display_debug_for_formattable;

/// A permutation of slot positions, stored as the image tuple `(p[0], …, p[n-1])`.
///
/// Everything a symmetry equation inserts into a group is a bijection on `0..n`; the type itself
/// does not enforce bijectivity.
pub type Perm = SmallVec<u32, 8>;

/// The identity permutation on `0..arity`.
#[inline(always)]
pub fn identity_perm(arity: u32) -> Perm {
  (0..arity).collect()
}

/// Composition of permutations: `compose(x, y)[i] = x[y[i]]`.
pub fn compose(x: &Perm, y: &Perm) -> Perm {
  assert_eq!(x.len(), y.len(), "composed permutations must have matching lengths");
  y.iter().map(|&i| x[i as usize]).collect()
}

/// The self-symmetries of one class's slot arguments: a set of permutations containing the
/// identity and closed under composition.
#[derive(Clone, PartialEq, Eq)]
pub struct PermGroup {
  arity: u32,
  perms: HashSet<Perm>,
}

impl PermGroup {
  /// The trivial group on `0..arity`, containing only the identity.
  pub fn new(arity: u32) -> PermGroup {
    let mut perms = HashSet::new();
    perms.insert(identity_perm(arity));
    PermGroup { arity, perms }
  }

  #[inline(always)]
  pub fn arity(&self) -> u32 {
    self.arity
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.perms.len()
  }

  /// Inserts a permutation and re-closes the set under composition.
  pub fn add(&mut self, p: Perm) {
    assert_eq!(
      p.len() as u32,
      self.arity,
      "permutation length {} does not match group arity {}",
      p.len(),
      self.arity
    );
    self.perms.insert(p);
    self.complete();
  }

  // Closes the set under composition: repeatedly unions `{ x ∘ y | x, y ∈ G }` into `G` until
  // the size is stable.
  fn complete(&mut self) {
    loop {
      let size = self.perms.len();

      let mut new = Vec::new();
      for x in &self.perms {
        for y in &self.perms {
          let composed = compose(x, y);
          if !self.perms.contains(&composed) {
            new.push(composed);
          }
        }
      }
      self.perms.extend(new);

      if self.perms.len() == size {
        break;
      }
    }
  }

  #[inline(always)]
  pub fn contains(&self, p: &Perm) -> bool {
    self.perms.contains(p)
  }

  /// The orbit of position `s`: `{ p[s] | p ∈ G }`. Always contains `s` itself, via the
  /// identity.
  pub fn orbit(&self, s: u32) -> NatSet {
    assert!(s < self.arity, "position {} out of range for group arity {}", s, self.arity);
    self.perms.iter().map(|p| p[s as usize] as usize).collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Perm> {
    self.perms.iter()
  }
}

impl Formattable for PermGroup {
  fn repr(&self, out: &mut dyn std::fmt::Write, _style: FormatStyle) -> std::fmt::Result {
    // Sorted for deterministic output; the backing set has no order.
    let mut perms: Vec<&Perm> = self.perms.iter().collect();
    perms.sort_by(|a, b| a.iter().cmp(b.iter()));
    let rendered = perms
        .iter()
        .map(|p| format!("({})", join_string(p.iter(), ", ")));
    write!(out, "{{{}}}", join_string(rendered, ", "))
  }
}

impl_display_debug_for_formattable!(PermGroup);

#[cfg(test)]
mod tests {
  use super::*;
  use slotted_abs::smallvec;

  #[test]
  fn trivial_group() {
    let g = PermGroup::new(3);
    assert_eq!(g.len(), 1);
    assert!(g.contains(&identity_perm(3)));
  }

  #[test]
  fn compose_applies_right_to_left() {
    let x: Perm = smallvec![1, 2, 0];
    let y: Perm = smallvec![2, 0, 1];
    assert_eq!(compose(&x, &y), identity_perm(3));
  }

  #[test]
  fn four_cycle_generates_cyclic_group() {
    let mut g = PermGroup::new(4);
    g.add(smallvec![1, 2, 3, 0]);
    // The 4-cycle generates all four rotations and nothing else.
    assert!(g.contains(&smallvec![2, 3, 0, 1]));
    assert_eq!(g.len(), 4);
  }

  #[test]
  fn closure_is_a_fixed_point() {
    let mut g = PermGroup::new(3);
    g.add(smallvec![1, 0, 2]);
    g.add(smallvec![0, 2, 1]);
    // Two transpositions generate all of S3.
    assert_eq!(g.len(), 6);
    for x in g.iter() {
      for y in g.iter() {
        assert!(g.contains(&compose(x, y)));
      }
    }
  }

  #[test]
  fn orbit_contains_the_position_itself() {
    let mut g = PermGroup::new(4);
    g.add(smallvec![1, 0, 2, 3]);
    assert_eq!(g.orbit(0), [0usize, 1].into_iter().collect());
    assert_eq!(g.orbit(2), [2usize].into_iter().collect());
  }

  #[test]
  #[should_panic(expected = "permutation length")]
  fn mismatched_length_is_fatal() {
    let mut g = PermGroup::new(3);
    g.add(smallvec![1, 0]);
  }
}
