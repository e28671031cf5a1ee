/*!

The slotted union-find.

Every equivalence class exposes a declared number of slots, and equalities are stated between
applied ids. A class is in exactly one of two states, and the transition is one-way:

- **Canonical.** The class carries a [`PermGroup`] of the slot symmetries it satisfies with
  itself. `find` resolves to canonical classes.
- **Redirected.** The class carries a *leader edge*: an applied id pointing at another class,
  whose argument tuple is a position renaming. If `id7[s0, s1, s2] -> id3[s2, s1]` is a leader
  edge, then `id7[a, b, c]` simplifies to `id3[c, b]`: the leader's tuple selects positions out
  of the incoming tuple.

Unioning two applied ids may do three different things, depending on what canonicalization
reveals: equalize the slot *sets* by quotienting out redundant slots (each side learns to ignore
the slots the other side never mentions), absorb a self-symmetry into a class's group, or install
a leader edge and transfer the now-redirected class's symmetries to its leader.

All failure modes are programming-contract violations (arity mismatches, unknown ids,
out-of-range positions) and are fatal at the earliest detectable point; the structure is purely
in-memory and has no partial-failure recovery.

*/

use std::fmt::Write;

use slotted_abs::{debug, join_string, trace, NatSet};

use crate::core::{
  format::{FormatStyle, Formattable},
  permutation::{identity_perm, Perm, PermGroup},
  shape::reorder_pair,
  slot::{AppliedId, Id, Slot, SlotVec},
};
use crate::impl_display_debug_for_formattable;

/// One equivalence class.
pub struct Class {
  /// Current declared slot count. Only ever shrinks, and only by being superseded through a
  /// leader edge to a fresh smaller class.
  arity: u32,
  /// `Some` iff the class is canonical.
  group: Option<PermGroup>,
  /// `Some` iff the class has been redirected.
  leader: Option<AppliedId>,
}

impl Class {
  fn new(arity: u32) -> Class {
    Class {
      arity,
      group: Some(PermGroup::new(arity)),
      leader: None,
    }
  }

  #[inline(always)]
  pub fn arity(&self) -> u32 {
    self.arity
  }

  #[inline(always)]
  pub fn is_canonical(&self) -> bool {
    self.leader.is_none()
  }

  #[inline(always)]
  pub fn leader(&self) -> Option<&AppliedId> {
    self.leader.as_ref()
  }

  /// The symmetry group, present only while the class is canonical. A redirected class defers
  /// to the group of its `find` target.
  #[inline(always)]
  pub fn group(&self) -> Option<&PermGroup> {
    self.group.as_ref()
  }
}

/// The union-find proper: a flat table of classes keyed by [`Id`]. Classes reference one another
/// only through ids, so no heap cycles exist.
#[derive(Default)]
pub struct SlottedUf {
  classes: Vec<Class>,
}

impl SlottedUf {
  #[inline(always)]
  pub fn new() -> SlottedUf {
    Self::default()
  }

  #[inline(always)]
  pub fn class_count(&self) -> usize {
    self.classes.len()
  }

  /// Creates a fresh canonical class of the given arity with a trivial symmetry group.
  pub fn alloc(&mut self, arity: u32) -> Id {
    let id = Id(self.classes.len() as u32);
    self.classes.push(Class::new(arity));
    trace!(5, "alloc {} with arity {}", id, arity);
    id
  }

  fn class(&self, id: Id) -> &Class {
    assert!(id.idx() < self.classes.len(), "unknown class {}", id);
    &self.classes[id.idx()]
  }

  #[inline(always)]
  pub fn arity_of(&self, id: Id) -> u32 {
    self.class(id).arity
  }

  #[inline(always)]
  pub fn is_canonical(&self, id: Id) -> bool {
    self.class(id).is_canonical()
  }

  #[inline(always)]
  pub fn leader_of(&self, id: Id) -> Option<&AppliedId> {
    self.class(id).leader()
  }

  /// The symmetry group of a canonical class. Fatal on a redirected class; resolve through
  /// `find` first.
  pub fn group_of(&self, id: Id) -> &PermGroup {
    self.class(id)
        .group()
        .unwrap_or_else(|| panic!("{} is redirected and carries no group", id))
  }

  fn group_mut(&mut self, id: Id) -> &mut PermGroup {
    self.classes[id.idx()]
        .group
        .as_mut()
        .unwrap_or_else(|| panic!("{} is redirected and carries no group", id))
  }

  fn check_applied(&self, x: &AppliedId) {
    let arity = self.class(x.id).arity;
    assert_eq!(
      x.args.len() as u32,
      arity,
      "argument tuple of {} does not match the declared arity {}",
      x,
      arity
    );
  }

  /// Resolves an applied id to its canonical class, composing the position renaming of every
  /// leader edge along the way. The result's class has no leader.
  pub fn find(&self, x: &AppliedId) -> AppliedId {
    self.check_applied(x);
    let mut x = x.clone();
    loop {
      let Some(leader) = self.class(x.id).leader() else {
        return x;
      };
      let args: SlotVec = leader.args.iter().map(|p| x.args[p.idx()]).collect();
      x = AppliedId::new(leader.id, args);
    }
  }

  /// Decides `x = y` in the quotient. Two applied ids of one canonical class are equal iff some
  /// symmetry of the class maps one argument tuple to the other.
  pub fn is_equal(&self, x: &AppliedId, y: &AppliedId) -> bool {
    let x = self.find(x);
    let y = self.find(y);
    if x.id != y.id {
      return false;
    }
    if x == y {
      // Structurally identical; in particular this keeps reflexivity for tuples with repeated
      // labels, which relabel to non-permutations below.
      return true;
    }
    // With `x` first, `x` relabels to the identity tuple, so `y`'s relabeled tuple is exactly
    // the candidate symmetry to look up.
    let (_, _x, y) = reorder_pair(&x, &y);
    self.group_of(y.id).contains(&args_to_perm(&y.args))
  }

  /// Establishes the equation `x = y` in the quotient. Monotonic: never removes equalities.
  pub fn union(&mut self, x: &AppliedId, y: &AppliedId) {
    debug!(3, "union: {} = {}", x, y);
    let mut x = x.clone();
    let mut y = y.clone();

    // Phase 1: equalize the slot sets. If x mentions a slot that y does not, then
    // `x[…, b, …] = y[…] = x[…, c, …]` for a fresh c, so x cannot depend on that position;
    // quotient it out and retry. Each round shrinks an arity, so the loop terminates.
    loop {
      x = self.find(&x);
      y = self.find(&y);
      let x_slots = x.slot_set();
      let y_slots = y.slot_set();
      if x_slots == y_slots {
        break;
      }
      self.mark_slots_redundant(&x, &x_slots.difference(&y_slots));
      self.mark_slots_redundant(&y, &y_slots.difference(&x_slots));
    }
    debug_assert_eq!(x.slot_set(), y.slot_set());

    if self.is_equal(&x, &y) {
      return;
    }

    let (_, x, y) = reorder_pair(&x, &y);

    if x.id == y.id {
      // A self-equation: x relabeled to the identity tuple, so y's tuple is a new symmetry.
      debug!(4, "union: absorbing symmetry {} into the group of {}", y, x.id);
      self.group_mut(x.id).add(args_to_perm(&y.args));
    } else {
      self.add_uf_edge(x.id, y);
    }
  }

  /// Quotients out slot positions a class provably does not depend on. Named positions are
  /// expanded by their orbits: a symmetry maps a redundant position to every orbit member, so
  /// the whole orbit is redundant. The class is superseded by a fresh class of smaller arity.
  pub fn mark_slots_redundant(&mut self, x: &AppliedId, slots: &NatSet) {
    let x = self.find(x);

    let mut redundant = NatSet::new();
    for s in slots.iter() {
      // First occurrence decides the position; repeated labels are either interchangeable via a
      // symmetry already in the group, or collapse at the leader.
      let Some(position) = x.args.iter().position(|a| a.idx() == s) else {
        continue;
      };
      redundant.union_in_place(&self.group_of(x.id).orbit(position as u32));
    }

    if redundant.is_empty() {
      return;
    }

    let old_arity = self.arity_of(x.id);
    let new_arity = old_arity - redundant.len() as u32;
    debug!(
      4,
      "marking positions {} of {} redundant, arity {} -> {}",
      redundant,
      x.id,
      old_arity,
      new_arity
    );

    let y = self.alloc(new_arity);
    // Keep the surviving positions in their original order.
    let args: SlotVec = (0..old_arity)
        .filter(|p| !redundant.contains(*p as usize))
        .map(Slot::new)
        .collect();
    self.add_uf_edge(x.id, AppliedId::new(y, args));
  }

  /// Installs `leader(src) = tgt` and transfers the source's symmetries to the target: each
  /// group element is an equation between two applied ids of the source, both of which now
  /// route through the fresh edge.
  fn add_uf_edge(&mut self, src: Id, tgt: AppliedId) {
    assert!(src != tgt.id, "cannot redirect {} to itself", src);
    assert!(self.class(src).is_canonical(), "{} is already redirected", src);
    debug!(4, "installing leader edge {} -> {}", src, tgt);

    let src_arity = self.arity_of(src);
    let tgt_arity = self.arity_of(tgt.id);
    assert_eq!(
      tgt.args.len() as u32,
      tgt_arity,
      "leader edge {} -> {} does not match the target arity {}",
      src,
      tgt,
      tgt_arity
    );
    for p in &tgt.args {
      assert!(
        (p.idx() as u32) < src_arity,
        "leader edge {} -> {} selects position {} beyond the source arity {}",
        src,
        tgt,
        p,
        src_arity
      );
    }

    self.classes[src.idx()].leader = Some(tgt.clone());

    // The source is no longer canonical and has no reason to keep a group; whoever wants its
    // symmetries asks the leader. Taking it now also frees `self` for the transfer below.
    let group = self.classes[src.idx()]
        .group
        .take()
        .unwrap_or_else(|| unreachable!("canonical {} had no group", src));

    let identity = perm_to_args(&identity_perm(src_arity));
    for p in group.iter() {
      // The source-class equation this permutation stands for, pushed through the new edge.
      let lhs = self.find(&AppliedId::new(src, identity.clone()));
      let rhs = self.find(&AppliedId::new(src, perm_to_args(p)));
      let (_, _lhs, rhs) = reorder_pair(&lhs, &rhs);

      for s in &rhs.args {
        assert!(
          (s.idx() as u32) < tgt_arity,
          "inherited symmetry ({}) escapes the arity {} of {}",
          join_string(rhs.args.iter(), ", "),
          tgt_arity,
          tgt.id
        );
      }
      self.group_mut(tgt.id).add(args_to_perm(&rhs.args));
    }
  }

  /// Walks the whole table and checks every structural invariant. Intended for tests and
  /// debugging; fatal on the first violation.
  pub fn assert_invariants(&self) {
    for (i, class) in self.classes.iter().enumerate() {
      let id = Id(i as u32);
      assert!(
        class.group.is_some() != class.leader.is_some(),
        "{} must carry exactly one of group and leader",
        id
      );

      if let Some(leader) = class.leader() {
        assert_eq!(
          leader.args.len() as u32,
          self.arity_of(leader.id),
          "leader edge of {} does not match the arity of {}",
          id,
          leader.id
        );
        for p in &leader.args {
          assert!(
            (p.idx() as u32) < class.arity,
            "leader edge of {} selects a position beyond its arity",
            id
          );
        }
      }

      if let Some(group) = class.group() {
        assert_eq!(group.arity(), class.arity, "group arity of {} diverged", id);
        assert!(group.contains(&identity_perm(class.arity)), "group of {} lost the identity", id);
      }

      // The leader graph is acyclic: chasing edges terminates.
      let mut cursor = id;
      let mut hops = 0;
      while let Some(leader) = self.leader_of(cursor) {
        cursor = leader.id;
        hops += 1;
        assert!(hops <= self.classes.len(), "leader cycle reachable from {}", id);
      }
    }
  }
}

impl Formattable for SlottedUf {
  fn repr(&self, out: &mut dyn std::fmt::Write, style: FormatStyle) -> std::fmt::Result {
    for (i, class) in self.classes.iter().enumerate() {
      let id = Id(i as u32);
      match (&class.leader, &class.group) {
        (Some(leader), _) => writeln!(out, "{} -> {}", id, leader)?,
        (None, Some(group)) => {
          write!(out, "{}: arity {}", id, class.arity)?;
          if style == FormatStyle::Debug || group.len() > 1 {
            write!(out, ", group {}", group)?;
          }
          writeln!(out)?;
        }
        (None, None) => unreachable!("{} carries neither leader nor group", id),
      }
    }
    Ok(())
  }
}

impl_display_debug_for_formattable!(SlottedUf);

// Group permutations act on positions. After a reorder the canonical labels coincide with
// positions, so the conversions are plain label/position reinterpretations.

fn args_to_perm(args: &SlotVec) -> Perm {
  args.iter().map(|s| s.label()).collect()
}

fn perm_to_args(p: &Perm) -> SlotVec {
  p.iter().map(|&i| Slot::new(i)).collect()
}
