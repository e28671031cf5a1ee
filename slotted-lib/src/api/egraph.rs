/*!

A minimal e-graph over the slotted union-find: a hashcons from canonical function-node shapes to
applied ids.

Shape canonicalization factors arbitrary slot renamings out of a node before lookup: children are
resolved through `find`, then relabeled to minimal labels. Structurally distinct nodes that
differ only by a renaming therefore share one hashcons entry, and the stored applied id is
translated back into the caller's labels through the inverse renaming.

`union` delegates the equation to the union-find and then restores the hashcons invariant with
[`EGraph::rebuild`]: every key canonical under the current `find` and reordering, every value
resolved, and colliding shapes merged. The stored value of an entry only ever mentions slots its
key mentions; when a union makes a child shed a slot that the value still carries, the value's
class cannot depend on that slot either, and the rebuild quotients it out.

*/

use std::collections::hash_map::Entry;

use slotted_abs::{debug, HashMap, NatSet};

use crate::api::fn_node::FnNode;
use crate::core::{
  reorder,
  slot::{AppliedId, Id, Slot, SlotVec},
  SlottedUf,
};

#[derive(Default)]
pub struct EGraph {
  hashcons: HashMap<FnNode, AppliedId>,
  suf:      SlottedUf,
}

impl EGraph {
  #[inline(always)]
  pub fn new() -> EGraph {
    Self::default()
  }

  /// The number of distinct canonical shapes currently hashconsed.
  #[inline(always)]
  pub fn node_count(&self) -> usize {
    self.hashcons.len()
  }

  /// Read-only view of the underlying union-find. Mutation goes through [`EGraph::union`] so
  /// that the hashcons invariant is restored afterwards.
  #[inline(always)]
  pub fn uf(&self) -> &SlottedUf {
    &self.suf
  }

  /// Creates a fresh leaf class of the given arity.
  #[inline(always)]
  pub fn alloc(&mut self, arity: u32) -> Id {
    self.suf.alloc(arity)
  }

  #[inline(always)]
  pub fn find(&self, x: &AppliedId) -> AppliedId {
    self.suf.find(x)
  }

  #[inline(always)]
  pub fn is_equal(&self, x: &AppliedId, y: &AppliedId) -> bool {
    self.suf.is_equal(x, y)
  }

  /// Adds a node, returning its class applied to the caller's slot labels. Nodes that differ
  /// only by a slot renaming share one class.
  pub fn add(&mut self, node: &FnNode) -> AppliedId {
    let children: Vec<AppliedId> = node.args.iter().map(|a| self.suf.find(a)).collect();
    let (map, children) = reorder(&children);
    let shape = FnNode::new(node.symbol.clone(), children.into_iter().collect());
    let inverse = map.inverse();

    if let Some(value) = self.hashcons.get(&shape) {
      // The stored id lives in the shape's canonical labels; translate back into the caller's.
      let value = self.suf.find(value);
      return AppliedId::new(value.id, inverse.apply_args(&value.args));
    }

    let arity = map.len() as u32;
    let id = self.suf.alloc(arity);
    let canonical_args: SlotVec = (0..arity).map(Slot::new).collect();
    let value = AppliedId::new(id, canonical_args);
    debug!(4, "hashcons miss: {} stored as {}", shape, value);

    let result = AppliedId::new(id, inverse.apply_args(&value.args));
    self.hashcons.insert(shape, value);
    result
  }

  /// Establishes `x = y` and restores the hashcons invariant.
  pub fn union(&mut self, x: &AppliedId, y: &AppliedId) {
    self.suf.union(x, y);
    self.rebuild();
  }

  /// Re-canonicalizes every hashcons entry under the current `find` and reordering, merging
  /// entries whose shapes collide, until a fixed point is reached.
  pub fn rebuild(&mut self) {
    loop {
      let mut changed = false;
      let entries: Vec<(FnNode, AppliedId)> = self.hashcons.drain().collect();
      let mut fresh: HashMap<FnNode, AppliedId> = HashMap::with_capacity(entries.len());
      let mut pending: Vec<(AppliedId, AppliedId)> = Vec::new();

      for (shape, value) in entries {
        let children: Vec<AppliedId> = shape.args.iter().map(|a| self.suf.find(a)).collect();
        let (map, children) = reorder(&children);
        let canonical = FnNode::new(shape.symbol, children.into_iter().collect());

        let mut value = self.suf.find(&value);
        // A slot the defining node no longer mentions cannot matter to the node's class.
        let stale: NatSet = value
            .args
            .iter()
            .filter(|s| map.get(**s).is_none())
            .map(|s| s.idx())
            .collect();
        if !stale.is_empty() {
          self.suf.mark_slots_redundant(&value, &stale);
          value = self.suf.find(&value);
          changed = true;
        }
        let value = AppliedId::new(value.id, map.apply_args(&value.args));

        match fresh.entry(canonical) {
          Entry::Occupied(entry) => {
            pending.push((entry.get().clone(), value));
          }
          Entry::Vacant(entry) => {
            entry.insert(value);
          }
        }
      }

      self.hashcons = fresh;

      if !pending.is_empty() {
        changed = true;
        debug!(4, "rebuild: merging {} colliding shapes", pending.len());
        for (a, b) in pending {
          self.suf.union(&a, &b);
        }
      }

      if !changed {
        break;
      }
    }
  }
}
