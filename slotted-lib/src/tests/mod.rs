/*!

Whole-engine tests: randomized properties and end-to-end scenarios that exercise the union-find,
the groups, the reorderer, and the e-graph together rather than a single module. Randomized tests
use fixed seeds, so they are deterministic.

*/

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::api::{EGraph, FnNode};
use crate::core::{compose, reorder, AppliedId, Id, Slot, SlotVec, SlottedUf};

fn rng(seed: u64) -> StdRng {
  StdRng::seed_from_u64(seed)
}

/// A random applied id with pairwise-distinct labels drawn from a small space. Equation inputs
/// use this: a repeated label in an equation would state that a class ignores the distinction
/// between two of its positions, and everything inserted into a symmetry group has to stay a
/// bijection.
fn random_applied(rng: &mut StdRng, uf: &SlottedUf) -> AppliedId {
  let id = Id(rng.gen_range(0..uf.class_count() as u32));
  let mut labels: Vec<u32> = (0..8).collect();
  labels.shuffle(rng);
  let args: SlotVec = labels
      .into_iter()
      .take(uf.arity_of(id) as usize)
      .map(Slot::new)
      .collect();
  AppliedId::new(id, args)
}

/// A random applied id whose labels may repeat. Only for read-only probes (`find`, `is_equal`,
/// `reorder`), which are total on any well-formed tuple.
fn random_probe(rng: &mut StdRng, uf: &SlottedUf) -> AppliedId {
  let id = Id(rng.gen_range(0..uf.class_count() as u32));
  let args: SlotVec = (0..uf.arity_of(id))
      .map(|_| Slot::new(rng.gen_range(0..8)))
      .collect();
  AppliedId::new(id, args)
}

fn random_uf(rng: &mut StdRng, class_count: usize, union_count: usize) -> SlottedUf {
  let mut uf = SlottedUf::new();
  for _ in 0..class_count {
    uf.alloc(rng.gen_range(0..=4));
  }
  for _ in 0..union_count {
    let x = random_applied(rng, &uf);
    let y = random_applied(rng, &uf);
    uf.union(&x, &y);
  }
  uf
}

#[test]
fn is_equal_is_reflexive() {
  let mut rng = rng(1);
  for _ in 0..10 {
    let uf = random_uf(&mut rng, 6, 8);
    for _ in 0..40 {
      let x = random_probe(&mut rng, &uf);
      assert!(uf.is_equal(&x, &x), "{} is not equal to itself", x);
    }
  }
}

#[test]
fn union_implies_equality() {
  let mut rng = rng(2);
  for _ in 0..20 {
    let mut uf = random_uf(&mut rng, 6, 4);
    for _ in 0..8 {
      let x = random_applied(&mut rng, &uf);
      let y = random_applied(&mut rng, &uf);
      uf.union(&x, &y);
      assert!(uf.is_equal(&x, &y), "union of {} and {} did not make them equal", x, y);
    }
    uf.assert_invariants();
  }
}

#[test]
fn unions_never_remove_equalities() {
  let mut rng = rng(3);
  for _ in 0..10 {
    let mut uf = random_uf(&mut rng, 6, 6);

    // Harvest pairs that are currently equal, including non-identical ones routed through
    // leader edges and symmetries.
    let mut equal_pairs = Vec::new();
    for _ in 0..60 {
      let x = random_probe(&mut rng, &uf);
      equal_pairs.push((x.clone(), uf.find(&x)));
      let y = random_probe(&mut rng, &uf);
      if uf.is_equal(&x, &y) {
        equal_pairs.push((x, y));
      }
    }

    for _ in 0..4 {
      let x = random_applied(&mut rng, &uf);
      let y = random_applied(&mut rng, &uf);
      uf.union(&x, &y);
      for (p, q) in &equal_pairs {
        assert!(uf.is_equal(p, q), "union of {} and {} broke {} = {}", x, y, p, q);
      }
    }
  }
}

#[test]
fn find_is_idempotent_everywhere() {
  let mut rng = rng(4);
  for _ in 0..10 {
    let uf = random_uf(&mut rng, 8, 10);
    for _ in 0..40 {
      let x = random_probe(&mut rng, &uf);
      let once = uf.find(&x);
      assert_eq!(once, uf.find(&once));
      assert!(uf.is_canonical(once.id));
    }
  }
}

#[test]
fn leader_edges_satisfy_the_arity_law() {
  let mut rng = rng(5);
  for _ in 0..10 {
    let uf = random_uf(&mut rng, 8, 12);
    for i in 0..uf.class_count() {
      let id = Id(i as u32);
      let Some(leader) = uf.leader_of(id) else {
        continue;
      };
      // The edge's tuple has one entry per target slot, each selecting a source position.
      assert_eq!(leader.args.len() as u32, uf.arity_of(leader.id));
      for p in &leader.args {
        assert!((p.idx() as u32) < uf.arity_of(id));
      }
    }
  }
}

#[test]
fn groups_stay_closed_under_composition() {
  let mut rng = rng(6);
  for _ in 0..10 {
    let uf = random_uf(&mut rng, 6, 10);
    for i in 0..uf.class_count() {
      let id = Id(i as u32);
      if !uf.is_canonical(id) {
        continue;
      }
      let group = uf.group_of(id);
      for x in group.iter() {
        for y in group.iter() {
          assert!(group.contains(&compose(x, y)));
        }
      }
    }
  }
}

#[test]
fn redundancy_strictly_shrinks_arities() {
  let mut rng = rng(7);
  for _ in 0..20 {
    let mut uf = SlottedUf::new();
    let a = uf.alloc(2);
    let b = uf.alloc(2);
    let shared = rng.gen_range(0..4u32);
    // One shared slot, one private to each side.
    let x = AppliedId::from_labels(a, &[shared, 4]);
    let y = AppliedId::from_labels(b, &[shared, 5]);
    uf.union(&x, &y);

    assert!(uf.arity_of(uf.find(&x).id) < 2);
    assert!(uf.arity_of(uf.find(&y).id) < 2);
    uf.assert_invariants();
  }
}

#[test]
fn reordering_is_a_fixed_point_on_random_tuples() {
  let mut rng = rng(8);
  let uf = random_uf(&mut rng, 6, 0);
  for _ in 0..50 {
    let tuple: Vec<AppliedId> = (0..rng.gen_range(1..4))
        .map(|_| random_probe(&mut rng, &uf))
        .collect();
    let (_, once) = reorder(&tuple);
    let (_, twice) = reorder(&once);
    assert_eq!(once, twice);
  }
}

#[test]
fn invariants_survive_a_long_random_run() {
  let mut rng = rng(9);
  let mut uf = SlottedUf::new();
  for _ in 0..12 {
    uf.alloc(rng.gen_range(0..=4));
  }
  for step in 0..60 {
    let x = random_applied(&mut rng, &uf);
    let y = random_applied(&mut rng, &uf);
    uf.union(&x, &y);
    if step % 10 == 0 {
      uf.assert_invariants();
    }
  }
  uf.assert_invariants();
}

#[test]
fn egraph_equalities_survive_rebuilds() {
  let mut rng = rng(10);
  let mut egraph = EGraph::new();
  let leaves: Vec<Id> = (0..4).map(|_| egraph.alloc(rng.gen_range(0..=2))).collect();

  // Build a few layers of nodes over the leaves.
  let mut nodes = Vec::new();
  for (i, &leaf) in leaves.iter().enumerate() {
    let args: SlotVec = (0..egraph.uf().arity_of(leaf))
        .map(|_| Slot::new(rng.gen_range(0..4)))
        .collect();
    let child = AppliedId::new(leaf, args);
    let symbol = if i % 2 == 0 { "f" } else { "g" };
    nodes.push(egraph.add(&FnNode::new(symbol.into(), [child].into_iter().collect())));
  }

  // Union a couple of leaves and make sure everything that was equal stays equal.
  let before: Vec<(AppliedId, AppliedId)> = nodes.iter().map(|n| (n.clone(), egraph.find(n))).collect();
  egraph.union(
    &AppliedId::new(leaves[0], (0..egraph.uf().arity_of(leaves[0])).map(Slot::new).collect()),
    &AppliedId::new(leaves[1], (0..egraph.uf().arity_of(leaves[1])).map(Slot::new).collect()),
  );

  for (p, q) in &before {
    assert!(egraph.is_equal(p, q));
  }
  egraph.uf().assert_invariants();
}
