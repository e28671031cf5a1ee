/*!

A *slotted* union-find and a minimal e-graph layered on top of it.

A classical union-find tracks equalities between opaque ids. Here every equivalence class
additionally exposes a fixed number of *slots*, symbolic parameter positions, and equalities are
stated between *applied ids*: a class id together with a tuple of slot arguments. Two applied ids
of one class can be equal without being identical when the class satisfies a permutation symmetry
of its slots, and a class can lose slots over time when an equation proves that it never depended
on one of them.

The [`core`] module holds the engine: permutation groups, shape reordering, and the union-find
itself. The [`api`] module holds the client surface: uninterpreted function nodes and the
hashconsing e-graph.

```
use slotted_lib::api::{AppliedId, SlottedUf};

let mut uf = SlottedUf::new();
let a = uf.alloc(2);
let x = AppliedId::from_labels(a, &[0, 1]);
let y = AppliedId::from_labels(a, &[1, 0]);
assert!(!uf.is_equal(&x, &y));
uf.union(&x, &y);   // `a` is now symmetric in its two slots
assert!(uf.is_equal(&x, &y));
```

*/

pub mod api;
pub mod core;

#[cfg(test)]
mod tests;
