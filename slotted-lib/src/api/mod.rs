/*!

The public API of the library: uninterpreted function nodes and the hashconsing e-graph, plus
reexports of the engine types clients handle directly.

*/

pub mod egraph;
pub mod fn_node;

pub use egraph::EGraph;
pub use fn_node::{ChildVec, FnNode};

// The engine types clients touch.
pub use crate::core::{AppliedId, Id, PermGroup, Slot, SlotVec, SlottedUf};
