/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is the `IString` type, an interned string type. A number of external crates
could provide this functionality. This module redirects to whatever chosen implementation we want.
To use the [`string_cache` crate](https://crates.io/crates/string_cache), we just define `IString`
as an alias for `string_cache::DefaultAtom`:

```ignore
pub use string_cache::DefaultAtom as IString;
```

If we want to later change to the [`ustr` crate](https://crates.io/crates/ustr), we just define
`IString` to be an alias for `ustr::Ustr` instead.

For types or infrastructure with very different backing implementations, we define an abstraction
layer over the implementation. For example, the `log` module could use any of a number of logging
frameworks or even a bespoke solution for its implementation. However, its (crate) public
interface consists only of `set_global_logging_threshold()`/`get_global_logging_threshold()` and
the macros `critical!`, `error!`, `warning!`, `info!`, `debug!`, and `trace!`. The (private)
backing implementation is encapsulated in the `log` module.

*/

mod nat_set;
mod string_util;

pub mod log;

// region Hashing data structures
pub use std::collections::HashSet;
pub use std::collections::HashMap;

// For vectors that are expected to have few or zero elements, e.g. slot tuples.
pub use smallvec::{SmallVec, smallvec};
// endregion

// Logging
pub use tracing;

// Interned string. `DefaultAtom` is a global cache that can be used across threads.
pub use string_cache::DefaultAtom as IString;

// A set of (small) natural numbers
pub use nat_set::NatSet;

// Join sequences with a separator
pub use string_util::join_string;
