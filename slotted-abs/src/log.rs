/*!

Leveled logging for the engine.

The crate-public interface consists only of `set_global_logging_threshold()` /
`get_global_logging_threshold()`, `init_logging()`, and the macros `critical!`, `error!`,
`warning!`, `info!`, `debug!`, and `trace!`. Each macro takes a numeric verbosity level as its
first argument followed by a format string and arguments:

```
# use slotted_abs::debug;
# let src = 0;
# let tgt = 1;
debug!(5, "installing leader edge {} -> {}", src, tgt);
```

The message is emitted only if the level is at or below the global logging threshold. The backing
implementation is the [`tracing` crate](https://crates.io/crates/tracing) and is encapsulated in
this module; swapping it out does not touch any call site.

*/

use std::sync::atomic::{AtomicI32, Ordering};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static GLOBAL_LOGGING_THRESHOLD: AtomicI32 = AtomicI32::new(1);
static SUBSCRIBER_INSTALLED: OnceCell<()> = OnceCell::new();

/// Messages with a level at or below the threshold are emitted; the rest are discarded.
#[inline(always)]
pub fn set_global_logging_threshold(threshold: i32) {
  GLOBAL_LOGGING_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[inline(always)]
pub fn get_global_logging_threshold() -> i32 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::Relaxed)
}

/// Installs the default `tracing` subscriber, honoring `RUST_LOG` if it is set. Idempotent, and
/// a no-op if some other subscriber was installed first.
pub fn init_logging() {
  SUBSCRIBER_INSTALLED.get_or_init(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .try_init();
  });
}

#[macro_export]
macro_rules! critical {
  ($level:expr, $($arg:tt)+) => {
    if $level <= $crate::log::get_global_logging_threshold() {
      $crate::tracing::error!($($arg)+);
    }
  };
}

#[macro_export]
macro_rules! error {
  ($level:expr, $($arg:tt)+) => {
    if $level <= $crate::log::get_global_logging_threshold() {
      $crate::tracing::error!($($arg)+);
    }
  };
}

#[macro_export]
macro_rules! warning {
  ($level:expr, $($arg:tt)+) => {
    if $level <= $crate::log::get_global_logging_threshold() {
      $crate::tracing::warn!($($arg)+);
    }
  };
}

#[macro_export]
macro_rules! info {
  ($level:expr, $($arg:tt)+) => {
    if $level <= $crate::log::get_global_logging_threshold() {
      $crate::tracing::info!($($arg)+);
    }
  };
}

#[macro_export]
macro_rules! debug {
  ($level:expr, $($arg:tt)+) => {
    if $level <= $crate::log::get_global_logging_threshold() {
      $crate::tracing::debug!($($arg)+);
    }
  };
}

#[macro_export]
macro_rules! trace {
  ($level:expr, $($arg:tt)+) => {
    if $level <= $crate::log::get_global_logging_threshold() {
      $crate::tracing::trace!($($arg)+);
    }
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_round_trips() {
    let original = get_global_logging_threshold();
    set_global_logging_threshold(4);
    assert_eq!(get_global_logging_threshold(), 4);
    set_global_logging_threshold(original);
  }

  #[test]
  fn macros_expand_at_any_level() {
    init_logging();
    crate::debug!(5, "a debug message with a value: {}", 42);
    crate::trace!(6, "a trace message");
    crate::info!(0, "an info message");
  }
}
