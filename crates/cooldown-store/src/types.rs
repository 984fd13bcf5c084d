//! Cooldown slot and rejection types.

use std::time::Duration;
use tokio::time::Instant;

/// State of one (command, actor) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Last successful invocation finished at this instant.
    Idle(Instant),
    /// An invocation holds the key. `previous` is restored if it fails.
    InFlight { previous: Option<Instant> },
}

/// Rejection returned while a key is still cooling down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    remaining: Duration,
}

impl Cooldown {
    pub(crate) fn new(remaining: Duration) -> Self {
        Self { remaining }
    }

    /// Exact time left before the key is usable again.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Time left rounded up to whole seconds, as shown to users.
    pub fn remaining_secs(&self) -> u64 {
        let secs = self.remaining.as_nanos().div_ceil(1_000_000_000);
        u64::try_from(secs).unwrap_or(u64::MAX)
    }
}

impl std::fmt::Display for Cooldown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cooling down for {}s", self.remaining_secs())
    }
}
