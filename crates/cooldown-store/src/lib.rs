//! In-memory cooldown tracking for bot commands.
//!
//! Remembers when each actor last ran each command successfully and
//! rejects repeats inside a fixed window. No external persistence; all
//! state is lost on restart.

mod tracker;
mod types;

pub use tracker::{CooldownPermit, CooldownTracker};
pub use types::Cooldown;
