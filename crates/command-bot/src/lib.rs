//! Prefix-command chat bot: moderation, dispatch, cooldowns and the built-in
//! command set, bound to Signal.

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod logging;
pub mod moderation;
pub mod platform;
pub mod registry;
pub mod scheduler;
pub mod signal;

pub use dispatcher::{DispatchOutcome, Dispatcher, DispatcherConfig};
pub use platform::{InboundMessage, Platform, Reply};
