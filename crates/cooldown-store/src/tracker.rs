//! Per-(command, actor) cooldown tracker.

use crate::types::{Cooldown, Slot};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Per-command map of actor → slot.
type ActorSlots = HashMap<String, Slot>;

/// Tracks the last successful invocation of each command by each actor.
///
/// Keys are sharded by command; the check-and-reserve in [`try_acquire`]
/// happens under the shard lock, so two concurrent invocations of the same
/// command by the same actor can never both be admitted.
///
/// [`try_acquire`]: CooldownTracker::try_acquire
pub struct CooldownTracker<C>
where
    C: Hash + Eq + Clone + Debug + Send + Sync + 'static,
{
    slots: Arc<DashMap<C, ActorSlots>>,
    window: Duration,
}

impl<C> Clone for CooldownTracker<C>
where
    C: Hash + Eq + Clone + Debug + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            window: self.window,
        }
    }
}

impl<C> CooldownTracker<C>
where
    C: Hash + Eq + Clone + Debug + Send + Sync + 'static,
{
    /// Create an empty tracker. A zero window disables cooldowns.
    pub fn new(window: Duration) -> Self {
        info!("Cooldown tracker initialized (window={:?})", window);
        Self {
            slots: Arc::new(DashMap::new()),
            window,
        }
    }

    /// The configured cooldown window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether `actor` may invoke `command` at `now`.
    pub fn allow(&self, command: &C, actor: &str, now: Instant) -> bool {
        self.remaining(command, actor, now).is_none()
    }

    /// Time left on the cooldown, or `None` if the key is usable.
    pub fn remaining(&self, command: &C, actor: &str, now: Instant) -> Option<Duration> {
        let slots = self.slots.get(command)?;
        let slot = slots.get(actor)?;
        self.remaining_for(slot, now)
    }

    /// Record a successful invocation at `now`.
    pub fn record(&self, command: C, actor: &str, now: Instant) {
        self.slots
            .entry(command)
            .or_default()
            .insert(actor.to_string(), Slot::Idle(now));
    }

    /// Atomically check the cooldown and reserve the key.
    ///
    /// The returned permit must be [committed](CooldownPermit::commit) once
    /// the invocation succeeds. Dropping it uncommitted puts the key back
    /// the way it was, so a failed invocation does not consume the cooldown.
    pub fn try_acquire(
        &self,
        command: C,
        actor: &str,
        now: Instant,
    ) -> Result<CooldownPermit<C>, Cooldown> {
        if self.window.is_zero() {
            return Ok(CooldownPermit::unreserved(self.clone(), command, actor));
        }

        let mut slots = self.slots.entry(command.clone()).or_default();
        let previous = match slots.get(actor) {
            Some(slot) => {
                if let Some(remaining) = self.remaining_for(slot, now) {
                    debug!(?command, actor, ?remaining, "Cooldown active");
                    return Err(Cooldown::new(remaining));
                }
                match slot {
                    Slot::Idle(last) => Some(*last),
                    Slot::InFlight { previous } => *previous,
                }
            }
            None => None,
        };

        slots.insert(actor.to_string(), Slot::InFlight { previous });
        drop(slots);

        Ok(CooldownPermit {
            tracker: self.clone(),
            command,
            actor: actor.to_string(),
            previous,
            reserved: true,
            committed: false,
        })
    }

    /// Drop keys whose window has fully elapsed. Reservations are kept.
    pub fn evict_expired(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.slots.retain(|_, actors| {
            let before = actors.len();
            actors.retain(|_, slot| match slot {
                Slot::Idle(last) => now.saturating_duration_since(*last) < self.window,
                Slot::InFlight { .. } => true,
            });
            removed += before - actors.len();
            !actors.is_empty()
        });
        removed
    }

    /// Number of (command, actor) keys currently held.
    pub fn tracked(&self) -> usize {
        self.slots.iter().map(|entry| entry.value().len()).sum()
    }

    /// Spawn a background task that periodically evicts expired keys.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let removed = tracker.evict_expired(Instant::now());
                if removed > 0 {
                    debug!("Evicted {} expired cooldown entries", removed);
                }
            }
        })
    }

    fn remaining_for(&self, slot: &Slot, now: Instant) -> Option<Duration> {
        match slot {
            Slot::Idle(last) => {
                let elapsed = now.saturating_duration_since(*last);
                self.window.checked_sub(elapsed).filter(|d| !d.is_zero())
            }
            Slot::InFlight { .. } if self.window.is_zero() => None,
            Slot::InFlight { .. } => Some(self.window),
        }
    }

    fn release(&self, command: &C, actor: &str, previous: Option<Instant>) {
        let Some(mut slots) = self.slots.get_mut(command) else {
            return;
        };
        match previous {
            Some(last) => {
                slots.insert(actor.to_string(), Slot::Idle(last));
            }
            None => {
                slots.remove(actor);
            }
        }
        let empty = slots.is_empty();
        drop(slots);
        if empty {
            self.slots.remove_if(command, |_, actors| actors.is_empty());
        }
    }
}

/// Reservation of one (command, actor) key.
#[must_use = "dropping a permit without committing releases the reservation"]
pub struct CooldownPermit<C>
where
    C: Hash + Eq + Clone + Debug + Send + Sync + 'static,
{
    tracker: CooldownTracker<C>,
    command: C,
    actor: String,
    previous: Option<Instant>,
    reserved: bool,
    committed: bool,
}

impl<C> CooldownPermit<C>
where
    C: Hash + Eq + Clone + Debug + Send + Sync + 'static,
{
    fn unreserved(tracker: CooldownTracker<C>, command: C, actor: &str) -> Self {
        Self {
            tracker,
            command,
            actor: actor.to_string(),
            previous: None,
            reserved: false,
            committed: false,
        }
    }

    /// Record the successful invocation and start the cooldown at `now`.
    pub fn commit(mut self, now: Instant) {
        self.tracker.record(self.command.clone(), &self.actor, now);
        self.committed = true;
    }
}

impl<C> Drop for CooldownPermit<C>
where
    C: Hash + Eq + Clone + Debug + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if self.reserved && !self.committed {
            self.tracker
                .release(&self.command, &self.actor, self.previous);
        }
    }
}
