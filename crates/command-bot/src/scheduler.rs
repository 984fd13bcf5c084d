//! Deferred replies as cancellable tasks.

use crate::platform::{Platform, Reply};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::{debug, error, info};

/// Identifier of a scheduled reminder.
pub type ReminderId = u64;

struct Reminder {
    owner: String,
    conversation: String,
    handle: AbortHandle,
}

struct Inner {
    platform: Arc<dyn Platform>,
    next_id: AtomicU64,
    reminders: DashMap<ReminderId, Reminder>,
}

/// Owns every pending reminder. Clones share state.
#[derive(Clone)]
pub struct ReminderScheduler {
    inner: Arc<Inner>,
}

impl ReminderScheduler {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            inner: Arc::new(Inner {
                platform,
                next_id: AtomicU64::new(1),
                reminders: DashMap::new(),
            }),
        }
    }

    /// Post `reply` into `conversation` after `delay`.
    pub fn schedule(
        &self,
        owner: &str,
        conversation: &str,
        delay: Duration,
        reply: Reply,
    ) -> ReminderId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        // The task removes its own entry; holding the vacant entry until the
        // handle is stored keeps that removal from running first.
        if let Entry::Vacant(slot) = self.inner.reminders.entry(id) {
            let inner = Arc::clone(&self.inner);
            let target = conversation.to_string();
            let task = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                inner.reminders.remove(&id);
                if let Err(e) = inner.platform.send(&target, reply).await {
                    error!("Failed to deliver reminder {}: {}", id, e);
                }
            });
            slot.insert(Reminder {
                owner: owner.to_string(),
                conversation: conversation.to_string(),
                handle: task.abort_handle(),
            });
        }

        debug!("Scheduled reminder {} for {} in {:?}", id, owner, delay);
        id
    }

    /// Cancel one reminder. Returns `false` if it already fired or never existed.
    pub fn cancel(&self, id: ReminderId) -> bool {
        match self.inner.reminders.remove(&id) {
            Some((_, reminder)) => {
                reminder.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancel every reminder `owner` set in `conversation`.
    pub fn cancel_owned_by(&self, owner: &str, conversation: &str) -> usize {
        let ids: Vec<ReminderId> = self
            .inner
            .reminders
            .iter()
            .filter(|r| r.owner == owner && r.conversation == conversation)
            .map(|r| *r.key())
            .collect();

        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Number of reminders still waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.reminders.len()
    }

    /// Abort everything still pending.
    pub fn shutdown(&self) -> usize {
        let ids: Vec<ReminderId> = self.inner.reminders.iter().map(|r| *r.key()).collect();
        let cancelled = ids.into_iter().filter(|id| self.cancel(*id)).count();
        if cancelled > 0 {
            info!("Cancelled {} pending reminders", cancelled);
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;

    fn scheduler_expecting(sends: usize) -> ReminderScheduler {
        let mut platform = MockPlatform::new();
        platform
            .expect_send()
            .withf(|conversation, reply| {
                conversation == "chat-1" && *reply == Reply::from("time is up")
            })
            .times(sends)
            .returning(|_, _| Ok(()));
        ReminderScheduler::new(Arc::new(platform))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_fires_after_delay() {
        let scheduler = scheduler_expecting(1);
        scheduler.schedule("alice", "chat-1", Duration::from_secs(10), "time is up".into());
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reminder_never_fires() {
        let scheduler = scheduler_expecting(0);
        let id = scheduler.schedule("alice", "chat-1", Duration::from_secs(10), "time is up".into());

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_owned_by_is_scoped() {
        let scheduler = scheduler_expecting(1);
        let delay = Duration::from_secs(5);
        scheduler.schedule("alice", "chat-1", delay, "time is up".into());
        scheduler.schedule("alice", "chat-1", delay, "time is up".into());
        scheduler.schedule("alice", "chat-2", delay, "time is up".into());
        scheduler.schedule("bob", "chat-1", delay, "time is up".into());

        assert_eq!(scheduler.cancel_owned_by("alice", "chat-1"), 2);
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.cancel_owned_by("alice", "chat-1"), 0);

        assert_eq!(scheduler.cancel_owned_by("alice", "chat-2"), 1);
        assert_eq!(scheduler.pending(), 1);

        // bob's reminder still fires
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_pending() {
        let scheduler = scheduler_expecting(0);
        scheduler.schedule("alice", "chat-1", Duration::from_secs(5), "time is up".into());
        scheduler.schedule("bob", "chat-1", Duration::from_secs(5), "time is up".into());

        assert_eq!(scheduler.shutdown(), 2);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(scheduler.pending(), 0);
    }
}
