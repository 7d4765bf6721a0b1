use invite_engine_domain::EventKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = Arc<Mutex<HashMap<EventKey, Arc<AsyncMutex<()>>>>>;

/// In-process mutual exclusion per `EventKey`.
///
/// Reconciliations of the same event key in one process run one at a time so
/// that two submissions for a new event cannot both create it. Separate
/// processes are not coordinated.
#[derive(Clone, Default)]
pub struct EventKeyLocks {
    locks: LockMap,
}

/// Held while a reconciliation for `key` runs. The lock entry is removed once
/// the last holder or waiter is gone.
pub struct EventKeyGuard {
    key: EventKey,
    locks: LockMap,
    guard: Option<OwnedMutexGuard<()>>,
}

impl EventKeyLocks {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn lock(&self, key: &EventKey) -> EventKeyGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(key.clone()).or_default().clone()
        };
        // Dropped without a guard when the caller stops waiting
        let mut pending = EventKeyGuard {
            key: key.clone(),
            locks: self.locks.clone(),
            guard: None,
        };
        pending.guard = Some(lock.lock_owned().await);
        pending
    }

    /// Number of keys with a holder or waiter
    pub fn active_keys(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for EventKeyGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        let unused = locks
            .get(&self.key)
            .map(|lock| Arc::strong_count(lock) == 1)
            .unwrap_or(false);
        if unused {
            locks.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(summary: &str) -> EventKey {
        EventKey {
            summary: summary.into(),
            location: "Library".into(),
            organizer_email: "org@example.com".into(),
            day: 0,
        }
    }

    #[tokio::test]
    async fn it_serializes_holders_of_the_same_key() {
        let locks = EventKeyLocks::new();
        let running = Arc::new(AtomicUsize::new(0));
        let max_running = Arc::new(AtomicUsize::new(0));

        let handles = (0..5)
            .map(|_| {
                let locks = locks.clone();
                let running = running.clone();
                let max_running = max_running.clone();
                tokio::spawn(async move {
                    let _guard = locks.lock(&key("Workshop")).await;
                    let now_running = running.fetch_add(1, Ordering::SeqCst) + 1;
                    max_running.fetch_max(now_running, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_running.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn it_does_not_block_other_keys() {
        let locks = EventKeyLocks::new();
        let _workshop = locks.lock(&key("Workshop")).await;
        let concert = tokio::time::timeout(Duration::from_millis(100), locks.lock(&key("Concert")))
            .await;
        assert!(concert.is_ok());
        assert_eq!(locks.active_keys(), 2);
        drop(concert);
        assert_eq!(locks.active_keys(), 1);
    }

    #[tokio::test]
    async fn it_removes_keys_of_cancelled_waiters() {
        let locks = EventKeyLocks::new();
        let holder = locks.lock(&key("Workshop")).await;

        let waiter_key = key("Workshop");
        let mut waiter = Box::pin(locks.lock(&waiter_key));
        let waited = tokio::time::timeout(Duration::from_millis(10), &mut waiter).await;
        assert!(waited.is_err());
        assert_eq!(locks.active_keys(), 1);

        // The waiter is handed the lock but goes away before it is polled again
        drop(holder);
        drop(waiter);
        assert_eq!(locks.active_keys(), 0);

        let _next = locks.lock(&key("Workshop")).await;
        assert_eq!(locks.active_keys(), 1);
    }
}
