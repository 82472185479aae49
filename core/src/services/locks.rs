//! Per-user serialization of read-modify-write sequences
//!
//! Login attempts and deposits read a user record, decide, then write a
//! `UserUpdate`. Holding the user's guard across that sequence keeps two
//! concurrent callers from deciding on the same stale read.
//!
//! A username's entry lives only while someone holds or waits on it, so
//! the registry does not grow with the number of distinct names tried.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Registry = HashMap<String, Arc<AsyncMutex<()>>>;

/// Registry of async mutexes keyed by username
#[derive(Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<Registry>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `username`
    ///
    /// Operations on different usernames never wait on each other.
    pub async fn acquire(&self, username: &str) -> UserLockGuard {
        let lock = {
            // Only held to look up the entry, never across an await.
            let mut locks = lock_registry(&self.locks);
            locks
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        UserLockGuard {
            guard: Some(lock.lock_owned().await),
            username: username.to_string(),
            locks: Arc::clone(&self.locks),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock_registry(&self.locks).len()
    }
}

fn lock_registry(locks: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    match locks.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Exclusive access to one username; released on drop
pub struct UserLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    username: String,
    locks: Arc<Mutex<Registry>>,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        self.guard.take();

        // Waiters clone the entry under the registry lock, so a count of one
        // here means nobody else holds or awaits this username.
        let mut locks = lock_registry(&self.locks);
        let idle = locks
            .get(&self.username)
            .map(|lock| Arc::strong_count(lock) == 1)
            .unwrap_or(false);
        if idle {
            locks.remove(&self.username);
        }
    }
}
