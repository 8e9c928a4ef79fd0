//! Per-user state storage
//!
//! Trait seams so the engine can run against in-memory tables today and a
//! networked store later without touching the dispatch logic. All state is
//! process-lifetime only; a restart resets every user to idle.

use super::cursor::SearchResult;
use super::session::{DialogSession, UserId};
use crate::config;
use crate::places::{Coordinate, Place};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Storage for dialog sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Absence normalizes to an idle session.
    async fn get(&self, user: &UserId) -> DialogSession;

    async fn put(&self, user: &UserId, session: DialogSession);

    async fn delete(&self, user: &UserId);
}

/// A batch served from the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub places: Vec<Place>,
    /// Candidates still unshown after this batch.
    pub remaining: usize,
}

/// Storage for recommendation cursors
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// Installs a freshly filtered candidate set (replacing any previous
    /// one), shuffles it, and returns the first batch as shown.
    async fn seed(&self, user: &UserId, origin: Coordinate, candidates: Vec<Place>) -> Batch;

    /// Next unshown batch. `None` when no search has ever been seeded for
    /// this user; an empty batch means exhaustion.
    async fn next(&self, user: &UserId) -> Option<Batch>;
}

// ============================================================
// In-memory implementations
// ============================================================

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserId, DialogSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user: &UserId) -> DialogSession {
        self.sessions
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_else(DialogSession::idle)
    }

    async fn put(&self, user: &UserId, session: DialogSession) {
        self.sessions.write().await.insert(user.clone(), session);
    }

    async fn delete(&self, user: &UserId) {
        self.sessions.write().await.remove(user);
    }
}

pub struct InMemoryCursorStore {
    cursors: RwLock<HashMap<UserId, SearchResult>>,
    rng: Mutex<StdRng>,
}

impl InMemoryCursorStore {
    pub fn new() -> Self {
        Self {
            cursors: RwLock::new(HashMap::new()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic shuffles for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cursors: RwLock::new(HashMap::new()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for InMemoryCursorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CursorStore for InMemoryCursorStore {
    async fn seed(&self, user: &UserId, origin: Coordinate, candidates: Vec<Place>) -> Batch {
        let mut result = {
            let mut rng = self.rng.lock().await;
            SearchResult::new(origin, candidates, &mut *rng)
        };
        let places = result.next_batch(config::BATCH_SIZE);
        let remaining = result.remaining();
        self.cursors.write().await.insert(user.clone(), result);
        Batch { places, remaining }
    }

    async fn next(&self, user: &UserId) -> Option<Batch> {
        let mut cursors = self.cursors.write().await;
        let result = cursors.get_mut(user)?;
        let places = result.next_batch(config::BATCH_SIZE);
        Some(Batch {
            places,
            remaining: result.remaining(),
        })
    }
}

// ============================================================
// Per-user serialization
// ============================================================

/// Keyed lock table: at most one in-flight mutation per user, full
/// parallelism across users.
#[derive(Default)]
pub struct UserLocks {
    locks: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, user: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let locks = self.locks.read().await;
            locks.get(user).cloned()
        };

        let lock = match lock {
            Some(lock) => lock,
            None => self
                .locks
                .write()
                .await
                .entry(user.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone(),
        };

        lock.lock_owned().await
    }
}
