use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use common::GameId;

use crate::game::{GameSession, HistoryEntry};

/// Keyed persistence seam: a session-by-ID mapping plus an append-only
/// history list per ID. Get/put semantics only; retention and eviction are
/// someone else's problem.
pub trait GameStore: Send + Sync + Clone + 'static {
    fn get(&self, id: &GameId) -> impl Future<Output = Option<GameSession>> + Send;

    fn put(&self, session: GameSession) -> impl Future<Output = ()> + Send;

    fn append_history(
        &self,
        id: &GameId,
        entry: HistoryEntry,
    ) -> impl Future<Output = ()> + Send;

    fn history(&self, id: &GameId) -> impl Future<Output = Vec<HistoryEntry>> + Send;
}

#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<Mutex<HashMap<GameId, GameSession>>>,
    history: Arc<Mutex<HashMap<GameId, Vec<HistoryEntry>>>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryGameStore {
    async fn get(&self, id: &GameId) -> Option<GameSession> {
        self.games.lock().await.get(id).cloned()
    }

    async fn put(&self, session: GameSession) {
        self.games.lock().await.insert(session.id.clone(), session);
    }

    async fn append_history(&self, id: &GameId, entry: HistoryEntry) {
        self.history
            .lock()
            .await
            .entry(id.clone())
            .or_default()
            .push(entry);
    }

    async fn history(&self, id: &GameId) -> Vec<HistoryEntry> {
        self.history.lock().await.get(id).cloned().unwrap_or_default()
    }
}
