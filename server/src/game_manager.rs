use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use common::{GameId, id_generator, log, proto::MoveNotification};

use crate::broadcaster::MovePublisher;
use crate::game::{GameError, GameSession, HistoryEntry, Mark};
use crate::store::GameStore;

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 15;

fn validate_player_name(name: &str) -> Result<(), GameError> {
    let len = name.chars().count();
    if len < NAME_MIN_LEN || len > NAME_MAX_LEN {
        return Err(GameError::Validation(format!(
            "player name must be between {} and {} characters, got {}",
            NAME_MIN_LEN, NAME_MAX_LEN, len
        )));
    }
    Ok(())
}

/// Orchestrates the game state machine against the injected store and
/// publisher. Mutating operations on one game are serialized through a
/// per-game mutex: get-validate-apply-put is not atomic on its own, and the
/// store only promises plain get/put semantics. Different games never
/// contend with each other.
#[derive(Clone)]
pub struct GameManager<S: GameStore, P: MovePublisher> {
    store: S,
    publisher: P,
    game_locks: Arc<Mutex<HashMap<GameId, Arc<Mutex<()>>>>>,
}

impl<S: GameStore, P: MovePublisher> GameManager<S, P> {
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            store,
            publisher,
            game_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn create_game(
        &self,
        player_name1: &str,
        singleplayer: bool,
    ) -> Result<GameSession, GameError> {
        validate_player_name(player_name1)?;

        let mut id = id_generator::generate_game_id();
        while self.store.get(&id).await.is_some() {
            id = id_generator::generate_game_id();
        }

        let session = GameSession::new(id.clone(), player_name1.to_string(), singleplayer);
        self.store.put(session.clone()).await;

        log!(
            "[game:{}] Created by {} ({})",
            id,
            player_name1,
            if singleplayer { "singleplayer" } else { "two-player" }
        );
        Ok(session)
    }

    pub async fn join_game(
        &self,
        id: &GameId,
        player_name2: &str,
    ) -> Result<GameSession, GameError> {
        validate_player_name(player_name2)?;

        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .store
            .get(id)
            .await
            .ok_or_else(|| GameError::NotFound(id.clone()))?;
        session.join(player_name2.to_string())?;
        self.store.put(session.clone()).await;

        log!("[game:{}] {} joined", id, player_name2);
        Ok(session)
    }

    pub async fn make_move(
        &self,
        id: &GameId,
        mark: Mark,
        row: usize,
        col: usize,
    ) -> Result<GameSession, GameError> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .store
            .get(id)
            .await
            .ok_or_else(|| GameError::NotFound(id.clone()))?;

        // apply_move validates everything up front; on error the mutated
        // copy is dropped and the stored session stays untouched.
        session.apply_move(mark, row, col)?;

        self.store.put(session.clone()).await;
        self.store.append_history(id, session.history_entry()).await;

        let notification = MoveNotification {
            game_id: id.to_string(),
            message: session.render(),
            game: Some(session.to_proto()),
        };
        self.publisher.publish(id, notification).await;

        log!("[game:{}] {} placed at ({}, {})", id, mark, row, col);
        Ok(session)
    }

    pub async fn get_game(&self, id: &GameId) -> Result<GameSession, GameError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| GameError::NotFound(id.clone()))
    }

    pub async fn history(&self, id: &GameId) -> Result<Vec<HistoryEntry>, GameError> {
        let entries = self.store.history(id).await;
        if entries.is_empty() {
            return Err(GameError::NoHistory(id.clone()));
        }
        Ok(entries)
    }

    async fn lock_for(&self, id: &GameId) -> Arc<Mutex<()>> {
        self.game_locks
            .lock()
            .await
            .entry(id.clone())
            .or_default()
            .clone()
    }
}
