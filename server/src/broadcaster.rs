use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tonic::Status;

use common::{GameId, log, proto::MoveNotification};

pub type MoveSender = mpsc::Sender<Result<MoveNotification, Status>>;

/// Post-move event hook. The manager publishes while holding the per-game
/// lock, so subscribers see notifications in move order per game.
pub trait MovePublisher: Send + Sync + Clone + 'static {
    fn publish(
        &self,
        game_id: &GameId,
        notification: MoveNotification,
    ) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Default)]
pub struct Broadcaster {
    subscribers: Arc<Mutex<HashMap<GameId, Vec<MoveSender>>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, game_id: GameId, sender: MoveSender) {
        self.subscribers
            .lock()
            .await
            .entry(game_id)
            .or_default()
            .push(sender);
    }

    pub async fn subscriber_count(&self, game_id: &GameId) -> usize {
        self.subscribers
            .lock()
            .await
            .get(game_id)
            .map_or(0, |senders| senders.len())
    }
}

impl MovePublisher for Broadcaster {
    async fn publish(&self, game_id: &GameId, notification: MoveNotification) {
        let mut subscribers = self.subscribers.lock().await;
        let Some(senders) = subscribers.get_mut(game_id) else {
            return;
        };

        let mut alive = Vec::with_capacity(senders.len());
        for sender in senders.drain(..) {
            if let Err(e) = sender.send(Ok(notification.clone())).await {
                log!("[game:{}] Dropping disconnected subscriber: {}", game_id, e);
                continue;
            }
            alive.push(sender);
        }
        *senders = alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(game_id: &GameId, message: &str) -> MoveNotification {
        MoveNotification {
            game_id: game_id.to_string(),
            message: message.to_string(),
            game: None,
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_notifications_in_order() {
        let broadcaster = Broadcaster::new();
        let game_id = GameId::new("game-1");
        let (tx, mut rx) = mpsc::channel(8);
        broadcaster.subscribe(game_id.clone(), tx).await;

        broadcaster.publish(&game_id, notification(&game_id, "first")).await;
        broadcaster.publish(&game_id, notification(&game_id, "second")).await;

        assert_eq!(rx.recv().await.unwrap().unwrap().message, "first");
        assert_eq!(rx.recv().await.unwrap().unwrap().message, "second");
    }

    #[tokio::test]
    async fn test_publish_is_scoped_to_the_game() {
        let broadcaster = Broadcaster::new();
        let (tx, mut rx) = mpsc::channel(8);
        broadcaster.subscribe(GameId::new("game-1"), tx).await;

        let other = GameId::new("game-2");
        broadcaster.publish(&other, notification(&other, "elsewhere")).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_disconnected_subscribers_are_pruned() {
        let broadcaster = Broadcaster::new();
        let game_id = GameId::new("game-1");

        let (dead_tx, dead_rx) = mpsc::channel(1);
        let (live_tx, mut live_rx) = mpsc::channel(8);
        broadcaster.subscribe(game_id.clone(), dead_tx).await;
        broadcaster.subscribe(game_id.clone(), live_tx).await;
        drop(dead_rx);

        broadcaster.publish(&game_id, notification(&game_id, "hello")).await;

        assert_eq!(broadcaster.subscriber_count(&game_id).await, 1);
        assert_eq!(live_rx.recv().await.unwrap().unwrap().message, "hello");
    }
}
