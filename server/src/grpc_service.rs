use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

use common::{
    GameId, log,
    proto::{
        CreateGameRequest, GameResponse, GetHistoryRequest, GetHistoryResponse,
        HealthcheckRequest, HealthcheckResponse, JoinGameRequest, MakeMoveRequest,
        MoveNotification, SubscribeMovesRequest, tic_tac_toe_server::TicTacToe,
    },
};

use crate::broadcaster::Broadcaster;
use crate::game::{GameError, Mark};
use crate::game_manager::GameManager;
use crate::store::GameStore;

pub struct GrpcService<S: GameStore> {
    manager: GameManager<S, Broadcaster>,
    broadcaster: Broadcaster,
    subscriber_channel_capacity: usize,
}

impl<S: GameStore> GrpcService<S> {
    pub fn new(
        manager: GameManager<S, Broadcaster>,
        broadcaster: Broadcaster,
        subscriber_channel_capacity: usize,
    ) -> Self {
        Self {
            manager,
            broadcaster,
            subscriber_channel_capacity,
        }
    }
}

fn to_status(err: GameError) -> Status {
    match err {
        GameError::Validation(_) | GameError::InvalidCoordinate { .. } => {
            Status::invalid_argument(err.to_string())
        }
        GameError::NotFound(_) | GameError::NoHistory(_) => Status::not_found(err.to_string()),
        GameError::InvalidState(_)
        | GameError::CellOccupied { .. }
        | GameError::OutOfTurn { .. }
        | GameError::NoLegalMove => Status::failed_precondition(err.to_string()),
    }
}

fn mark_from_proto(value: i32) -> Result<Mark, Status> {
    match common::proto::Mark::try_from(value) {
        Ok(common::proto::Mark::X) => Ok(Mark::X),
        Ok(common::proto::Mark::O) => Ok(Mark::O),
        Ok(common::proto::Mark::Unspecified) | Err(_) => {
            Err(Status::invalid_argument("mark must be X or O"))
        }
    }
}

#[tonic::async_trait]
impl<S: GameStore> TicTacToe for GrpcService<S> {
    async fn healthcheck(
        &self,
        _request: Request<HealthcheckRequest>,
    ) -> Result<Response<HealthcheckResponse>, Status> {
        Ok(Response::new(HealthcheckResponse {
            message: "App successfully running!".to_string(),
        }))
    }

    async fn create_game(
        &self,
        request: Request<CreateGameRequest>,
    ) -> Result<Response<GameResponse>, Status> {
        let req = request.into_inner();
        let session = self
            .manager
            .create_game(&req.player_name, req.singleplayer)
            .await
            .map_err(to_status)?;
        Ok(Response::new(GameResponse {
            game: Some(session.to_proto()),
        }))
    }

    async fn join_game(
        &self,
        request: Request<JoinGameRequest>,
    ) -> Result<Response<GameResponse>, Status> {
        let req = request.into_inner();
        let id = GameId::new(req.game_id);
        let session = self
            .manager
            .join_game(&id, &req.player_name)
            .await
            .map_err(to_status)?;
        Ok(Response::new(GameResponse {
            game: Some(session.to_proto()),
        }))
    }

    async fn make_move(
        &self,
        request: Request<MakeMoveRequest>,
    ) -> Result<Response<GameResponse>, Status> {
        let req = request.into_inner();
        let id = GameId::new(req.game_id);
        let mark = mark_from_proto(req.mark)?;
        let session = self
            .manager
            .make_move(&id, mark, req.row as usize, req.col as usize)
            .await
            .map_err(to_status)?;
        Ok(Response::new(GameResponse {
            game: Some(session.to_proto()),
        }))
    }

    async fn get_history(
        &self,
        request: Request<GetHistoryRequest>,
    ) -> Result<Response<GetHistoryResponse>, Status> {
        let req = request.into_inner();
        let id = GameId::new(req.game_id);
        let entries = self.manager.history(&id).await.map_err(to_status)?;
        Ok(Response::new(GetHistoryResponse {
            entries: entries.iter().map(|entry| entry.to_proto()).collect(),
        }))
    }

    type SubscribeMovesStream = ReceiverStream<Result<MoveNotification, Status>>;

    async fn subscribe_moves(
        &self,
        request: Request<SubscribeMovesRequest>,
    ) -> Result<Response<Self::SubscribeMovesStream>, Status> {
        let req = request.into_inner();
        let id = GameId::new(req.game_id);

        // Reject subscriptions to games that do not exist instead of
        // parking the client on a stream that will never produce.
        self.manager.get_game(&id).await.map_err(to_status)?;

        let (tx, rx) = mpsc::channel(self.subscriber_channel_capacity);
        self.broadcaster.subscribe(id.clone(), tx).await;
        log!("[game:{}] Move subscriber attached", id);

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}
