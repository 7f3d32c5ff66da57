//! HTTP-транспорт поверх команд и запросов (axum).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query as QueryParams, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::engine::{GameManager, RandomSource};
use crate::infra::persistence::GameStore;

use super::commands::{execute_command, Command, PlayerCommand};
use super::dto::{CommandResponse, CreateGameRequest, PlayerHandParams, PlayerNameRequest};
use super::errors::{ApiError, ErrorBody};
use super::queries::{run_query, Query};

type Shared<S, R> = State<Arc<GameManager<S, R>>>;

/// Роутер со всеми эндпоинтами игр.
pub fn router<S, R>(manager: Arc<GameManager<S, R>>) -> Router
where
    S: GameStore + 'static,
    R: RandomSource + Send + 'static,
{
    Router::new()
        .route("/games", post(create_game::<S, R>))
        .route("/games/:id", get(get_game::<S, R>).delete(delete_game::<S, R>))
        .route("/decks", post(create_deck::<S, R>))
        .route("/games/:id/add-deck", post(add_deck::<S, R>))
        .route("/games/:id/add-player", post(add_player::<S, R>))
        .route("/games/:id/remove-player", post(remove_player::<S, R>))
        .route("/games/:id/shuffle", post(shuffle::<S, R>))
        .route("/games/:id/deal-card", post(deal_card::<S, R>))
        .route("/games/:id/player-hand", get(player_hand::<S, R>))
        .route("/games/:id/player-hand-values", get(player_hand_values::<S, R>))
        .route(
            "/games/:id/remaining-cards-suit-count",
            get(remaining_by_suit::<S, R>),
        )
        .route(
            "/games/:id/remaining-cards-sorted",
            get(remaining_sorted::<S, R>),
        )
        .with_state(manager)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.message(), "request rejected");
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            CommandResponse::Deleted => StatusCode::NO_CONTENT.into_response(),
            other => Json(other).into_response(),
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request payload: {}", e.body_text())))
}

async fn command<S, R>(manager: &GameManager<S, R>, cmd: Command) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    Ok(execute_command(manager, cmd).await?.into_response())
}

async fn query<S, R>(manager: &GameManager<S, R>, q: Query) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    Ok(Json(run_query(manager, q).await?).into_response())
}

async fn create_game<S, R>(
    State(m): Shared<S, R>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let req = body(payload)?;
    command(&m, Command::CreateGame { name: req.name }).await
}

async fn get_game<S, R>(State(m): Shared<S, R>, Path(game_id): Path<String>) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    query(&m, Query::GetGame { game_id }).await
}

async fn delete_game<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    command(&m, Command::DeleteGame { game_id }).await
}

async fn create_deck<S, R>(State(m): Shared<S, R>) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    command(&m, Command::CreateDeck).await
}

async fn add_deck<S, R>(State(m): Shared<S, R>, Path(game_id): Path<String>) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    command(&m, Command::AddDeck { game_id }).await
}

async fn shuffle<S, R>(State(m): Shared<S, R>, Path(game_id): Path<String>) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    command(&m, Command::Shuffle { game_id }).await
}

async fn add_player<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
    payload: Result<Json<PlayerNameRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let player_name = body(payload)?.player_name;
    command(&m, Command::Player(PlayerCommand::Add { game_id, player_name })).await
}

async fn remove_player<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
    payload: Result<Json<PlayerNameRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let player_name = body(payload)?.player_name;
    command(&m, Command::Player(PlayerCommand::Remove { game_id, player_name })).await
}

async fn deal_card<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
    payload: Result<Json<PlayerNameRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let player_name = body(payload)?.player_name;
    command(&m, Command::Player(PlayerCommand::Deal { game_id, player_name })).await
}

async fn player_hand<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
    QueryParams(params): QueryParams<PlayerHandParams>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let player_name = params.player_name.unwrap_or_default();
    query(&m, Query::PlayerHand { game_id, player_name }).await
}

async fn player_hand_values<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    query(&m, Query::PlayerHandValues { game_id }).await
}

async fn remaining_by_suit<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    query(&m, Query::RemainingBySuit { game_id }).await
}

async fn remaining_sorted<S, R>(
    State(m): Shared<S, R>,
    Path(game_id): Path<String>,
) -> Result<Response, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    query(&m, Query::RemainingSorted { game_id }).await
}
