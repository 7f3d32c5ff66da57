use serde::{Deserialize, Serialize};

use crate::engine::{GameManager, RandomSource};
use crate::infra::persistence::GameStore;

use super::dto::QueryResponse;
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Получить игру целиком.
    GetGame { game_id: String },

    /// Рука конкретного игрока.
    PlayerHand { game_id: String, player_name: String },

    /// Очки рук всех игроков, по убыванию.
    PlayerHandValues { game_id: String },

    /// Остаток прикупа по мастям.
    RemainingBySuit { game_id: String },

    /// Остаток прикупа по (масть, достоинство), отсортированный.
    RemainingSorted { game_id: String },
}

/// Выполнить запрос на менеджере игр.
pub async fn run_query<S, R>(
    manager: &GameManager<S, R>,
    query: Query,
) -> Result<QueryResponse, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let response = match query {
        Query::GetGame { game_id } => QueryResponse::Game(manager.get_game(&game_id).await?.into()),
        Query::PlayerHand {
            game_id,
            player_name,
        } => {
            if player_name.is_empty() {
                return Err(ApiError::BadRequest("player_name is required".into()));
            }
            QueryResponse::Hand(manager.get_player_hand(&game_id, &player_name).await?)
        }
        Query::PlayerHandValues { game_id } => {
            QueryResponse::HandValues(manager.get_players_with_hand_values(&game_id).await?)
        }
        Query::RemainingBySuit { game_id } => {
            QueryResponse::SuitCounts(manager.get_remaining_cards_count_by_suit(&game_id).await?)
        }
        Query::RemainingSorted { game_id } => {
            QueryResponse::CardCounts(manager.get_remaining_cards_sorted(&game_id).await?)
        }
    };

    Ok(response)
}
