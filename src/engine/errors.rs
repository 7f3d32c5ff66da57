use thiserror::Error;

use crate::domain::GameId;
use crate::infra::persistence::StoreError;

/// Ошибки движка игровых операций.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Некорректный id игры: {0}")]
    InvalidGameId(String),

    #[error("Игра {0} не найдена")]
    GameNotFound(GameId),

    #[error("Игрок {0} уже в игре")]
    PlayerAlreadyJoined(String),

    #[error("Игрок {0} не найден в игре или ему ещё не раздавали карты")]
    PlayerNotFound(String),

    #[error("В прикупе не осталось карт")]
    EmptyDeck,

    #[error("Ошибка хранилища: {0}")]
    Persistence(#[from] StoreError),
}
