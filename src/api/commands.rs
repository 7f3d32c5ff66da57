use serde::{Deserialize, Serialize};

use crate::engine::{GameManager, RandomSource};
use crate::infra::persistence::GameStore;

use super::dto::CommandResponse;
use super::errors::ApiError;

/// Команда верхнего уровня — всё, что меняет состояние.
///
/// HTTP-слой превращает каждый POST/DELETE в одну такую команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать новую пустую игру.
    CreateGame { name: String },

    /// Удалить игру.
    DeleteGame { game_id: String },

    /// Выдать новую колоду (ни к какой игре не привязана).
    CreateDeck,

    /// Положить новую колоду под низ прикупа игры.
    AddDeck { game_id: String },

    /// Перемешать прикуп.
    Shuffle { game_id: String },

    /// Операция над игроком в конкретной игре.
    Player(PlayerCommand),
}

/// Команды, которые относятся к игроку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerCommand {
    Add { game_id: String, player_name: String },
    Remove { game_id: String, player_name: String },
    /// Сдать верхнюю карту прикупа.
    Deal { game_id: String, player_name: String },
}

/// Выполнить команду на менеджере игр.
pub async fn execute_command<S, R>(
    manager: &GameManager<S, R>,
    command: Command,
) -> Result<CommandResponse, ApiError>
where
    S: GameStore,
    R: RandomSource + Send,
{
    let response = match command {
        Command::CreateGame { name } => CommandResponse::Game(manager.create_game(&name).await?.into()),
        Command::DeleteGame { game_id } => {
            manager.delete_game(&game_id).await?;
            CommandResponse::Deleted
        }
        Command::CreateDeck => CommandResponse::Deck(manager.create_deck()),
        Command::AddDeck { game_id } => {
            let deck = manager.create_deck();
            CommandResponse::Game(manager.add_deck_to_game(&game_id, deck).await?.into())
        }
        Command::Shuffle { game_id } => {
            CommandResponse::Game(manager.shuffle_game_deck(&game_id).await?.into())
        }
        Command::Player(PlayerCommand::Add { game_id, player_name }) => CommandResponse::Game(
            manager.add_player(&game_id, &player_name).await?.into(),
        ),
        Command::Player(PlayerCommand::Remove { game_id, player_name }) => CommandResponse::Game(
            manager.remove_player(&game_id, &player_name).await?.into(),
        ),
        Command::Player(PlayerCommand::Deal { game_id, player_name }) => CommandResponse::Card(
            manager.deal_card_to_player(&game_id, &player_name).await?,
        ),
    };

    Ok(response)
}
