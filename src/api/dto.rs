use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::game::Game;
use crate::engine::stats::{CardCount, PlayerHandValue, SuitCount};

/// DTO игры — то, что видит клиент после каждой мутации.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameViewDto {
    pub id: String,
    pub name: String,
    pub players: Vec<String>,
    /// Прикуп, верх — первый элемент.
    pub game_deck: Vec<Card>,
    pub player_hands: BTreeMap<String, Vec<Card>>,
}

impl From<Game> for GameViewDto {
    fn from(game: Game) -> Self {
        Self {
            id: game.id.to_string(),
            name: game.name,
            players: game.players,
            game_deck: game.draw_pile,
            player_hands: game.player_hands,
        }
    }
}

/// Тело запроса на создание игры.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
}

/// Тело запросов add-player / remove-player / deal-card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerNameRequest {
    pub player_name: String,
}

/// Query-параметры для player-hand.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerHandParams {
    pub player_name: Option<String>,
}

/// Результат команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandResponse {
    Game(GameViewDto),
    Deck(Deck),
    Card(Card),
    /// Игра удалена — тела нет.
    Deleted,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QueryResponse {
    Game(GameViewDto),
    Hand(Vec<Card>),
    HandValues(Vec<PlayerHandValue>),
    SuitCounts(Vec<SuitCount>),
    CardCounts(Vec<CardCount>),
}
