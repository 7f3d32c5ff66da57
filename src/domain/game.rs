use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::engine::RandomSource;

/// Длина идентификатора игры в байтах (12 байт → 24 hex-символа).
pub const GAME_ID_BYTES: usize = 12;

/// Идентификатор игры.
///
/// Формат как у object id документного хранилища: 24 hex-символа.
/// Хранится уже нормализованным (нижний регистр).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Проверить и нормализовать внешний идентификатор.
    /// `None`, если это не ровно 24 шестнадцатеричных символа.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != GAME_ID_BYTES * 2 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(raw.to_ascii_lowercase()))
    }

    /// Собрать идентификатор из сырых байт.
    pub fn from_bytes(bytes: [u8; GAME_ID_BYTES]) -> Self {
        let hex = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GameId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GameId::parse(&value).ok_or_else(|| format!("Некорректный id игры: {value}"))
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

/// Игра — корневой агрегат.
///
/// Инвариант: каждая карта в руках и в прикупе когда-то пришла через
/// `append_deck`; игра карты не создаёт и не уничтожает, только перекладывает
/// между прикупом и руками.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    /// Имена игроков в порядке входа, без повторов.
    #[serde(default)]
    pub players: Vec<String>,
    /// Прикуп: индекс 0 — верх, раздаём отсюда.
    #[serde(rename = "game_deck", default)]
    pub draw_pile: Vec<Card>,
    /// Руки игроков: имя → карты в порядке раздачи.
    #[serde(default)]
    pub player_hands: BTreeMap<String, Vec<Card>>,
}

impl Game {
    /// Новая пустая игра: без игроков, без карт.
    pub fn new(id: GameId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            players: Vec::new(),
            draw_pile: Vec::new(),
            player_hands: BTreeMap::new(),
        }
    }

    /// Положить карты колоды под низ прикупа. Порядок существующих карт не меняется.
    pub fn append_deck(&mut self, deck: Deck) {
        self.draw_pile.extend(deck.into_cards());
    }

    /// Перемешать прикуп на месте.
    pub fn shuffle_draw_pile<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.draw_pile);
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Добавить игрока в конец списка. `false`, если такое имя уже есть.
    pub fn add_player(&mut self, name: &str) -> bool {
        if self.has_player(name) {
            return false;
        }
        self.players.push(name.to_string());
        true
    }

    /// Убрать игрока из списка, сохранив порядок остальных.
    /// Рука игрока остаётся в `player_hands`.
    pub fn remove_player(&mut self, name: &str) -> bool {
        match self.players.iter().position(|p| p == name) {
            Some(idx) => {
                self.players.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Снять верхнюю карту прикупа и отдать игроку.
    ///
    /// Игрок не обязан быть в списке игроков — рука создаётся при первой раздаче.
    /// `None`, если прикуп пуст (тогда ничего не меняется).
    pub fn deal_top_to(&mut self, player: &str) -> Option<Card> {
        if self.draw_pile.is_empty() {
            return None;
        }
        let card = self.draw_pile.remove(0);
        self.player_hands
            .entry(player.to_string())
            .or_default()
            .push(card);
        Some(card)
    }

    /// Рука игрока. `None` — игроку ещё ничего не раздавали.
    pub fn hand(&self, player: &str) -> Option<&[Card]> {
        self.player_hands.get(player).map(Vec::as_slice)
    }

    /// Сколько всего карт в игре (прикуп + все руки).
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.player_hands.values().map(Vec::len).sum::<usize>()
    }
}
