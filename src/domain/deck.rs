use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit, Value};

/// Размер стандартной колоды.
pub const STANDARD_DECK_SIZE: usize = 52;

/// Колода карт. В домене — просто упорядоченный список карт.
/// Колода одноразовая: после добавления в игру её карты уходят в общий прикуп,
/// а сама колода выбрасывается. Перемешивание делает игра (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Hearts Ace..King, Diamonds Ace..King, Clubs Ace..King, Spades Ace..King.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for suit in Suit::ALL {
            for value in Value::ALL {
                cards.push(Card::new(suit, value));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Забрать карты, уничтожив колоду.
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard_52()
    }
}
