//! Чистые вычисления поверх состояния игры: очки рук и остаток прикупа.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit, Value};
use crate::domain::game::Game;

/// Игрок и сумма очков его руки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandValue {
    pub player_name: String,
    pub hand_value: u32,
}

/// Сколько карт масти осталось в прикупе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuitCount {
    pub suit: Suit,
    pub count: usize,
}

/// Сколько карт (масть, достоинство) осталось в прикупе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardCount {
    pub suit: Suit,
    pub value: Value,
    pub count: usize,
}

/// Сумма очков руки по таблице достоинств.
pub fn hand_value(hand: &[Card]) -> u32 {
    hand.iter().map(|c| c.value.points()).sum()
}

/// Очки всех рук, по убыванию.
///
/// Берём всех, у кого есть запись в `player_hands`, даже если игрок уже
/// вышел из списка. Сортировка стабильная, руки обходятся по имени,
/// так что при равенстве очков порядок — алфавитный.
pub fn players_with_hand_values(game: &Game) -> Vec<PlayerHandValue> {
    let mut values: Vec<PlayerHandValue> = game
        .player_hands
        .iter()
        .map(|(player, hand)| PlayerHandValue {
            player_name: player.clone(),
            hand_value: hand_value(hand),
        })
        .collect();

    values.sort_by(|a, b| b.hand_value.cmp(&a.hand_value));
    values
}

/// Остаток прикупа по мастям: всегда четыре записи в порядке Hearts, Diamonds, Clubs, Spades.
pub fn remaining_count_by_suit(draw_pile: &[Card]) -> Vec<SuitCount> {
    Suit::ALL
        .into_iter()
        .map(|suit| SuitCount {
            suit,
            count: draw_pile.iter().filter(|c| c.suit == suit).count(),
        })
        .collect()
}

/// Остаток прикупа по (масть, достоинство), только ненулевые.
///
/// Масти: Hearts, Spades, Clubs, Diamonds; внутри масти от короля к тузу.
pub fn remaining_sorted(draw_pile: &[Card]) -> Vec<CardCount> {
    let mut counts: HashMap<Card, usize> = HashMap::new();
    for card in draw_pile {
        *counts.entry(*card).or_insert(0) += 1;
    }

    let mut res = Vec::with_capacity(counts.len());
    for suit in Suit::REMAINING_ORDER {
        for value in Value::ALL.into_iter().rev() {
            if let Some(&count) = counts.get(&Card::new(suit, value)) {
                res.push(CardCount { suit, value, count });
            }
        }
    }
    res
}
