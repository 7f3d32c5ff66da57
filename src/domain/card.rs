use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Suit {
    Hearts,   // ♥
    Diamonds, // ♦
    Clubs,    // ♣
    Spades,   // ♠
}

impl Suit {
    /// Порядок мастей при создании колоды и в подсчёте по мастям.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Порядок мастей в отсортированном списке оставшихся карт.
    pub const REMAINING_ORDER: [Suit; 4] =
        [Suit::Hearts, Suit::Spades, Suit::Clubs, Suit::Diamonds];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

/// Достоинство карты.
///
/// В JSON пишется так же, как хранилось в документах: "Ace", "2".."10", "Jack", ...
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Value {
    Ace = 1,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    Jack,
    Queen,
    King,
}

impl Value {
    /// Ace, 2..10, Jack, Queen, King — порядок внутри масти в новой колоде.
    pub const ALL: [Value; 13] = [
        Value::Ace,
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Eight,
        Value::Nine,
        Value::Ten,
        Value::Jack,
        Value::Queen,
        Value::King,
    ];

    /// Очки карты: Ace=1, 2..10 по номиналу, Jack=11, Queen=12, King=13.
    pub const fn points(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Value::Ace => "Ace",
            Value::Two => "2",
            Value::Three => "3",
            Value::Four => "4",
            Value::Five => "5",
            Value::Six => "6",
            Value::Seven => "7",
            Value::Eight => "8",
            Value::Nine => "9",
            Value::Ten => "10",
            Value::Jack => "Jack",
            Value::Queen => "Queen",
            Value::King => "King",
        }
    }
}

/// Игральная карта. Идентичности сверх (масть, достоинство) нет:
/// после слияния нескольких колод дубликаты допустимы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub value: Value,
}

impl Card {
    pub const fn new(suit: Suit, value: Value) -> Self {
        Self { suit, value }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl fmt::Display for Card {
    /// Формат вида `King of Hearts`, `10 of Clubs`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

impl FromStr for Suit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Неизвестная масть: {s}"))
    }
}

impl FromStr for Value {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Value::ALL
            .into_iter()
            .find(|value| value.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Неизвестное достоинство: {s}"))
    }
}

/// Парсинг строки вида "King of Hearts", "10 of Clubs".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, suit) = s
            .split_once(" of ")
            .ok_or_else(|| format!("Ожидался формат '<value> of <suit>': {s}"))?;

        Ok(Card {
            suit: suit.trim().parse()?,
            value: value.trim().parse()?,
        })
    }
}
