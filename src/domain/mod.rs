//! Доменная модель: карты, колода, игра.

pub mod card;
pub mod deck;
pub mod game;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use game::*;
