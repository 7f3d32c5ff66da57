//! Движок игровых операций: загрузка игры, проверка, мутация, сохранение.
//!
//! Высокоуровневый объект: `GameManager`
//! Основные операции:
//!   - жизненный цикл игры (`create_game`, `delete_game`);
//!   - колода (`add_deck_to_game`, `shuffle_game_deck`);
//!   - игроки и раздача (`add_player`, `remove_player`, `deal_card_to_player`);
//!   - статистика (`get_players_with_hand_values`, `get_remaining_cards_*`).

pub mod errors;
pub mod game_manager;
pub mod locks;
pub mod stats;

pub use errors::EngineError;
pub use game_manager::{GameManager, DEFAULT_STORE_TIMEOUT};
pub use locks::GameLocks;
pub use stats::{CardCount, PlayerHandValue, SuitCount};

/// RNG интерфейс для engine.
///
/// Реализация обязана дать только `gen_index`; перемешивание —
/// Фишер–Йетс поверх него, поэтому тесты могут подсовывать
/// заранее известную последовательность индексов.
pub trait RandomSource {
    /// Равномерный индекс в `0..bound`. `bound` всегда > 0.
    fn gen_index(&mut self, bound: usize) -> usize;

    /// Равномерная перестановка среза (Fisher–Yates, от конца к началу).
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i + 1);
            slice.swap(i, j);
        }
    }
}
