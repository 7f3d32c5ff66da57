// src/bin/card_game_dev_cli.rs
//
// Прогон одной игровой сессии на in-memory хранилище с печатью состояния.
// Опциональный аргумент — seed для перемешивания.

use anyhow::Result;

use card_game_engine::engine::{EngineError, GameManager};
use card_game_engine::infra::{DeterministicRng, InMemoryGameStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== CARD GAME DEV CLI ===\n");

    let seed: u64 = match std::env::args().nth(1) {
        Some(raw) => raw.parse()?,
        None => 42,
    };
    println!("seed = {seed}\n");

    let manager = GameManager::new(InMemoryGameStore::new(), DeterministicRng::from_seed(seed));

    let game = manager.create_game("Kitchen table").await?;
    let id = game.id.to_string();
    println!("Создана игра id={} name=\"{}\"", id, game.name);

    for name in ["Alice", "Bob", "Carol"] {
        manager.add_player(&id, name).await?;
    }
    // Повторный вход должен быть отклонён.
    match manager.add_player(&id, "Bob").await {
        Err(EngineError::PlayerAlreadyJoined(p)) => println!("  Игрок {p} уже в игре — отказ, как и ожидалось"),
        other => println!("  Неожиданный результат повторного входа: {other:?}"),
    }

    let game = manager.add_deck_to_game(&id, manager.create_deck()).await?;
    println!("\nДобавлена колода: в прикупе {} карт", game.draw_pile.len());

    let game = manager.shuffle_game_deck(&id).await?;
    let top: Vec<String> = game.draw_pile.iter().take(5).map(|c| c.to_string()).collect();
    println!("После перемешивания сверху: {}", top.join(", "));

    // Три круга раздачи.
    println!("\nРаздача:");
    for round in 1..=3 {
        for name in &game.players {
            let card = manager.deal_card_to_player(&id, name).await?;
            println!("  круг {round}: {name} <- {card}");
        }
    }

    println!("\nОчки рук:");
    for pv in manager.get_players_with_hand_values(&id).await? {
        let hand = manager.get_player_hand(&id, &pv.player_name).await?;
        let cards: Vec<String> = hand.iter().map(|c| c.to_string()).collect();
        println!("  {:<6} {:>3}  [{}]", pv.player_name, pv.hand_value, cards.join(", "));
    }

    manager.remove_player(&id, "Carol").await?;
    println!("\nCarol вышла из игры; её рука остаётся в подсчёте очков.");

    println!("\nОстаток по мастям:");
    for sc in manager.get_remaining_cards_count_by_suit(&id).await? {
        println!("  {:<8} {}", sc.suit, sc.count);
    }

    let sorted = manager.get_remaining_cards_sorted(&id).await?;
    println!("\nОстаток по картам ({} различных):", sorted.len());
    for cc in sorted.iter().take(10) {
        println!("  {} of {} x{}", cc.value, cc.suit, cc.count);
    }
    if sorted.len() > 10 {
        println!("  ...");
    }

    manager.delete_game(&id).await?;
    println!("\nИгра {id} удалена.");

    println!("\n=== CARD GAME DEV CLI DONE ===");
    Ok(())
}
