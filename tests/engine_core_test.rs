// tests/engine_core_test.rs
//
// Сценарии движка на in-memory хранилище: каждая операция
// загружает игру, меняет её и сохраняет, а следующая видит результат.

use std::sync::Arc;

use card_game_engine::domain::{Card, Deck, GameId, Suit, Value};
use card_game_engine::engine::{CardCount, GameManager, PlayerHandValue, SuitCount};
use card_game_engine::infra::{DeterministicRng, GameStore, InMemoryGameStore};

type Manager = GameManager<InMemoryGameStore, DeterministicRng>;

fn manager() -> Manager {
    GameManager::new(InMemoryGameStore::new(), DeterministicRng::from_seed(2024))
}

fn card(suit: Suit, value: Value) -> Card {
    Card::new(suit, value)
}

async fn game_with_pile(m: &Manager, cards: Vec<Card>) -> String {
    let game = m.create_game("table").await.unwrap();
    let id = game.id.to_string();
    m.add_deck_to_game(&id, Deck { cards }).await.unwrap();
    id
}

#[tokio::test]
async fn create_game_persists_empty_game() {
    let m = manager();
    let game = m.create_game("x").await.unwrap();

    assert_eq!(game.name, "x");
    assert!(game.players.is_empty());
    assert!(game.draw_pile.is_empty());
    assert!(game.player_hands.is_empty());

    let stored = m.store().load(&game.id).await.unwrap().unwrap();
    assert_eq!(stored, game);
    assert_eq!(m.get_game(game.id.as_str()).await.unwrap(), game);
}

#[tokio::test]
async fn created_games_get_distinct_ids() {
    let m = manager();
    let a = m.create_game("a").await.unwrap();
    let b = m.create_game("b").await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(m.store().len().await, 2);
}

#[tokio::test]
async fn get_game_accepts_uppercase_id() {
    let m = manager();
    let game = m.create_game("x").await.unwrap();
    let upper = game.id.as_str().to_ascii_uppercase();
    assert_eq!(m.get_game(&upper).await.unwrap().id, game.id);
}

#[tokio::test]
async fn delete_game_removes_it() {
    let m = manager();
    let game = m.create_game("x").await.unwrap();
    m.delete_game(game.id.as_str()).await.unwrap();
    assert!(m.store().is_empty().await);
}

#[tokio::test]
async fn add_deck_appends_after_existing_pile() {
    let m = manager();
    let id = game_with_pile(&m, vec![card(Suit::Spades, Value::King)]).await;

    let game = m.add_deck_to_game(&id, m.create_deck()).await.unwrap();
    assert_eq!(game.draw_pile.len(), 53);
    assert_eq!(game.draw_pile[0], card(Suit::Spades, Value::King));
    assert_eq!(game.draw_pile[1..], Deck::standard_52().cards[..]);

    // Возвращённая игра совпадает с сохранённой.
    assert_eq!(m.get_game(&id).await.unwrap(), game);
}

#[tokio::test]
async fn shuffle_persists_new_order_and_keeps_cards() {
    let m = manager();
    let id = game_with_pile(&m, Deck::standard_52().cards).await;

    let shuffled = m.shuffle_game_deck(&id).await.unwrap();
    assert_ne!(shuffled.draw_pile, Deck::standard_52().cards);
    assert_eq!(m.get_game(&id).await.unwrap().draw_pile, shuffled.draw_pile);

    let mut a = shuffled.draw_pile.clone();
    let mut b = Deck::standard_52().cards;
    a.sort_by_key(|c| (c.suit, c.value));
    b.sort_by_key(|c| (c.suit, c.value));
    assert_eq!(a, b);
}

#[tokio::test]
async fn shuffle_is_reproducible_with_same_seed() {
    let m1 = manager();
    let m2 = manager();
    let id1 = game_with_pile(&m1, Deck::standard_52().cards).await;
    let id2 = game_with_pile(&m2, Deck::standard_52().cards).await;

    let g1 = m1.shuffle_game_deck(&id1).await.unwrap();
    let g2 = m2.shuffle_game_deck(&id2).await.unwrap();
    assert_eq!(g1.draw_pile, g2.draw_pile);
}

#[tokio::test]
async fn shuffle_of_empty_pile_is_ok() {
    let m = manager();
    let game = m.create_game("x").await.unwrap();
    let shuffled = m.shuffle_game_deck(game.id.as_str()).await.unwrap();
    assert!(shuffled.draw_pile.is_empty());
}

#[tokio::test]
async fn add_and_remove_players() {
    let m = manager();
    let id = m.create_game("x").await.unwrap().id.to_string();

    m.add_player(&id, "Alice").await.unwrap();
    m.add_player(&id, "Bob").await.unwrap();
    let game = m.add_player(&id, "Carol").await.unwrap();
    assert_eq!(game.players, vec!["Alice", "Bob", "Carol"]);

    let game = m.remove_player(&id, "Bob").await.unwrap();
    assert_eq!(game.players, vec!["Alice", "Carol"]);
    assert_eq!(m.get_game(&id).await.unwrap().players, vec!["Alice", "Carol"]);
}

#[tokio::test]
async fn deal_takes_top_card() {
    let m = manager();
    let id = game_with_pile(&m, Deck::standard_52().cards).await;

    let before = m.get_game(&id).await.unwrap();
    let top = before.draw_pile[0];

    let dealt = m.deal_card_to_player(&id, "Alice").await.unwrap();
    assert_eq!(dealt, top);

    let after = m.get_game(&id).await.unwrap();
    assert_eq!(after.draw_pile.len(), before.draw_pile.len() - 1);
    assert_eq!(after.draw_pile[..], before.draw_pile[1..]);
    assert_eq!(after.player_hands["Alice"], vec![top]);
}

#[tokio::test]
async fn deal_appends_in_deal_order_and_ignores_player_list() {
    let m = manager();
    let id = game_with_pile(&m, Deck::standard_52().cards).await;

    // "Zed" не в списке игроков — раздача всё равно разрешена.
    let c1 = m.deal_card_to_player(&id, "Zed").await.unwrap();
    let c2 = m.deal_card_to_player(&id, "Zed").await.unwrap();
    assert_eq!(m.get_player_hand(&id, "Zed").await.unwrap(), vec![c1, c2]);
    assert!(m.get_game(&id).await.unwrap().players.is_empty());
}

#[tokio::test]
async fn cards_are_conserved_across_deals() {
    let m = manager();
    let id = game_with_pile(&m, Deck::standard_52().cards).await;
    m.shuffle_game_deck(&id).await.unwrap();

    for name in ["a", "b", "c", "d"].iter().cycle().take(20) {
        m.deal_card_to_player(&id, name).await.unwrap();
    }

    let game = m.get_game(&id).await.unwrap();
    assert_eq!(game.draw_pile.len(), 32);
    assert_eq!(game.total_cards(), 52);
    for name in ["a", "b", "c", "d"] {
        assert_eq!(game.player_hands[name].len(), 5);
    }
}

#[tokio::test]
async fn hand_values_are_ranked_descending() {
    let m = manager();
    let id = game_with_pile(
        &m,
        vec![
            card(Suit::Hearts, Value::King),
            card(Suit::Spades, Value::Queen),
            card(Suit::Clubs, Value::Ace),
        ],
    )
    .await;

    m.deal_card_to_player(&id, "Alice").await.unwrap();
    m.deal_card_to_player(&id, "Bob").await.unwrap();
    m.deal_card_to_player(&id, "Alice").await.unwrap();

    let values = m.get_players_with_hand_values(&id).await.unwrap();
    assert_eq!(
        values,
        vec![
            PlayerHandValue {
                player_name: "Alice".into(),
                hand_value: 14
            },
            PlayerHandValue {
                player_name: "Bob".into(),
                hand_value: 12
            },
        ]
    );
}

#[tokio::test]
async fn hand_values_include_removed_players_and_break_ties_by_name() {
    let m = manager();
    let id = game_with_pile(
        &m,
        vec![
            card(Suit::Hearts, Value::Five),
            card(Suit::Clubs, Value::Five),
            card(Suit::Spades, Value::Two),
        ],
    )
    .await;

    m.add_player(&id, "Dora").await.unwrap();
    m.deal_card_to_player(&id, "Dora").await.unwrap();
    m.deal_card_to_player(&id, "Carl").await.unwrap();
    m.deal_card_to_player(&id, "Abe").await.unwrap();
    m.remove_player(&id, "Dora").await.unwrap();

    let values = m.get_players_with_hand_values(&id).await.unwrap();
    let names: Vec<&str> = values.iter().map(|v| v.player_name.as_str()).collect();
    assert_eq!(names, vec!["Carl", "Dora", "Abe"]);
    assert_eq!(values[0].hand_value, 5);
    assert_eq!(values[1].hand_value, 5);
    assert_eq!(values[2].hand_value, 2);
}

#[tokio::test]
async fn hand_values_empty_without_deals() {
    let m = manager();
    let id = m.create_game("x").await.unwrap().id.to_string();
    assert!(m.get_players_with_hand_values(&id).await.unwrap().is_empty());
}

#[tokio::test]
async fn remaining_by_suit_on_empty_pile_lists_all_suits() {
    let m = manager();
    let id = m.create_game("x").await.unwrap().id.to_string();

    let counts = m.get_remaining_cards_count_by_suit(&id).await.unwrap();
    assert_eq!(
        counts,
        vec![
            SuitCount { suit: Suit::Hearts, count: 0 },
            SuitCount { suit: Suit::Diamonds, count: 0 },
            SuitCount { suit: Suit::Clubs, count: 0 },
            SuitCount { suit: Suit::Spades, count: 0 },
        ]
    );
}

#[tokio::test]
async fn remaining_by_suit_tracks_deals() {
    let m = manager();
    let id = game_with_pile(&m, Deck::standard_52().cards).await;

    // Первые три карты новой колоды — черви.
    for _ in 0..3 {
        m.deal_card_to_player(&id, "p").await.unwrap();
    }

    let counts = m.get_remaining_cards_count_by_suit(&id).await.unwrap();
    let by_suit: Vec<(Suit, usize)> = counts.iter().map(|c| (c.suit, c.count)).collect();
    assert_eq!(
        by_suit,
        vec![
            (Suit::Hearts, 10),
            (Suit::Diamonds, 13),
            (Suit::Clubs, 13),
            (Suit::Spades, 13),
        ]
    );
}

#[tokio::test]
async fn remaining_sorted_uses_its_own_suit_order() {
    let m = manager();
    let id = game_with_pile(
        &m,
        vec![
            card(Suit::Clubs, Value::Two),
            card(Suit::Hearts, Value::Ace),
            card(Suit::Hearts, Value::King),
        ],
    )
    .await;

    let sorted = m.get_remaining_cards_sorted(&id).await.unwrap();
    assert_eq!(
        sorted,
        vec![
            CardCount { suit: Suit::Hearts, value: Value::King, count: 1 },
            CardCount { suit: Suit::Hearts, value: Value::Ace, count: 1 },
            CardCount { suit: Suit::Clubs, value: Value::Two, count: 1 },
        ]
    );
}

#[tokio::test]
async fn remaining_sorted_merges_duplicates_across_decks() {
    let m = manager();
    let id = game_with_pile(&m, Deck::standard_52().cards).await;
    m.add_deck_to_game(&id, Deck::standard_52()).await.unwrap();
    m.shuffle_game_deck(&id).await.unwrap();

    let sorted = m.get_remaining_cards_sorted(&id).await.unwrap();
    assert_eq!(sorted.len(), 52);
    assert!(sorted.iter().all(|c| c.count == 2));

    // Hearts, Spades, Clubs, Diamonds; внутри масти King → Ace.
    assert_eq!((sorted[0].suit, sorted[0].value), (Suit::Hearts, Value::King));
    assert_eq!((sorted[12].suit, sorted[12].value), (Suit::Hearts, Value::Ace));
    assert_eq!((sorted[13].suit, sorted[13].value), (Suit::Spades, Value::King));
    assert_eq!(sorted[26].suit, Suit::Clubs);
    assert_eq!(sorted[39].suit, Suit::Diamonds);
    assert_eq!((sorted[51].suit, sorted[51].value), (Suit::Diamonds, Value::Ace));
}

#[tokio::test]
async fn concurrent_deals_on_one_game_lose_nothing() {
    let m = Arc::new(manager());
    let id = game_with_pile(&m, Deck::standard_52().cards).await;

    let mut handles = Vec::new();
    for i in 0..26 {
        let m = Arc::clone(&m);
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            let player = if i % 2 == 0 { "even" } else { "odd" };
            m.deal_card_to_player(&id, player).await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    let game = m.get_game(&id).await.unwrap();
    assert_eq!(game.draw_pile.len(), 26);
    assert_eq!(game.player_hands["even"].len(), 13);
    assert_eq!(game.player_hands["odd"].len(), 13);
    assert_eq!(game.total_cards(), 52);
}

#[tokio::test]
async fn id_round_trips_through_store_key() {
    let m = manager();
    let game = m.create_game("x").await.unwrap();
    let parsed = GameId::parse(&game.id.to_string()).unwrap();
    assert!(m.store().load(&parsed).await.unwrap().is_some());
}
