use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::domain::{Card, Deck, Game, GameId};
use crate::engine::errors::EngineError;
use crate::engine::locks::GameLocks;
use crate::engine::stats::{self, CardCount, PlayerHandValue, SuitCount};
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::{GameStore, StoreError};

/// Бюджет по умолчанию на одну цепочку load → mutate → save.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Менеджер игр:
/// - хранилище и RNG приходят снаружи (без глобального состояния);
/// - каждая операция: проверить id → загрузить → изменить → сохранить;
/// - мутации одной игры сериализуются через `GameLocks`;
/// - вся цепочка ограничена `timeout`, истечение = ошибка хранилища.
pub struct GameManager<S, R> {
    store: S,
    rng: Mutex<R>,
    ids: IdGenerator,
    locks: GameLocks,
    timeout: Duration,
}

impl<S, R> GameManager<S, R>
where
    S: GameStore,
    R: RandomSource + Send,
{
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
            ids: IdGenerator::new(),
            locks: GameLocks::new(),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Новая колода из 52 карт в фиксированном порядке. Без перемешивания.
    pub fn create_deck(&self) -> Deck {
        Deck::standard_52()
    }

    /// Создать пустую игру и сохранить её.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_game(&self, name: &str) -> Result<Game, EngineError> {
        let game = Game::new(self.ids.next_game_id(), name);
        self.bounded(self.store.save(&game)).await?;
        info!(game_id = %game.id, name, "game created");
        Ok(game)
    }

    /// Прочитать игру целиком.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_game(&self, game_id: &str) -> Result<Game, EngineError> {
        let id = parse_id(game_id)?;
        self.bounded(self.load_existing(&id)).await
    }

    /// Удалить игру.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_game(&self, game_id: &str) -> Result<(), EngineError> {
        let id = parse_id(game_id)?;
        let deleted = self
            .bounded(async {
                let _guard = self.locks.lock(&id).await;
                self.store.delete(&id).await.map_err(EngineError::from)
            })
            .await?;

        if deleted == 0 {
            return Err(EngineError::GameNotFound(id));
        }
        info!(game_id = %id, "game deleted");
        Ok(())
    }

    /// Положить колоду под низ прикупа.
    #[instrument(level = "debug", skip(self, deck), fields(cards = deck.len()))]
    pub async fn add_deck_to_game(&self, game_id: &str, deck: Deck) -> Result<Game, EngineError> {
        self.mutate(game_id, move |game| {
            game.append_deck(deck);
            Ok(game.clone())
        })
        .await
    }

    /// Перемешать прикуп и сохранить новый порядок.
    #[instrument(level = "debug", skip(self))]
    pub async fn shuffle_game_deck(&self, game_id: &str) -> Result<Game, EngineError> {
        self.mutate(game_id, |game| {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            game.shuffle_draw_pile(&mut *rng);
            debug!(cards = game.draw_pile.len(), "draw pile shuffled");
            Ok(game.clone())
        })
        .await
    }

    /// Добавить игрока в конец списка.
    #[instrument(level = "debug", skip(self))]
    pub async fn add_player(&self, game_id: &str, player_name: &str) -> Result<Game, EngineError> {
        self.mutate(game_id, |game| {
            if !game.add_player(player_name) {
                return Err(EngineError::PlayerAlreadyJoined(player_name.to_string()));
            }
            Ok(game.clone())
        })
        .await
    }

    /// Убрать игрока из списка. Его рука остаётся в игре.
    #[instrument(level = "debug", skip(self))]
    pub async fn remove_player(
        &self,
        game_id: &str,
        player_name: &str,
    ) -> Result<Game, EngineError> {
        self.mutate(game_id, |game| {
            if !game.remove_player(player_name) {
                return Err(EngineError::PlayerNotFound(player_name.to_string()));
            }
            Ok(game.clone())
        })
        .await
    }

    /// Сдать верхнюю карту прикупа игроку.
    ///
    /// Игрок не обязан быть в списке игроков.
    #[instrument(level = "debug", skip(self))]
    pub async fn deal_card_to_player(
        &self,
        game_id: &str,
        player_name: &str,
    ) -> Result<Card, EngineError> {
        self.mutate(game_id, |game| {
            let card = game.deal_top_to(player_name).ok_or(EngineError::EmptyDeck)?;
            debug!(%card, left = game.draw_pile.len(), "card dealt");
            Ok(card)
        })
        .await
    }

    /// Рука игрока. `PlayerNotFound`, если ему ни разу не раздавали.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_player_hand(
        &self,
        game_id: &str,
        player_name: &str,
    ) -> Result<Vec<Card>, EngineError> {
        let game = self.get_game(game_id).await?;
        game.hand(player_name)
            .map(<[Card]>::to_vec)
            .ok_or_else(|| EngineError::PlayerNotFound(player_name.to_string()))
    }

    /// Очки рук всех, кому раздавали, по убыванию.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_players_with_hand_values(
        &self,
        game_id: &str,
    ) -> Result<Vec<PlayerHandValue>, EngineError> {
        let game = self.get_game(game_id).await?;
        Ok(stats::players_with_hand_values(&game))
    }

    /// Остаток прикупа по мастям (все четыре масти).
    #[instrument(level = "debug", skip(self))]
    pub async fn get_remaining_cards_count_by_suit(
        &self,
        game_id: &str,
    ) -> Result<Vec<SuitCount>, EngineError> {
        let game = self.get_game(game_id).await?;
        Ok(stats::remaining_count_by_suit(&game.draw_pile))
    }

    /// Остаток прикупа по (масть, достоинство), отсортированный.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_remaining_cards_sorted(
        &self,
        game_id: &str,
    ) -> Result<Vec<CardCount>, EngineError> {
        let game = self.get_game(game_id).await?;
        Ok(stats::remaining_sorted(&game.draw_pile))
    }

    /// Общая схема мутации: id → замок → load → f → save.
    ///
    /// Если `f` вернул ошибку, ничего не сохраняется.
    async fn mutate<T, F>(&self, game_id: &str, f: F) -> Result<T, EngineError>
    where
        F: FnOnce(&mut Game) -> Result<T, EngineError> + Send,
        T: Send,
    {
        let id = parse_id(game_id)?;
        self.bounded(async {
            let _guard = self.locks.lock(&id).await;
            let mut game = self.load_existing(&id).await?;
            let out = f(&mut game)?;
            self.store.save(&game).await?;
            Ok::<_, EngineError>(out)
        })
        .await
    }

    async fn load_existing(&self, id: &GameId) -> Result<Game, EngineError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| EngineError::GameNotFound(id.clone()))
    }

    /// Ограничить операцию таймаутом движка.
    async fn bounded<T, E, Fut>(&self, fut: Fut) -> Result<T, EngineError>
    where
        Fut: Future<Output = Result<T, E>>,
        EngineError: From<E>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res.map_err(EngineError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout).into()),
        }
    }
}

fn parse_id(raw: &str) -> Result<GameId, EngineError> {
    GameId::parse(raw).ok_or_else(|| EngineError::InvalidGameId(raw.to_string()))
}
