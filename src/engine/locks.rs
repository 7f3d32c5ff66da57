use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::GameId;

/// Мьютексы по id игры.
///
/// Держим цепочку load → mutate → save под одним замком на игру,
/// чтобы параллельные запросы к одной игре в этом процессе не теряли
/// изменения друг друга. Между процессами хранилище по-прежнему
/// "последний записавший выигрывает".
#[derive(Debug, Default)]
pub struct GameLocks {
    inner: Mutex<HashMap<GameId, Arc<AsyncMutex<()>>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Захватить замок игры. Замок отпускается при drop гарда.
    pub async fn lock(&self, id: &GameId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            // Замки, которые никто не держит и не ждёт, больше не нужны.
            map.retain(|_, m| Arc::strong_count(m) > 1);
            map.entry(id.clone()).or_default().clone()
        };
        slot.lock_owned().await
    }

    /// Сколько замков сейчас живо (держится или ожидается).
    pub fn active(&self) -> usize {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.values().filter(|m| Arc::strong_count(m) > 1).count()
    }
}
