use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::{Game, GameId};

/// Ошибки хранилища. Для движка это всё одна категория — persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ввод-вывод: {0}")]
    Io(#[from] io::Error),

    #[error("сериализация: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("операция не уложилась в {0:?}")]
    Timeout(Duration),

    #[error("хранилище недоступно: {0}")]
    Unavailable(String),
}

/// Абстракция хранилища игр: документ на игру, ключ — id игры.
///
/// Хранилище обязано дать хотя бы семантику "последний записавший выигрывает".
/// Версий и оптимистичных блокировок здесь нет.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Загрузить игру. `Ok(None)` — такой игры нет.
    async fn load(&self, id: &GameId) -> Result<Option<Game>, StoreError>;

    /// Сохранить игру целиком (вставка или замена).
    async fn save(&self, game: &Game) -> Result<(), StoreError>;

    /// Удалить игру. Возвращает количество удалённых документов (0 или 1).
    async fn delete(&self, id: &GameId) -> Result<u64, StoreError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: RwLock<HashMap<GameId, Game>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn load(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        Ok(self.games.read().await.get(id).cloned())
    }

    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        self.games.write().await.insert(game.id.clone(), game.clone());
        Ok(())
    }

    async fn delete(&self, id: &GameId) -> Result<u64, StoreError> {
        Ok(self.games.write().await.remove(id).map_or(0, |_| 1))
    }
}

/// Хранилище на файлах: один JSON-документ на игру, `<dir>/<id>.json`.
///
/// Запись идёт во временный файл с последующим rename,
/// так что читатель никогда не видит недописанный документ.
#[derive(Clone, Debug)]
pub struct FileGameStore {
    dir: PathBuf,
}

impl FileGameStore {
    /// Открыть хранилище, создав каталог при необходимости.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &GameId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl GameStore for FileGameStore {
    async fn load(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        let bytes = match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(game)?;
        let path = self.path_for(&game.id);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, id: &GameId) -> Result<u64, StoreError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(1),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

/// Хранилище, выбранное конфигом при старте сервера.
#[derive(Debug)]
pub enum AnyGameStore {
    Memory(InMemoryGameStore),
    File(FileGameStore),
}

#[async_trait]
impl GameStore for AnyGameStore {
    async fn load(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        match self {
            AnyGameStore::Memory(s) => s.load(id).await,
            AnyGameStore::File(s) => s.load(id).await,
        }
    }

    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        match self {
            AnyGameStore::Memory(s) => s.save(game).await,
            AnyGameStore::File(s) => s.save(game).await,
        }
    }

    async fn delete(&self, id: &GameId) -> Result<u64, StoreError> {
        match self {
            AnyGameStore::Memory(s) => s.delete(id).await,
            AnyGameStore::File(s) => s.delete(id).await,
        }
    }
}
