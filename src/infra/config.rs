use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::engine::DEFAULT_STORE_TIMEOUT;

pub const ENV_ADDR: &str = "CARD_GAME_ADDR";
pub const ENV_DATA_DIR: &str = "CARD_GAME_DATA_DIR";
pub const ENV_STORE_TIMEOUT_MS: &str = "CARD_GAME_STORE_TIMEOUT_MS";
pub const ENV_RNG_SEED: &str = "CARD_GAME_RNG_SEED";

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: некорректное значение '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Конфиг сервера.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Адрес, на котором слушает HTTP.
    pub addr: SocketAddr,
    /// Каталог файлового хранилища. `None` — игры живут в памяти.
    pub data_dir: Option<PathBuf>,
    /// Бюджет на одну цепочку load → mutate → save.
    pub store_timeout: Duration,
    /// Seed для перемешивания. `None` — из энтропии.
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Прочитать конфиг из переменных окружения.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Прочитать конфиг через произвольный источник ключей (удобно для тестов).
    /// Пустая строка считается незаданным значением.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = get(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: ENV_ADDR,
            value: addr_raw.clone(),
        })?;

        let store_timeout = match get(ENV_STORE_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_STORE_TIMEOUT_MS,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_STORE_TIMEOUT,
        };

        let rng_seed = get(ENV_RNG_SEED)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    key: ENV_RNG_SEED,
                    value: raw.clone(),
                })
            })
            .transpose()?;

        Ok(Self {
            addr,
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from),
            store_timeout,
            rng_seed,
        })
    }
}
