//! Сервис карточных игровых сессий.
//!
//! Слои:
//! - `domain` — карты, колода, игра;
//! - `engine` — операции над игрой (load → mutate → save) и статистика;
//! - `infra`  — хранилища, RNG, id, конфиг;
//! - `api`    — команды/запросы и HTTP-роутер.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
