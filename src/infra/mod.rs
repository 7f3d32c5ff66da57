//! Инфраструктурный слой вокруг движка:
//! - генерация id игр;
//! - RNG-реализации для движка;
//! - хранилища игр (память / файлы);
//! - конфиг сервера.

pub mod config;
pub mod ids;
pub mod persistence;
pub mod rng;

pub use config::{AppConfig, ConfigError};
pub use ids::*;
pub use persistence::*;
pub use rng::*;
