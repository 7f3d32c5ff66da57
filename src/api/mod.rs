//! Внешний API игрового сервиса.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние (создать игру, добавить колоду, сдать карту);
//! - запросы (queries.rs) — только чтение;
//! - DTO (dto.rs) — удобные структуры для клиента;
//! - ошибки (errors.rs) — то, что видит клиент, вместе с HTTP-статусом;
//! - HTTP-роутер (http.rs).

pub mod commands;
pub mod dto;
pub mod errors;
pub mod http;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use http::router;
pub use queries::*;
