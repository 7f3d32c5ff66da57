use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битый JSON, нет обязательного поля).
    BadRequest(String),

    /// Игра или игрок не найдены.
    NotFound(String),

    /// Команда конфликтует с текущим состоянием (игрок уже в игре, прикуп пуст).
    Conflict(String),

    /// Внутренняя ошибка сервера (хранилище недоступно, таймаут).
    Internal(String),
}

impl ApiError {
    /// HTTP-статус для ответа.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::InvalidGameId(_) => ApiError::BadRequest(message),
            EngineError::GameNotFound(_) | EngineError::PlayerNotFound(_) => {
                ApiError::NotFound(message)
            }
            EngineError::PlayerAlreadyJoined(_) | EngineError::EmptyDeck => {
                ApiError::Conflict(message)
            }
            EngineError::Persistence(_) => ApiError::Internal(message),
        }
    }
}

/// Тело ответа с ошибкой: `{"error": "..."}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        ErrorBody {
            error: err.message().to_string(),
        }
    }
}
