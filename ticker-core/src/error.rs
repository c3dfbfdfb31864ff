use thiserror::Error;

/// Ошибки транспорта при запросе к фиду
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Хост не резолвится или не принимает соединение
    #[error("host unreachable: {0}")]
    Unreachable(String),

    /// Истёк таймаут connect/read
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Сервер ответил статусом, отличным от 2xx
    #[error("unexpected http status: {0}")]
    Status(u16),

    /// Тело ответа не удалось разобрать
    #[error("malformed response body: {0}")]
    Body(String),

    /// Всё остальное
    #[error("transport error: {0}")]
    Other(String),
}

impl From<WireError> for FeedError {
    fn from(e: WireError) -> Self {
        FeedError::Body(e.to_string())
    }
}

/// Ошибки разбора одной записи фида
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// В позиции 0 нет строки с символом
    #[error("record has no symbol")]
    MissingSymbol,

    /// Символ не делится на base/quote
    #[error("cannot split symbol into base/quote: {0}")]
    BadSymbol(String),

    /// Запись короче, чем требует схема
    #[error("{symbol}: missing field at index {index}")]
    MissingField { symbol: String, index: usize },

    /// Поле не является десятичным числом
    #[error("{symbol}: field {index} is not a decimal: {value}")]
    BadDecimal {
        symbol: String,
        index: usize,
        value: String,
    },

    /// Не удалось отформатировать цену
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Ошибки форматирования
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Код не является валютой ISO 4217
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Ошибки декодирования тела ответа
#[derive(Debug, Error)]
pub enum WireError {
    /// Невалидный JSON или не массив массивов
    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),
}
