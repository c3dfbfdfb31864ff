//! # ticker-core
//!
//! Доменные типы и чистая логика тикеров, общие для движка опроса и CLI.
//!
//! Этот крейт содержит:
//!
//! - [`wire`] - сырые позиционные записи фида и декодирование тела ответа
//! - [`parser`] - запись фида -> [`Ticker`] (funding-инструменты отбрасываются)
//! - [`format`] - цена в валюте и проценты в локали en-US
//! - [`classify`] - ошибка транспорта -> [`ErrorCase`]
//! - [`symbols`] - чтение и нормализация списка инструментов из текста/файла
//! - [`types`] - доменные типы
//! - [`error`] - типы ошибок
//!
//! ## Пример: разбор ответа фида
//!
//! ```rust
//! use ticker_core::parser::parse_records;
//! use ticker_core::wire::decode_records;
//!
//! let body = r#"[
//!     ["tBTCUSD",67956,5.4,67957,6.2,-517,-0.00755042,67956,434.8,69505,67328],
//!     ["fUSD",0.0003,0.0003,30,2279164.9,0.0003,2,1386738.2,-0.00001,-0.04,0.0002,206937551.2,0.0003,0.00002,null,null,4093637.0]
//! ]"#;
//!
//! let tickers = parse_records(&decode_records(body).unwrap());
//! assert_eq!(tickers.len(), 1);
//! assert_eq!(tickers[0].symbol_from, "BTC");
//! assert_eq!(tickers[0].formatted_value, "$67,956.00");
//! assert_eq!(tickers[0].daily_change_relative.to_string(), "-0.00755042");
//! ```
//!
//! ## Пример: классификация ошибок
//!
//! ```rust
//! use ticker_core::{classify::classify, ErrorCase, FeedError};
//!
//! assert_eq!(classify(&FeedError::Status(429)), ErrorCase::RateLimited);
//! assert_eq!(classify(&FeedError::Status(502)), ErrorCase::Generic);
//! ```
//!
//! ## Дизайн
//!
//! Здесь нет ни потоков, ни сети: только типы, разбор и форматирование.
//! Числа всюду `rust_decimal::Decimal`, через f64 ничего не проходит.

#![forbid(unsafe_code)]

/// Классификация ошибок транспорта.
pub mod classify;

/// Форматирование цен и процентов.
pub mod format;

/// Разбор записей фида в тикеры.
pub mod parser;

/// Чтение/нормализация списка инструментов.
pub mod symbols;

/// Доменные типы.
pub mod types;

/// Сырые записи фида.
pub mod wire;

/// Ошибки `ticker-core`.
pub mod error;

/// Общие константы
pub mod constants;

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{FeedError, FormatError, ParseError, WireError};
pub use crate::types::{ContentResult, EngineState, ErrorCase, SymbolSpec, Ticker};
pub use crate::wire::RawRecord;
