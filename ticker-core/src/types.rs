use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::{ALL_SYMBOLS, PREFIX_TICKER};

/// Торговая пара, готовая к показу
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticker {
    pub symbol_from: String,
    pub symbol_to: String,
    pub last_price: Decimal,
    pub daily_change_relative: Decimal,
    pub icon_url: String,
    pub formatted_value: String,
    pub formatted_daily_change_relative: String,
}

/// Классы ошибок, которые видит слой представления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCase {
    Timeout,
    Connectivity,
    RateLimited,
    Generic,
}

impl fmt::Display for ErrorCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCase::Timeout => "timeout",
            ErrorCase::Connectivity => "connectivity",
            ErrorCase::RateLimited => "rate limited",
            ErrorCase::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// Результат загрузки: значение или класс ошибки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentResult<T> {
    Success(T),
    Error(ErrorCase),
}

impl<T> ContentResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ContentResult::Success(_))
    }
}

/// Снимок состояния, который получает подписчик
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EngineState {
    Loading,
    Success { tickers: Vec<Ticker>, query: String },
    Error { error_case: ErrorCase },
}

impl EngineState {
    pub fn is_success(&self) -> bool {
        matches!(self, EngineState::Success { .. })
    }
}

/// Какие инструменты запрашивать у фида
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSpec {
    All,
    /// Коды уже с префиксом `t`
    List(Vec<String>),
}

impl SymbolSpec {
    /// Строит список из кодов, нормализуя каждый к виду `tXXXYYY`.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SymbolSpec::List(
            codes
                .into_iter()
                .filter_map(|c| normalize_code(c.as_ref()))
                .collect(),
        )
    }

    /// Значение параметра `symbols`
    pub fn as_query(&self) -> String {
        match self {
            SymbolSpec::All => ALL_SYMBOLS.to_string(),
            SymbolSpec::List(codes) => codes.join(","),
        }
    }
}

impl fmt::Display for SymbolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_query())
    }
}

/// "btcusd" / "tBTCUSD" / " doge:usd " -> "tBTCUSD", "tDOGE:USD"
///
/// Префикс `t` снимается только перед заглавной буквой/цифрой,
/// иначе "trxusd" превратился бы в "tRXUSD".
pub fn normalize_code(raw: &str) -> Option<String> {
    let s = raw.trim();
    let s = match s.strip_prefix(PREFIX_TICKER) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit()) => {
            rest
        }
        Some("") => "",
        _ => s,
    };
    if s.is_empty() {
        return None;
    }
    Some(format!("{PREFIX_TICKER}{}", s.to_ascii_uppercase()))
}
