use serde::Deserialize;
use serde_json::Value;

use crate::constants::SYMBOL_IDX;
use crate::error::WireError;

/// Одна позиционная запись фида: `["tBTCUSD", bid, bid_size, ..., last_price, ...]`.
///
/// Типы элементов разнородные, поэтому храним как есть; числа благодаря
/// `arbitrary_precision` сохраняют исходный текст.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Vec<Value>);

impl RawRecord {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Символ инструмента, если в позиции 0 строка
    pub fn symbol(&self) -> Option<&str> {
        self.0.get(SYMBOL_IDX)?.as_str()
    }
}

impl From<Vec<Value>> for RawRecord {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// Разбирает тело ответа `/tickers` (JSON-массив массивов).
pub fn decode_records(body: &str) -> Result<Vec<RawRecord>, WireError> {
    Ok(serde_json::from_str(body)?)
}
