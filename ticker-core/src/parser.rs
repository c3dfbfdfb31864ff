use std::collections::HashSet;
use std::str::FromStr;

use log::{debug, warn};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::constants::{
    DAILY_CHANGE_RELATIVE_IDX, ICON_URL_TEMPLATE, LAST_PRICE_IDX, PAIR_SEPARATOR, PREFIX_FUNDING,
    PREFIX_TICKER,
};
use crate::error::ParseError;
use crate::format::{format_as_percentage, format_value};
use crate::types::Ticker;
use crate::wire::RawRecord;

/// Разбирает пачку записей.
///
/// - funding-инструменты молча отбрасываются
/// - битые записи пропускаются по одной (warn в лог), пачка не падает
/// - повтор `symbol_from` отбрасывается, остаётся первое вхождение
pub fn parse_records(records: &[RawRecord]) -> Vec<Ticker> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        match parse_record(record) {
            Ok(Some(ticker)) => {
                if seen.insert(ticker.symbol_from.clone()) {
                    out.push(ticker);
                } else {
                    debug!(
                        "duplicate base {}/{}; keeping first",
                        ticker.symbol_from, ticker.symbol_to
                    );
                }
            }
            Ok(None) => {}
            Err(e) => warn!("skipping record: {e}"),
        }
    }

    out
}

/// Одна запись -> `Ticker`; `Ok(None)` для funding-инструментов.
pub fn parse_record(record: &RawRecord) -> Result<Option<Ticker>, ParseError> {
    let symbol = record.symbol().ok_or(ParseError::MissingSymbol)?;

    if symbol.starts_with(PREFIX_FUNDING) {
        return Ok(None);
    }

    let remainder = symbol.strip_prefix(PREFIX_TICKER).unwrap_or(symbol);
    let (base, quote) = split_pair(remainder)?;

    let last_price = decimal_field(record, symbol, LAST_PRICE_IDX)?;
    let daily_change_relative = decimal_field(record, symbol, DAILY_CHANGE_RELATIVE_IDX)?;

    let formatted_value = format_value(&quote, last_price)?;
    let formatted_daily_change_relative = format_as_percentage(daily_change_relative);

    Ok(Some(Ticker {
        icon_url: icon_url(&base),
        symbol_from: base,
        symbol_to: quote,
        last_price,
        daily_change_relative,
        formatted_value,
        formatted_daily_change_relative,
    }))
}

/// "BTCUSD" -> ("BTC", "USD"), "XAUT:USD" -> ("XAUT", "USD")
pub fn split_pair(remainder: &str) -> Result<(String, String), ParseError> {
    if remainder.chars().count() == 6 {
        // 6 символов: обе ноги по 3
        let mid = remainder
            .char_indices()
            .nth(3)
            .map(|(i, _)| i)
            .ok_or_else(|| ParseError::BadSymbol(remainder.to_string()))?;
        let (base, quote) = remainder.split_at(mid);
        return Ok((base.to_string(), quote.to_string()));
    }

    match remainder.split_once(PAIR_SEPARATOR) {
        Some((base, quote))
            if !base.is_empty() && !quote.is_empty() && !quote.contains(PAIR_SEPARATOR) =>
        {
            Ok((base.to_string(), quote.to_string()))
        }
        _ => Err(ParseError::BadSymbol(remainder.to_string())),
    }
}

pub fn icon_url(base: &str) -> String {
    ICON_URL_TEMPLATE.replace("{}", &base.to_lowercase())
}

fn decimal_field(record: &RawRecord, symbol: &str, index: usize) -> Result<Decimal, ParseError> {
    let value = record.get(index).ok_or_else(|| ParseError::MissingField {
        symbol: symbol.to_string(),
        index,
    })?;

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };

    parse_decimal(&text).ok_or_else(|| ParseError::BadDecimal {
        symbol: symbol.to_string(),
        index,
        value: text,
    })
}

/// Точный разбор без f64; понимает и экспоненту ("1.5e-7")
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}
