use log::{debug, warn};

use ticker_core::classify::classify;
use ticker_core::parser::parse_records;
use ticker_core::{ContentResult, Ticker};

use crate::feed::FeedClient;

/// Фид + разбор: на выходе либо готовые тикеры, либо класс ошибки
pub struct TickerRepository<C> {
    client: C,
}

impl<C: FeedClient> TickerRepository<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn get_tickers(&self, symbol_spec: &str) -> ContentResult<Vec<Ticker>> {
        match self.client.fetch(symbol_spec) {
            Ok(records) => {
                let tickers = parse_records(&records);
                debug!("fetched {} records -> {} tickers", records.len(), tickers.len());
                ContentResult::Success(tickers)
            }
            Err(e) => {
                let case = classify(&e);
                warn!("fetch failed ({case}): {e}");
                ContentResult::Error(case)
            }
        }
    }
}
