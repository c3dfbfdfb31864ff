use std::time::Duration;

use ticker_core::SymbolSpec;
use ticker_core::constants::{DEFAULT_BASE_URL, DEFAULT_SYMBOLS, DEFAULT_TIMEOUT, POLL_INTERVAL};

/// Ёмкость очереди одного подписчика
pub(crate) const SUBSCRIBER_CAPACITY: usize = 64;

pub(crate) const WORKER_THREAD_NAME: &str = "ticker-poller";

/// Сколько drop движка ждёт поток опроса, прежде чем отсоединить его
pub(crate) const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Настройки HTTP-клиента фида
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Базовый URL, к нему дописывается `/tickers`
    pub base_url: String,
    /// Таймаут и на connect, и на весь запрос
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Настройки цикла опроса
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub symbols: SymbolSpec,
    pub interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolSpec::from_codes(DEFAULT_SYMBOLS.iter().copied()),
            interval: POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_config_polls_builtin_pairs_every_5s() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.interval, Duration::from_secs(5));

        let query = cfg.symbols.as_query();
        assert!(query.starts_with("tBTCUSD,tETHUSD,tCHSB:USD,"));
        assert_eq!(query.split(',').count(), DEFAULT_SYMBOLS.len());
    }

    #[test]
    fn default_feed_config_points_at_bitfinex_with_60s_timeout() {
        let cfg = FeedConfig::default();
        assert_eq!(cfg.base_url, "https://api-pub.bitfinex.com/v2");
        assert_eq!(cfg.timeout, Duration::from_secs(60));
    }
}
