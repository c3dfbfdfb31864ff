use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};

use ticker_core::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, POLL_INTERVAL};
use ticker_engine::{EngineConfig, FeedConfig};
use ticker_core::SymbolSpec;

/// Ticker CLI - опрос фида тикеров и печать состояния в терминал.
///
/// Со stdin читаются команды `:start`, `:stop`, `:quit`;
/// любая другая строка становится поисковым запросом.
#[derive(Parser, Debug, Clone)]
#[command(name = "ticker-cli", version, about)]
#[command(
    group(
        ArgGroup::new("symbols_source")
            .args(["symbols_file", "symbols", "all"])
    )
)]
pub(crate) struct Args {
    /// Базовый URL API, к нему дописывается /tickers
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub(crate) base_url: String,

    /// Список инструментов строкой, например: "tBTCUSD,ethusd, XAUT:USD"
    #[arg(long)]
    pub(crate) symbols: Option<String>,

    /// Файл инструментов (по одному или через запятую на строку, # - комментарий)
    #[arg(long)]
    pub(crate) symbols_file: Option<PathBuf>,

    /// Запрашивать все инструменты (symbols=ALL)
    #[arg(long)]
    pub(crate) all: bool,

    /// Период опроса, секунды
    #[arg(long, default_value_t = POLL_INTERVAL.as_secs(),
          value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) interval_secs: u64,

    /// Таймаут одного HTTP-запроса, секунды
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(),
          value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) timeout_secs: u64,

    /// Начальный поисковый запрос
    #[arg(long, default_value = "")]
    pub(crate) query: String,

    /// Печатать каждое состояние одной JSON-строкой
    #[arg(long)]
    pub(crate) json: bool,
}

impl Args {
    /// Проверки, которые clap не покрывает: схема URL, файл существует
    pub(crate) fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            bail!("--base-url is empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("--base-url must start with http:// or https:// (got: {})", self.base_url);
        }

        if let Some(path) = &self.symbols_file {
            let md = std::fs::metadata(path)
                .with_context(|| format!("symbols file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("--symbols-file must point to a file: {:?}", path);
            }
        }

        Ok(())
    }

    pub(crate) fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            base_url: self.base_url.trim().to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub(crate) fn engine_config(&self, symbols: SymbolSpec) -> EngineConfig {
        EngineConfig {
            symbols,
            interval: Duration::from_secs(self.interval_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ticker-cli").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_builtin_constants() {
        let args = parse(&[]);
        args.validate().unwrap();

        let feed = args.feed_config();
        assert_eq!(feed.base_url, DEFAULT_BASE_URL);
        assert_eq!(feed.timeout, Duration::from_secs(60));
        assert_eq!(args.engine_config(SymbolSpec::All).interval, Duration::from_secs(5));
        assert!(!args.json);
        assert_eq!(args.query, "");
    }

    #[test]
    fn symbol_sources_are_mutually_exclusive() {
        let res = Args::try_parse_from(["ticker-cli", "--all", "--symbols", "tBTCUSD"]);
        assert!(res.is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let res = Args::try_parse_from(["ticker-cli", "--interval-secs", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let args = parse(&["--base-url", "ftp://example.com"]);
        assert!(args.validate().is_err());
    }
}
