use std::fmt;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

use ticker_core::SymbolSpec;
use ticker_core::constants::DEFAULT_SYMBOLS;
use ticker_core::symbols::{parse_symbols_csv, read_symbols_from_path};

use crate::cli::Args;

/// Откуда брать список инструментов
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SymbolSource {
    Builtin,
    All,
    File(PathBuf),
    Inline(String),
}

impl fmt::Display for SymbolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolSource::Builtin => f.write_str("built-in list"),
            SymbolSource::All => f.write_str("--all"),
            SymbolSource::File(path) => write!(f, "--symbols-file {}", path.display()),
            SymbolSource::Inline(raw) => write!(f, "--symbols {raw:?}"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum SymbolsError {
    #[error("cannot read symbols file {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symbols list is empty ({0})")]
    Empty(SymbolSource),
}

impl SymbolSource {
    /// clap уже гарантирует, что задан не больше чем один флаг
    pub(crate) fn from_args(args: &Args) -> Self {
        match (&args.symbols_file, &args.symbols) {
            _ if args.all => SymbolSource::All,
            (Some(path), _) => SymbolSource::File(path.clone()),
            (None, Some(raw)) => SymbolSource::Inline(raw.clone()),
            (None, None) => SymbolSource::Builtin,
        }
    }

    pub(crate) fn load(self) -> Result<SymbolSpec, SymbolsError> {
        let codes = match &self {
            SymbolSource::All => return Ok(SymbolSpec::All),
            SymbolSource::Builtin => return Ok(SymbolSpec::from_codes(DEFAULT_SYMBOLS.iter().copied())),
            SymbolSource::File(path) => {
                read_symbols_from_path(path).map_err(|source| SymbolsError::Unreadable {
                    path: path.clone(),
                    source,
                })?
            }
            SymbolSource::Inline(raw) => parse_symbols_csv(raw),
        };

        if codes.is_empty() {
            return Err(SymbolsError::Empty(self));
        }

        debug!("{} symbols from {self}", codes.len());
        Ok(SymbolSpec::List(codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn source(argv: &[&str]) -> SymbolSource {
        let args = Args::try_parse_from(std::iter::once("ticker-cli").chain(argv.iter().copied()))
            .unwrap();
        SymbolSource::from_args(&args)
    }

    #[test]
    fn flags_pick_the_source() {
        assert_eq!(source(&[]), SymbolSource::Builtin);
        assert_eq!(source(&["--all"]), SymbolSource::All);
        assert_eq!(source(&["--symbols", "btcusd"]), SymbolSource::Inline("btcusd".into()));
        assert_eq!(
            source(&["--symbols-file", "pairs.txt"]),
            SymbolSource::File(PathBuf::from("pairs.txt"))
        );
    }

    #[test]
    fn builtin_and_all() {
        assert_eq!(
            SymbolSource::Builtin.load().unwrap(),
            SymbolSpec::from_codes(DEFAULT_SYMBOLS.iter().copied())
        );
        assert_eq!(SymbolSource::All.load().unwrap(), SymbolSpec::All);
    }

    #[test]
    fn inline_list_is_normalized_sorted_and_deduped() {
        let spec = SymbolSource::Inline("ethusd, tBTCUSD,,xaut:usd,ETHUSD".into())
            .load()
            .unwrap();
        assert_eq!(spec.as_query(), "tBTCUSD,tETHUSD,tXAUT:USD");
    }

    #[test]
    fn blank_inline_list_is_an_error() {
        let err = SymbolSource::Inline(" , ".into()).load().unwrap_err();
        assert!(matches!(err, SymbolsError::Empty(SymbolSource::Inline(_))));
        assert_eq!(err.to_string(), "symbols list is empty (--symbols \" , \")");
    }

    #[test]
    fn file_with_only_comments_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "# nothing here").unwrap();
        writeln!(f).unwrap();

        let err = SymbolSource::File(f.path().to_path_buf()).load().unwrap_err();
        assert!(matches!(err, SymbolsError::Empty(SymbolSource::File(_))));
    }

    #[test]
    fn file_is_read() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "tBTCUSD # bitcoin").unwrap();
        writeln!(f, "dogeusd,ethusd").unwrap();

        let spec = SymbolSource::File(f.path().to_path_buf()).load().unwrap();
        assert_eq!(spec.as_query(), "tBTCUSD,tDOGEUSD,tETHUSD");
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = SymbolSource::File(dir.path().join("absent.txt")).load().unwrap_err();
        assert!(matches!(err, SymbolsError::Unreadable { .. }));
    }
}
