use std::time::Duration;

/// Префикс торговой пары в символе инструмента
pub const PREFIX_TICKER: &str = "t";

/// Префикс funding-инструмента (не торгуется, в выдачу не попадает)
pub const PREFIX_FUNDING: &str = "f";

/// Разделитель base/quote для символов с ногами разной длины ("XAUT:USD")
pub const PAIR_SEPARATOR: char = ':';

/// Позиции полей в записи торговой пары
pub const SYMBOL_IDX: usize = 0;
pub const DAILY_CHANGE_RELATIVE_IDX: usize = 6;
pub const LAST_PRICE_IDX: usize = 7;

/// Значение `symbols`, запрашивающее все инструменты
pub const ALL_SYMBOLS: &str = "ALL";

/// Шаблон иконки; `{}` заменяется на base-символ в нижнем регистре
pub const ICON_URL_TEMPLATE: &str = "https://static.coincap.io/assets/icons/{}@2x.png";

pub const DEFAULT_BASE_URL: &str = "https://api-pub.bitfinex.com/v2";

/// Таймаут на connect/read для одного запроса
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Период опроса
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Пары, которые опрашиваются, если пользователь ничего не задал
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "tBTCUSD",
    "tETHUSD",
    "tCHSB:USD",
    "tLTCUSD",
    "tXRPUSD",
    "tDSHUSD",
    "tRRTUSD",
    "tEOSUSD",
    "tSANUSD",
    "tDATUSD",
    "tSNTUSD",
    "tDOGE:USD",
    "tLUNA:USD",
    "tMATIC:USD",
    "tNEXO:USD",
    "tOCEAN:USD",
    "tBEST:USD",
    "tAAVE:USD",
    "tPLUUSD",
    "tFILUSD",
];
