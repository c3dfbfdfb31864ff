use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::types::normalize_code;

/// Чтение кодов инструментов: по одному или через запятую на строку, `#` начинает комментарий
pub fn read_symbols<R: io::Read>(reader: R) -> io::Result<Vec<String>> {
    let mut set = BTreeSet::new();
    let buf = BufReader::new(reader);

    for line in buf.lines() {
        let line = line?;
        if let Some(content) = strip_comment(&line) {
            set.extend(content.split(',').filter_map(normalize_code));
        }
    }

    Ok(set.into_iter().collect())
}

/// Чтение кодов из файла
pub fn read_symbols_from_path(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let f = File::open(path)?;
    read_symbols(f)
}

/// Парсит список из строки вида "tBTCUSD, ethusd, ,DOGE:USD".
/// Правила:
/// - разделитель: запятая
/// - trim пробелов, пустые элементы игнорируются
/// - нормализация: префикс `t` + ASCII uppercase
/// - результат: отсортирован + уникален (BTreeSet)
pub fn parse_symbols_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(normalize_code)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn strip_comment(line: &str) -> Option<&str> {
    // "tBTCUSD # comment" -> "tBTCUSD"
    let s = line.split('#').next().unwrap_or("").trim();
    if s.is_empty() { None } else { Some(s) }
}
