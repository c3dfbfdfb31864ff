use std::io::Write;

use ticker_core::EngineState;

/// Печатает снимок: таблицей или одной JSON-строкой
pub(crate) fn write_state<W: Write>(out: &mut W, state: &EngineState, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, state)?;
        writeln!(out)?;
        return Ok(out.flush()?);
    }

    match state {
        EngineState::Loading => writeln!(out, "loading...")?,
        EngineState::Error { error_case } => writeln!(out, "error: {error_case}")?,
        EngineState::Success { tickers, query } => {
            if query.trim().is_empty() {
                writeln!(out, "-- {} tickers --", tickers.len())?;
            } else {
                writeln!(out, "-- {} tickers matching {:?} --", tickers.len(), query)?;
            }
            for t in tickers {
                writeln!(
                    out,
                    "{:<8} {:>18} {:>9}",
                    format!("{}/{}", t.symbol_from, t.symbol_to),
                    t.formatted_value,
                    t.formatted_daily_change_relative
                )?;
            }
        }
    }

    Ok(out.flush()?)
}
