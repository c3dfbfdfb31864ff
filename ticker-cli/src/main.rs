//! Точка входа `ticker-cli`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка списка инструментов
//! - создание HTTP-клиента и движка опроса, подписка на состояния
//! - чтение команд со stdin в отдельном потоке (`:start`, `:stop`, `:quit`, запрос)
//! - печать каждого нового состояния
//! - корректная остановка по `Ctrl+C` или `:quit`

mod cli;
mod console;
mod render;
mod symbols;

use std::io;
use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::select;
use log::{debug, info};

use ticker_engine::{HttpFeedClient, PollingEngine};

use crate::console::Command;

const TICK_RATE_MS: u64 = 200;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let args = cli::Args::parse();
    args.validate()?;

    let symbols = symbols::SymbolSource::from_args(&args).load()?;

    info!(
        "Starting ticker-cli: base_url={}, interval={}s, timeout={}s, symbols={}",
        args.base_url, args.interval_secs, args.timeout_secs, symbols
    );

    let client = HttpFeedClient::new(&args.feed_config())?;
    let engine = PollingEngine::new(client, args.engine_config(symbols));
    engine.set_query(&args.query);

    let states = engine.subscribe();
    let mut commands = console::spawn_stdin_reader()?;

    engine.start();

    let mut out = io::stdout().lock();

    while !shutdown.load(Ordering::Relaxed) {
        select! {
            recv(states.receiver()) -> msg => match msg {
                Ok(state) => render::write_state(&mut out, &state, args.json)?,
                Err(_) => break,
            },
            recv(commands) -> msg => match msg {
                Ok(Command::Start) => engine.start(),
                Ok(Command::Stop) => engine.stop(),
                Ok(Command::Quit) => break,
                Ok(Command::Query(text)) => engine.set_query(&text),
                Err(_) => {
                    // stdin закрыт: дальше только Ctrl+C
                    debug!("no more commands");
                    commands = crossbeam_channel::never();
                }
            },
            default(Duration::from_millis(TICK_RATE_MS)) => {}
        }
    }

    engine.stop();
    info!("bye");

    Ok(())
}
