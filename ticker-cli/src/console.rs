use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};

/// Команда, пришедшая со stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// экран показан
    Start,
    /// экран скрыт
    Stop,
    Quit,
    /// новый текст в поиске
    Query(String),
}

pub(crate) fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);

    match line.trim() {
        ":start" => Command::Start,
        ":stop" => Command::Stop,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Query(line.to_string()),
    }
}

/// Поток, читающий stdin построчно. Канал закрывается на EOF.
///
/// Поток не джойнится: блокирующее чтение stdin не прервать,
/// он умрёт вместе с процессом.
pub(crate) fn spawn_stdin_reader() -> io::Result<Receiver<Command>> {
    let (tx, rx) = crossbeam_channel::bounded(16);

    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || read_commands(io::stdin().lock(), tx))?;

    Ok(rx)
}

fn read_commands<R: BufRead>(reader: R, tx: Sender<Command>) {
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("stdin read error: {e}");
                break;
            }
        };

        if tx.send(parse_command(&line)).is_err() {
            // main уже вышел
            return;
        }
    }

    debug!("stdin closed");
}
