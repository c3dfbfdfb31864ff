use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cli() -> Command {
    Command::cargo_bin("ticker-cli").unwrap()
}

#[test]
fn help_lists_flags() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--symbols-file"))
        .stdout(predicate::str::contains("--interval-secs"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn symbol_sources_conflict() {
    cli()
        .args(["--all", "--symbols", "tBTCUSD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn zero_interval_is_rejected() {
    cli()
        .args(["--interval-secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--interval-secs"));
}

#[test]
fn missing_symbols_file_is_reported() {
    cli()
        .args(["--symbols-file", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("symbols file not found"));
}

#[test]
fn empty_symbols_file_is_reported() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "# only a comment").unwrap();

    cli()
        .arg("--symbols-file")
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("symbols list is empty"));
}

#[test]
fn bad_base_url_is_reported() {
    cli()
        .args(["--base-url", "api-pub.bitfinex.com/v2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-url must start with http"));
}

#[test]
fn quit_command_exits_cleanly() {
    // порт занят и тут же освобождён: фид недоступен, но выход от этого не зависит
    let addr = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap()
    };

    cli()
        .args(["--base-url", &format!("http://{addr}"), "--symbols", "btcusd", "--json"])
        .write_stdin(":quit\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success();
}
