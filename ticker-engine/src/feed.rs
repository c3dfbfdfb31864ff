use std::sync::Arc;

use log::debug;
use reqwest::blocking::Client;

use ticker_core::wire::decode_records;
use ticker_core::{FeedError, RawRecord};

use crate::config::FeedConfig;

/// Источник сырых записей: один вызов на тик, без повторов
pub trait FeedClient: Send + Sync + 'static {
    /// `symbol_spec`: "tBTCUSD,tETHUSD" или "ALL"
    fn fetch(&self, symbol_spec: &str) -> Result<Vec<RawRecord>, FeedError>;
}

impl<T: FeedClient + ?Sized> FeedClient for Arc<T> {
    fn fetch(&self, symbol_spec: &str) -> Result<Vec<RawRecord>, FeedError> {
        (**self).fetch(symbol_spec)
    }
}

/// `GET {base_url}/tickers?symbols=...` через блокирующий reqwest
pub struct HttpFeedClient {
    client: Client,
    tickers_url: String,
}

impl HttpFeedClient {
    pub fn new(cfg: &FeedConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .connect_timeout(cfg.timeout)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| FeedError::Other(format!("http client init: {e}")))?;

        Ok(Self {
            client,
            tickers_url: format!("{}/tickers", cfg.base_url.trim_end_matches('/')),
        })
    }
}

impl FeedClient for HttpFeedClient {
    fn fetch(&self, symbol_spec: &str) -> Result<Vec<RawRecord>, FeedError> {
        debug!("GET {} symbols={symbol_spec}", self.tickers_url);

        let response = self
            .client
            .get(&self.tickers_url)
            .query(&[("symbols", symbol_spec)])
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().map_err(transport_error)?;
        Ok(decode_records(&body)?)
    }
}

/// Порядок важен: таймаут на connect reqwest помечает и как connect, и как timeout
fn transport_error(e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout(e.to_string())
    } else if e.is_connect() {
        FeedError::Unreachable(e.to_string())
    } else if let Some(status) = e.status() {
        FeedError::Status(status.as_u16())
    } else {
        FeedError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    fn client_for(base_url: String, timeout: Duration) -> HttpFeedClient {
        HttpFeedClient::new(&FeedConfig { base_url, timeout }).unwrap()
    }

    /// Однократный HTTP-сервер: отдаёт `response`, возвращает строку запроса в канал
    fn serve_once(response: String) -> (String, crossbeam_channel::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = crossbeam_channel::bounded(1);

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            let mut request_line = String::new();
            {
                let mut reader = BufReader::new(&mut stream);
                let _ = reader.read_line(&mut request_line);
                // дочитываем заголовки до пустой строки
                let mut line = String::new();
                while reader.read_line(&mut line).map(|n| n > 2).unwrap_or(false) {
                    line.clear();
                }
            }
            let _ = tx.send(request_line.trim_end().to_string());
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        });

        (format!("http://{addr}"), rx)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn fetch_returns_records_and_sends_symbols_query() {
        let body = r#"[["tBTCUSD",67956,5.45,67957,6.25,-517,-0.00755042,67956,434.8,69505,67328],["fUSD",0.0003]]"#;
        let (base, requests) = serve_once(http_response("200 OK", body));

        let client = client_for(format!("{base}/"), Duration::from_secs(5));
        let records = client.fetch("tBTCUSD,tETHUSD").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol(), Some("tBTCUSD"));
        assert_eq!(records[1].symbol(), Some("fUSD"));

        let request_line = requests.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(
            request_line.starts_with("GET /tickers?symbols=tBTCUSD%2CtETHUSD "),
            "unexpected request: {request_line:?}"
        );
    }

    #[test]
    fn fetch_maps_429_to_status() {
        let (base, _rx) = serve_once(http_response("429 Too Many Requests", ""));
        let client = client_for(base, Duration::from_secs(5));

        assert_eq!(client.fetch("ALL").unwrap_err(), FeedError::Status(429));
    }

    #[test]
    fn fetch_maps_server_error_to_status() {
        let (base, _rx) = serve_once(http_response(
            "500 Internal Server Error",
            r#"["error",10020,"symbol: invalid"]"#,
        ));
        let client = client_for(base, Duration::from_secs(5));

        assert_eq!(client.fetch("tNOPE").unwrap_err(), FeedError::Status(500));
    }

    #[test]
    fn fetch_reports_undecodable_body() {
        let (base, _rx) = serve_once(http_response("200 OK", r#"{"not":"an array"}"#));
        let client = client_for(base, Duration::from_secs(5));

        assert!(matches!(client.fetch("ALL"), Err(FeedError::Body(_))));
    }

    #[test]
    fn fetch_maps_refused_connection_to_unreachable() {
        // занимаем порт и сразу освобождаем => connect получит RST
        let addr = {
            let l = TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap()
        };
        let client = client_for(format!("http://{addr}"), Duration::from_secs(5));

        assert!(matches!(
            client.fetch("ALL"),
            Err(FeedError::Unreachable(_))
        ));
    }

    #[test]
    fn fetch_maps_unresolvable_host_to_unreachable() {
        // .invalid никогда не резолвится (RFC 2606)
        let client = client_for("http://no-such-host.invalid".to_string(), Duration::from_secs(5));

        let err = client.fetch("ALL").unwrap_err();
        assert!(matches!(err, FeedError::Unreachable(_)), "got {err:?}");
        assert_eq!(ticker_core::classify::classify(&err), ticker_core::ErrorCase::Connectivity);
    }

    #[test]
    fn fetch_maps_silent_server_to_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let h = thread::spawn(move || {
            // принимаем и молчим дольше клиентского таймаута
            let conn = listener.accept();
            thread::sleep(Duration::from_millis(800));
            drop(conn);
        });

        let client = client_for(format!("http://{addr}"), Duration::from_millis(200));
        assert!(matches!(client.fetch("ALL"), Err(FeedError::Timeout(_))));

        let _ = h.join();
    }
}
