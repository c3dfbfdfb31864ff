//! # ticker-engine
//!
//! Движок опроса фида тикеров: HTTP-клиент, репозиторий, таймеры и
//! хранилище состояния с рассылкой подписчикам.
//!
//! - [`feed`] - трейт источника и блокирующий HTTP-клиент
//! - [`repository`] - фид + разбор + классификация ошибок
//! - [`clock`] - реальные и ручные (для тестов) таймеры
//! - [`engine`] - [`PollingEngine`]: start/stop, запрос, подписки
//!
//! ```no_run
//! use ticker_engine::{EngineConfig, FeedConfig, HttpFeedClient, PollingEngine};
//!
//! let client = HttpFeedClient::new(&FeedConfig::default()).unwrap();
//! let engine = PollingEngine::new(client, EngineConfig::default());
//! let states = engine.subscribe();
//!
//! engine.start();
//! engine.set_query("btc");
//! for state in states.iter().take(3) {
//!     println!("{state:?}");
//! }
//! engine.stop();
//! ```

#![forbid(unsafe_code)]

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod clock;
pub mod config;
pub mod engine;
pub mod feed;
mod hub;
pub mod repository;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{EngineConfig, FeedConfig};
pub use crate::engine::PollingEngine;
pub use crate::feed::{FeedClient, HttpFeedClient};
pub use crate::hub::Subscription;
pub use crate::repository::TickerRepository;

/// Мьютекс, переживший панику в другом потоке, продолжаем использовать
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
