use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, select};
use log::{debug, error, info, warn};

use ticker_core::{ContentResult, EngineState, Ticker};

use crate::clock::{Clock, SystemClock};
use crate::config::{EngineConfig, SHUTDOWN_GRACE, SUBSCRIBER_CAPACITY, WORKER_THREAD_NAME};
use crate::feed::FeedClient;
use crate::hub::{Hub, Subscription};
use crate::lock;
use crate::repository::TickerRepository;

/// Движок опроса: периодически тянет фид, держит кеш и запрос,
/// рассылает снимки состояния подписчикам.
///
/// Хост вызывает `start`/`stop` на показ/скрытие экрана и `set_query`
/// на ввод в поиске. Оба вызова дёшевы и безопасны в любом порядке.
pub struct PollingEngine<C: FeedClient, K: Clock = SystemClock> {
    shared: Arc<Shared<C, K>>,
    worker: Mutex<Option<Worker>>,
}

struct Shared<C, K> {
    repository: TickerRepository<C>,
    clock: K,
    config: EngineConfig,
    symbol_spec: String,
    store: Mutex<Store>,
    hub: Hub<EngineState>,
}

/// Всё изменяемое состояние; меняется только под одним мьютексом
struct Store {
    /// последняя успешная пачка целиком
    cache: Vec<Ticker>,
    query: String,
    state: Arc<EngineState>,
    /// растёт на каждый start/stop; тик с чужим поколением ничего не публикует
    generation: u64,
    active: bool,
}

struct Worker {
    /// `None` после `stop`; drop отправителя будит поток
    stop_tx: Option<Sender<()>>,
    /// закрывается, когда поток завершился
    done: Receiver<()>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn is_running(&self) -> bool {
        self.stop_tx.is_some() && !self.handle.is_finished()
    }

    fn join(self) {
        if let Err(panic) = self.handle.join() {
            warn!("poller thread panicked: {:?}", panic);
        }
    }

    /// Ждёт завершения не дольше `grace`; зависший запрос не держит вызывающего,
    /// поток отсоединяется и выйдет сам (его результат уже не опубликуется).
    fn join_within(self, grace: Duration) {
        match self.done.recv_timeout(grace) {
            Err(RecvTimeoutError::Timeout) => {
                warn!("poller still fetching after {grace:?}; detaching");
            }
            _ => self.join(),
        }
    }
}

impl<C: FeedClient> PollingEngine<C, SystemClock> {
    pub fn new(client: C, config: EngineConfig) -> Self {
        Self::with_clock(client, config, SystemClock)
    }
}

impl<C: FeedClient, K: Clock> PollingEngine<C, K> {
    pub fn with_clock(client: C, config: EngineConfig, clock: K) -> Self {
        let symbol_spec = config.symbols.as_query();
        Self {
            shared: Arc::new(Shared {
                repository: TickerRepository::new(client),
                clock,
                config,
                symbol_spec,
                store: Mutex::new(Store {
                    cache: Vec::new(),
                    query: String::new(),
                    state: Arc::new(EngineState::Loading),
                    generation: 0,
                    active: false,
                }),
                hub: Hub::new(SUBSCRIBER_CAPACITY),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Stopped -> Active: тик сразу, дальше каждые `interval`.
    /// Повторный вызов в Active ничего не делает.
    pub fn start(&self) {
        let mut worker = lock(&self.worker);

        if worker.as_ref().is_some_and(Worker::is_running) {
            debug!("start: already active");
            return;
        }

        // прошлый поток может ещё дорабатывать запрос после stop. Запросы не должны
        // пересекаться, поэтому его дожидается новый поток, а не вызывающий.
        let previous = worker.take();

        let generation = {
            let mut store = lock(&self.shared.store);
            store.generation += 1;
            store.active = true;
            store.generation
        };

        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let shared = Arc::clone(&self.shared);

        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let _done = done_tx;
                if let Some(previous) = previous {
                    previous.join();
                }
                shared.run(generation, stop_rx);
            });

        match spawned {
            Ok(handle) => {
                info!(
                    "polling started: symbols={} interval={:?}",
                    self.shared.symbol_spec, self.shared.config.interval
                );
                *worker = Some(Worker {
                    stop_tx: Some(stop_tx),
                    done: done_rx,
                    handle,
                });
            }
            Err(e) => {
                error!("failed to spawn poller thread: {e}");
                let mut store = lock(&self.shared.store);
                store.active = false;
                store.generation += 1;
            }
        }
    }

    /// Active -> Stopped. Запрос, который уже в полёте, доработает,
    /// но его результат не будет опубликован.
    pub fn stop(&self) {
        let mut worker = lock(&self.worker);

        let Some(w) = worker.as_mut() else {
            return;
        };
        if w.stop_tx.take().is_none() {
            return;
        }

        let mut store = lock(&self.shared.store);
        store.active = false;
        store.generation += 1;
        info!("polling stopped");
    }

    /// Новый поисковый запрос. Если на экране `Success`, сразу публикует
    /// отфильтрованный кеш, без похода в сеть; иначе только запоминает.
    pub fn set_query(&self, text: &str) {
        let mut store = lock(&self.shared.store);
        store.query = text.to_string();

        if store.active && store.state.is_success() {
            let next = success_state(&store.cache, &store.query);
            self.shared.emit(&mut store, next);
        }
    }

    /// Последний опубликованный снимок
    pub fn state(&self) -> Arc<EngineState> {
        Arc::clone(&lock(&self.shared.store).state)
    }

    pub fn query(&self) -> String {
        lock(&self.shared.store).query.clone()
    }

    pub fn is_active(&self) -> bool {
        lock(&self.shared.store).active
    }

    /// Подписка на снимки: первым приходит текущий, дальше все новые по порядку.
    /// Отстающий подписчик теряет старые снимки, но не последний.
    /// Для отписки достаточно drop подписки.
    pub fn subscribe(&self) -> Subscription<EngineState> {
        let store = lock(&self.shared.store);
        self.shared.hub.subscribe(Arc::clone(&store.state))
    }
}

impl<C: FeedClient, K: Clock> Drop for PollingEngine<C, K> {
    fn drop(&mut self) {
        self.stop();
        if let Some(w) = lock(&self.worker).take() {
            w.join_within(SHUTDOWN_GRACE);
        }
    }
}

impl<C: FeedClient, K: Clock> Shared<C, K> {
    fn run(&self, generation: u64, stop_rx: Receiver<()>) {
        loop {
            if matches!(stop_rx.try_recv(), Err(TryRecvError::Disconnected)) {
                break;
            }

            // таймер взводим до запроса: интервал считается между началами тиков
            let next_tick = self.clock.after(self.config.interval);
            self.tick(generation);

            select! {
                recv(stop_rx) -> _ => break,
                recv(next_tick) -> _ => {}
            }
        }

        debug!("poller generation {generation} exited");
    }

    fn tick(&self, generation: u64) {
        let outcome = self.repository.get_tickers(&self.symbol_spec);

        let mut store = lock(&self.store);
        if store.generation != generation {
            debug!("stopped while fetching; result dropped");
            return;
        }

        let next = match outcome {
            ContentResult::Success(tickers) => {
                store.cache = tickers;
                success_state(&store.cache, &store.query)
            }
            // кеш остаётся, но наружу не показывается
            ContentResult::Error(error_case) => EngineState::Error { error_case },
        };

        self.emit(&mut store, next);
    }

    fn emit(&self, store: &mut Store, next: EngineState) {
        store.state = Arc::new(next);

        let stats = self.hub.broadcast(Arc::clone(&store.state));
        if stats.has_drops() {
            warn!("state broadcast: {stats}");
        } else {
            debug!("state broadcast: {stats}");
        }
    }
}

fn success_state(cache: &[Ticker], query: &str) -> EngineState {
    EngineState::Success {
        tickers: filter_tickers(cache, query),
        query: query.to_string(),
    }
}

/// Регистронезависимое вхождение `query` в `symbol_from`; пустой или пробельный запрос пропускает всё
pub fn filter_tickers(tickers: &[Ticker], query: &str) -> Vec<Ticker> {
    if query.trim().is_empty() {
        return tickers.to_vec();
    }

    let needle = query.to_lowercase();
    tickers
        .iter()
        .filter(|t| t.symbol_from.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
