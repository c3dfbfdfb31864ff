use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, Weak};

use crate::lock;

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BroadcastStats {
    pub(crate) sent: usize,
    /// сколько старых значений вытеснено из переполненных очередей
    pub(crate) evicted: usize,
    pub(crate) dropped_dead: usize,
}

impl fmt::Display for BroadcastStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sent={} evicted={} dropped_dead={}",
            self.sent, self.evicted, self.dropped_dead
        )
    }
}

impl BroadcastStats {
    pub(crate) fn has_drops(&self) -> bool {
        self.evicted + self.dropped_dead > 0
    }
}

/// Очередь значений одного подписчика. Работает как обычный
/// `Receiver` (через `Deref`); drop отписывает.
///
/// Если подписчик не успевает читать, теряются самые старые значения:
/// последнее в очереди всегда совпадает с последним разосланным.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: Receiver<Arc<T>>,
    _alive: Arc<()>,
}

impl<T> Subscription<T> {
    pub fn receiver(&self) -> &Receiver<Arc<T>> {
        &self.rx
    }
}

impl<T> Deref for Subscription<T> {
    type Target = Receiver<Arc<T>>;

    fn deref(&self) -> &Self::Target {
        &self.rx
    }
}

struct Slot<T> {
    tx: Sender<Arc<T>>,
    /// копия ресивера подписчика: через неё хаб выталкивает старое значение
    evict: Receiver<Arc<T>>,
    alive: Weak<()>,
}

/// Раздаёт каждое значение всем подписчикам, в порядке регистрации
pub(crate) struct Hub<T> {
    slots: Mutex<Vec<Slot<T>>>,
    capacity_per_subscriber: usize,
}

impl<T> Hub<T> {
    pub(crate) fn new(capacity_per_subscriber: usize) -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
            capacity_per_subscriber,
        }
    }

    /// Новый подписчик сразу получает `current`
    pub(crate) fn subscribe(&self, current: Arc<T>) -> Subscription<T> {
        let (tx, rx) = crossbeam_channel::bounded(self.capacity_per_subscriber.max(1));
        // канал пустой и ёмкость >= 1, так что не упадёт
        let _ = tx.try_send(current);

        let alive = Arc::new(());
        lock(&self.slots).push(Slot {
            tx,
            evict: rx.clone(),
            alive: Arc::downgrade(&alive),
        });

        Subscription { rx, _alive: alive }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    /// Неблокирующая рассылка. Переполненная очередь теряет самое старое
    /// значение, отписавшиеся подписчики удаляются из реестра.
    pub(crate) fn broadcast(&self, value: Arc<T>) -> BroadcastStats {
        let mut slots = lock(&self.slots);
        let mut stats = BroadcastStats::default();

        slots.retain(|slot| {
            if slot.alive.strong_count() == 0 {
                stats.dropped_dead += 1;
                return false;
            }

            let mut pending = Arc::clone(&value);
            loop {
                match slot.tx.try_send(pending) {
                    Ok(()) => {
                        stats.sent += 1;
                        return true;
                    }
                    Err(TrySendError::Full(back)) => {
                        // пишет в очередь только хаб под мьютексом, так что после
                        // одного вытеснения место есть
                        if slot.evict.try_recv().is_ok() {
                            stats.evicted += 1;
                        }
                        pending = back;
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        stats.dropped_dead += 1;
                        return false;
                    }
                }
            }
        });

        stats
    }
}
