use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::lock;

/// Источник таймеров для цикла опроса
pub trait Clock: Send + Sync + 'static {
    /// Канал, в который придёт одно сообщение через `delay`
    fn after(&self, delay: Duration) -> Receiver<Instant>;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn after(&self, delay: Duration) -> Receiver<Instant> {
        (**self).after(delay)
    }
}

/// Реальное время
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn after(&self, delay: Duration) -> Receiver<Instant> {
        crossbeam_channel::after(delay)
    }
}

/// Виртуальное время: таймеры срабатывают только по `advance`.
///
/// `advance(by)` срабатывает таймеры со сроком строго раньше `now + by`
/// (срок ровно на границе остаётся на следующий `advance`). После каждого
/// срабатывания ждёт, пока владелец таймера взведёт следующий, поэтому
/// один вызов `advance` прогоняет несколько тиков подряд.
pub struct ManualClock {
    state: Mutex<ManualState>,
    armed: Condvar,
    rearm_grace: Duration,
}

struct ManualState {
    now: Duration,
    timers: Vec<Timer>,
    /// сколько таймеров взведено за всё время
    armed_total: u64,
}

struct Timer {
    deadline: Duration,
    tx: Sender<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::with_rearm_grace(Duration::from_secs(1))
    }

    /// `grace`: сколько реального времени ждать перевзвода после срабатывания
    pub fn with_rearm_grace(grace: Duration) -> Self {
        Self {
            state: Mutex::new(ManualState {
                now: Duration::ZERO,
                timers: Vec::new(),
                armed_total: 0,
            }),
            armed: Condvar::new(),
            rearm_grace: grace,
        }
    }

    /// Виртуальное время с момента создания
    pub fn now(&self) -> Duration {
        lock(&self.state).now
    }

    /// Сколько таймеров ждут срабатывания
    pub fn pending(&self) -> usize {
        lock(&self.state).timers.len()
    }

    /// Ждёт (в реальном времени), пока не наберётся `count` взведённых таймеров
    pub fn wait_for_pending(&self, count: usize, timeout: Duration) -> bool {
        let st = lock(&self.state);
        let (st, _) = self
            .armed
            .wait_timeout_while(st, timeout, |s| s.timers.len() < count)
            .unwrap_or_else(PoisonError::into_inner);
        st.timers.len() >= count
    }

    pub fn advance(&self, by: Duration) {
        let mut st = lock(&self.state);
        let target = st.now + by;

        loop {
            let due = st
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.deadline < target)
                .min_by_key(|(_, t)| t.deadline)
                .map(|(i, _)| i);
            let Some(idx) = due else { break };

            let timer = st.timers.swap_remove(idx);
            st.now = timer.deadline;

            // получатель уже ушёл, перевзвода не будет
            if timer.tx.send(Instant::now()).is_err() {
                continue;
            }

            let seen = st.armed_total;
            let (guard, _) = self
                .armed
                .wait_timeout_while(st, self.rearm_grace, |s| s.armed_total == seen)
                .unwrap_or_else(PoisonError::into_inner);
            st = guard;
        }

        st.now = target;
    }
}

impl Clock for ManualClock {
    fn after(&self, delay: Duration) -> Receiver<Instant> {
        let (tx, rx) = crossbeam_channel::bounded(1);

        let mut st = lock(&self.state);
        let deadline = st.now + delay;
        st.timers.push(Timer { deadline, tx });
        st.armed_total += 1;
        self.armed.notify_all();

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn timer_fires_only_after_deadline_is_passed() {
        let clock = ManualClock::with_rearm_grace(Duration::from_millis(10));
        let rx = clock.after(5 * SEC);

        clock.advance(4 * SEC);
        assert!(rx.try_recv().is_err());

        // ровно на сроке ещё не срабатывает
        clock.advance(SEC);
        assert!(rx.try_recv().is_err());
        assert_eq!(clock.now(), 5 * SEC);

        clock.advance(Duration::from_millis(1));
        assert!(rx.try_recv().is_ok());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn advance_runs_rearming_consumer_several_times() {
        let clock = Arc::new(ManualClock::new());
        let (fired_tx, fired_rx) = crossbeam_channel::unbounded();

        let c = Arc::clone(&clock);
        let h = thread::spawn(move || {
            for _ in 0..3 {
                let t = c.after(5 * SEC);
                if t.recv().is_err() {
                    return;
                }
                fired_tx.send(c.now()).unwrap();
            }
        });

        assert!(clock.wait_for_pending(1, SEC));
        clock.advance(15 * SEC);

        let fired: Vec<Duration> = fired_rx.try_iter().collect();
        assert_eq!(fired, vec![5 * SEC, 10 * SEC]);
        assert_eq!(clock.now(), 15 * SEC);

        // третий таймер (срок 15s) добиваем следующим шагом
        clock.advance(SEC);
        h.join().unwrap();
        assert_eq!(fired_rx.try_iter().count(), 1);
    }

    #[test]
    fn dropped_receiver_does_not_block_advance() {
        let clock = ManualClock::new();
        drop(clock.after(SEC));

        let started = std::time::Instant::now();
        clock.advance(10 * SEC);

        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(clock.pending(), 0);
    }
}
