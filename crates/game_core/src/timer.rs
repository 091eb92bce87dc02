use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{sleep_until, Instant},
};

/// Calls `on_tick` with the remaining time once per interval, starting
/// immediately with the full duration, then `on_finish` once the duration has
/// elapsed. The remaining value handed to `on_tick` is never zero.
///
/// Cancelled by [`CountdownTimer::cancel`] or by dropping the handle; no
/// callback runs afterwards. A timer cannot be restarted.
#[derive(Debug)]
pub struct CountdownTimer {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn start<T, F>(total: Duration, interval: Duration, mut on_tick: T, on_finish: F) -> Self
    where
        T: FnMut(Duration) + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        assert!(!interval.is_zero(), "countdown interval must be non-zero");

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let task = tokio::spawn(async move {
            let started = Instant::now();
            let mut elapsed = Duration::ZERO;
            while elapsed < total {
                sleep_until(started + elapsed).await;
                if flag.load(Ordering::Acquire) {
                    return;
                }
                on_tick(total - elapsed);
                elapsed += interval;
            }

            sleep_until(started + total).await;
            if !flag.load(Ordering::Acquire) {
                on_finish();
            }
        });

        Self { cancelled, task }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.task.abort();
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Formats seconds as `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_remaining(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use tokio::{sync::oneshot, time::Instant};

    use super::*;

    type Ticks = Arc<Mutex<Vec<Duration>>>;

    fn recorder() -> (Ticks, impl FnMut(Duration) + Send + 'static) {
        let ticks: Ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);
        (ticks, move |remaining| {
            sink.lock().expect("ticks").push(remaining)
        })
    }

    #[tokio::test(start_paused = true)]
    async fn sixty_second_countdown_ticks_sixty_times_then_finishes() {
        let (ticks, on_tick) = recorder();
        let (finish_tx, finish_rx) = oneshot::channel();
        let finished_after = Arc::new(Mutex::new(0usize));
        let ticks_at_finish = Arc::clone(&ticks);
        let seen_at_finish = Arc::clone(&finished_after);

        let began = Instant::now();
        let _timer = CountdownTimer::start(
            Duration::from_secs(60),
            Duration::from_secs(1),
            on_tick,
            move || {
                *seen_at_finish.lock().expect("count") = ticks_at_finish.lock().expect("ticks").len();
                let _ = finish_tx.send(());
            },
        );

        finish_rx.await.expect("finish");
        let elapsed = began.elapsed();
        assert!(elapsed >= Duration::from_secs(60), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(61), "{elapsed:?}");

        let expected: Vec<Duration> = (1..=60).rev().map(Duration::from_secs).collect();
        assert_eq!(*ticks.lock().expect("ticks"), expected);
        assert_eq!(*finished_after.lock().expect("count"), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn finish_runs_exactly_once() {
        let finishes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finishes);
        let timer = CountdownTimer::start(
            Duration::from_secs(3),
            Duration::from_secs(1),
            |_| {},
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(finishes.load(Ordering::SeqCst), 1);
        drop(timer);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_count_rounds_up_for_uneven_interval() {
        let (ticks, on_tick) = recorder();
        let _timer = CountdownTimer::start(
            Duration::from_secs(10),
            Duration::from_secs(3),
            on_tick,
            || {},
        );

        tokio::time::sleep(Duration::from_secs(20)).await;
        let expected: Vec<Duration> = [10, 7, 4, 1].into_iter().map(Duration::from_secs).collect();
        assert_eq!(*ticks.lock().expect("ticks"), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_further_callbacks() {
        let (ticks, on_tick) = recorder();
        let finishes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finishes);
        let timer = CountdownTimer::start(
            Duration::from_secs(60),
            Duration::from_secs(1),
            on_tick,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(ticks.lock().expect("ticks").len(), 6);
        assert_eq!(finishes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_cancels_it() {
        let (ticks, on_tick) = recorder();
        let timer = CountdownTimer::start(
            Duration::from_secs(60),
            Duration::from_secs(1),
            on_tick,
            || panic!("finish must not run after drop"),
        );

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        drop(timer);
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(ticks.lock().expect("ticks").len(), 3);
    }

    #[test]
    fn formats_remaining_time() {
        assert_eq!(format_remaining(60), "01:00");
        assert_eq!(format_remaining(9), "00:09");
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(3_725), "1:02:05");
    }
}
