//! Cancellable periodic tick, used for live progress while a long bulk
//! operation runs. The callback fires once per period until `stop` is
//! awaited; the scan coordinator's behavior never depends on what the
//! callback does with the ticks.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub struct ProgressTicker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Spawns the tick loop. `on_tick` receives the tick count (1-based).
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        let token = CancellationToken::new();
        let tick_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; swallow it so
            // ticks arrive one full period apart.
            interval.tick().await;

            let mut count: u64 = 0;
            loop {
                tokio::select! {
                    _ = tick_token.cancelled() => break,
                    _ = interval.tick() => {
                        count += 1;
                        on_tick(count);
                    }
                }
            }
        });

        Self { token, handle }
    }

    /// Cancels the loop and waits for it to wind down; no ticks fire
    /// after this returns.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[tokio::test]
    async fn test_ticks_then_stops_cleanly() {
        let ticks = Arc::new(AtomicU64::new(0));
        let ticks_ref = ticks.clone();

        let ticker = ProgressTicker::spawn(Duration::from_millis(10), move |_n| {
            ticks_ref.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(120)).await;
        ticker.stop().await;

        let seen = ticks.load(Ordering::SeqCst);
        assert!(seen >= 2, "expected periodic ticks, saw {seen}");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen, "tick after stop");
    }

    #[tokio::test]
    async fn test_stop_before_first_tick() {
        let ticks = Arc::new(AtomicU64::new(0));
        let ticks_ref = ticks.clone();

        let ticker = ProgressTicker::spawn(Duration::from_secs(60), move |_n| {
            ticks_ref.fetch_add(1, Ordering::SeqCst);
        });
        ticker.stop().await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
