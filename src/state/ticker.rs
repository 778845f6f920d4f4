use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc, time};
use tokio_util::sync::CancellationToken;

/// Repeating timer owned by a single run.
///
/// Every period the spawned task sends the run's generation number. The task
/// stops when the handle is dropped or the receiver goes away.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    token: CancellationToken,
}

impl Ticker {
    /// Spawns the timer task on `runtime`. The first tick fires one `period`
    /// after the call.
    pub fn spawn(
        runtime: &Handle,
        period: Duration,
        generation: u64,
        ticks: mpsc::UnboundedSender<u64>,
    ) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        runtime.spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if ticks.send(generation).is_err() {
                            break;
                        }
                    }
                }
            }
            log::trace!("ticker {generation} stopped");
        });

        Self { generation, token }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(&Handle::current(), Duration::from_millis(100), 7, tx);

        time::sleep(Duration::from_millis(350)).await;
        let mut received = Vec::new();
        while let Ok(generation) = rx.try_recv() {
            received.push(generation);
        }
        assert_eq!(received, vec![7, 7, 7]);
        assert_eq!(ticker.generation(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(&Handle::current(), Duration::from_millis(100), 1, tx);

        time::sleep(Duration::from_millis(150)).await;
        drop(ticker);
        time::sleep(Duration::from_millis(500)).await;

        assert_eq!(rx.try_recv(), Ok(1));
        // The task exits and drops its sender, closing the channel.
        assert_eq!(rx.try_recv(), Err(mpsc::error::TryRecvError::Disconnected));
    }
}
