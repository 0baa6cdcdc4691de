use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Fixed-period job runner.
///
/// The job is awaited inline, so a run that overruns the period pushes the
/// next one back instead of overlapping it.
pub struct Scheduler {
    period: Duration,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Run `job` now, then once per period until `shutdown` resolves.
    /// Returns how many runs were started.
    pub async fn run<J, Fut, S>(&self, mut job: J, shutdown: S) -> usize
    where
        J: FnMut() -> Fut,
        Fut: Future<Output = ()>,
        S: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        // Poll once so a signal-backed shutdown is armed before the first run
        let stop_requested = tokio::select! {
            biased;
            _ = &mut shutdown => true,
            _ = std::future::ready(()) => false,
        };

        // First tick completes immediately
        ticker.tick().await;
        job().await;
        let mut runs = 1;

        if stop_requested {
            info!("Scheduler stopped by user.");
            return runs;
        }

        info!(
            "Scheduler started. The job will run every {}. Press Ctrl+C to stop.",
            describe_period(self.period)
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Scheduler stopped by user.");
                    break;
                }
                _ = ticker.tick() => {
                    job().await;
                    runs += 1;
                }
            }
        }

        runs
    }
}

fn describe_period(period: Duration) -> String {
    let secs = period.as_secs();
    match secs {
        60 => "minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "second".to_string(),
        s => format!("{} seconds", s),
    }
}
