use core::time::Duration;

use crate::futures::SleepProvider;

/// A [`SleepProvider`] backed by Tokio's timer.
///
/// The default for applications running on Tokio.
pub struct TokioSleep;

impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// A [`SleepProvider`] that yields to the Tokio scheduler instead of
/// sleeping.
///
/// Retries sooner than [`TokioSleep`] at the price of busier polling. Under
/// heavy contention the timer usually wins because tasks churn less.
pub struct TokioYield;

impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await;
    }
}
