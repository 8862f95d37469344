//! Simulated I/O delays.

use std::time::Duration;

use rand::Rng;

use crate::config::DelayMode;

/// Hold the current request for `duration`.
pub async fn pause(mode: DelayMode, duration: Duration) {
    match mode {
        DelayMode::Yield => tokio::time::sleep(duration).await,
        DelayMode::Blocking => {
            let sleeper = tokio::task::spawn_blocking(move || std::thread::sleep(duration));
            if let Err(error) = sleeper.await {
                tracing::warn!(%error, "blocking delay task did not complete");
            }
        }
    }
}

/// Uniformly distributed duration in `[min_ms, max_ms]`.
pub fn random_delay(min_ms: u64, max_ms: u64) -> Duration {
    random_delay_with(&mut rand::thread_rng(), min_ms, max_ms)
}

pub fn random_delay_with<R: Rng + ?Sized>(rng: &mut R, min_ms: u64, max_ms: u64) -> Duration {
    if min_ms >= max_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rng.gen_range(min_ms..=max_ms))
}
