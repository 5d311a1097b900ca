use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Elapsed-time gate enforcing a minimum interval between outbound calls
///
/// State is private to one adapter instance; sibling adapters pace
/// themselves independently and never contend on this lock. The lock is
/// held across the sleep so queued callers are spaced one interval apart.
pub struct RateGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until at least the configured interval has passed since the
    /// previous call through this gate, then mark the call as issued
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }

        *last_call = Instant::now();
    }
}
