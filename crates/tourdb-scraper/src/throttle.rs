//! Fixed pacing between sequential page requests.

use std::time::Duration;

/// Sleeps `delay` before every call except the first, so consecutive
/// requests to the target server are at least `delay` apart.
#[derive(Debug)]
pub(crate) struct Throttle {
    delay: Duration,
    started: bool,
}

impl Throttle {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: false,
        }
    }

    pub(crate) async fn pace(&mut self) {
        if self.started && !self.delay.is_zero() {
            tracing::trace!(delay_ms = self.delay.as_millis(), "throttling before next page");
            tokio::time::sleep(self.delay).await;
        }
        self.started = true;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn first_call_does_not_wait() {
        let mut throttle = Throttle::new(Duration::from_secs(30));
        let start = Instant::now();
        throttle.pace().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn later_calls_wait_for_delay() {
        let mut throttle = Throttle::new(Duration::from_millis(25));
        let start = Instant::now();
        throttle.pace().await;
        throttle.pace().await;
        throttle.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn zero_delay_never_sleeps() {
        let mut throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..100 {
            throttle.pace().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
