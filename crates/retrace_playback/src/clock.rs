//! Wall-clock source backed by the tokio runtime.

use std::time::Duration;

use async_trait::async_trait;

use retrace_core::Clock;

/// Milliseconds since construction, measured on tokio's clock.
///
/// Under `tokio::time::pause` (or `#[tokio::test(start_paused = true)]`)
/// both `now_ms` and `sleep_ms` run on virtual time, which is how the
/// playback tests drive pacing deterministically.
#[derive(Debug)]
pub struct SystemClock {
    origin: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    async fn sleep_ms(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrace_core::Clock as _;

    #[tokio::test(start_paused = true)]
    async fn advances_with_virtual_time() {
        let clock = SystemClock::new();
        assert_eq!(clock.now_ms(), 0);

        clock.sleep_ms(250).await;
        assert_eq!(clock.now_ms(), 250);
    }
}
