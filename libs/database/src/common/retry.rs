use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for startup connection attempts.
///
/// Defaults: 3 retries, 100ms initial delay doubling up to 5s, with jitter.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Scale each delay into [50%, 100%] so restarting replicas spread out
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Un-jittered delay before retry number `retry` (1-based), capped at
    /// `max_delay_ms`.
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let exponent = retry.saturating_sub(1) as i32;
        let raw = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        if raw.is_finite() {
            (raw as u64).min(self.max_delay_ms)
        } else {
            self.max_delay_ms
        }
    }

    fn delay_for(&self, retry: u32) -> Duration {
        let base = self.base_delay_ms(retry);
        let ms = if self.use_jitter { apply_jitter(base) } else { base };
        Duration::from_millis(ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Runs `operation` until it succeeds or `config.max_retries` retries are
/// spent, sleeping with exponential backoff in between. The last error is
/// returned unchanged.
///
/// ```ignore
/// use database::common::{retry_with_backoff, RetryConfig};
///
/// let db = retry_with_backoff(
///     || sea_orm::Database::connect(&db_url),
///     RetryConfig::new().with_max_retries(5),
/// )
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!("Operation succeeded after {} retries", retries);
                }
                return Ok(value);
            }
            Err(e) if retries >= config.max_retries => {
                warn!("Operation failed after {} attempts: {}", retries + 1, e);
                return Err(e);
            }
            Err(e) => {
                retries += 1;
                let delay = config.delay_for(retries);
                debug!(
                    "Operation failed (retry {}/{}): {}. Retrying in {:?}",
                    retries, config.max_retries, e, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Scales `delay` by a pseudo-random factor in [0.5, 1.0].
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = 50 + RandomState::new().hash_one(std::time::SystemTime::now()) % 51;
    delay * percent / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn failing_until(successful_call: u32, calls: Arc<AtomicU32>) -> impl FnMut() -> std::future::Ready<Result<&'static str, String>> {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= successful_call {
                std::future::ready(Ok("connected"))
            } else {
                std::future::ready(Err(format!("refused on call {}", n)))
            }
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success_does_not_retry() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = retry_with_backoff(failing_until(1, calls.clone()), RetryConfig::default()).await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::new().with_initial_delay(5).without_jitter();

        let result = retry_with_backoff(failing_until(3, calls.clone()), config).await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_with_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(5)
            .without_jitter();

        let result = retry_with_backoff(failing_until(u32::MAX, calls.clone()), config).await;

        assert_eq!(result.unwrap_err(), "refused on call 3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_base_delay_doubles_and_caps() {
        let config = RetryConfig::new().with_initial_delay(100).with_max_delay(350);

        assert_eq!(config.base_delay_ms(1), 100);
        assert_eq!(config.base_delay_ms(2), 200);
        assert_eq!(config.base_delay_ms(3), 350);
        assert_eq!(config.base_delay_ms(40), 350);
    }

    #[test]
    fn test_jitter_stays_within_half_to_full_delay() {
        for _ in 0..20 {
            let jittered = apply_jitter(1000);
            assert!((500..=1000).contains(&jittered));
        }
    }

    #[test]
    fn test_without_jitter_delay_is_exact() {
        let config = RetryConfig::new().with_initial_delay(40).without_jitter();
        assert_eq!(config.delay_for(2), Duration::from_millis(80));
    }
}
