use crate::app_config::Maps;
use std::time::Duration;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

pub fn backoff(config: &Maps) -> impl Iterator<Item = Duration> + use<> {
    ExponentialBackoff::from_millis(config.retry_ms())
        .factor(2)
        .max_delay(config.retry_max_delay_ms())
        .map(jitter)
        .take(config.max_retries())
}
