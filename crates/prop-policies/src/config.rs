use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitConfigError {
    #[error("max_requests must be positive")]
    MaxRequests,
    #[error("time_window must be positive")]
    TimeWindow,
    #[error("burst_limit must be positive")]
    BurstLimit,
}

/// Parámetros de un `RateLimiter`.
///
/// `burst_limit`, si está presente, reemplaza a `max_requests` como límite
/// efectivo. `group_key` nombra la entrada del contexto que agrupa pedidos de
/// distintas claves bajo un mismo límite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    max_requests: u32,
    window: Duration,
    burst_limit: Option<u32>,
    group_key: Option<String>,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, RateLimitConfigError> {
        if max_requests == 0 {
            return Err(RateLimitConfigError::MaxRequests);
        }
        if window.is_zero() {
            return Err(RateLimitConfigError::TimeWindow);
        }
        Ok(Self { max_requests,
                  window,
                  burst_limit: None,
                  group_key: None })
    }

    pub fn with_burst_limit(mut self, burst_limit: u32) -> Result<Self, RateLimitConfigError> {
        if burst_limit == 0 {
            return Err(RateLimitConfigError::BurstLimit);
        }
        self.burst_limit = Some(burst_limit);
        Ok(self)
    }

    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn burst_limit(&self) -> Option<u32> {
        self.burst_limit
    }

    pub fn group_key(&self) -> Option<&str> {
        self.group_key.as_deref()
    }

    /// Límite aplicado a cada ventana.
    pub fn effective_limit(&self) -> u32 {
        self.burst_limit.unwrap_or(self.max_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(RateLimitConfig::new(0, Duration::from_secs(1)).unwrap_err().to_string(),
                   "max_requests must be positive");
        assert_eq!(RateLimitConfig::new(1, Duration::ZERO).unwrap_err(),
                   RateLimitConfigError::TimeWindow);
        let cfg = RateLimitConfig::new(1, Duration::from_secs(1)).unwrap();
        assert_eq!(cfg.with_burst_limit(0).unwrap_err().to_string(), "burst_limit must be positive");
    }

    #[test]
    fn burst_overrides_max_requests() {
        let cfg = RateLimitConfig::new(10, Duration::from_secs(60)).unwrap();
        assert_eq!(cfg.effective_limit(), 10);
        assert_eq!(cfg.with_burst_limit(3).unwrap().effective_limit(), 3);
    }
}
