//! Limitador de ventana deslizante.
//!
//! Cada clave tiene su propia ventana de marcas de tiempo. Si la configuración
//! define `group_key` y el contexto del pedido trae ese campo, el pedido
//! también cuenta contra la ventana del grupo, compartida entre claves. Todo
//! el estado vive detrás de un único `Mutex`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};
use thiserror::Error;

use crate::config::RateLimitConfig;

/// Campos del pedido que pueden seleccionar un grupo.
pub type RequestContext = HashMap<String, String>;

/// Rechazo de un pedido. `retry_after` es el tiempo hasta que el pedido más
/// antiguo de la ventana que rechazó salga de ella.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RateLimitExceeded {
    pub message: String,
    pub key: String,
    pub group: Option<String>,
    pub retry_after: Duration,
}

#[derive(Debug, Default)]
struct Windows {
    keys: HashMap<String, VecDeque<Instant>>,
    groups: HashMap<String, VecDeque<Instant>>,
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<Windows>,
}

/// Descarta las marcas con antigüedad >= `span`.
fn prune(window: &mut VecDeque<Instant>, now: Instant, span: Duration) {
    while let Some(&oldest) = window.front() {
        if now.saturating_duration_since(oldest) < span {
            break;
        }
        window.pop_front();
    }
}

fn retry_after(window: &VecDeque<Instant>, now: Instant, span: Duration) -> Duration {
    window.front()
          .map(|&oldest| span.saturating_sub(now.saturating_duration_since(oldest)))
          .unwrap_or_default()
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self { config,
               windows: Mutex::new(Windows::default()) }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Windows> {
        self.windows.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Admite o rechaza un pedido para `key` en este instante.
    pub fn check(&self, key: &str, context: Option<&RequestContext>) -> Result<(), RateLimitExceeded> {
        self.check_at(key, context, Instant::now())
    }

    pub fn check_at(&self, key: &str, context: Option<&RequestContext>, now: Instant) -> Result<(), RateLimitExceeded> {
        let limit = self.config.effective_limit() as usize;
        let span = self.config.window();
        let group = self.config
                        .group_key()
                        .and_then(|gk| context.and_then(|c| c.get(gk)))
                        .filter(|g| !g.is_empty());

        let mut guard = self.lock();
        let Windows { keys, groups } = &mut *guard;

        let key_window = keys.entry(key.to_string()).or_default();
        prune(key_window, now, span);

        if let Some(g) = group {
            let group_window = groups.entry(g.clone()).or_default();
            prune(group_window, now, span);
            if group_window.len() >= limit {
                let wait = retry_after(group_window, now, span);
                return Err(self.deny(key, Some(g), format!("Group rate limit exceeded for {g}"), wait));
            }
        }

        if key_window.len() >= limit {
            let wait = retry_after(key_window, now, span);
            return Err(self.deny(key, None, "Rate limit exceeded".to_string(), wait));
        }

        key_window.push_back(now);
        if let Some(g) = group {
            groups.entry(g.clone()).or_default().push_back(now);
        }
        debug!("rate limit: {key} admitted ({}/{limit})", key_window.len());
        Ok(())
    }

    fn deny(&self, key: &str, group: Option<&String>, message: String, retry_after: Duration) -> RateLimitExceeded {
        warn!(target: "audit",
              "rate_limit_exceeded status=blocked key={key} limit={} window_secs={} group={}",
              self.config.effective_limit(),
              self.config.window().as_secs(),
              group.map(String::as_str).unwrap_or("-"));
        RateLimitExceeded { message,
                            key: key.to_string(),
                            group: group.cloned(),
                            retry_after }
    }

    /// Pedidos que `key` todavía puede hacer en la ventana actual.
    pub fn remaining(&self, key: &str) -> u32 {
        self.remaining_at(key, Instant::now())
    }

    pub fn remaining_at(&self, key: &str, now: Instant) -> u32 {
        let limit = self.config.effective_limit();
        let mut guard = self.lock();
        let used = match guard.keys.get_mut(key) {
            Some(window) => {
                prune(window, now, self.config.window());
                window.len()
            }
            None => 0,
        };
        limit.saturating_sub(u32::try_from(used).unwrap_or(u32::MAX))
    }

    /// Elimina las ventanas (de claves y de grupos) sin pedidos vigentes.
    pub fn cleanup(&self) {
        self.cleanup_at(Instant::now())
    }

    pub fn cleanup_at(&self, now: Instant) {
        let span = self.config.window();
        let mut guard = self.lock();
        let Windows { keys, groups } = &mut *guard;
        for map in [keys, groups] {
            map.retain(|_, window| {
                   prune(window, now, span);
                   !window.is_empty()
               });
        }
    }

    /// Cantidad de claves con ventana abierta.
    pub fn tracked_keys(&self) -> usize {
        self.lock().keys.len()
    }

    /// Ejecuta `f` sólo si el pedido es admitido.
    pub fn guard<T, F>(&self, key: &str, context: Option<&RequestContext>, f: F) -> Result<T, RateLimitExceeded>
        where F: FnOnce() -> T
    {
        self.check(key, context)?;
        Ok(f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32, secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig::new(max, Duration::from_secs(secs)).unwrap())
    }

    #[test]
    fn prune_drops_exactly_expired_marks() {
        let t0 = Instant::now();
        let mut w: VecDeque<Instant> = [t0, t0 + Duration::from_secs(5)].into_iter().collect();
        prune(&mut w, t0 + Duration::from_secs(10), Duration::from_secs(10));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn rejection_reports_wait_until_oldest_expires() {
        let rl = limiter(2, 10);
        let t0 = Instant::now();
        rl.check_at("k", None, t0).unwrap();
        rl.check_at("k", None, t0 + Duration::from_secs(3)).unwrap();
        let err = rl.check_at("k", None, t0 + Duration::from_secs(4)).unwrap_err();
        assert_eq!(err.message, "Rate limit exceeded");
        assert_eq!(err.retry_after, Duration::from_secs(6));
    }
}
