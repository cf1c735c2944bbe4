//! prop-policies – límites de tasa para los puntos de entrada de la aplicación
//!
//! Provee un `RateLimiter` de ventana deslizante por clave, con límites
//! opcionales por grupo y registro de auditoría de cada rechazo.

mod config;
mod limiter;

pub use config::{RateLimitConfig, RateLimitConfigError};
pub use limiter::{RateLimitExceeded, RateLimiter, RequestContext};
