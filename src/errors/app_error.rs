use thiserror::Error;

use prop_core::{ProcessEngineError, RegistryError};
use prop_policies::RateLimitConfigError;

/// Agrega los errores de los crates del workspace que la aplicación no puede
/// convertir en un `ReservationReport`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de registro: {0}")]
    Registry(#[from] RegistryError),
    #[error("Error del motor: {0}")]
    Engine(#[from] ProcessEngineError),
    #[error("Error de configuración: {0}")]
    RateLimit(#[from] RateLimitConfigError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_variant_from() {
        let err: AppError = ProcessEngineError::ProcessNotFound("ghost".into()).into();
        assert_eq!(err.to_string(), "Error del motor: process not found: ghost");
    }

    #[test]
    fn test_rate_limit_variant_format() {
        let err: AppError = RateLimitConfigError::TimeWindow.into();
        assert_eq!(err.to_string(), "Error de configuración: time_window must be positive");
    }

    #[test]
    fn test_io_variant_from() {
        let err: AppError = std::io::Error::other("falló IO").into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }
}
