use thiserror::Error;

/// Errores del dominio de reservas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    ValidationError(String),
}

/// Error devuelto por un servicio externo (disponibilidad, inquilinos,
/// documentos, precios).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rejected request: {0}")]
    Rejected(String),
}
