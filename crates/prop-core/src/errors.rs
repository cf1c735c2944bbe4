//! Errores del motor de procesos.
//!
//! Se distinguen tres familias:
//! - `ProcessEngineError`: errores de configuración/cableado. Se devuelven como
//!   `Err` y nunca llegan a construir un `ProcessResult`.
//! - `RegistryError`: el registro rechaza una definición o configuración
//!   inconsistente.
//! - `ProcessError` / `StepError`: fallos recuperables que viajan dentro de
//!   `ProcessResult::Failure` junto con el contexto.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallo reportado por un step.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepError {
    /// Mensaje libre del step; se muestra tal cual.
    #[error("{0}")]
    Failed(String),
    /// Un servicio externo consultado por el step devolvió error.
    #[error("{service} service error: {message}")]
    Service { service: String, message: String },
    /// El step devolvió un JSON que no es objeto (no se puede mergear al state).
    #[error("step output must be a JSON object, got {0}")]
    InvalidOutput(String),
}

impl StepError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service { service: service.into(),
                        message: message.into() }
    }
}

/// Error transportado por un `ProcessResult::Failure`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ProcessError {
    /// La validación de la entrada falló; el mensaje une todos los errores con
    /// `", "`.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    /// Un step falló y cortó la ejecución.
    #[error("{error}")]
    StepFailed { step: String, error: StepError },
}

impl ProcessError {
    /// Nombre del step que falló, si aplica.
    pub fn step(&self) -> Option<&str> {
        match self {
            ProcessError::StepFailed { step, .. } => Some(step),
            ProcessError::Validation(_) => None,
        }
    }
}

/// Errores al registrar procesos o construir definiciones.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum RegistryError {
    #[error("process {process}: duplicate step name {step}")]
    DuplicateStep { process: String, step: String },
    #[error("process {process}: configuration references unknown step {step}")]
    UnknownStep { process: String, step: String },
}

/// Errores fatales del engine (no producen `ProcessResult`).
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ProcessEngineError {
    #[error("process not found: {0}")]
    ProcessNotFound(String),
    #[error("input could not be serialized: {0}")]
    InputEncode(String),
    #[error("process {process} produced state that does not decode: {message}")]
    OutputDecode { process: String, message: String },
}
