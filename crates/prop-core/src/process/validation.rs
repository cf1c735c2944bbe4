use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resultado de validar la entrada de un proceso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self { success: true,
               errors: Vec::new() }
    }

    /// `success` se deriva de que no haya errores.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { success: errors.is_empty(),
               errors }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validación de la entrada, ejecutada antes del primer step.
#[async_trait]
pub trait ProcessValidator: Send + Sync {
    async fn validate(&self, input: &Value) -> ValidationReport;
}

/// Validador que acepta cualquier entrada.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl ProcessValidator for AcceptAll {
    async fn validate(&self, _input: &Value) -> ValidationReport {
        ValidationReport::ok()
    }
}

/// Validador síncrono a partir de un closure.
pub struct FnValidator<F>(pub F);

#[async_trait]
impl<F> ProcessValidator for FnValidator<F> where F: Fn(&Value) -> ValidationReport + Send + Sync
{
    async fn validate(&self, input: &Value) -> ValidationReport {
        (self.0)(input)
    }
}
