use serde::Serialize;

use super::ProcessContext;
use crate::errors::ProcessError;

/// Resultado terminal de un proceso. Siempre incluye el contexto final (o el
/// contexto en el punto de fallo).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ProcessResult<T> {
    Success { data: T, context: ProcessContext },
    Failure { error: ProcessError, context: ProcessContext },
}

impl<T> ProcessResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessResult::Success { .. })
    }

    pub fn context(&self) -> &ProcessContext {
        match self {
            ProcessResult::Success { context, .. } | ProcessResult::Failure { context, .. } => context,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ProcessResult::Success { data, .. } => Some(data),
            ProcessResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ProcessError> {
        match self {
            ProcessResult::Failure { error, .. } => Some(error),
            ProcessResult::Success { .. } => None,
        }
    }

    /// Descarta el contexto y devuelve un `Result` convencional.
    pub fn into_result(self) -> Result<T, ProcessError> {
        match self {
            ProcessResult::Success { data, .. } => Ok(data),
            ProcessResult::Failure { error, .. } => Err(error),
        }
    }

    /// Transforma `data` conservando el contexto. Si `f` falla, el error se
    /// devuelve junto con el contexto.
    pub fn try_map<U, E, F>(self, f: F) -> Result<ProcessResult<U>, (E, ProcessContext)>
        where F: FnOnce(T) -> Result<U, E>
    {
        match self {
            ProcessResult::Success { data, context } => match f(data) {
                Ok(data) => Ok(ProcessResult::Success { data, context }),
                Err(e) => Err((e, context)),
            },
            ProcessResult::Failure { error, context } => Ok(ProcessResult::Failure { error, context }),
        }
    }
}
