use serde_json::{Map, Value};

use crate::errors::StepError;

/// Resultado abstracto de ejecutar un step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// `data` se mergea (shallow) sobre el state del proceso.
    Success { data: Map<String, Value> },
    Failure { error: StepError },
}

impl StepOutcome {
    pub fn success(data: Map<String, Value>) -> Self {
        StepOutcome::Success { data }
    }

    /// Éxito sin datos que aportar al state.
    pub fn empty() -> Self {
        StepOutcome::Success { data: Map::new() }
    }

    /// Construye el outcome desde un JSON arbitrario. `null` equivale a
    /// `empty()`; cualquier valor que no sea objeto es un fallo del step.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(data) => StepOutcome::Success { data },
            Value::Null => StepOutcome::empty(),
            other => StepOutcome::Failure { error: StepError::InvalidOutput(other.to_string()) },
        }
    }

    pub fn failure(error: StepError) -> Self {
        StepOutcome::Failure { error }
    }

    /// Atajo para `StepError::Failed`.
    pub fn fail(message: impl Into<String>) -> Self {
        StepOutcome::Failure { error: StepError::failed(message) }
    }
}

impl From<Result<Value, StepError>> for StepOutcome {
    fn from(res: Result<Value, StepError>) -> Self {
        match res {
            Ok(v) => StepOutcome::from_json(v),
            Err(error) => StepOutcome::Failure { error },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_accepts_objects_and_null() {
        assert!(matches!(StepOutcome::from_json(json!({"a": 1})), StepOutcome::Success { .. }));
        assert_eq!(StepOutcome::from_json(Value::Null), StepOutcome::empty());
    }

    #[test]
    fn from_json_rejects_scalars() {
        let out = StepOutcome::from_json(json!([1, 2]));
        assert_eq!(out, StepOutcome::Failure { error: StepError::InvalidOutput("[1,2]".into()) });
    }
}
