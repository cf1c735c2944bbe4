use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Metadatos de una ejecución concreta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetadata {
    pub process_id: Uuid,
    pub process_name: String,
    pub started_at: DateTime<Utc>,
    /// Steps terminados con éxito, en orden de ejecución.
    pub completed_steps: Vec<String>,
    /// Último step que empezó a ejecutarse.
    pub current_step: Option<String>,
}

/// Contexto mutable de una ejecución.
///
/// Pertenece a una sola invocación de `execute_process`; nunca se comparte
/// entre invocaciones. `input` no cambia tras la creación; `state` y
/// `metadata` sólo los modifica el engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessContext {
    input: Value,
    state: Map<String, Value>,
    metadata: ProcessMetadata,
}

impl ProcessContext {
    pub(crate) fn new(process_name: &str, input: Value) -> Self {
        Self { input,
               state: Map::new(),
               metadata: ProcessMetadata { process_id: Uuid::new_v4(),
                                           process_name: process_name.to_string(),
                                           started_at: Utc::now(),
                                           completed_steps: Vec::new(),
                                           current_step: None } }
    }

    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    pub fn metadata(&self) -> &ProcessMetadata {
        &self.metadata
    }

    pub fn process_id(&self) -> Uuid {
        self.metadata.process_id
    }

    pub fn completed_steps(&self) -> &[String] {
        &self.metadata.completed_steps
    }

    pub fn current_step(&self) -> Option<&str> {
        self.metadata.current_step.as_deref()
    }

    /// Atajo para leer una clave del input.
    pub fn input_field(&self, key: &str) -> Option<&Value> {
        self.input.get(key)
    }

    pub(crate) fn state_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.state
    }

    pub(crate) fn set_current_step(&mut self, step: &str) {
        self.metadata.current_step = Some(step.to_string());
    }

    pub(crate) fn mark_completed(&mut self, step: &str) {
        self.metadata.completed_steps.push(step.to_string());
    }

    /// Volcado de diagnóstico (paso actual, pasos completados y claves del
    /// state). Pensado para mostrarse junto a un error fuera de producción.
    pub fn diagnostic(&self) -> Value {
        json!({
            "processId": self.metadata.process_id,
            "processName": self.metadata.process_name,
            "startedAt": self.metadata.started_at,
            "currentStep": self.metadata.current_step,
            "completedSteps": self.metadata.completed_steps,
            "stateKeys": self.state.keys().collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_empty() {
        let ctx = ProcessContext::new("p", json!({"a": 1}));
        assert!(ctx.state().is_empty());
        assert!(ctx.completed_steps().is_empty());
        assert_eq!(ctx.current_step(), None);
        assert_eq!(ctx.input_field("a"), Some(&json!(1)));
    }

    #[test]
    fn diagnostic_lists_progress() {
        let mut ctx = ProcessContext::new("p", Value::Null);
        ctx.set_current_step("one");
        ctx.mark_completed("one");
        ctx.state_mut().insert("k".into(), json!(true));
        let d = ctx.diagnostic();
        assert_eq!(d["currentStep"], json!("one"));
        assert_eq!(d["completedSteps"], json!(["one"]));
        assert_eq!(d["stateKeys"], json!(["k"]));
    }
}
