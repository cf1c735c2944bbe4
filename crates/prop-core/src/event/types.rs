//! Tipos de evento de ejecución y estructura `ProcessEvent`.
//!
//! Cada invocación de `ProcessEngine::execute_process` emite eventos a un
//! `EventStore` append-only. No sirven para reanudar ejecuciones (no hay
//! persistencia); son la traza observable del engine para diagnóstico.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StepError;

/// Motivo por el que el engine saltó un step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// `enabled: false` en la configuración.
    Disabled,
    /// La condición propia del step devolvió `false`.
    StepCondition,
    /// La condición de la configuración devolvió `false`.
    ConfigCondition,
    /// El nombre no resuelve a ningún step de la definición.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProcessEventKind {
    /// Primer evento de toda ejecución.
    ProcessStarted { process_name: String },
    /// La entrada no pasó la validación; no se ejecutó ningún step.
    ValidationFailed { errors: Vec<String> },
    StepStarted { step: String },
    StepSkipped { step: String, reason: SkipReason },
    /// Un step terminó bien; `written_keys` son las claves mergeadas al state.
    StepFinished { step: String, written_keys: Vec<String> },
    /// Un step falló. El proceso no continúa (stop-on-failure).
    StepFailed { step: String, error: StepError },
    ProcessCompleted { completed_steps: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEvent {
    pub seq: u64, // orden de append dentro de la ejecución
    pub process_id: Uuid,
    pub kind: ProcessEventKind,
    pub ts: DateTime<Utc>,
}
