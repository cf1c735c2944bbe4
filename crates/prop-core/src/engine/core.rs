//! Core ProcessEngine implementation

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::gating::skip_reason;
use super::unwind::{panic_message, CatchUnwind};
use crate::errors::{ProcessEngineError, ProcessError, RegistryError, StepError};
use crate::event::{EventStore, InMemoryEventStore, ProcessEvent, ProcessEventKind, SkipReason};
use crate::model::{ProcessContext, ProcessResult};
use crate::process::{ProcessConfiguration, ProcessDefinition};
use crate::registry::ProcessRegistry;
use crate::state::merge_state;
use crate::step::StepOutcome;

/// Motor de ejecución de procesos.
///
/// Recorre `config.order()` de forma estrictamente secuencial, aplicando el
/// gating de cada step y cortando en el primer fallo. Se comparte por `&`
/// entre invocaciones concurrentes; cada una tiene su propio contexto.
#[derive(Debug)]
pub struct ProcessEngine<E = InMemoryEventStore>
    where E: EventStore
{
    registry: ProcessRegistry,
    event_store: E,
}

impl ProcessEngine<InMemoryEventStore> {
    /// Crea un engine con event store en memoria.
    pub fn new(registry: ProcessRegistry) -> Self {
        Self::with_event_store(registry, InMemoryEventStore::default())
    }
}

impl Default for ProcessEngine<InMemoryEventStore> {
    fn default() -> Self {
        Self::new(ProcessRegistry::new())
    }
}

impl<E> ProcessEngine<E> where E: EventStore
{
    pub fn with_event_store(registry: ProcessRegistry, event_store: E) -> Self {
        Self { registry,
               event_store }
    }

    /// Delegado de `ProcessRegistry::register_process`.
    pub fn register_process(&mut self,
                            name: impl Into<String>,
                            process: ProcessDefinition,
                            config: ProcessConfiguration)
                            -> Result<(), RegistryError> {
        self.registry.register_process(name, process, config)
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Eventos emitidos por una ejecución.
    pub fn events_for(&self, process_id: Uuid) -> Vec<ProcessEvent> {
        self.event_store.list(process_id)
    }

    /// Retira del store la traza de una ejecución ya terminada.
    pub fn take_events(&self, process_id: Uuid) -> Vec<ProcessEvent> {
        self.event_store.remove(process_id)
    }

    /// Ejecuta el proceso registrado como `process_name`.
    ///
    /// Un nombre no registrado es el único caso que devuelve `Err`, antes de
    /// crear contexto o emitir eventos. Fallos de validación y de steps se
    /// devuelven como `Ok(ProcessResult::Failure { .. })`.
    pub async fn execute_process(&self, process_name: &str, input: Value) -> Result<ProcessResult<Value>, ProcessEngineError> {
        let entry = self.registry
                        .get(process_name)
                        .ok_or_else(|| ProcessEngineError::ProcessNotFound(process_name.to_string()))?;
        Ok(self.run(process_name, &entry.definition, &entry.config, input).await)
    }

    /// Variante tipada: serializa `input` y decodifica el state final en `O`.
    pub async fn execute_as<I, O>(&self, process_name: &str, input: &I) -> Result<ProcessResult<O>, ProcessEngineError>
        where I: Serialize + ?Sized,
              O: DeserializeOwned
    {
        let value = serde_json::to_value(input).map_err(|e| ProcessEngineError::InputEncode(e.to_string()))?;
        let result = self.execute_process(process_name, value).await?;
        result.try_map(serde_json::from_value::<O>)
              .map_err(|(e, _ctx)| ProcessEngineError::OutputDecode { process: process_name.to_string(),
                                                                      message: e.to_string() })
    }

    async fn run(&self,
                 process_name: &str,
                 definition: &ProcessDefinition,
                 config: &ProcessConfiguration,
                 input: Value)
                 -> ProcessResult<Value> {
        let mut ctx = ProcessContext::new(process_name, input);
        let pid = ctx.process_id();
        self.event_store
            .append_kind(pid, ProcessEventKind::ProcessStarted { process_name: process_name.to_string() });
        debug!("process {process_name} [{pid}] started");

        let report = definition.validator().validate(ctx.input()).await;
        if !report.success {
            warn!("process {process_name} [{pid}] rejected input: {:?}", report.errors);
            self.event_store
                .append_kind(pid, ProcessEventKind::ValidationFailed { errors: report.errors.clone() });
            return ProcessResult::Failure { error: ProcessError::Validation(report.errors),
                                            context: ctx };
        }

        for step_name in config.order() {
            let Some(step) = definition.step(step_name) else {
                // El registro ya rechaza nombres desconocidos; se conserva el salto.
                warn!("process {process_name} [{pid}]: step {step_name} not found, skipping");
                self.event_store.append_kind(pid,
                                             ProcessEventKind::StepSkipped { step: step_name.clone(),
                                                                             reason: SkipReason::Unresolved });
                continue;
            };

            if let Some(reason) = skip_reason(step.as_ref(), config, &ctx) {
                debug!("process {process_name} [{pid}]: step {step_name} skipped ({reason:?})");
                self.event_store.append_kind(pid,
                                             ProcessEventKind::StepSkipped { step: step_name.clone(),
                                                                             reason });
                continue;
            }

            ctx.set_current_step(step_name);
            self.event_store
                .append_kind(pid, ProcessEventKind::StepStarted { step: step_name.clone() });
            debug!("process {process_name} [{pid}]: step {step_name} started");

            let outcome = match CatchUnwind::new(step.execute(&ctx)).await {
                Ok(outcome) => outcome,
                Err(payload) => StepOutcome::failure(StepError::failed(format!("step panicked: {}", panic_message(&*payload)))),
            };
            match outcome {
                StepOutcome::Success { data } => {
                    let written_keys = merge_state(ctx.state_mut(), data);
                    ctx.mark_completed(step_name);
                    self.event_store.append_kind(pid,
                                                 ProcessEventKind::StepFinished { step: step_name.clone(),
                                                                                  written_keys });
                }
                StepOutcome::Failure { error } => {
                    warn!("process {process_name} [{pid}]: step {step_name} failed: {error}");
                    self.event_store.append_kind(pid,
                                                 ProcessEventKind::StepFailed { step: step_name.clone(),
                                                                                error: error.clone() });
                    return ProcessResult::Failure { error: ProcessError::StepFailed { step: step_name.clone(),
                                                                                      error },
                                                    context: ctx };
                }
            }
        }

        self.event_store.append_kind(pid,
                                     ProcessEventKind::ProcessCompleted { completed_steps:
                                                                              ctx.completed_steps().to_vec() });
        info!("process {process_name} [{pid}] completed: {:?}", ctx.completed_steps());
        let data = Value::Object(ctx.state().clone());
        ProcessResult::Success { data, context: ctx }
    }
}
