//! prop-core: motor de procesos secuencial por steps
//!
//! Un proceso es una lista ordenada de steps con nombre que se ejecutan sobre
//! un contexto propio de cada invocación. La configuración del proceso decide
//! el orden y qué steps se habilitan o condicionan; el primer fallo corta la
//! ejecución.
pub mod engine;
pub mod errors;
pub mod event;
pub mod model;
pub mod process;
pub mod registry;
pub mod state;
pub mod step;

pub use engine::ProcessEngine;
pub use errors::{ProcessEngineError, ProcessError, RegistryError, StepError};
pub use event::{EventStore, InMemoryEventStore, ProcessEvent, ProcessEventKind, SkipReason};
pub use model::{ProcessContext, ProcessMetadata, ProcessResult};
pub use process::{AcceptAll, FnValidator, ProcessConfiguration, ProcessDefinition, ProcessValidator, StepToggle,
                  StepsConfigFile, ValidationReport};
pub use registry::{ProcessRegistry, RegisteredProcess};
pub use step::{Condition, FnStep, ProcessStep, StepOutcome};
