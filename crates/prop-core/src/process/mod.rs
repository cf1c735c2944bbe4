//! Procesos: definición, configuración y validación de entrada.

pub mod configuration;
pub mod definition;
pub mod validation;

pub use configuration::{ProcessConfiguration, StepToggle, StepsConfigFile};
pub use definition::{ProcessDefinition, ProcessDefinitionBuilder};
pub use validation::{AcceptAll, FnValidator, ProcessValidator, ValidationReport};
