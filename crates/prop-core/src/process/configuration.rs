//! Configuración por proceso: orden canónico y toggles por step.
//!
//! Permite deshabilitar o condicionar steps sin tocar la definición. Las
//! condiciones sólo pueden declararse en código; el orden y los flags
//! `enabled` pueden venir además de un JSON (`StepsConfigFile`).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::ProcessDefinition;
use crate::model::ProcessContext;
use crate::step::Condition;

/// Ajuste de un step dentro de la configuración.
#[derive(Clone)]
pub struct StepToggle {
    pub enabled: bool,
    pub condition: Option<Condition>,
}

impl Default for StepToggle {
    fn default() -> Self {
        Self { enabled: true,
               condition: None }
    }
}

impl fmt::Debug for StepToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepToggle")
         .field("enabled", &self.enabled)
         .field("condition_present", &self.condition.is_some())
         .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessConfiguration {
    order: Vec<String>,
    conditional: HashMap<String, StepToggle>,
}

impl ProcessConfiguration {
    pub fn new<I, S>(order: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { order: order.into_iter().map(Into::into).collect(),
               conditional: HashMap::new() }
    }

    /// Orden = orden de definición, sin toggles.
    pub fn for_definition(definition: &ProcessDefinition) -> Self {
        Self::new(definition.step_names())
    }

    pub fn disable(mut self, step: impl Into<String>) -> Self {
        self.set_enabled(step, false);
        self
    }

    pub fn with_condition<C>(mut self, step: impl Into<String>, condition: C) -> Self
        where C: Fn(&ProcessContext) -> bool + Send + Sync + 'static
    {
        self.conditional.entry(step.into()).or_default().condition = Some(Arc::new(condition));
        self
    }

    pub fn set_enabled(&mut self, step: impl Into<String>, enabled: bool) {
        self.conditional.entry(step.into()).or_default().enabled = enabled;
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn toggle(&self, step: &str) -> Option<&StepToggle> {
        self.conditional.get(step)
    }

    /// Todos los nombres de step que la configuración menciona.
    pub fn referenced_steps(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str).chain(self.conditional.keys().map(String::as_str))
    }

    /// Superpone un `StepsConfigFile`: reemplaza el orden (si no está vacío) y
    /// aplica los flags `enabled`. Las condiciones existentes se conservan.
    pub fn overlay(mut self, file: &StepsConfigFile) -> Self {
        if !file.order.is_empty() {
            self.order = file.order.clone();
        }
        for (step, enabled) in &file.enabled {
            self.set_enabled(step.clone(), *enabled);
        }
        self
    }

    /// Vista serializable (sin condiciones) de la configuración efectiva.
    pub fn describe(&self) -> StepsConfigFile {
        StepsConfigFile { order: self.order.clone(),
                          enabled: self.conditional
                                       .iter()
                                       .map(|(k, t)| (k.clone(), t.enabled))
                                       .collect() }
    }
}

/// Forma serializable de la configuración de steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepsConfigFile {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub enabled: BTreeMap<String, bool>,
}

impl StepsConfigFile {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
