//! Definición inmutable de un proceso: nombre, steps y validador.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::validation::{AcceptAll, ProcessValidator};
use crate::errors::RegistryError;
use crate::step::ProcessStep;

pub struct ProcessDefinition {
    name: String,
    steps: Vec<Arc<dyn ProcessStep>>,
    validator: Arc<dyn ProcessValidator>,
}

impl ProcessDefinition {
    pub fn builder(name: impl Into<String>) -> ProcessDefinitionBuilder {
        ProcessDefinitionBuilder { name: name.into(),
                                   steps: Vec::new(),
                                   validator: Arc::new(AcceptAll) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Arc<dyn ProcessStep>] {
        &self.steps
    }

    /// Busca un step por nombre.
    pub fn step(&self, name: &str) -> Option<&Arc<dyn ProcessStep>> {
        self.steps.iter().find(|s| s.name() == name)
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn validator(&self) -> &dyn ProcessValidator {
        self.validator.as_ref()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Claves de state declaradas por más de un step, con los steps que las
    /// escriben (en orden de definición).
    pub fn key_collisions(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut writers: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for s in &self.steps {
            for key in s.writes() {
                writers.entry(*key).or_default().push(s.name().to_string());
            }
        }
        writers.retain(|_, steps| steps.len() > 1);
        writers
    }
}

impl fmt::Debug for ProcessDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessDefinition")
         .field("name", &self.name)
         .field("steps", &self.step_names())
         .finish()
    }
}

pub struct ProcessDefinitionBuilder {
    name: String,
    steps: Vec<Arc<dyn ProcessStep>>,
    validator: Arc<dyn ProcessValidator>,
}

impl ProcessDefinitionBuilder {
    pub fn validator<V>(mut self, validator: V) -> Self
        where V: ProcessValidator + 'static
    {
        self.validator = Arc::new(validator);
        self
    }

    pub fn step<S>(mut self, step: S) -> Self
        where S: ProcessStep + 'static
    {
        self.steps.push(Arc::new(step));
        self
    }

    /// Rechaza nombres de step duplicados.
    pub fn build(self) -> Result<ProcessDefinition, RegistryError> {
        let mut seen = HashSet::new();
        for s in &self.steps {
            if !seen.insert(s.name().to_string()) {
                return Err(RegistryError::DuplicateStep { process: self.name.clone(),
                                                          step: s.name().to_string() });
            }
        }
        Ok(ProcessDefinition { name: self.name,
                               steps: self.steps,
                               validator: self.validator })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{FnStep, StepOutcome};

    #[test]
    fn duplicate_step_names_are_rejected() {
        let err = ProcessDefinition::builder("dup").step(FnStep::sync("a", |_| StepOutcome::empty()))
                                                   .step(FnStep::sync("a", |_| StepOutcome::empty()))
                                                   .build()
                                                   .unwrap_err();
        assert_eq!(err,
                   RegistryError::DuplicateStep { process: "dup".into(),
                                                  step: "a".into() });
    }

    #[test]
    fn key_collisions_lists_all_writers() {
        let def = ProcessDefinition::builder("c").step(FnStep::sync("a", |_| StepOutcome::empty()).writing(&["x", "y"]))
                                                 .step(FnStep::sync("b", |_| StepOutcome::empty()).writing(&["x"]))
                                                 .build()
                                                 .unwrap();
        let collisions = def.key_collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions["x"], vec!["a".to_string(), "b".to_string()]);
    }
}
