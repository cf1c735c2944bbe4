//! Registro de procesos con nombre.
//!
//! Valor propio (no global) que se entrega al `ProcessEngine`. Registrar
//! requiere `&mut`, ejecutar sólo `&`, así que no puede haber registro
//! concurrente con ejecución.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};

use crate::errors::RegistryError;
use crate::process::{ProcessConfiguration, ProcessDefinition};

/// Definición + configuración registradas bajo un nombre.
#[derive(Debug, Clone)]
pub struct RegisteredProcess {
    pub definition: Arc<ProcessDefinition>,
    pub config: Arc<ProcessConfiguration>,
}

#[derive(Debug, Default)]
pub struct ProcessRegistry {
    entries: HashMap<String, RegisteredProcess>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) un proceso.
    ///
    /// Todo nombre que la configuración mencione debe existir en la
    /// definición. Las colisiones de claves declaradas sólo se reportan.
    pub fn register_process(&mut self,
                            name: impl Into<String>,
                            process: ProcessDefinition,
                            config: ProcessConfiguration)
                            -> Result<(), RegistryError> {
        let name = name.into();
        if let Some(missing) = config.referenced_steps().find(|s| process.step(s).is_none()) {
            return Err(RegistryError::UnknownStep { process: name,
                                                    step: missing.to_string() });
        }
        for (key, writers) in process.key_collisions() {
            warn!("process {name}: state key '{key}' written by {writers:?}; last writer wins");
        }
        let entry = RegisteredProcess { definition: Arc::new(process),
                                        config: Arc::new(config) };
        if self.entries.insert(name.clone(), entry).is_some() {
            info!("process {name} re-registered; previous registration replaced");
        } else {
            info!("process {name} registered");
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredProcess> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Nombres registrados, ordenados.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
