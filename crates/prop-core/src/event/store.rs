use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::{ProcessEvent, ProcessEventKind};

/// Almacenamiento de eventos append-only.
///
/// Recibe `&self`: el engine se comparte entre invocaciones concurrentes, así
/// que las implementaciones deben sincronizar internamente.
pub trait EventStore: Send + Sync {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con
    /// seq y ts).
    fn append_kind(&self, process_id: Uuid, kind: ProcessEventKind) -> ProcessEvent;
    /// Lista eventos de una ejecución (orden ascendente por seq).
    fn list(&self, process_id: Uuid) -> Vec<ProcessEvent>;
    /// Quita y devuelve la traza de una ejecución.
    fn remove(&self, process_id: Uuid) -> Vec<ProcessEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: Mutex<HashMap<Uuid, Vec<ProcessEvent>>>,
}

impl InMemoryEventStore {
    /// Cantidad de ejecuciones con eventos.
    pub fn process_count(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&self, process_id: Uuid, kind: ProcessEventKind) -> ProcessEvent {
        let mut guard = match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let vec = guard.entry(process_id).or_default();
        let ev = ProcessEvent { seq: vec.len() as u64,
                                process_id,
                                kind,
                                ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, process_id: Uuid) -> Vec<ProcessEvent> {
        match self.inner.lock() {
            Ok(g) => g.get(&process_id).cloned().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().get(&process_id).cloned().unwrap_or_default(),
        }
    }

    fn remove(&self, process_id: Uuid) -> Vec<ProcessEvent> {
        let mut guard = match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(&process_id).unwrap_or_default()
    }
}
