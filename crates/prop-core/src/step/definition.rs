use std::sync::Arc;

use async_trait::async_trait;

use super::outcome::StepOutcome;
use crate::model::ProcessContext;

/// Predicado sobre el contexto vigente justo antes de un step.
pub type Condition = Arc<dyn Fn(&ProcessContext) -> bool + Send + Sync + 'static>;

/// Trait que define un step de proceso.
///
/// El engine garantiza que nunca ejecuta dos steps de la misma invocación a la
/// vez; un step puede esperar I/O externo libremente.
#[async_trait]
pub trait ProcessStep: Send + Sync {
    /// Nombre único dentro del proceso.
    fn name(&self) -> &str;

    /// Precondición propia del step. `false` => el engine lo salta.
    fn condition(&self, _ctx: &ProcessContext) -> bool {
        true
    }

    /// Claves del state que este step escribe. Vacío = no declarado.
    fn writes(&self) -> &[&'static str] {
        &[]
    }

    async fn execute(&self, ctx: &ProcessContext) -> StepOutcome;
}
