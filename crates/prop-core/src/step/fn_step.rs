//! `FnStep`: step como registro plano (nombre + funciones adjuntas).
//!
//! Útil cuando un step no merece un tipo propio. La función recibe una copia
//! del contexto vigente, por lo que el future resultante es `'static`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::definition::{Condition, ProcessStep};
use super::outcome::StepOutcome;
use crate::model::ProcessContext;

pub type StepFuture = Pin<Box<dyn Future<Output = StepOutcome> + Send + 'static>>;

type StepFn = Arc<dyn Fn(ProcessContext) -> StepFuture + Send + Sync + 'static>;

#[derive(Clone)]
pub struct FnStep {
    name: String,
    condition: Option<Condition>,
    writes: Vec<&'static str>,
    run: StepFn,
}

impl FnStep {
    /// Step asíncrono a partir de un closure.
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
        where F: Fn(ProcessContext) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = StepOutcome> + Send + 'static
    {
        Self { name: name.into(),
               condition: None,
               writes: Vec::new(),
               run: Arc::new(move |ctx| Box::pin(f(ctx))) }
    }

    /// Step síncrono (sin I/O).
    pub fn sync<F>(name: impl Into<String>, f: F) -> Self
        where F: Fn(&ProcessContext) -> StepOutcome + Send + Sync + 'static
    {
        Self { name: name.into(),
               condition: None,
               writes: Vec::new(),
               run: Arc::new(move |ctx: ProcessContext| -> StepFuture { Box::pin(std::future::ready(f(&ctx))) }) }
    }

    /// Añade una precondición propia.
    pub fn when<C>(mut self, condition: C) -> Self
        where C: Fn(&ProcessContext) -> bool + Send + Sync + 'static
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Declara las claves del state que escribe.
    pub fn writing(mut self, keys: &[&'static str]) -> Self {
        self.writes = keys.to_vec();
        self
    }
}

impl fmt::Debug for FnStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep")
         .field("name", &self.name)
         .field("condition_present", &self.condition.is_some())
         .field("writes", &self.writes)
         .finish()
    }
}

#[async_trait]
impl ProcessStep for FnStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn condition(&self, ctx: &ProcessContext) -> bool {
        self.condition.as_ref().map_or(true, |c| c(ctx))
    }

    fn writes(&self) -> &[&'static str] {
        &self.writes
    }

    async fn execute(&self, ctx: &ProcessContext) -> StepOutcome {
        (self.run)(ctx.clone()).await
    }
}
