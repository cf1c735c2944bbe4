//! Definiciones relacionadas a Steps.
//!
//! Un step es una unidad que lee el contexto de la ejecución y devuelve un
//! `StepOutcome`: datos a mergear en el state o un fallo que corta el proceso.
//! - `ProcessStep`: interfaz neutral usada por el engine.
//! - `FnStep`: registro plano con closures adjuntos.
//! - `StepOutcome`: resultado de un step.

pub mod definition;
pub mod fn_step;
mod outcome;

pub use definition::{Condition, ProcessStep};
pub use fn_step::{FnStep, StepFuture};
pub use outcome::StepOutcome;
