//! Modelos de ejecución (contexto, metadatos, resultado).

pub mod context;
pub mod result;

pub use context::{ProcessContext, ProcessMetadata};
pub use result::ProcessResult;
