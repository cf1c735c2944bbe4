//! Utilidades sobre el `state` de un proceso.

pub mod merge;

pub use merge::{merge_json, merge_state};
