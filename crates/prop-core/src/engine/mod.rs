//! Engine module for ProcessEngine implementation
//!
//! Provides the core engine and the step gating rules.

pub mod core;
pub mod gating;
mod unwind;

pub use self::core::ProcessEngine;
pub use gating::{should_execute_step, skip_reason};
