//! Errores de la aplicación `propflow`.
pub mod app_error;

pub use app_error::AppError;
