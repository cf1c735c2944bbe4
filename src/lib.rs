//! PropFlow Rust Library
//!
//! Librería de la aplicación de reservas:
//! - `config`: configuración desde el entorno (`CONFIG`).
//! - `errors`: `AppError`, que agrega los errores del workspace.
//! - `logging`: inicialización de `env_logger`.
//! - `service`: `ReservationService`, el punto de entrada limitado por tasa
//!   que ejecuta el proceso `propertyReservation`.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod logging;
pub mod service;

pub use config::{AppConfig, CONFIG};
pub use errors::AppError;
pub use service::{ReservationReport, ReservationService, ReservationStatus};
