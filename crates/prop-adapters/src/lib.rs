//! prop-adapters: procesos concretos sobre `prop-core`.
//!
//! Este crate provee:
//! - El proceso `propertyReservation` (validador + cuatro steps) cableado a
//!   los servicios de `prop-domain`.
//! - `InMemoryPropertyBackend`, una implementación en memoria de todos los
//!   servicios para la CLI de demostración y los tests.
//!
//! Nota: los steps sólo traducen respuestas de servicios a `StepOutcome`; la
//! lógica de negocio vive detrás de los traits del dominio.

pub mod memory;
pub mod reservation;

pub use memory::{InMemoryPropertyBackend, Listing, TenantRecord};
pub use reservation::{build_reservation_process, default_configuration, register_reservation, ReservationServices,
                      ReservationStep, ReservationValidator, RESERVATION_PROCESS};
