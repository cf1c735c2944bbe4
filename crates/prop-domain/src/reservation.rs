// reservation.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::{AvailabilityReport, PriceQuote, ScreeningReport};
use crate::DomainError;

/// Rango de estadía `[start, end)`; `start` debe ser estrictamente anterior a
/// `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// # Errores
    /// `DomainError::ValidationError` si `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::ValidationError("startDate must be before endDate".to_string()));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn nights(&self) -> u32 {
        (self.end - self.start).num_days() as u32
    }

    /// Dos rangos semiabiertos se solapan si comparten al menos una noche.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Documento adjunto a una solicitud (identificación, contrato, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub kind: String,
}

/// Entrada del proceso de reserva.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub property_id: String,
    pub tenant_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

fn default_guests() -> u32 {
    1
}

impl ReservationRequest {
    pub fn stay(&self) -> Result<DateRange, DomainError> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Resumen de la verificación de documentos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsSummary {
    pub verified: Vec<String>,
}

/// Salida del proceso de reserva (state final decodificado).
///
/// Cada campo es opcional: la configuración puede deshabilitar cualquier step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationOutcome {
    pub availability: Option<AvailabilityReport>,
    pub tenant_verification: Option<ScreeningReport>,
    pub documents: Option<DocumentsSummary>,
    pub pricing: Option<PriceQuote>,
}
