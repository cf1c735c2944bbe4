//! Contratos de los servicios externos que consume el proceso de reserva.
//!
//! El dominio no conoce el transporte (HTTP, base de datos, colas); sólo estos
//! traits asíncronos y los reportes que devuelven.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{DateRange, DocumentRef, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub available: bool,
    /// Identificadores de reservas que se solapan con el rango pedido.
    #[serde(default)]
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningReport {
    pub passed: bool,
    pub score: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVerdict {
    pub document_id: String,
    pub accepted: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Cotización en centavos para evitar redondeos de coma flotante.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub nights: u32,
    pub nightly_rate_cents: u64,
    pub fees_cents: u64,
    pub total_cents: u64,
    pub currency: String,
}

#[async_trait]
pub trait PropertyDirectory: Send + Sync {
    async fn property_exists(&self, property_id: &str) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn tenant_exists(&self, tenant_id: &str) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn check_availability(&self, property_id: &str, stay: &DateRange) -> Result<AvailabilityReport, ServiceError>;
}

#[async_trait]
pub trait TenantScreening: Send + Sync {
    async fn background_check(&self, tenant_id: &str) -> Result<ScreeningReport, ServiceError>;
}

#[async_trait]
pub trait DocumentVerifier: Send + Sync {
    async fn verify(&self, document: &DocumentRef) -> Result<DocumentVerdict, ServiceError>;
}

#[async_trait]
pub trait PricingService: Send + Sync {
    async fn quote(&self, property_id: &str, stay: &DateRange, guests: u32) -> Result<PriceQuote, ServiceError>;
}
