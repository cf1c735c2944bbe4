//! Backend en memoria que implementa todos los servicios del dominio.
//!
//! Pensado para la CLI de demostración y los tests: listados, inquilinos y
//! reservas existentes viven en mapas protegidos por un `RwLock`. También
//! permite simular caídas de un servicio con `with_outage`.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use prop_domain::{AvailabilityReport, AvailabilityService, DateRange, DocumentRef, DocumentVerdict, DocumentVerifier,
                  PriceQuote, PricingService, PropertyDirectory, ScreeningReport, ServiceError, TenantDirectory,
                  TenantScreening};

/// Puntaje mínimo para aprobar la verificación de antecedentes.
pub const PASSING_SCORE: u32 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub nightly_rate_cents: u64,
    pub cleaning_fee_cents: u64,
    pub max_guests: u32,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    pub score: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
struct Booking {
    id: String,
    property_id: String,
    stay: DateRange,
}

#[derive(Debug, Default)]
struct Inner {
    listings: HashMap<String, Listing>,
    tenants: HashMap<String, TenantRecord>,
    bookings: Vec<Booking>,
    rejected_documents: HashMap<String, String>,
    outages: HashSet<&'static str>,
}

#[derive(Debug, Default)]
pub struct InMemoryPropertyBackend {
    inner: RwLock<Inner>,
}

impl InMemoryPropertyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend con datos de ejemplo: dos propiedades, dos inquilinos y una
    /// reserva existente en `prop-beach` del 10 al 15 de julio de 2026.
    pub fn demo() -> Self {
        let backend = Self::new().with_listing("prop-loft", Listing { nightly_rate_cents: 12_000,
                                                                      cleaning_fee_cents: 4_500,
                                                                      max_guests: 2,
                                                                      currency: "USD".into() })
                                 .with_listing("prop-beach", Listing { nightly_rate_cents: 25_000,
                                                                       cleaning_fee_cents: 8_000,
                                                                       max_guests: 6,
                                                                       currency: "USD".into() })
                                 .with_tenant("tenant-ana", TenantRecord { score: 720, notes: None })
                                 .with_tenant("tenant-low",
                                              TenantRecord { score: 410,
                                                             notes: Some("outstanding balance".into()) });
        if let (Some(start), Some(end)) = (NaiveDate::from_ymd_opt(2026, 7, 10), NaiveDate::from_ymd_opt(2026, 7, 15)) {
            if let Ok(stay) = DateRange::new(start, end) {
                backend.book("bk-1001", "prop-beach", stay);
            }
        }
        backend
    }

    pub fn with_listing(self, property_id: impl Into<String>, listing: Listing) -> Self {
        self.write().listings.insert(property_id.into(), listing);
        self
    }

    pub fn with_tenant(self, tenant_id: impl Into<String>, record: TenantRecord) -> Self {
        self.write().tenants.insert(tenant_id.into(), record);
        self
    }

    /// Marca un documento como rechazado con el motivo dado.
    pub fn with_rejected_document(self, document_id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.write().rejected_documents.insert(document_id.into(), reason.into());
        self
    }

    /// Simula la caída de un servicio: `"properties"`, `"tenants"`,
    /// `"availability"`, `"screening"`, `"documents"` o `"pricing"`.
    pub fn with_outage(self, service: &'static str) -> Self {
        self.write().outages.insert(service);
        self
    }

    /// Registra una reserva existente.
    pub fn book(&self, booking_id: impl Into<String>, property_id: impl Into<String>, stay: DateRange) {
        self.write().bookings.push(Booking { id: booking_id.into(),
                                             property_id: property_id.into(),
                                             stay });
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }

    fn ensure_up(&self, service: &str) -> Result<(), ServiceError> {
        if self.read().outages.contains(service) {
            return Err(ServiceError::Unavailable(service.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyDirectory for InMemoryPropertyBackend {
    async fn property_exists(&self, property_id: &str) -> Result<bool, ServiceError> {
        self.ensure_up("properties")?;
        Ok(self.read().listings.contains_key(property_id))
    }
}

#[async_trait]
impl TenantDirectory for InMemoryPropertyBackend {
    async fn tenant_exists(&self, tenant_id: &str) -> Result<bool, ServiceError> {
        self.ensure_up("tenants")?;
        Ok(self.read().tenants.contains_key(tenant_id))
    }
}

#[async_trait]
impl AvailabilityService for InMemoryPropertyBackend {
    async fn check_availability(&self, property_id: &str, stay: &DateRange) -> Result<AvailabilityReport, ServiceError> {
        self.ensure_up("availability")?;
        let inner = self.read();
        if !inner.listings.contains_key(property_id) {
            return Err(ServiceError::NotFound(format!("property {property_id}")));
        }
        let conflicts: Vec<String> = inner.bookings
                                          .iter()
                                          .filter(|b| b.property_id == property_id && b.stay.overlaps(stay))
                                          .map(|b| b.id.clone())
                                          .collect();
        Ok(AvailabilityReport { available: conflicts.is_empty(),
                                conflicts })
    }
}

#[async_trait]
impl TenantScreening for InMemoryPropertyBackend {
    async fn background_check(&self, tenant_id: &str) -> Result<ScreeningReport, ServiceError> {
        self.ensure_up("screening")?;
        let inner = self.read();
        let record = inner.tenants
                          .get(tenant_id)
                          .ok_or_else(|| ServiceError::NotFound(format!("tenant {tenant_id}")))?;
        Ok(ScreeningReport { passed: record.score >= PASSING_SCORE,
                             score: record.score,
                             notes: record.notes.clone() })
    }
}

#[async_trait]
impl DocumentVerifier for InMemoryPropertyBackend {
    async fn verify(&self, document: &DocumentRef) -> Result<DocumentVerdict, ServiceError> {
        self.ensure_up("documents")?;
        let reason = self.read().rejected_documents.get(&document.id).cloned();
        Ok(DocumentVerdict { document_id: document.id.clone(),
                             accepted: reason.is_none(),
                             reason })
    }
}

#[async_trait]
impl PricingService for InMemoryPropertyBackend {
    async fn quote(&self, property_id: &str, stay: &DateRange, guests: u32) -> Result<PriceQuote, ServiceError> {
        self.ensure_up("pricing")?;
        let inner = self.read();
        let listing = inner.listings
                           .get(property_id)
                           .ok_or_else(|| ServiceError::NotFound(format!("property {property_id}")))?;
        if guests > listing.max_guests {
            return Err(ServiceError::Rejected(format!("{property_id} allows at most {} guests", listing.max_guests)));
        }
        let nights = stay.nights();
        let subtotal = listing.nightly_rate_cents * u64::from(nights);
        Ok(PriceQuote { nights,
                        nightly_rate_cents: listing.nightly_rate_cents,
                        fees_cents: listing.cleaning_fee_cents,
                        total_cents: subtotal + listing.cleaning_fee_cents,
                        currency: listing.currency.clone() })
    }
}
