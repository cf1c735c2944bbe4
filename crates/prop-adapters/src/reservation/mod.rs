//! Proceso `propertyReservation`.
//!
//! Validación estructural + existencia de propiedad e inquilino, y luego
//! cuatro steps: disponibilidad, verificación del inquilino, documentos y
//! precio. Cada step es dueño de una sola condición de fallo.

mod steps;
mod validator;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use prop_core::{ProcessConfiguration, ProcessDefinition, ProcessRegistry, RegistryError, StepsConfigFile};
use prop_domain::{AvailabilityService, DocumentVerifier, PricingService, PropertyDirectory, TenantDirectory,
                  TenantScreening};

pub use steps::{CalculatePricingStep, CheckAvailabilityStep, ProcessDocumentsStep, VerifyTenantStep};
pub use validator::ReservationValidator;

/// Nombre con el que se registra el proceso.
pub const RESERVATION_PROCESS: &str = "propertyReservation";

/// Identificadores tipados de los steps del proceso de reserva.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReservationStep {
    CheckAvailability,
    VerifyTenant,
    ProcessDocuments,
    CalculatePricing,
}

impl ReservationStep {
    /// Orden canónico.
    pub const ALL: [ReservationStep; 4] = [ReservationStep::CheckAvailability,
                                           ReservationStep::VerifyTenant,
                                           ReservationStep::ProcessDocuments,
                                           ReservationStep::CalculatePricing];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStep::CheckAvailability => "checkAvailability",
            ReservationStep::VerifyTenant => "verifyTenant",
            ReservationStep::ProcessDocuments => "processDocuments",
            ReservationStep::CalculatePricing => "calculatePricing",
        }
    }

    /// Clave del state que escribe el step.
    pub fn state_key(&self) -> &'static str {
        match self {
            ReservationStep::CheckAvailability => "availability",
            ReservationStep::VerifyTenant => "tenantVerification",
            ReservationStep::ProcessDocuments => "documents",
            ReservationStep::CalculatePricing => "pricing",
        }
    }
}

impl fmt::Display for ReservationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Servicios externos que consumen el validador y los steps.
#[derive(Clone)]
pub struct ReservationServices {
    pub properties: Arc<dyn PropertyDirectory>,
    pub tenants: Arc<dyn TenantDirectory>,
    pub availability: Arc<dyn AvailabilityService>,
    pub screening: Arc<dyn TenantScreening>,
    pub documents: Arc<dyn DocumentVerifier>,
    pub pricing: Arc<dyn PricingService>,
}

impl ReservationServices {
    /// Usa un mismo backend para todos los servicios.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
        where B: PropertyDirectory
                  + TenantDirectory
                  + AvailabilityService
                  + TenantScreening
                  + DocumentVerifier
                  + PricingService
                  + 'static
    {
        Self { properties: backend.clone(),
               tenants: backend.clone(),
               availability: backend.clone(),
               screening: backend.clone(),
               documents: backend.clone(),
               pricing: backend }
    }
}

impl fmt::Debug for ReservationServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationServices").finish_non_exhaustive()
    }
}

/// Construye la definición del proceso de reserva.
pub fn build_reservation_process(services: &ReservationServices) -> Result<ProcessDefinition, RegistryError> {
    ProcessDefinition::builder(RESERVATION_PROCESS).validator(ReservationValidator::new(services.properties.clone(),
                                                                                       services.tenants.clone()))
                                                   .step(CheckAvailabilityStep::new(services.availability.clone()))
                                                   .step(VerifyTenantStep::new(services.screening.clone()))
                                                   .step(ProcessDocumentsStep::new(services.documents.clone()))
                                                   .step(CalculatePricingStep::new(services.pricing.clone()))
                                                   .build()
}

/// Orden canónico, todos los steps habilitados.
pub fn default_configuration() -> ProcessConfiguration {
    ProcessConfiguration::new(ReservationStep::ALL.iter().map(ReservationStep::as_str))
}

/// Registra `propertyReservation` en `registry`, aplicando opcionalmente un
/// `StepsConfigFile` sobre la configuración por defecto.
pub fn register_reservation(registry: &mut ProcessRegistry,
                            services: &ReservationServices,
                            overlay: Option<&StepsConfigFile>)
                            -> Result<(), RegistryError> {
    let definition = build_reservation_process(services)?;
    let config = match overlay {
        Some(file) => default_configuration().overlay(file),
        None => default_configuration(),
    };
    registry.register_process(RESERVATION_PROCESS, definition, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_ids_serialize_as_wire_names() {
        for step in ReservationStep::ALL {
            let wire = serde_json::to_value(step).unwrap();
            assert_eq!(wire, serde_json::Value::String(step.as_str().to_string()));
        }
    }

    #[test]
    fn default_configuration_follows_canonical_order() {
        let cfg = default_configuration();
        assert_eq!(cfg.order(),
                   &["checkAvailability", "verifyTenant", "processDocuments", "calculatePricing"]);
    }
}
