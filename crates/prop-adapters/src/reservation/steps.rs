//! Steps del proceso de reserva.
//!
//! Cada step lee la solicitud desde `ctx.input()`, llama a un servicio y
//! traduce la respuesta a `StepOutcome`. Los errores de servicio pasan a ser
//! `StepError::Service`.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde_json::{Map, Value};

use prop_core::{ProcessContext, ProcessStep, StepError, StepOutcome};
use prop_domain::{AvailabilityService, DateRange, DocumentVerifier, DocumentsSummary, PricingService,
                  ReservationRequest, ServiceError, TenantScreening};

use super::ReservationStep;

/// Solicitud ya decodificada junto con su rango de estadía.
fn request(ctx: &ProcessContext) -> Result<(ReservationRequest, DateRange), StepError> {
    let req: ReservationRequest =
        serde_json::from_value(ctx.input().clone()).map_err(|e| StepError::failed(format!("invalid reservation request: {e}")))?;
    let stay = req.stay().map_err(|e| StepError::failed(e.to_string()))?;
    Ok((req, stay))
}

fn service_error(service: &str) -> impl Fn(ServiceError) -> StepError + '_ {
    move |e| StepError::service(service, e.to_string())
}

/// Empaqueta `value` bajo la clave de state del step.
fn write<T: Serialize>(step: ReservationStep, value: &T) -> Result<Value, StepError> {
    let encoded = serde_json::to_value(value).map_err(|e| StepError::failed(format!("{step}: {e}")))?;
    let mut data = Map::new();
    data.insert(step.state_key().to_string(), encoded);
    Ok(Value::Object(data))
}

pub struct CheckAvailabilityStep {
    service: Arc<dyn AvailabilityService>,
}

impl CheckAvailabilityStep {
    pub fn new(service: Arc<dyn AvailabilityService>) -> Self {
        Self { service }
    }

    async fn run(&self, ctx: &ProcessContext) -> Result<Value, StepError> {
        let (req, stay) = request(ctx)?;
        let report = self.service
                         .check_availability(&req.property_id, &stay)
                         .await
                         .map_err(service_error("availability"))?;
        if !report.available {
            return Err(StepError::failed(format!("property {} is not available from {} to {}",
                                                 req.property_id,
                                                 stay.start(),
                                                 stay.end())));
        }
        write(ReservationStep::CheckAvailability, &report)
    }
}

#[async_trait]
impl ProcessStep for CheckAvailabilityStep {
    fn name(&self) -> &str {
        ReservationStep::CheckAvailability.as_str()
    }

    fn writes(&self) -> &[&'static str] {
        &["availability"]
    }

    async fn execute(&self, ctx: &ProcessContext) -> StepOutcome {
        self.run(ctx).await.into()
    }
}

pub struct VerifyTenantStep {
    service: Arc<dyn TenantScreening>,
}

impl VerifyTenantStep {
    pub fn new(service: Arc<dyn TenantScreening>) -> Self {
        Self { service }
    }

    async fn run(&self, ctx: &ProcessContext) -> Result<Value, StepError> {
        let (req, _) = request(ctx)?;
        let report = self.service
                         .background_check(&req.tenant_id)
                         .await
                         .map_err(service_error("screening"))?;
        if !report.passed {
            return Err(StepError::failed(format!("tenant {} failed background check", req.tenant_id)));
        }
        write(ReservationStep::VerifyTenant, &report)
    }
}

#[async_trait]
impl ProcessStep for VerifyTenantStep {
    fn name(&self) -> &str {
        ReservationStep::VerifyTenant.as_str()
    }

    fn writes(&self) -> &[&'static str] {
        &["tenantVerification"]
    }

    async fn execute(&self, ctx: &ProcessContext) -> StepOutcome {
        self.run(ctx).await.into()
    }
}

/// Sólo corre cuando la solicitud trae documentos.
pub struct ProcessDocumentsStep {
    service: Arc<dyn DocumentVerifier>,
}

impl ProcessDocumentsStep {
    pub fn new(service: Arc<dyn DocumentVerifier>) -> Self {
        Self { service }
    }

    async fn run(&self, ctx: &ProcessContext) -> Result<Value, StepError> {
        let (req, _) = request(ctx)?;
        let mut verified = Vec::with_capacity(req.documents.len());
        for doc in &req.documents {
            let verdict = self.service.verify(doc).await.map_err(service_error("documents"))?;
            if !verdict.accepted {
                let reason = verdict.reason.unwrap_or_else(|| "no reason given".to_string());
                return Err(StepError::failed(format!("document {} rejected: {reason}", doc.id)));
            }
            debug!("document {} ({}) accepted", doc.id, doc.kind);
            verified.push(verdict.document_id);
        }
        write(ReservationStep::ProcessDocuments, &DocumentsSummary { verified })
    }
}

#[async_trait]
impl ProcessStep for ProcessDocumentsStep {
    fn name(&self) -> &str {
        ReservationStep::ProcessDocuments.as_str()
    }

    fn condition(&self, ctx: &ProcessContext) -> bool {
        ctx.input_field("documents")
           .and_then(Value::as_array)
           .is_some_and(|docs| !docs.is_empty())
    }

    fn writes(&self) -> &[&'static str] {
        &["documents"]
    }

    async fn execute(&self, ctx: &ProcessContext) -> StepOutcome {
        self.run(ctx).await.into()
    }
}

pub struct CalculatePricingStep {
    service: Arc<dyn PricingService>,
}

impl CalculatePricingStep {
    pub fn new(service: Arc<dyn PricingService>) -> Self {
        Self { service }
    }

    async fn run(&self, ctx: &ProcessContext) -> Result<Value, StepError> {
        let (req, stay) = request(ctx)?;
        let quote = self.service
                        .quote(&req.property_id, &stay, req.guests)
                        .await
                        .map_err(service_error("pricing"))?;
        info!("quoted {} {} for {} night(s) at {}",
              quote.total_cents,
              quote.currency,
              quote.nights,
              req.property_id);
        write(ReservationStep::CalculatePricing, &quote)
    }
}

#[async_trait]
impl ProcessStep for CalculatePricingStep {
    fn name(&self) -> &str {
        ReservationStep::CalculatePricing.as_str()
    }

    fn writes(&self) -> &[&'static str] {
        &["pricing"]
    }

    async fn execute(&self, ctx: &ProcessContext) -> StepOutcome {
        self.run(ctx).await.into()
    }
}
