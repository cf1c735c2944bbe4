//! Servicio de reservas: punto de entrada de la aplicación.
//!
//! Aplica el límite de tasa por inquilino (agrupado por propiedad), ejecuta
//! `propertyReservation` y resume el resultado en un `ReservationReport`.

use std::sync::Mutex;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use prop_adapters::{register_reservation, ReservationServices, RESERVATION_PROCESS};
use prop_core::{ProcessEngine, ProcessEngineError, ProcessRegistry, ProcessResult, StepsConfigFile};
use prop_domain::{ReservationOutcome, ReservationRequest};
use prop_policies::{RateLimitExceeded, RateLimiter, RequestContext};

use crate::config::{AppConfig, RATE_LIMIT_GROUP_KEY};
use crate::errors::AppError;

/// Clave de límite para pedidos sin `tenantId`.
const ANONYMOUS_KEY: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReservationStatus {
    Confirmed,
    Rejected,
    Throttled,
}

/// Resumen serializable de un intento de reserva.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationReport {
    pub status: ReservationStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ReservationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
    /// Sólo fuera de producción y sólo en rechazos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Value>,
}

impl ReservationReport {
    fn throttled(err: &RateLimitExceeded) -> Self {
        // redondeo hacia arriba
        let secs = err.retry_after.as_secs() + u64::from(err.retry_after.subsec_nanos() > 0);
        Self { status: ReservationStatus::Throttled,
               submitted_at: Utc::now(),
               process_id: None,
               outcome: None,
               error: Some(err.to_string()),
               failed_step: None,
               retry_after_secs: Some(secs),
               diagnostics: None }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}

#[derive(Debug)]
pub struct ReservationService {
    engine: ProcessEngine,
    limiter: RateLimiter,
    include_diagnostics: bool,
    /// Último barrido de ventanas vencidas del limitador.
    last_sweep: Mutex<Instant>,
}

impl ReservationService {
    /// Registra el proceso de reserva sobre `services` y arma el servicio.
    pub fn new(services: &ReservationServices,
               limiter: RateLimiter,
               steps: Option<&StepsConfigFile>,
               include_diagnostics: bool)
               -> Result<Self, AppError> {
        let mut registry = ProcessRegistry::new();
        register_reservation(&mut registry, services, steps)?;
        Ok(Self { engine: ProcessEngine::new(registry),
                  limiter,
                  include_diagnostics,
                  last_sweep: Mutex::new(Instant::now()) })
    }

    /// Servicio configurado desde `AppConfig` (límite, archivo de steps y
    /// diagnósticos fuera de producción).
    pub fn from_config(config: &AppConfig, services: &ReservationServices) -> Result<Self, AppError> {
        let limiter = RateLimiter::new(config.rate_limit.to_config()?);
        let steps = config.load_steps_config()?;
        Self::new(services, limiter, steps.as_ref(), !config.is_production())
    }

    pub fn engine(&self) -> &ProcessEngine {
        &self.engine
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Configuración efectiva de steps (orden y flags).
    pub fn step_configuration(&self) -> Option<StepsConfigFile> {
        self.engine
            .registry()
            .get(RESERVATION_PROCESS)
            .map(|entry| entry.config.describe())
    }

    /// Variante tipada de `submit`.
    pub async fn submit_request(&self, request: &ReservationRequest) -> Result<ReservationReport, AppError> {
        self.submit(serde_json::to_value(request)?).await
    }

    /// Envía una solicitud de reserva.
    ///
    /// Límite de tasa, validación y fallos de steps terminan en un reporte;
    /// sólo los errores de cableado (proceso no registrado, state que no
    /// decodifica) vuelven como `Err`.
    pub async fn submit(&self, input: Value) -> Result<ReservationReport, AppError> {
        let key = input.get("tenantId")
                       .and_then(Value::as_str)
                       .filter(|s| !s.is_empty())
                       .unwrap_or(ANONYMOUS_KEY)
                       .to_string();
        let mut context = RequestContext::new();
        if let Some(property) = input.get(RATE_LIMIT_GROUP_KEY).and_then(Value::as_str) {
            context.insert(RATE_LIMIT_GROUP_KEY.to_string(), property.to_string());
        }
        self.sweep_limiter(Instant::now());
        if let Err(err) = self.limiter.check(&key, Some(&context)) {
            warn!("reservation from {key} throttled: {err}");
            return Ok(ReservationReport::throttled(&err));
        }

        let result = self.engine.execute_process(RESERVATION_PROCESS, input).await?;
        let pid = result.context().process_id();
        let trace = self.engine.take_events(pid);
        debug!("process {pid} emitted {} event(s)", trace.len());
        let result = result.try_map(serde_json::from_value::<ReservationOutcome>)
                           .map_err(|(e, _)| ProcessEngineError::OutputDecode { process: RESERVATION_PROCESS.to_string(),
                                                                                 message: e.to_string() })?;
        Ok(self.report(result))
    }

    /// A lo sumo una vez por ventana descarta las claves y grupos sin pedidos
    /// vigentes, para que el limitador no crezca con cada inquilino visto.
    fn sweep_limiter(&self, now: Instant) {
        let mut last = self.last_sweep.lock().unwrap_or_else(|p| p.into_inner());
        if now.saturating_duration_since(*last) < self.limiter.config().window() {
            return;
        }
        *last = now;
        drop(last);
        self.limiter.cleanup_at(now);
    }

    fn report(&self, result: ProcessResult<ReservationOutcome>) -> ReservationReport {
        let pid = result.context().process_id();
        let process_id = Some(pid);
        match result {
            ProcessResult::Success { data, .. } => {
                info!("reservation confirmed [{pid}]");
                ReservationReport { status: ReservationStatus::Confirmed,
                                    submitted_at: Utc::now(),
                                    process_id,
                                    outcome: Some(data),
                                    error: None,
                                    failed_step: None,
                                    retry_after_secs: None,
                                    diagnostics: None }
            }
            ProcessResult::Failure { error, context } => {
                info!("reservation rejected [{pid}]: {error}");
                ReservationReport { status: ReservationStatus::Rejected,
                                    submitted_at: Utc::now(),
                                    process_id,
                                    outcome: None,
                                    error: Some(error.to_string()),
                                    failed_step: error.step().map(str::to_string),
                                    retry_after_secs: None,
                                    diagnostics: self.include_diagnostics.then(|| context.diagnostic()) }
            }
        }
    }
}
