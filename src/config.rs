//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! Los valores que no parsean caen a su default en lugar de abortar.
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use prop_core::StepsConfigFile;
use prop_policies::{RateLimitConfig, RateLimitConfigError};

use crate::errors::AppError;

/// Campo del pedido que agrupa el límite de tasa (una propiedad).
pub const RATE_LIMIT_GROUP_KEY: &str = "propertyId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    pub rate_limit: RateLimitSettings,
    /// Archivo JSON opcional con `order`/`enabled` de los steps.
    pub steps_config: Option<PathBuf>,
}

/// Parámetros crudos del limitador de reservas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
    pub burst: Option<u32>,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self { max_requests: 10,
               window_secs: 60,
               burst: None }
    }
}

impl RateLimitSettings {
    /// Valida los parámetros y arma la configuración agrupada por propiedad.
    pub fn to_config(&self) -> Result<RateLimitConfig, RateLimitConfigError> {
        let cfg = RateLimitConfig::new(self.max_requests, Duration::from_secs(self.window_secs))?;
        let cfg = match self.burst {
            Some(b) => cfg.with_burst_limit(b)?,
            None => cfg,
        };
        Ok(cfg.with_group_key(RATE_LIMIT_GROUP_KEY))
    }
}

impl AppConfig {
    /// Lee `.env` (si existe) y luego el entorno del proceso.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignora error si no existe .env
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let environment = match lookup("PROPFLOW_ENV").as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        };
        let defaults = RateLimitSettings::default();
        let rate_limit =
            RateLimitSettings { max_requests: lookup("RATE_LIMIT_MAX_REQUESTS").and_then(|v| v.trim().parse().ok())
                                                                               .unwrap_or(defaults.max_requests),
                                window_secs: lookup("RATE_LIMIT_WINDOW_SECS").and_then(|v| v.trim().parse().ok())
                                                                             .unwrap_or(defaults.window_secs),
                                burst: lookup("RATE_LIMIT_BURST").and_then(|v| v.trim().parse().ok()) };
        let steps_config = lookup("PROPFLOW_STEPS_CONFIG").filter(|v| !v.trim().is_empty())
                                                          .map(PathBuf::from);
        Self { environment,
               rate_limit,
               steps_config }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Lee y decodifica el archivo de steps, si hay uno configurado.
    pub fn load_steps_config(&self) -> Result<Option<StepsConfigFile>, AppError> {
        let Some(path) = &self.steps_config else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)?;
        Ok(Some(StepsConfigFile::from_json_str(&raw)?))
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
