//! Inicialización de `env_logger`.
//!
//! `RUST_LOG` tiene prioridad; sin él se usa `info` en desarrollo y `warn` en
//! producción. Los rechazos del limitador salen con target `audit`.
use env_logger::Env;

use crate::config::AppConfig;

/// Filtro por defecto según el entorno.
pub fn default_filter(config: &AppConfig) -> &'static str {
    if config.is_production() {
        "warn,audit=warn"
    } else {
        "info"
    }
}

/// Instala el logger global. Llamadas posteriores no tienen efecto.
pub fn init_logging(config: &AppConfig) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(config))).format_timestamp_millis()
                                                                                                 .try_init();
}
