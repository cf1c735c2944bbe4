//! `propflow`: CLI de demostración sobre el backend en memoria.
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::error;

use prop_adapters::{InMemoryPropertyBackend, ReservationServices, ReservationStep};
use prop_domain::{DocumentRef, ReservationRequest};
use propflow::logging::init_logging;
use propflow::{AppConfig, AppError, ReservationService, CONFIG};

/// PropFlow - reservas de propiedades sobre un motor de procesos por pasos
#[derive(Parser)]
#[command(name = "propflow")]
#[command(version)]
struct Cli {
    /// Archivo JSON de steps (reemplaza a PROPFLOW_STEPS_CONFIG)
    #[arg(long, global = true)]
    steps_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Envía una reserva contra el backend de demostración e imprime el reporte
    Reserve {
        #[arg(long)]
        property: String,
        #[arg(long)]
        tenant: String,
        /// Fecha de entrada (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Fecha de salida (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, default_value_t = 1)]
        guests: u32,
        /// Documento adjunto como `id:tipo`; se puede repetir
        #[arg(long = "document", value_parser = parse_document)]
        documents: Vec<DocumentRef>,
        /// JSON compacto en una línea
        #[arg(long)]
        compact: bool,
    },
    /// Muestra el orden y los flags efectivos de los steps
    Steps,
}

fn parse_document(raw: &str) -> Result<DocumentRef, String> {
    match raw.split_once(':') {
        Some((id, kind)) if !id.is_empty() && !kind.is_empty() => Ok(DocumentRef { id: id.to_string(),
                                                                                   kind: kind.to_string() }),
        _ => Err(format!("expected `id:kind`, got `{raw}`")),
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let services = ReservationServices::from_backend(Arc::new(InMemoryPropertyBackend::demo()));
    let service = ReservationService::from_config(&config, &services)?;

    match cli.command {
        Commands::Reserve { property,
                            tenant,
                            start,
                            end,
                            guests,
                            documents,
                            compact, } => {
            let request = ReservationRequest { property_id: property,
                                               tenant_id: tenant,
                                               start_date: start,
                                               end_date: end,
                                               guests,
                                               documents };
            let report = service.submit_request(&request).await?;
            let out = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{out}");
        }
        Commands::Steps => {
            let known: Vec<&str> = ReservationStep::ALL.iter().map(ReservationStep::as_str).collect();
            println!("steps: {}", known.join(", "));
            if let Some(effective) = service.step_configuration() {
                println!("{}", serde_json::to_string_pretty(&effective)?);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = (*CONFIG).clone();
    if let Some(path) = &cli.steps_config {
        config.steps_config = Some(path.clone());
    }
    init_logging(&config);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("propflow: {e}");
            ExitCode::FAILURE
        }
    }
}
