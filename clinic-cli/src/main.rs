//! Clinic CLI - field validation and patient search for Clinic Desk.
//!
//! Commands:
//! - `clinic validate <field> <value>`: Validate a candidate value
//! - `clinic describe <field>`: Show the constraint for a field
//! - `clinic fields <entity>`: List an entity group's fields
//! - `clinic numeric <value>`: Filter a value down to numeric input
//! - `clinic search <query>`: Ranked patient search via the clinic backend
//!
//! Environment variables:
//! - CLINIC_BASE_URL, CLINIC_PAGE_SIZE, CLINIC_STATUS, CLINIC_TIMEOUT_SECS:
//!   Override backend search settings
//! - RUST_LOG: Log filter when `--debug` is not given
//!
//! Exit codes:
//! - 0: Success (or value allowed)
//! - 1: Error
//! - 2: Value blocked by `validate`

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use clinic::{fields, search, Cli, CliError, Commands};
use clinic_common::Severity;
use clinic_fields::{ConstraintRegistry, ValidateOptions};

async fn run(cli: Cli) -> Result<i32, CliError> {
    let custom;
    let registry = match &cli.constraints {
        Some(path) => {
            custom = ConstraintRegistry::from_path(path)?;
            &custom
        }
        None => ConstraintRegistry::builtin(),
    };

    match cli.command {
        Commands::Validate {
            field,
            value,
            entity,
            max_length,
            label,
            json,
        } => {
            let mut options = ValidateOptions::new();
            if let Some(entity) = entity {
                options = options.entity(entity);
            }
            if let Some(max_length) = max_length {
                options = options.max_length(max_length);
            }
            if let Some(label) = label {
                options = options.label(label);
            }
            fields::run_validate(registry, &field, &value, &options, json)
        }

        Commands::Describe { field, entity } => {
            fields::run_describe(registry, &field, entity).map(|()| 0)
        }

        Commands::Fields { entity } => fields::run_fields(registry, entity).map(|()| 0),

        Commands::Numeric { value, decimal } => {
            fields::run_numeric(&value, decimal);
            Ok(0)
        }

        Commands::Search { query, json } => search::run_search(&query, json).await.map(|()| 0),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("clinic=debug,clinic_fields=debug,clinic_patient_search=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            debug!(severity = ?e.severity(), "Command failed");
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
