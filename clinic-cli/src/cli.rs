//! CLI definition for the `clinic` command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clinic_fields::Entity;

/// Clinic Desk - field validation and patient search.
///
/// Validates form values against the clinic's field constraint table exactly
/// as the desk forms do on every keystroke, and runs ranked patient searches
/// against the clinic backend.
///
/// Backend settings come from clinic.toml / clinic.yaml in the working
/// directory and CLINIC_* environment variables (e.g. CLINIC_BASE_URL).
#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(version)]
#[command(about = "Field validation and patient search for Clinic Desk")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Use this constraint table (YAML) instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    pub constraints: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a candidate value for a field
    ///
    /// Exits 0 when the value may be committed and 2 when it is blocked.
    Validate {
        /// Field name, e.g. labTestName
        field: String,
        /// Candidate value
        value: String,
        /// Entity group the field belongs to (e.g. labMaster)
        #[arg(short, long)]
        entity: Option<Entity>,
        /// Override the field's maximum length
        #[arg(long)]
        max_length: Option<usize>,
        /// Override the field's display label
        #[arg(long)]
        label: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the constraint that applies to a field
    Describe {
        /// Field name
        field: String,
        /// Entity group to look in; otherwise the first group declaring it
        #[arg(short, long)]
        entity: Option<Entity>,
    },

    /// List the fields declared for an entity group
    Fields {
        /// Entity group, e.g. patient
        entity: Entity,
    },

    /// Strip a value down to a numeric input
    Numeric {
        /// Raw input
        value: String,
        /// Keep the first decimal point
        #[arg(long)]
        decimal: bool,
    },

    /// Search patients through the clinic backend
    Search {
        /// Id, mobile number or name
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
